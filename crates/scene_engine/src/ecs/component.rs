//! Component contract and the closed set of component variants
//!
//! [`ComponentKind`] is the registry: its exhaustive `create` match is the only
//! place a type tag is turned into a component, so adding a variant without
//! registering it does not compile.

use std::fmt;

use thiserror::Error;

use super::components::{Camera, Freecam, Helicopter, StaticMesh, StaticTurret, Terrain, Transform};
use super::ComponentContext;
use crate::editor::Inspector;
use crate::serialization::{PropertyTable, SerializedObject};

/// Component registry and removal errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// No component variant is registered under this tag
    #[error("Unknown component type '{0}'")]
    UnknownComponentType(String),

    /// Every gameobject keeps exactly one Transform
    #[error("The Transform component cannot be removed")]
    TransformRequired,
}

/// Type tag of a component variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// [`Transform`]
    Transform,
    /// [`Camera`]
    Camera,
    /// [`StaticMesh`]
    StaticMesh,
    /// [`Terrain`]
    Terrain,
    /// [`Helicopter`]
    Helicopter,
    /// [`Freecam`]
    Freecam,
    /// [`StaticTurret`]
    StaticTurret,
}

impl ComponentKind {
    /// Every registered variant, in editor menu order
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Transform,
        ComponentKind::Camera,
        ComponentKind::StaticMesh,
        ComponentKind::Terrain,
        ComponentKind::Helicopter,
        ComponentKind::Freecam,
        ComponentKind::StaticTurret,
    ];

    /// Stable tag, used both as editor label and serialization key
    pub const fn tag(self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Camera => "Camera",
            ComponentKind::StaticMesh => "StaticMesh",
            ComponentKind::Terrain => "Terrain",
            ComponentKind::Helicopter => "Helicopter",
            ComponentKind::Freecam => "Freecam",
            ComponentKind::StaticTurret => "StaticTurret",
        }
    }

    /// Look up a variant by tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Construct a default instance of this variant
    pub fn create(self) -> AnyComponent {
        match self {
            ComponentKind::Transform => AnyComponent::Transform(Transform::default()),
            ComponentKind::Camera => AnyComponent::Camera(Camera::default()),
            ComponentKind::StaticMesh => AnyComponent::StaticMesh(StaticMesh::default()),
            ComponentKind::Terrain => AnyComponent::Terrain(Terrain::default()),
            ComponentKind::Helicopter => AnyComponent::Helicopter(Helicopter::default()),
            ComponentKind::Freecam => AnyComponent::Freecam(Freecam::default()),
            ComponentKind::StaticTurret => AnyComponent::StaticTurret(StaticTurret::default()),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Behaviour shared by every component variant
pub trait Component: SerializedObject + Clone + Default + fmt::Debug + 'static {
    /// Variant tag
    const KIND: ComponentKind;

    /// Advance one frame
    fn update(&mut self, _delta_time: f32, _ctx: &mut ComponentContext<'_>) {}

    /// Draw editor widgets for this component
    fn draw_properties(&mut self, _ui: &mut dyn Inspector) {}

    /// Borrow from the type-erased form
    fn from_any(component: &AnyComponent) -> Option<&Self>;

    /// Mutably borrow from the type-erased form
    fn from_any_mut(component: &mut AnyComponent) -> Option<&mut Self>;

    /// Unwrap from the type-erased form, handing it back on a kind mismatch
    fn try_from_any(component: AnyComponent) -> Result<Self, AnyComponent>;

    /// Wrap into the type-erased form
    fn into_any(self) -> AnyComponent;
}

/// Implements the `AnyComponent` conversions of [`Component`] for one variant
macro_rules! component_variant {
    ($variant:ident) => {
        fn from_any(component: &$crate::ecs::AnyComponent) -> Option<&Self> {
            match component {
                $crate::ecs::AnyComponent::$variant(inner) => Some(inner),
                _ => None,
            }
        }

        fn from_any_mut(component: &mut $crate::ecs::AnyComponent) -> Option<&mut Self> {
            match component {
                $crate::ecs::AnyComponent::$variant(inner) => Some(inner),
                _ => None,
            }
        }

        fn try_from_any(
            component: $crate::ecs::AnyComponent,
        ) -> Result<Self, $crate::ecs::AnyComponent> {
            match component {
                $crate::ecs::AnyComponent::$variant(inner) => Ok(inner),
                other => Err(other),
            }
        }

        fn into_any(self) -> $crate::ecs::AnyComponent {
            $crate::ecs::AnyComponent::$variant(self)
        }
    };
}

pub(crate) use component_variant;

/// A component of any registered variant
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum AnyComponent {
    Transform(Transform),
    Camera(Camera),
    StaticMesh(StaticMesh),
    Terrain(Terrain),
    Helicopter(Helicopter),
    Freecam(Freecam),
    StaticTurret(StaticTurret),
}

/// Forward a call to whichever variant is held
macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            AnyComponent::Transform($inner) => $body,
            AnyComponent::Camera($inner) => $body,
            AnyComponent::StaticMesh($inner) => $body,
            AnyComponent::Terrain($inner) => $body,
            AnyComponent::Helicopter($inner) => $body,
            AnyComponent::Freecam($inner) => $body,
            AnyComponent::StaticTurret($inner) => $body,
        }
    };
}

impl AnyComponent {
    /// Variant tag
    pub fn kind(&self) -> ComponentKind {
        match self {
            AnyComponent::Transform(_) => ComponentKind::Transform,
            AnyComponent::Camera(_) => ComponentKind::Camera,
            AnyComponent::StaticMesh(_) => ComponentKind::StaticMesh,
            AnyComponent::Terrain(_) => ComponentKind::Terrain,
            AnyComponent::Helicopter(_) => ComponentKind::Helicopter,
            AnyComponent::Freecam(_) => ComponentKind::Freecam,
            AnyComponent::StaticTurret(_) => ComponentKind::StaticTurret,
        }
    }

    /// Variant tag as a string
    pub fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Advance one frame
    pub fn update(&mut self, delta_time: f32, ctx: &mut ComponentContext<'_>) {
        dispatch!(self, inner => inner.update(delta_time, ctx))
    }

    /// Draw editor widgets
    pub fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        dispatch!(self, inner => inner.draw_properties(ui))
    }

    /// Borrow as a concrete variant
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        T::from_any(self)
    }

    /// Mutably borrow as a concrete variant
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        T::from_any_mut(self)
    }
}

impl SerializedObject for AnyComponent {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        dispatch!(self, inner => inner.serialize(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(kind.create().kind(), kind);
        }
        assert_eq!(ComponentKind::from_tag("Rigidbody"), None);
    }

    #[test]
    fn test_downcast() {
        let mut component = ComponentKind::Camera.create();
        assert!(component.downcast_ref::<Camera>().is_some());
        assert!(component.downcast_ref::<Transform>().is_none());
        assert!(component.downcast_mut::<Camera>().is_some());

        let back = Camera::try_from_any(component).unwrap();
        assert_eq!(back.into_any().tag(), "Camera");
    }
}
