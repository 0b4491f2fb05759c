//! Transform component
//!
//! Local position, rotation and scale with cached matrices. Every gameobject
//! has exactly one. Parenting is a runtime link resolved by the
//! `SceneManager`; the matrices here are always local.

use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentKind, GameObjectId};
use crate::editor::Inspector;
use crate::foundation::math::{directions, Mat4, Mat4Ext, Quat, Quaternion, Vec3};
use crate::serialization::{PropertyTable, SerializedObject};

/// Spatial placement of a gameobject
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    local_to_world: Mat4,
    world_to_local: Mat4,
    parent: Option<GameObjectId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            local_to_world: Mat4::identity(),
            world_to_local: Mat4::identity(),
            parent: None,
        }
    }
}

impl Transform {
    /// Identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Builder pattern: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position_local(position);
        self
    }

    /// Builder pattern: set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_rotation_local(rotation);
        self
    }

    /// Builder pattern: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale_local(scale);
        self
    }

    /// Local position
    pub fn position_local(&self) -> Vec3 {
        self.position
    }

    /// Local rotation
    pub fn rotation_local(&self) -> Quat {
        self.rotation
    }

    /// Local scale
    pub fn scale_local(&self) -> Vec3 {
        self.scale
    }

    /// Set local position
    pub fn set_position_local(&mut self, position: Vec3) {
        self.position = position;
        self.recompute_matrices();
    }

    /// Set local rotation
    pub fn set_rotation_local(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.recompute_matrices();
    }

    /// Set local scale
    pub fn set_scale_local(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recompute_matrices();
    }

    /// Move by `offset` in parent space
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += offset;
        self.recompute_matrices();
    }

    /// Rotate by `angle` radians around `axis` in parent space
    pub fn rotate_local(&mut self, angle: f32, axis: Vec3) {
        let Some(axis) = nalgebra::Unit::try_new(axis, f32::EPSILON) else {
            return;
        };
        self.rotation = Quat::from_axis_angle(&axis, angle) * self.rotation;
        self.recompute_matrices();
    }

    /// Cached local-to-world matrix (TRS)
    pub fn local_to_world(&self) -> &Mat4 {
        &self.local_to_world
    }

    /// Cached world-to-local matrix
    pub fn world_to_local(&self) -> &Mat4 {
        &self.world_to_local
    }

    /// Local -Z rotated into parent space
    pub fn forwards(&self) -> Vec3 {
        self.rotation * directions::forwards()
    }

    /// Local +Z rotated into parent space
    pub fn backwards(&self) -> Vec3 {
        self.rotation * directions::backwards()
    }

    /// Local +X rotated into parent space
    pub fn right(&self) -> Vec3 {
        self.rotation * directions::right()
    }

    /// Local -X rotated into parent space
    pub fn left(&self) -> Vec3 {
        self.rotation * directions::left()
    }

    /// Local +Y rotated into parent space
    pub fn up(&self) -> Vec3 {
        self.rotation * directions::up()
    }

    /// Local -Y rotated into parent space
    pub fn down(&self) -> Vec3 {
        self.rotation * directions::down()
    }

    /// Parent gameobject, if any
    pub fn parent(&self) -> Option<GameObjectId> {
        self.parent
    }

    /// Attach to or detach from a parent gameobject
    pub fn set_parent(&mut self, parent: Option<GameObjectId>) {
        self.parent = parent;
    }

    fn recompute_matrices(&mut self) {
        self.local_to_world = Mat4::trs(&self.position, &self.rotation, &self.scale);
        self.world_to_local = Mat4::trs_inverse(&self.position, &self.rotation, &self.scale);
    }
}

impl SerializedObject for Transform {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("Position", &mut self.position, Vec3::zeros());
        table.property("Rotation", &mut self.rotation, Quat::identity());
        table.property("Scale", &mut self.scale, Vec3::new(1.0, 1.0, 1.0));
        self.recompute_matrices();
    }
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        let mut changed = ui.drag_vec3("Position", &mut self.position, 0.1);

        let mut coords = self.rotation.coords;
        if ui.drag_vec4("Rotation", &mut coords, 0.01, -1.0, 1.0) {
            // Keep the stored rotation a unit quaternion while it is dragged
            if coords.norm() > f32::EPSILON {
                self.rotation = Quat::new_normalize(Quaternion::from(coords));
                changed = true;
            }
        }

        changed |= ui.drag_vec3("Scale", &mut self.scale, 0.1);

        if changed {
            self.recompute_matrices();
        }
    }

    component_variant!(Transform);
}
