//! Camera component

use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentKind};
use crate::editor::Inspector;
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::serialization::{PropertyTable, PropertyValue, SerializedObject, Value};

/// Projection model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Perspective projection driven by `fov`
    #[default]
    Perspective,
    /// Orthographic projection driven by `orthographic_size`
    Orthographic,
}

impl Projection {
    fn as_str(self) -> &'static str {
        match self {
            Projection::Perspective => "perspective",
            Projection::Orthographic => "orthographic",
        }
    }
}

impl PropertyValue for Projection {
    const TYPE_NAME: &'static str = "projection";

    fn to_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "perspective" => Some(Projection::Perspective),
            Value::String(s) if s == "orthographic" => Some(Projection::Orthographic),
            _ => None,
        }
    }
}

/// Viewpoint the scene is rendered from
///
/// Matrices are built from the owner's world-to-local matrix and the viewport
/// aspect ratio, both supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    projection: Projection,
    near_plane: f32,
    far_plane: f32,
    orthographic_size: f32,
    /// Vertical field of view in degrees
    fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            near_plane: 0.1,
            far_plane: 10000.0,
            orthographic_size: 100.0,
            fov: 60.0,
        }
    }
}

impl Camera {
    /// Projection model
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Switch projection model
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Near clip distance
    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    /// Far clip distance
    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    /// Set both clip distances
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near_plane = near;
        self.far_plane = far;
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Set the vertical field of view in degrees
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Half height of the orthographic view volume
    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    /// Set the orthographic half height
    pub fn set_orthographic_size(&mut self, size: f32) {
        self.orthographic_size = size;
    }

    /// Projection matrix for a viewport of the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => Mat4::perspective(
                utils::deg_to_rad(self.fov),
                aspect,
                self.near_plane,
                self.far_plane,
            ),
            Projection::Orthographic => {
                let half_height = self.orthographic_size;
                let half_width = half_height * aspect;
                Mat4::orthographic(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near_plane,
                    self.far_plane,
                )
            }
        }
    }

    /// View-projection matrix
    pub fn world_to_camera_matrix(&self, world_to_local: &Mat4, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * world_to_local
    }

    /// Inverse projection (clip space back to view space)
    ///
    /// Orthographic cameras report identity.
    pub fn camera_to_world_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => self
                .projection_matrix(aspect)
                .try_inverse()
                .unwrap_or_else(Mat4::identity),
            Projection::Orthographic => Mat4::identity(),
        }
    }
}

impl SerializedObject for Camera {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("projection", &mut self.projection, Projection::Perspective);
        table.property("near_plane", &mut self.near_plane, 0.1);
        table.property("far_plane", &mut self.far_plane, 10000.0);
        table.property("fov", &mut self.fov, 60.0);
        table.property("orthographic_size", &mut self.orthographic_size, 100.0);
    }
}

impl Component for Camera {
    const KIND: ComponentKind = ComponentKind::Camera;

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        let mut orthographic = self.projection == Projection::Orthographic;
        if ui.checkbox("Orthographic", &mut orthographic) {
            self.projection = if orthographic {
                Projection::Orthographic
            } else {
                Projection::Perspective
            };
        }
        ui.drag_f32("Near Plane", &mut self.near_plane, 0.01, 0.001, self.far_plane);
        ui.drag_f32("Far Plane", &mut self.far_plane, 1.0, self.near_plane, f32::MAX);
        match self.projection {
            Projection::Perspective => {
                ui.drag_f32("FOV", &mut self.fov, 0.5, 1.0, 179.0);
            }
            Projection::Orthographic => {
                ui.drag_f32("Size", &mut self.orthographic_size, 0.5, 0.01, f32::MAX);
            }
        }
    }

    component_variant!(Camera);
}
