//! Free-flying editor camera controller

use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentContext, ComponentKind};
use crate::editor::Inspector;
use crate::foundation::math::{directions, utils, Vec2, Vec3};
use crate::serialization::{PropertyTable, SerializedObject};

/// Moves the owner from host-supplied input
///
/// The host calls [`Freecam::set_input`] with the frame's movement axes and
/// mouse delta; the next update applies and clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct Freecam {
    move_speed: f32,
    /// Degrees of rotation per unit of look input
    look_sensitivity: f32,

    pending_move: Vec3,
    pending_look: Vec2,
}

impl Default for Freecam {
    fn default() -> Self {
        Self {
            move_speed: 20.0,
            look_sensitivity: 0.2,
            pending_move: Vec3::zeros(),
            pending_look: Vec2::zeros(),
        }
    }
}

impl Freecam {
    /// Queue input for the next update
    ///
    /// `move_axis` is in local space (x right, y up, -z forwards) and is
    /// clamped to unit length; `look_delta` is (yaw, pitch) input.
    pub fn set_input(&mut self, move_axis: Vec3, look_delta: Vec2) {
        self.pending_move = move_axis;
        self.pending_look += look_delta;
    }

    /// Movement speed in units per second
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Set movement speed
    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }
}

impl SerializedObject for Freecam {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("move_speed", &mut self.move_speed, 20.0);
        table.property("look_sensitivity", &mut self.look_sensitivity, 0.2);
    }
}

impl Component for Freecam {
    const KIND: ComponentKind = ComponentKind::Freecam;

    fn update(&mut self, delta_time: f32, ctx: &mut ComponentContext<'_>) {
        let movement = std::mem::replace(&mut self.pending_move, Vec3::zeros());
        let look = std::mem::replace(&mut self.pending_look, Vec2::zeros());
        let Some(transform) = ctx.transform_mut() else {
            return;
        };

        if look != Vec2::zeros() {
            // Yaw around world up, pitch around the camera's own right axis
            let yaw = utils::axis_angle(directions::up(), -utils::deg_to_rad(look.x * self.look_sensitivity));
            let pitch = utils::axis_angle(directions::right(), -utils::deg_to_rad(look.y * self.look_sensitivity));
            transform.set_rotation_local(yaw * transform.rotation_local() * pitch);
        }

        let length = movement.norm();
        if length > f32::EPSILON {
            let direction = movement / length.max(1.0);
            let offset = transform.rotation_local() * direction * self.move_speed * delta_time;
            transform.translate_local(offset);
        }
    }

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        ui.drag_f32("Move Speed", &mut self.move_speed, 0.5, 0.0, f32::MAX);
        ui.drag_f32("Look Sensitivity", &mut self.look_sensitivity, 0.01, 0.0, 10.0);
    }

    component_variant!(Freecam);
}
