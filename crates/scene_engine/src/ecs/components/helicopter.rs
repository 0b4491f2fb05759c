//! Helicopter component

use std::f32::consts::TAU;

use crate::ecs::component::component_variant;
use crate::ecs::{Component, ComponentContext, ComponentKind};
use crate::editor::Inspector;
use crate::foundation::math::{directions, utils};
use crate::serialization::{PropertyTable, SerializedObject};

/// Flies the owner along its forward axis
///
/// Throttle and steering are control inputs set by the host (or a script)
/// each frame; the tuning values are persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Helicopter {
    max_speed: f32,
    acceleration: f32,
    /// Degrees per second at full steering
    turn_rate: f32,
    /// Rotor revolutions per second at full throttle
    rotor_speed: f32,

    throttle: f32,
    steering: f32,
    speed: f32,
    rotor_angle: f32,
}

impl Default for Helicopter {
    fn default() -> Self {
        Self {
            max_speed: 40.0,
            acceleration: 8.0,
            turn_rate: 45.0,
            rotor_speed: 6.0,
            throttle: 0.0,
            steering: 0.0,
            speed: 0.0,
            rotor_angle: 0.0,
        }
    }
}

impl Helicopter {
    /// Set throttle, clamped to 0..1
    pub fn set_throttle(&mut self, throttle: f32) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    /// Throttle input
    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    /// Set steering, clamped to -1 (left) .. 1 (right)
    pub fn set_steering(&mut self, steering: f32) {
        self.steering = steering.clamp(-1.0, 1.0);
    }

    /// Current forward speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Top speed
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Main rotor angle in radians, 0..TAU
    pub fn rotor_angle(&self) -> f32 {
        self.rotor_angle
    }
}

impl SerializedObject for Helicopter {
    fn serialize<P: PropertyTable>(&mut self, table: &mut P) {
        table.property("max_speed", &mut self.max_speed, 40.0);
        table.property("acceleration", &mut self.acceleration, 8.0);
        table.property("turn_rate", &mut self.turn_rate, 45.0);
        table.property("rotor_speed", &mut self.rotor_speed, 6.0);
    }
}

impl Component for Helicopter {
    const KIND: ComponentKind = ComponentKind::Helicopter;

    fn update(&mut self, delta_time: f32, ctx: &mut ComponentContext<'_>) {
        let target = self.throttle * self.max_speed;
        self.speed = utils::move_towards(self.speed, target, self.acceleration * delta_time);
        self.rotor_angle = (self.rotor_angle + self.rotor_speed * self.throttle * TAU * delta_time) % TAU;

        let Some(transform) = ctx.transform_mut() else {
            return;
        };
        if self.steering != 0.0 {
            // Positive steering turns right, i.e. clockwise seen from above
            let angle = -utils::deg_to_rad(self.turn_rate * self.steering) * delta_time;
            transform.rotate_local(angle, directions::up());
        }
        if self.speed > 0.0 {
            let step = transform.forwards() * self.speed * delta_time;
            transform.translate_local(step);
        }
    }

    fn draw_properties(&mut self, ui: &mut dyn Inspector) {
        ui.drag_f32("Max Speed", &mut self.max_speed, 0.5, 0.0, f32::MAX);
        ui.drag_f32("Acceleration", &mut self.acceleration, 0.1, 0.0, f32::MAX);
        ui.drag_f32("Turn Rate", &mut self.turn_rate, 0.5, 0.0, 360.0);
        ui.drag_f32("Rotor Speed", &mut self.rotor_speed, 0.1, 0.0, 60.0);
        ui.text(&format!("Speed: {:.1}", self.speed));
    }

    component_variant!(Helicopter);
}
