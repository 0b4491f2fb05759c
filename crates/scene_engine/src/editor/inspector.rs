//! Immediate-mode property widgets
//!
//! Components describe their editor UI against this trait; the host adapts
//! it to whatever GUI library it uses. Every widget returns `true` when the
//! user changed the value (or pressed the button) this frame.

use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Widget set used by `draw_properties`
pub trait Inspector {
    /// Draggable float clamped to `min..=max`
    fn drag_f32(&mut self, label: &str, value: &mut f32, speed: f32, min: f32, max: f32) -> bool;

    /// Draggable integer
    fn drag_i32(&mut self, label: &str, value: &mut i32, speed: f32) -> bool;

    /// Draggable 2 component vector
    fn drag_vec2(&mut self, label: &str, value: &mut Vec2, speed: f32) -> bool;

    /// Draggable 3 component vector
    fn drag_vec3(&mut self, label: &str, value: &mut Vec3, speed: f32) -> bool;

    /// Draggable 4 component vector clamped per component
    fn drag_vec4(&mut self, label: &str, value: &mut Vec4, speed: f32, min: f32, max: f32) -> bool;

    /// Checkbox
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;

    /// Single line text field
    fn edit_text(&mut self, label: &str, value: &mut String) -> bool;

    /// Push button
    fn button(&mut self, label: &str) -> bool;

    /// Read-only text
    fn text(&mut self, text: &str);

    /// Collapsible section; returns whether its contents should be drawn
    fn collapsing_header(&mut self, label: &str) -> bool;
}
