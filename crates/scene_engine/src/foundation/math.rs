//! Math utilities and types
//!
//! Provides fundamental math types for 3D scene editing. All coordinates are
//! Y-up right-handed; "forwards" is -Z.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Linear RGBA colour
pub type Color = Vec4;

/// Unit direction vectors in local space
pub mod directions {
    use super::Vec3;

    /// +X
    pub fn right() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    /// -X
    pub fn left() -> Vec3 {
        Vec3::new(-1.0, 0.0, 0.0)
    }

    /// +Y
    pub fn up() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }

    /// -Y
    pub fn down() -> Vec3 {
        Vec3::new(0.0, -1.0, 0.0)
    }

    /// -Z (right-handed, camera looks down -Z)
    pub fn forwards() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    /// +Z
    pub fn backwards() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Step `current` toward `target` by at most `max_delta`
    pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
        let delta = target - current;
        if delta.abs() <= max_delta {
            target
        } else {
            current + max_delta.copysign(delta)
        }
    }

    /// Rotation of `angle` radians around `axis` (normalized internally)
    pub fn axis_angle(axis: Vec3, angle: f32) -> Quat {
        Quat::from_axis_angle(&Unit::new_normalize(axis), angle)
    }
}

/// Extension trait for Mat4 with projection helpers
pub trait Mat4Ext {
    /// Create a perspective projection matrix (depth mapped to [0, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create an orthographic projection matrix
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Translation * rotation * scale
    fn trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4;

    /// Inverse of [`Mat4Ext::trs`], computed without a general matrix inversion
    fn trs_inverse(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;

        result
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
        Mat4::new_translation(position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(scale)
    }

    fn trs_inverse(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
        // A zero scale axis has no inverse; collapse that axis instead of producing infinities
        let inv = |s: f32| if s.abs() > f32::EPSILON { 1.0 / s } else { 0.0 };
        let inv_scale = Vec3::new(inv(scale.x), inv(scale.y), inv(scale.z));

        Mat4::new_nonuniform_scaling(&inv_scale)
            * rotation.inverse().to_homogeneous()
            * Mat4::new_translation(&-position)
    }
}
