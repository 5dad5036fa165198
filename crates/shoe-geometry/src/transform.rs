//! Matrix builders for the per-frame transform pipeline.
//!
//! Column-vector convention: `a * b` applies `b` first. Clip space follows
//! wgpu (right-handed view space, depth in `0..1`).

use glam::{Mat4, Vec3};

/// Perspective projection with vertical field of view `fov_y` (radians).
#[inline]
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y, aspect, near, far)
}

#[inline]
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Rotation by `angle` radians about `axis`; the axis need not be unit length.
#[inline]
pub fn axis_rotation(axis: Vec3, angle: f32) -> Mat4 {
    Mat4::from_axis_angle(axis.normalize_or(Vec3::Z), angle)
}

/// Inverse-transpose of `view`, for transforming normals.
#[inline]
pub fn normal_matrix(view: Mat4) -> Mat4 {
    view.inverse().transpose()
}

/// Fixed camera placement applied on top of the interactive view rotation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRig {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Axis of the rotation that tilts the surface into view.
    pub tilt_axis: Vec3,
    pub tilt_angle: f32,
    /// Distance from the eye to the surface origin along `-Z`.
    pub distance: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::PI / 8.0,
            aspect: 1.0,
            near: 8.0,
            far: 20.0,
            tilt_axis: Vec3::new(0.707, 0.707, 0.0),
            tilt_angle: 0.7,
            distance: 12.0,
        }
    }
}

impl CameraRig {
    pub fn projection(&self) -> Mat4 {
        perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// `projection × translate(0, 0, −distance) × tilt × view`.
    pub fn model_view_projection(&self, view: Mat4) -> Mat4 {
        let rotate_to_zero = axis_rotation(self.tilt_axis, self.tilt_angle);
        let translate_to_zero = translation(0.0, 0.0, -self.distance);
        self.projection() * translate_to_zero * rotate_to_zero * view
    }
}

/// Position of the light on its unit orbit around the Z axis at phase `movement`.
///
/// Both the indicator sphere translation and the lighting position derive from
/// this single value. Evaluated in `f64` because the phase is wall-clock
/// seconds since the epoch.
pub fn light_orbit(movement: f64) -> Vec3 {
    Vec3::new(movement.cos() as f32, movement.sin() as f32, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    // ── builders ──────────────────────────────────────────────────────────

    #[test]
    fn scene_perspective_is_invertible() {
        let p = perspective(std::f32::consts::PI / 8.0, 1.0, 8.0, 20.0);
        assert!(p.determinant().abs() > 0.0);
        assert!(approx(p * p.inverse(), Mat4::IDENTITY));
    }

    #[test]
    fn translation_moves_origin() {
        let t = translation(1.0, -2.0, 3.0);
        assert_eq!(t.transform_point3(Vec3::ZERO), Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn axis_rotation_normalizes_axis() {
        let a = axis_rotation(Vec3::new(0.707, 0.707, 0.0), 0.7);
        let b = Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.7);
        assert!(approx(a, b));
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let r = Mat4::from_rotation_y(0.4) * Mat4::from_rotation_x(-1.1);
        assert!(approx(normal_matrix(r), r));
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_scale() {
        let view = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let tangent = Vec3::new(1.0, 1.0, 0.0);
        let normal = Vec3::new(1.0, -1.0, 0.0);
        let t = view.transform_vector3(tangent);
        let n = normal_matrix(view).transform_vector3(normal);
        assert!(t.dot(n).abs() < 1e-6);
    }

    // ── rig ───────────────────────────────────────────────────────────────

    #[test]
    fn origin_projects_inside_depth_range() {
        let mvp = CameraRig::default().model_view_projection(Mat4::IDENTITY);
        let clip = mvp * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn composition_order() {
        let rig = CameraRig::default();
        let view = Mat4::from_rotation_z(0.3);
        let expected = rig.projection()
            * translation(0.0, 0.0, -12.0)
            * axis_rotation(rig.tilt_axis, 0.7)
            * view;
        assert!(approx(rig.model_view_projection(view), expected));
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    #[test]
    fn orbit_at_zero() {
        assert_eq!(light_orbit(0.0), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn orbit_stays_on_unit_circle() {
        for &t in &[0.25, 1.0, 3.0, 1.7e9, 1_760_000_000.123] {
            let p = light_orbit(t);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }
}
