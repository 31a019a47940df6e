//! Camera types shared with both frontends.

use crate::constants::{
    CAMERA_FOVY_DEG, CAMERA_START_DISTANCE, CAMERA_ZFAR, CAMERA_ZNEAR, ORBIT_PITCH_LIMIT,
    ORBIT_RADIANS_PER_PIXEL, ZOOM_MAX_DISTANCE, ZOOM_MIN_DISTANCE, ZOOM_SENSITIVITY,
    ZOOM_SMOOTHING,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit camera around the origin with damped wheel zoom.
///
/// The target is fixed at the origin; there is no pan. `target_distance` is
/// what the wheel writes, `distance` chases it in [`OrbitCamera::update`].
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target_distance: f32,
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.35,
            distance: CAMERA_START_DISTANCE,
            target_distance: CAMERA_START_DISTANCE,
            aspect: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Rotate by a pointer drag delta in pixels.
    pub fn orbit(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * ORBIT_RADIANS_PER_PIXEL;
        self.pitch = (self.pitch + dy_px * ORBIT_RADIANS_PER_PIXEL)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Positive `notches` zoom in.
    pub fn zoom(&mut self, notches: f32) {
        let factor = (-notches * ZOOM_SENSITIVITY).exp();
        self.target_distance =
            (self.target_distance * factor).clamp(ZOOM_MIN_DISTANCE, ZOOM_MAX_DISTANCE);
    }

    /// Advance the damped zoom by one frame.
    pub fn update(&mut self) {
        self.distance += (self.target_distance - self.distance) * ZOOM_SMOOTHING;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped_to_range() {
        let mut cam = OrbitCamera::default();
        for _ in 0..200 {
            cam.zoom(1.0);
        }
        assert_eq!(cam.target_distance, ZOOM_MIN_DISTANCE);
        for _ in 0..200 {
            cam.zoom(-1.0);
        }
        assert_eq!(cam.target_distance, ZOOM_MAX_DISTANCE);
    }

    #[test]
    fn distance_eases_toward_target() {
        let mut cam = OrbitCamera::default();
        cam.zoom(5.0);
        let start_gap = (cam.target_distance - cam.distance).abs();
        cam.update();
        let gap = (cam.target_distance - cam.distance).abs();
        assert!(gap < start_gap && gap > 0.0);
        for _ in 0..500 {
            cam.update();
        }
        assert!((cam.distance - cam.target_distance).abs() < 1e-4);
    }

    #[test]
    fn eye_stays_at_distance_and_pitch_is_limited() {
        let mut cam = OrbitCamera::default();
        cam.orbit(123.0, 10_000.0);
        assert!(cam.pitch <= ORBIT_PITCH_LIMIT);
        assert!((cam.eye().length() - cam.distance).abs() < 1e-5);
    }
}
