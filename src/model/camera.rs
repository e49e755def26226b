use glam::{Mat4, Vec3};

/// Orbit angles saturate at ±1.57 rad, keeping the eye on one hemisphere so
/// the fixed up vector never degenerates.
pub const ANGLE_LIMIT: f32 = 1.57;

/// Distance of the eye point from the orbit center.
pub const ORBIT_RADIUS: f32 = 10.0;

/// Camera orbiting the origin. Yaw and pitch accumulate scaled mouse deltas
/// and only move while the orbit modifier is held.
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Accumulate already-scaled deltas, saturating at the angle limits.
    pub fn apply_orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).clamp(-ANGLE_LIMIT, ANGLE_LIMIT);
        self.pitch = (self.pitch + d_pitch).clamp(-ANGLE_LIMIT, ANGLE_LIMIT);
    }

    /// Eye point on the orbit, re-derived from the current angles every time.
    ///
    /// The z component is not scaled by the radius while x and y use the
    /// full radius; the shape of this orbit is kept exactly as-is for parity
    /// with the established on-screen behavior.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            ORBIT_RADIUS * self.yaw.cos(),
            ORBIT_RADIUS * self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// Look from the orbit eye point toward the origin, up +Y.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_stay_clamped_over_long_drags() {
        let mut cam = OrbitCamera::new();
        for _ in 0..1000 {
            cam.apply_orbit(0.05, 0.07);
            assert!(cam.yaw >= -ANGLE_LIMIT && cam.yaw <= ANGLE_LIMIT);
            assert!(cam.pitch >= -ANGLE_LIMIT && cam.pitch <= ANGLE_LIMIT);
        }
        for _ in 0..1000 {
            cam.apply_orbit(-0.05, -0.07);
            assert!(cam.yaw >= -ANGLE_LIMIT && cam.yaw <= ANGLE_LIMIT);
            assert!(cam.pitch >= -ANGLE_LIMIT && cam.pitch <= ANGLE_LIMIT);
        }
    }

    #[test]
    fn clamp_saturates_instead_of_overshooting() {
        let mut cam = OrbitCamera::new();
        cam.yaw = 1.50;
        cam.apply_orbit(0.10, 0.0);
        assert_eq!(cam.yaw, 1.57);
    }

    #[test]
    fn eye_follows_orbit_formula() {
        let cam = OrbitCamera::new();
        let eye = cam.eye();
        // yaw = pitch = 0 puts the eye on the +X axis at the full radius
        assert_eq!(eye, Vec3::new(10.0, 0.0, 0.0));

        let cam = OrbitCamera {
            yaw: 0.5,
            pitch: -0.25,
        };
        let eye = cam.eye();
        assert!((eye.x - 10.0 * 0.5f32.cos()).abs() < 1e-6);
        assert!((eye.y - 10.0 * (-0.25f32).sin()).abs() < 1e-6);
        assert!((eye.z - 0.5f32.sin() * (-0.25f32).cos()).abs() < 1e-6);
    }
}
