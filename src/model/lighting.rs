use glam::Vec3;

/// How much one intensity key press changes the light power.
pub const INTENSITY_STEP: f32 = 2.0;

/// Single point light. Color channels are pure on/off toggles, position moves
/// in whole-unit steps, intensity is unclamped (and may go negative).
pub struct PointLight {
    pub color: Vec3,
    pub position: Vec3,
    pub intensity: f32,
}

impl PointLight {
    /// White light at (4,4,4) with power 50, matching the startup scene.
    pub fn new() -> Self {
        Self {
            color: Vec3::ONE,
            position: Vec3::new(4.0, 4.0, 4.0),
            intensity: 50.0,
        }
    }

    pub fn toggle_red(&mut self) {
        self.color.x = toggle_channel(self.color.x);
    }

    pub fn toggle_green(&mut self) {
        self.color.y = toggle_channel(self.color.y);
    }

    pub fn toggle_blue(&mut self) {
        self.color.z = toggle_channel(self.color.z);
    }

    pub fn step_intensity(&mut self, direction: f32) {
        self.intensity += direction * INTENSITY_STEP;
    }

    pub fn translate(&mut self, step: Vec3) {
        self.position += step;
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle_channel(channel: f32) -> f32 {
    if channel == 1.0 {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_toggle_is_an_involution() {
        let mut light = PointLight::new();
        let before = light.color;
        light.toggle_red();
        assert_eq!(light.color.x, 0.0);
        light.toggle_red();
        assert_eq!(light.color, before);

        light.toggle_green();
        light.toggle_green();
        light.toggle_blue();
        light.toggle_blue();
        assert_eq!(light.color, before);
    }

    #[test]
    fn intensity_steps_are_symmetric_and_unclamped() {
        let mut light = PointLight::new();
        assert_eq!(light.intensity, 50.0);
        light.step_intensity(-1.0);
        light.step_intensity(-1.0);
        light.step_intensity(-1.0);
        assert_eq!(light.intensity, 44.0);
        light.step_intensity(1.0);
        assert_eq!(light.intensity, 46.0);

        // No lower bound
        for _ in 0..30 {
            light.step_intensity(-1.0);
        }
        assert!(light.intensity < 0.0);
    }

    #[test]
    fn position_moves_in_unit_steps() {
        let mut light = PointLight::new();
        light.translate(Vec3::X);
        light.translate(Vec3::X);
        light.translate(-Vec3::Y);
        assert_eq!(light.position, Vec3::new(6.0, 3.0, 4.0));
    }
}
