use glam::Mat4;

use crate::controller::input::{light_action, InputState, LightAction};
use crate::model::{OrbitCamera, PointLight, Projection};

/// Scale applied to raw mouse deltas before they reach the orbit angles.
pub const MOUSE_SENSITIVITY: f32 = 0.01;

/// All mutable scene state, owned by the application and mutated in place by
/// the event handlers. One thread owns it for the process lifetime; handlers
/// run to completion between events, so there is nothing to lock.
///
/// Each handler returns `true` when the frame should be redrawn.
pub struct SceneState {
    pub camera: OrbitCamera,
    pub light: PointLight,
    pub input: InputState,
    pub width: u32,
    pub height: u32,
}

impl SceneState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: OrbitCamera::new(),
            light: PointLight::new(),
            input: InputState::new(),
            width,
            height,
        }
    }

    /// Key presses drive the light; every press is also recorded as the
    /// current key so the projection toggle can see it. Unmapped keys fall
    /// through silently.
    pub fn on_key_down(&mut self, key: char) -> bool {
        self.input.press(key);
        if let Some(action) = light_action(key) {
            match action {
                LightAction::ToggleRed => self.light.toggle_red(),
                LightAction::ToggleGreen => self.light.toggle_green(),
                LightAction::ToggleBlue => self.light.toggle_blue(),
                LightAction::RaiseIntensity => self.light.step_intensity(1.0),
                LightAction::LowerIntensity => self.light.step_intensity(-1.0),
                LightAction::Move(step) => self.light.translate(step),
            }
        }
        true
    }

    pub fn on_key_up(&mut self) -> bool {
        self.input.release();
        true
    }

    /// Cursor motion. The delta is always tracked; the orbit angles only move
    /// while the modifier is held, and the eye point is re-derived from the
    /// current angles either way when the next frame renders.
    pub fn on_mouse_move(&mut self, x: f32, y: f32, orbit_held: bool) -> bool {
        let (dx, dy) = self.input.track_mouse(x, y);
        if orbit_held {
            self.camera
                .apply_orbit(dx * MOUSE_SENSITIVITY, dy * MOUSE_SENSITIVITY);
        }
        true
    }

    /// Store new viewport dimensions; zero-sized events (minimize) are
    /// ignored. Aspect ratio is derived fresh each frame, so there is no
    /// separate apply step.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Projection for the current frame, level-triggered on the held key.
    pub fn projection_matrix(&self) -> Mat4 {
        Projection::select(self.input.current_key).matrix(self.aspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::camera::ANGLE_LIMIT;
    use glam::{Mat4, Vec3};

    #[test]
    fn first_mouse_move_never_changes_angles() {
        let mut scene = SceneState::new(800, 600);
        scene.on_mouse_move(640.0, 17.0, true);
        assert_eq!(scene.camera.yaw, 0.0);
        assert_eq!(scene.camera.pitch, 0.0);
        assert_eq!(scene.input.last_mouse, Some((640.0, 17.0)));
    }

    #[test]
    fn motion_without_modifier_tracks_but_does_not_orbit() {
        let mut scene = SceneState::new(800, 600);
        scene.on_mouse_move(100.0, 100.0, false);
        scene.on_mouse_move(300.0, 250.0, false);
        assert_eq!(scene.camera.yaw, 0.0);
        assert_eq!(scene.camera.pitch, 0.0);
        assert_eq!(scene.input.last_mouse, Some((300.0, 250.0)));

        // The next held move starts from the tracked position, not from the
        // start of the unheld drag.
        scene.on_mouse_move(310.0, 250.0, true);
        assert!((scene.camera.yaw - 0.1).abs() < 1e-6);
    }

    #[test]
    fn held_motion_accumulates_scaled_deltas_with_clamp() {
        let mut scene = SceneState::new(800, 600);
        scene.on_mouse_move(0.0, 0.0, true);
        for step in 1..=100 {
            scene.on_mouse_move(step as f32 * 10.0, 0.0, true);
            assert!(scene.camera.yaw <= ANGLE_LIMIT);
        }
        assert_eq!(scene.camera.yaw, ANGLE_LIMIT);

        // Upward mouse motion raises pitch (inverted y)
        scene.on_mouse_move(1000.0, -50.0, true);
        assert!(scene.camera.pitch > 0.0);
    }

    #[test]
    fn light_scenario_from_key_presses() {
        let mut scene = SceneState::new(800, 600);
        for key in ['x', 'x', 'x'] {
            scene.on_key_down(key);
        }
        assert_eq!(scene.light.intensity, 44.0);
        scene.on_key_down('c');
        assert_eq!(scene.light.intensity, 46.0);

        scene.on_key_down('d');
        scene.on_key_down('d');
        scene.on_key_down('s');
        assert_eq!(scene.light.position, Vec3::new(6.0, 3.0, 4.0));
    }

    #[test]
    fn unmapped_key_only_records_current_key() {
        let mut scene = SceneState::new(800, 600);
        let color = scene.light.color;
        let pos = scene.light.position;
        scene.on_key_down('z');
        assert_eq!(scene.input.current_key, Some('z'));
        assert_eq!(scene.light.color, color);
        assert_eq!(scene.light.position, pos);
        assert_eq!(scene.light.intensity, 50.0);
    }

    #[test]
    fn projection_follows_held_key() {
        let mut scene = SceneState::new(800, 600);
        assert_eq!(
            scene.projection_matrix(),
            Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0)
        );
        scene.on_key_down('z');
        assert_eq!(
            scene.projection_matrix(),
            Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0)
        );
        scene.on_key_up();
        assert_eq!(
            scene.projection_matrix(),
            Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0)
        );
    }

    #[test]
    fn uppercase_variants_are_not_commands() {
        let mut scene = SceneState::new(800, 600);
        scene.on_key_down('Z');
        assert_eq!(
            scene.projection_matrix(),
            Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0)
        );
        scene.on_key_down('R');
        assert_eq!(scene.light.color, Vec3::ONE);
    }

    #[test]
    fn resize_round_trip_restores_aspect() {
        let mut scene = SceneState::new(800, 600);
        let original = scene.aspect();
        scene.on_resize(1920, 1080);
        assert_eq!(scene.aspect(), 1920.0 / 1080.0);
        scene.on_resize(800, 600);
        assert_eq!(scene.aspect(), original);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut scene = SceneState::new(800, 600);
        assert!(!scene.on_resize(0, 600));
        assert!(!scene.on_resize(800, 0));
        assert_eq!((scene.width, scene.height), (800, 600));
    }
}
