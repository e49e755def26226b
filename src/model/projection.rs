use glam::Mat4;

/// Key that selects the orthographic projection while held.
pub const ORTHO_TRIGGER: char = 'z';

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
const FOV_Y: f32 = 45.0;

/// Projection mode for the current frame. Level-triggered: re-selected from
/// the currently held key every frame, never latched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

impl Projection {
    pub fn select(current_key: Option<char>) -> Self {
        if current_key == Some(ORTHO_TRIGGER) {
            Projection::Orthographic
        } else {
            Projection::Perspective
        }
    }

    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match self {
            Projection::Orthographic => {
                Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, Z_NEAR, Z_FAR)
            }
            Projection::Perspective => {
                Mat4::perspective_rh(FOV_Y.to_radians(), aspect, Z_NEAR, Z_FAR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_key_selects_orthographic() {
        assert_eq!(Projection::select(Some('z')), Projection::Orthographic);
        assert_eq!(Projection::select(Some('a')), Projection::Perspective);
        assert_eq!(Projection::select(Some('0')), Projection::Perspective);
        assert_eq!(Projection::select(None), Projection::Perspective);
    }

    #[test]
    fn orthographic_bounds_are_exact() {
        let m = Projection::Orthographic.matrix(800.0 / 600.0);
        assert_eq!(m, Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0));
    }

    #[test]
    fn perspective_uses_current_aspect() {
        let aspect = 1024.0 / 768.0;
        let m = Projection::Perspective.matrix(aspect);
        assert_eq!(
            m,
            Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 100.0)
        );
    }
}
