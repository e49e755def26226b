use glam::Vec3;

/// Raw input state: the most recently pressed key plus mouse tracking.
///
/// `current_key` is last-key-wins by design: the projection toggle only needs
/// "is the trigger the key currently down", so a single optional slot is
/// enough. Multi-key chords are out of scope.
pub struct InputState {
    pub current_key: Option<char>,
    /// Last observed cursor position. `None` until the first motion event,
    /// so the first delta computation is suppressed rather than jumping from
    /// an arbitrary stale origin.
    pub last_mouse: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            current_key: None,
            last_mouse: None,
        }
    }

    pub fn press(&mut self, key: char) {
        self.current_key = Some(key);
    }

    /// Any release clears the slot, regardless of which key went up.
    pub fn release(&mut self) {
        self.current_key = None;
    }

    /// Returns the delta from the previous position (y inverted: moving the
    /// mouse up yields positive dy) and stores the new position. The first
    /// call only establishes the baseline and reports no motion.
    pub fn track_mouse(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = match self.last_mouse {
            Some((lx, ly)) => (x - lx, ly - y),
            None => (0.0, 0.0),
        };
        self.last_mouse = Some((x, y));
        delta
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Effect of a light-control key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightAction {
    ToggleRed,
    ToggleGreen,
    ToggleBlue,
    RaiseIntensity,
    LowerIntensity,
    Move(Vec3),
}

/// Key map for the point light. Keys outside this map change no light state.
pub fn light_action(key: char) -> Option<LightAction> {
    match key {
        'r' => Some(LightAction::ToggleRed),
        'f' => Some(LightAction::ToggleGreen),
        'v' => Some(LightAction::ToggleBlue),
        'x' => Some(LightAction::LowerIntensity),
        'c' => Some(LightAction::RaiseIntensity),
        'a' => Some(LightAction::Move(Vec3::NEG_X)),
        'd' => Some(LightAction::Move(Vec3::X)),
        'w' => Some(LightAction::Move(Vec3::Y)),
        's' => Some(LightAction::Move(Vec3::NEG_Y)),
        'q' => Some(LightAction::Move(Vec3::NEG_Z)),
        'e' => Some(LightAction::Move(Vec3::Z)),
        _ => None,
    }
}
