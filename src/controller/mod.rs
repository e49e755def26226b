// CONTROLLER: input state and scene update logic
pub mod input;
pub mod scene;

pub use input::{light_action, InputState, LightAction};
pub use scene::SceneState;
