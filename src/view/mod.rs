// VIEW: GPU context, pipeline and texture setup
pub mod gpu_init;
pub mod render;
pub mod texture;

pub use gpu_init::GpuContext;
