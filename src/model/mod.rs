// MODEL: scene state and static geometry
pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod projection;

pub use camera::OrbitCamera;
pub use lighting::PointLight;
pub use mesh::MeshData;
pub use projection::Projection;
