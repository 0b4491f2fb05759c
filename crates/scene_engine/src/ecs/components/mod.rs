//! Component variants

pub mod camera;
pub mod freecam;
pub mod helicopter;
pub mod static_mesh;
pub mod static_turret;
pub mod terrain;
pub mod transform;

pub use camera::{Camera, Projection};
pub use freecam::Freecam;
pub use helicopter::Helicopter;
pub use static_mesh::StaticMesh;
pub use static_turret::StaticTurret;
pub use terrain::{GenerationSettings, Terrain, TerrainLayer, HEIGHTMAP_RESOLUTION, MAX_LAYERS};
pub use transform::Transform;
