//! Per-entity rendering snapshot
//!
//! Cached rendering data extracted from committed simulation state, keeping
//! gameplay and rendering concerns separated. The rendering layer consumes
//! these; the simulation never reads them back.

use crate::foundation::math::Mat4;
use crate::scene::mesh::MeshHandle;
use crate::sim::simulation::EntityKey;

/// Render submission record for one entity
#[derive(Debug, Clone, Copy)]
pub struct RenderableObject {
    /// The entity this renderable represents
    pub entity: EntityKey,

    /// Geometry to draw
    pub mesh: MeshHandle,

    /// Model transform computed from the committed motion state
    pub transform: Mat4,
}

impl RenderableObject {
    /// Create a new renderable snapshot
    pub fn new(entity: EntityKey, mesh: MeshHandle, transform: Mat4) -> Self {
        Self {
            entity,
            mesh,
            transform,
        }
    }
}
