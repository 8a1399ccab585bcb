//! Externally-owned renderable geometry, referenced by handle

use crate::foundation::collections::{HandleMap, TypedHandle};

/// Opaque renderable geometry
///
/// The simulation only requires that a mesh be assignable and retrievable per
/// entity; loading and GPU upload belong to external layers.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
}

impl Mesh {
    /// Create a mesh with a debug-friendly name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The mesh's name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Type-safe handle to a registered mesh
pub type MeshHandle = TypedHandle<Mesh>;

/// Owning registry of meshes, handing out stable handles
pub struct MeshRegistry {
    meshes: HandleMap<Mesh>,
}

impl MeshRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            meshes: HandleMap::with_key(),
        }
    }

    /// Register a mesh and return its handle
    pub fn insert(&mut self, mesh: Mesh) -> MeshHandle {
        let key = self.meshes.insert(mesh);
        MeshHandle::new(key)
    }

    /// Look up a mesh by handle
    pub fn get(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.key())
    }

    /// Remove a mesh, returning it if it was registered
    pub fn remove(&mut self, handle: MeshHandle) -> Option<Mesh> {
        self.meshes.remove(handle.key())
    }

    /// Number of registered meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}
