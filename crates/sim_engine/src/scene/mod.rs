//! Render boundary: mesh handles, renderable snapshots, and the camera
//!
//! The simulation core never inspects mesh content; it only stores and hands
//! back mesh handles. The rendering layer consumes the committed transform
//! and mesh handle of each entity through [`RenderableObject`].

pub mod mesh;
pub mod renderable;
pub mod camera;

pub use mesh::{Mesh, MeshHandle, MeshRegistry};
pub use renderable::RenderableObject;
pub use camera::Camera;
