//! # Sim Engine
//!
//! A small real-time simulation framework built around a double-buffered
//! entity core.
//!
//! ## Features
//!
//! - **Motion States**: position/velocity/acceleration chains of arbitrary
//!   degree with per-axis constraint clamping and reference-frame conversion
//! - **Double Buffering**: readers always observe a committed prior state
//!   while behaviors stage the next one
//! - **Behaviors**: pluggable per-entity update/event strategies (composition
//!   over inheritance)
//! - **Three-Pass Ticks**: equalize → update → swap, so cross-entity reads
//!   never observe a partially updated neighbor
//!
//! ## Quick Start
//!
//! ```rust
//! use sim_engine::prelude::*;
//!
//! let mut sim = Simulation::new();
//! let mut state = MotionState::new(ReferenceFrame::Scene);
//! state.set_motion_component(1, Vec3::new(1.0, 0.0, 0.0), ReferenceFrame::Scene)
//!     .expect("velocity is a valid degree");
//!
//! let probe = sim.spawn(Entity::new(Box::new(MotionBehavior), state));
//! sim.update(0, 1_000_000).expect("tick");
//!
//! let position = sim.entity(probe).unwrap().render_transform().position;
//! assert!((position.x - 1.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod sim;
pub mod scene;

pub use config::{AppConfig, ConfigError, EngineConfig, SimulationConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AppConfig, EngineConfig, SimulationConfig},
        foundation::{
            math::{Mat4, Quat, Transform, Vec3},
            time::TickTimer,
        },
        scene::{Camera, Mesh, MeshHandle, MeshRegistry, RenderableObject},
        sim::{
            Attributes, Behavior, DoubleBuffer, Entity, EntityKey, KeyCode, MotionBehavior,
            MotionState, MouseButton, ReferenceFrame, SimError, SimEvent, Simulation, TickContext,
        },
    };
}
