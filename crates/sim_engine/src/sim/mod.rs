//! Double-buffered entity simulation core
//!
//! Entities advance through time with a motion-equation update model while
//! rendering reads a stable committed state. Each tick runs three full passes
//! over the entity collection: equalize (seed the staged state from the
//! committed one), update (behaviors mutate the staged state), and swap
//! (integrate the staged state and commit it).

pub mod error;
pub mod motion_state;
pub mod double_buffer;
pub mod event;
pub mod behavior;
pub mod entity;
pub mod simulation;

pub use error::SimError;
pub use motion_state::{Constraint, ConstraintSet, MotionState, ReferenceFrame};
pub use double_buffer::DoubleBuffer;
pub use event::{KeyCode, MouseButton, SimEvent};
pub use behavior::{Attributes, Behavior, MotionBehavior, TickContext};
pub use entity::Entity;
pub use simulation::{EntityKey, Simulation, StateSnapshot};
