//! Pluggable per-entity update and event-handling strategies
//!
//! A behavior operates on the (attributes, double-buffered state, mesh)
//! triple of its entity. Behaviors stage their changes on the entity's
//! `next` buffer; the committed `current` buffer of any entity, exposed
//! through [`TickContext`], is the only legal cross-entity read during an
//! update pass.

use std::any::Any;

use crate::scene::MeshHandle;
use crate::sim::double_buffer::DoubleBuffer;
use crate::sim::error::SimError;
use crate::sim::event::SimEvent;
use crate::sim::motion_state::MotionState;
use crate::sim::simulation::{EntityKey, StateSnapshot};

/// Opaque, behavior-defined per-entity payload
///
/// Behaviors are shared strategies; anything per-entity they need lives here
/// and is recovered by downcasting.
pub type Attributes = Option<Box<dyn Any + Send>>;

/// Read-only view of one tick handed to behavior updates
pub struct TickContext<'a> {
    /// Monotonic clock value of this tick in microseconds
    pub time_index_us: u64,
    /// Fixed step duration in microseconds
    pub step_us: u64,
    snapshot: &'a StateSnapshot,
}

impl<'a> TickContext<'a> {
    /// Create a context over the pre-tick state snapshot
    pub(crate) fn new(time_index_us: u64, step_us: u64, snapshot: &'a StateSnapshot) -> Self {
        Self {
            time_index_us,
            step_us,
            snapshot,
        }
    }

    /// Committed pre-tick state of another entity
    ///
    /// Every entity sees every other entity's fully committed prior-tick
    /// state here, never a value staged earlier in the same tick.
    pub fn state_of(&self, key: EntityKey) -> Option<&MotionState> {
        self.snapshot.get(key)
    }
}

/// Per-entity update/event strategy, decoupled from entity identity
///
/// Implementations take `&self`: a single behavior value may drive many
/// entities, with per-entity data kept in the entity's attributes.
pub trait Behavior {
    /// Stage this tick's changes on the entity's `next` state
    ///
    /// The staged state has already been equalized from the committed one.
    /// Integration of the staged state happens exactly once per tick, in
    /// `Entity::swap_state` after all behaviors ran; an implementation shapes
    /// that integration by mutating the staged components here (e.g. flipping
    /// the staged velocity while inspecting committed positions).
    ///
    /// An error aborts the tick and propagates to the simulation driver.
    fn update(
        &self,
        attributes: &mut Attributes,
        state: &mut DoubleBuffer<MotionState>,
        mesh: Option<MeshHandle>,
        ctx: &TickContext<'_>,
    ) -> Result<(), SimError> {
        let _ = (attributes, state, mesh, ctx);
        Ok(())
    }

    /// Dispatch an event to the matching per-kind handler
    fn process_event(
        &self,
        attributes: &mut Attributes,
        state: &mut DoubleBuffer<MotionState>,
        event: &SimEvent,
    ) {
        match *event {
            SimEvent::KeyPressed(key) => self.on_key_pressed(attributes, state, key),
            SimEvent::KeyReleased(key) => self.on_key_released(attributes, state, key),
            SimEvent::MouseClicked { button, x, y } => {
                self.on_mouse_clicked(attributes, state, button, x, y);
            }
            SimEvent::MouseMoved { x, y } => self.on_mouse_moved(attributes, state, x, y),
            SimEvent::Resized { width, height } => {
                self.on_resized(attributes, state, width, height);
            }
        }
    }

    /// Key press handler, no-op by default
    fn on_key_pressed(
        &self,
        _attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        _key: crate::sim::event::KeyCode,
    ) {
    }

    /// Key release handler, no-op by default
    fn on_key_released(
        &self,
        _attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        _key: crate::sim::event::KeyCode,
    ) {
    }

    /// Mouse click handler, no-op by default
    fn on_mouse_clicked(
        &self,
        _attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        _button: crate::sim::event::MouseButton,
        _x: f64,
        _y: f64,
    ) {
    }

    /// Mouse move handler, no-op by default
    fn on_mouse_moved(
        &self,
        _attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        _x: f64,
        _y: f64,
    ) {
    }

    /// Resize handler, no-op by default
    fn on_resized(
        &self,
        _attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        _width: u32,
        _height: u32,
    ) {
    }
}

/// Default behavior: pure motion integration
///
/// Stages nothing of its own and ignores events; the entity's state still
/// advances because the tick's swap phase runs the integrator on the staged
/// state for every entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionBehavior;

impl Behavior for MotionBehavior {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::sim::event::KeyCode;
    use crate::sim::motion_state::ReferenceFrame;

    struct ThrustBehavior;

    impl Behavior for ThrustBehavior {
        fn on_key_pressed(
            &self,
            _attributes: &mut Attributes,
            state: &mut DoubleBuffer<MotionState>,
            key: KeyCode,
        ) {
            if key == KeyCode::W {
                state
                    .next_mut()
                    .add_motion_component(2, Vec3::new(0.0, 0.0, 1.0), ReferenceFrame::Scene)
                    .expect("acceleration is a valid degree");
            }
        }
    }

    #[test]
    fn test_event_dispatch_reaches_per_kind_handler() {
        let behavior = ThrustBehavior;
        let mut attributes: Attributes = None;
        let mut state = DoubleBuffer::new(MotionState::default());

        behavior.process_event(&mut attributes, &mut state, &SimEvent::KeyPressed(KeyCode::W));
        behavior.process_event(&mut attributes, &mut state, &SimEvent::KeyReleased(KeyCode::W));

        assert_eq!(
            state
                .next()
                .motion_component(2, ReferenceFrame::Scene)
                .unwrap(),
            Vec3::new(0.0, 0.0, 1.0)
        );
        // The committed slot is untouched
        assert_eq!(state.current().degree_count(), 0);
    }

    #[test]
    fn test_default_handlers_are_no_ops() {
        let behavior = MotionBehavior;
        let mut attributes: Attributes = None;
        let mut state = DoubleBuffer::new(MotionState::default());
        let before = state.current().clone();

        behavior.process_event(&mut attributes, &mut state, &SimEvent::MouseMoved {
            x: 3.0,
            y: 4.0,
        });

        assert_eq!(*state.current(), before);
        assert_eq!(*state.next(), before);
    }
}
