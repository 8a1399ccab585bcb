//! Simulable, renderable entity
//!
//! An entity binds attributes, a behavior, an optional mesh handle, and a
//! double-buffered motion state into one object. The entity exclusively owns
//! its attributes and behavior; meshes are externally owned and referenced by
//! handle.

use crate::foundation::math::Transform;
use crate::scene::MeshHandle;
use crate::sim::behavior::{Attributes, Behavior, TickContext};
use crate::sim::double_buffer::DoubleBuffer;
use crate::sim::error::SimError;
use crate::sim::event::SimEvent;
use crate::sim::motion_state::MotionState;

/// One simulable, renderable object
///
/// Two orthogonal flags gate its lifecycle operations: `disabled` suppresses
/// updates and event handling but not rendering, while `hidden` suppresses
/// rendering but not simulation.
pub struct Entity {
    attributes: Attributes,
    behavior: Box<dyn Behavior>,
    mesh: Option<MeshHandle>,
    state: DoubleBuffer<MotionState>,
    disabled: bool,
    hidden: bool,
}

impl Entity {
    /// Create an enabled, shown entity with the given behavior and state
    pub fn new(behavior: Box<dyn Behavior>, state: MotionState) -> Self {
        Self {
            attributes: None,
            behavior,
            mesh: None,
            state: DoubleBuffer::new(state),
            disabled: false,
            hidden: false,
        }
    }

    /// Builder: attach a mesh handle
    pub fn with_mesh(mut self, mesh: MeshHandle) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder: attach behavior-defined attributes
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Forward an event to the behavior; no-op while disabled
    pub fn process_event(&mut self, event: &SimEvent) {
        if self.disabled {
            return;
        }
        self.behavior
            .process_event(&mut self.attributes, &mut self.state, event);
    }

    /// Run the behavior's update against the staged state; no-op while disabled
    ///
    /// Mutates only the staged (`next`) buffer, never the committed one.
    pub fn update(&mut self, ctx: &TickContext<'_>) -> Result<(), SimError> {
        if self.disabled {
            return Ok(());
        }
        self.behavior
            .update(&mut self.attributes, &mut self.state, self.mesh, ctx)
    }

    /// Seed the staged state from the committed one
    ///
    /// Must run once per tick before [`Entity::update`], otherwise the staged
    /// buffer still holds data from two ticks ago for any field the behavior
    /// does not explicitly touch.
    pub fn equalize_state(&mut self) {
        self.state.equalize();
    }

    /// Integrate the staged state, then commit it
    ///
    /// This is the single place the motion integrator runs each tick, so a
    /// behavior's own update never double-advances the state.
    pub fn swap_state(&mut self, time_index_us: u64, step_us: u64) {
        self.state.next_mut().update(time_index_us, step_us);
        self.state.swap();
    }

    /// Suppress updates and event handling (rendering is unaffected)
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Resume updates and event handling
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Whether updates and event handling are suppressed
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Suppress rendering (simulation is unaffected)
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Resume rendering
    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// Whether rendering is suppressed
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The double-buffered motion state
    pub fn state(&self) -> &DoubleBuffer<MotionState> {
        &self.state
    }

    /// Mutable access to the double-buffered motion state
    pub fn state_mut(&mut self) -> &mut DoubleBuffer<MotionState> {
        &mut self.state
    }

    /// Behavior-defined attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Replace the behavior-defined attributes
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    /// The entity's mesh handle, if any
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Assign or clear the mesh handle
    pub fn set_mesh(&mut self, mesh: Option<MeshHandle>) {
        self.mesh = mesh;
    }

    /// Model transform of the committed state, for render submission
    pub fn render_transform(&self) -> Transform {
        let committed = self.state.current();
        Transform {
            position: committed.position(),
            rotation: committed.orientation(),
            scale: committed.scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::sim::behavior::MotionBehavior;
    use crate::sim::event::KeyCode;
    use crate::sim::motion_state::ReferenceFrame;
    use crate::sim::simulation::StateSnapshot;

    fn moving_entity(velocity: Vec3) -> Entity {
        let mut state = MotionState::default();
        state
            .set_motion_component(1, velocity, ReferenceFrame::Scene)
            .unwrap();
        Entity::new(Box::new(MotionBehavior), state)
    }

    #[test]
    fn test_disabled_entity_skips_update() {
        let snapshot = StateSnapshot::default();
        let ctx = TickContext::new(0, 1_000_000, &snapshot);

        let mut entity = moving_entity(Vec3::new(1.0, 0.0, 0.0));
        entity.disable();

        entity.equalize_state();
        entity.update(&ctx).unwrap();

        // Disabled gates the behavior, not the commit integration
        assert!(entity.is_disabled());
        assert_eq!(entity.render_transform().position, Vec3::zeros());
    }

    #[test]
    fn test_disabled_entity_skips_events() {
        let mut entity = moving_entity(Vec3::zeros());
        entity.disable();
        entity.process_event(&SimEvent::KeyPressed(KeyCode::Space));

        entity.enable();
        assert!(!entity.is_disabled());
    }

    #[test]
    fn test_hidden_is_orthogonal_to_disabled() {
        let mut entity = moving_entity(Vec3::new(2.0, 0.0, 0.0));
        entity.hide();

        // Hidden entities still simulate
        entity.equalize_state();
        entity.swap_state(0, 500_000);
        assert!(entity.is_hidden());
        assert!(!entity.is_disabled());
        assert!((entity.render_transform().position.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_swap_state_integrates_then_commits() {
        let mut entity = moving_entity(Vec3::new(1.0, 0.0, 0.0));

        entity.equalize_state();
        entity.swap_state(0, 1_000_000);

        assert!((entity.render_transform().position.x - 1.0).abs() < 1e-6);
        // The now-staged slot holds the previous committed state
        assert_eq!(entity.state().next().position(), Vec3::zeros());
    }
}
