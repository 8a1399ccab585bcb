//! Simulation driver: owns the entity collection and runs the tick protocol
//!
//! Each tick executes three full passes over the live entities, never
//! interleaved:
//!
//! 1. equalize — seed every staged state from its committed one and capture
//!    the pre-tick snapshot behaviors may cross-read;
//! 2. update — behaviors mutate their own staged state;
//! 3. swap — integrate each staged state and commit it.
//!
//! The separation guarantees no behavior ever observes a partially updated
//! neighbor: cross-entity reads always see a fully committed prior-tick
//! snapshot. Structural mutation (spawn/despawn) is only reachable between
//! ticks, since a tick holds the driver exclusively and behaviors are never
//! handed the driver.

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::scene::RenderableObject;
use crate::sim::behavior::TickContext;
use crate::sim::entity::Entity;
use crate::sim::error::SimError;
use crate::sim::event::SimEvent;
use crate::sim::motion_state::MotionState;

new_key_type! {
    /// Stable handle to an entity owned by a [`Simulation`]
    pub struct EntityKey;
}

/// Committed pre-tick states, keyed by entity
pub type StateSnapshot = SecondaryMap<EntityKey, MotionState>;

/// Owns entities and drives the three-pass tick protocol
///
/// Insertion order defines both event-forwarding and render-submission order.
pub struct Simulation {
    entities: SlotMap<EntityKey, Entity>,
    order: Vec<EntityKey>,
    snapshot: StateSnapshot,
}

impl Simulation {
    /// Create an empty simulation
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: Vec::new(),
            snapshot: StateSnapshot::new(),
        }
    }

    /// Add an entity; insertion order defines its render order
    pub fn spawn(&mut self, entity: Entity) -> EntityKey {
        let key = self.entities.insert(entity);
        self.order.push(key);
        log::debug!("spawned entity {key:?} ({} live)", self.order.len());
        key
    }

    /// Remove an entity, returning it if it was live
    pub fn despawn(&mut self, key: EntityKey) -> Option<Entity> {
        let entity = self.entities.remove(key);
        if entity.is_some() {
            self.order.retain(|k| *k != key);
            log::debug!("despawned entity {key:?} ({} live)", self.order.len());
        }
        entity
    }

    /// Shared access to an entity
    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Mutable access to an entity
    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the simulation holds no entities
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entity keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.order.iter().copied()
    }

    /// Advance the simulation by one tick of `step_us` microseconds
    ///
    /// A behavior error aborts the tick and propagates; entities earlier in
    /// the pass keep their staged (uncommitted) changes, which the next
    /// tick's equalize pass discards.
    pub fn update(&mut self, time_index_us: u64, step_us: u64) -> Result<(), SimError> {
        // Discard any snapshot left behind by an aborted tick; entries for
        // entities despawned since then must not resurface via the context.
        self.snapshot.clear();

        // Pass 1: seed staged states and capture the pre-tick snapshot
        for i in 0..self.order.len() {
            let key = self.order[i];
            if let Some(entity) = self.entities.get_mut(key) {
                entity.equalize_state();
                self.snapshot.insert(key, entity.state().current().clone());
            }
        }

        // Pass 2: behaviors stage their changes
        for i in 0..self.order.len() {
            let key = self.order[i];
            if let Some(entity) = self.entities.get_mut(key) {
                let ctx = TickContext::new(time_index_us, step_us, &self.snapshot);
                entity.update(&ctx)?;
            }
        }

        // Pass 3: integrate staged states and commit
        for i in 0..self.order.len() {
            let key = self.order[i];
            if let Some(entity) = self.entities.get_mut(key) {
                entity.swap_state(time_index_us, step_us);
            }
        }

        Ok(())
    }

    /// Forward an event to every entity in insertion order
    pub fn process_event(&mut self, event: &SimEvent) {
        for i in 0..self.order.len() {
            let key = self.order[i];
            if let Some(entity) = self.entities.get_mut(key) {
                entity.process_event(event);
            }
        }
    }

    /// Build the render submission list from committed states
    ///
    /// Entities appear in insertion order; hidden entities and entities
    /// without a mesh are skipped. No mutation occurs during this pass.
    pub fn renderables(&self) -> Vec<RenderableObject> {
        self.order
            .iter()
            .filter_map(|key| {
                let entity = self.entities.get(*key)?;
                if entity.is_hidden() {
                    return None;
                }
                let mesh = entity.mesh()?;
                Some(RenderableObject::new(
                    *key,
                    mesh,
                    entity.render_transform().to_matrix(),
                ))
            })
            .collect()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
