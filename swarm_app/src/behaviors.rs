//! Demo behaviors: boundary bouncing, target seeking, and keyboard thrust

use sim_engine::prelude::*;

/// Bounces an entity off an axis-aligned box
///
/// Inspects the committed (pre-tick) position and prospectively flips the
/// staged velocity component for any axis about to leave the box, so the
/// commit-phase integration already applies the reflected velocity.
pub struct BounceBehavior {
    /// Box half-extent around the origin, per axis
    pub bounds: Vec3,
}

impl Behavior for BounceBehavior {
    fn update(
        &self,
        _attributes: &mut Attributes,
        state: &mut DoubleBuffer<MotionState>,
        _mesh: Option<MeshHandle>,
        _ctx: &TickContext<'_>,
    ) -> Result<(), SimError> {
        let position = state.current().position();
        let staged = state.next_mut();
        let velocity = staged.motion_component_mut(1)?;

        for axis in 0..3 {
            if position[axis] > self.bounds[axis] && velocity[axis] > 0.0 {
                velocity[axis] = -velocity[axis];
            } else if position[axis] < -self.bounds[axis] && velocity[axis] < 0.0 {
                velocity[axis] = -velocity[axis];
            }
        }
        Ok(())
    }
}

/// Steers an entity's staged velocity toward a target entity
///
/// The target key lives in the entity's attributes; the target's position is
/// read from the pre-tick snapshot, so a pair of seekers targeting each other
/// both chase last tick's committed positions.
pub struct SeekBehavior {
    /// Cruise speed in units per second
    pub speed: f32,
}

impl Behavior for SeekBehavior {
    fn update(
        &self,
        attributes: &mut Attributes,
        state: &mut DoubleBuffer<MotionState>,
        _mesh: Option<MeshHandle>,
        ctx: &TickContext<'_>,
    ) -> Result<(), SimError> {
        let target = attributes
            .as_ref()
            .and_then(|a| a.downcast_ref::<EntityKey>())
            .copied()
            .ok_or_else(|| SimError::Behavior("seek target attribute missing".to_string()))?;

        let Some(target_state) = ctx.state_of(target) else {
            // Target despawned; coast
            return Ok(());
        };

        let here = state.current().position();
        let offset = target_state.position() - here;
        if offset.magnitude() > 1e-4 {
            let velocity = offset.normalize() * self.speed;
            state
                .next_mut()
                .set_motion_component(1, velocity, ReferenceFrame::Scene)?;
        }
        Ok(())
    }
}

/// Pending keyboard thrust, stored in the controlled entity's attributes
///
/// Event handlers run between ticks and anything they stage on `next` is
/// overwritten by the next equalize pass, so the input is latched here and
/// applied during the update pass instead.
#[derive(Debug, Default)]
pub struct ThrustInput {
    /// Commanded acceleration in scene space
    pub acceleration: Vec3,
}

/// Keyboard-controlled thrust
///
/// W/S thrust along Z, A/D along X. Each tick the latched input is written
/// straight into the staged acceleration slot.
pub struct ThrustBehavior {
    /// Thrust magnitude in units per second squared
    pub thrust: f32,
}

impl ThrustBehavior {
    fn axis_for(key: KeyCode) -> Option<(usize, f32)> {
        match key {
            KeyCode::W => Some((2, -1.0)),
            KeyCode::S => Some((2, 1.0)),
            KeyCode::A => Some((0, -1.0)),
            KeyCode::D => Some((0, 1.0)),
            _ => None,
        }
    }

    fn input_of(attributes: &mut Attributes) -> Option<&mut ThrustInput> {
        attributes
            .as_mut()
            .and_then(|a| a.downcast_mut::<ThrustInput>())
    }
}

impl Behavior for ThrustBehavior {
    fn update(
        &self,
        attributes: &mut Attributes,
        state: &mut DoubleBuffer<MotionState>,
        _mesh: Option<MeshHandle>,
        _ctx: &TickContext<'_>,
    ) -> Result<(), SimError> {
        let commanded = Self::input_of(attributes)
            .map(|input| input.acceleration)
            .unwrap_or_else(Vec3::zeros);

        state
            .next_mut()
            .set_motion_component(2, commanded, ReferenceFrame::Scene)?;
        Ok(())
    }

    fn on_key_pressed(
        &self,
        attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        key: KeyCode,
    ) {
        let Some((axis, sign)) = Self::axis_for(key) else {
            return;
        };
        if let Some(input) = Self::input_of(attributes) {
            input.acceleration[axis] = sign * self.thrust;
        }
    }

    fn on_key_released(
        &self,
        attributes: &mut Attributes,
        _state: &mut DoubleBuffer<MotionState>,
        key: KeyCode,
    ) {
        let Some((axis, _)) = Self::axis_for(key) else {
            return;
        };
        if let Some(input) = Self::input_of(attributes) {
            input.acceleration[axis] = 0.0;
        }
    }
}
