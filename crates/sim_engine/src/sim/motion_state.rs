//! Motion state: position, orientation, and an open-ended derivative chain
//!
//! A `MotionState` holds the spatial state of one simulated object: its
//! scene-space position (degree 0 of the motion equation), orientation,
//! render-only scale, and a growable chain of derivatives of position
//! (degree 1 = velocity, degree 2 = acceleration, ...). Each derivative
//! carries parallel per-axis min/max constraints applied during integration.

use crate::foundation::math::{Quat, Vec3};
use crate::sim::error::SimError;

/// Coordinate basis in which a motion component's axes are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFrame {
    /// World-aligned axes
    Scene,
    /// Axes rotated with the object's own orientation
    Object,
}

/// Clamp bound for a single axis of one derivative degree
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraint {
    /// Whether this bound participates in clamping
    pub enabled: bool,
    /// The bound value
    pub value: f32,
}

impl Constraint {
    /// Create an enabled constraint with the given bound
    pub fn enabled(value: f32) -> Self {
        Self {
            enabled: true,
            value,
        }
    }

    /// Raise `value` to at least the bound
    ///
    /// With `absolute` set the comparison is against the magnitude and the
    /// sign of the incoming value is preserved.
    fn clamp_min(&self, value: f32, absolute: bool) -> f32 {
        if !self.enabled {
            return value;
        }
        if absolute {
            if value.abs() < self.value {
                self.value.copysign(value)
            } else {
                value
            }
        } else if value < self.value {
            self.value
        } else {
            value
        }
    }

    /// Lower `value` to at most the bound, same magnitude rule as `clamp_min`
    fn clamp_max(&self, value: f32, absolute: bool) -> f32 {
        if !self.enabled {
            return value;
        }
        if absolute {
            if value.abs() > self.value {
                self.value.copysign(value)
            } else {
                value
            }
        } else if value > self.value {
            self.value
        } else {
            value
        }
    }
}

/// Per-axis constraints for one derivative degree
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstraintSet {
    /// X-axis bound
    pub x: Constraint,
    /// Y-axis bound
    pub y: Constraint,
    /// Z-axis bound
    pub z: Constraint,
}

impl ConstraintSet {
    fn axis(&self, axis: usize) -> &Constraint {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

/// Spatial and kinematic state of a simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    position: Vec3,
    orientation: Quat,
    scale: Vec3,
    /// Derivatives of position; degree d >= 1 lives at index d - 1
    components: Vec<Vec3>,
    min_constraints: Vec<ConstraintSet>,
    max_constraints: Vec<ConstraintSet>,
    /// Frame newly set/added components (degree >= 1) are stored in
    native_frame: ReferenceFrame,
    /// Compare constraint bounds against magnitudes instead of signed values
    absolute_clamp: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(ReferenceFrame::Scene)
    }
}

impl MotionState {
    /// Create a state at the origin whose components live in `native_frame`
    pub fn new(native_frame: ReferenceFrame) -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            components: Vec::new(),
            min_constraints: Vec::new(),
            max_constraints: Vec::new(),
            native_frame,
            absolute_clamp: false,
        }
    }

    /// Scene-space position (degree 0)
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current orientation
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Set the orientation
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    /// Per-axis scale factor (render-only, never integrated)
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Frame in which degree >= 1 components are stored
    pub fn native_frame(&self) -> ReferenceFrame {
        self.native_frame
    }

    /// Whether constraint clamping compares magnitudes instead of signed values
    pub fn absolute_clamp(&self) -> bool {
        self.absolute_clamp
    }

    /// Toggle magnitude-based constraint comparison for all axes and degrees
    pub fn set_absolute_clamp(&mut self, absolute: bool) {
        self.absolute_clamp = absolute;
    }

    /// Number of allocated derivative components (highest allocated degree)
    pub fn degree_count(&self) -> usize {
        self.components.len()
    }

    /// Replace the motion component of the given degree
    ///
    /// Degree 0 sets the position directly and fails with
    /// [`SimError::InvalidOperation`] for the `Object` frame, which has no
    /// meaning for positions. For degree >= 1 the vector is converted from
    /// `frame` into the state's native frame before storage; the component
    /// chain grows with zero-fill if `degree` exceeds the allocated length.
    pub fn set_motion_component(
        &mut self,
        degree: usize,
        vector: Vec3,
        frame: ReferenceFrame,
    ) -> Result<(), SimError> {
        if degree == 0 {
            self.reject_object_frame_position(frame)?;
            self.position = vector;
            return Ok(());
        }
        self.ensure_degree(degree);
        self.components[degree - 1] = self.convert(vector, frame, self.native_frame);
        Ok(())
    }

    /// Add to the motion component of the given degree
    ///
    /// Same addressing and growth rules as [`MotionState::set_motion_component`].
    pub fn add_motion_component(
        &mut self,
        degree: usize,
        vector: Vec3,
        frame: ReferenceFrame,
    ) -> Result<(), SimError> {
        if degree == 0 {
            self.reject_object_frame_position(frame)?;
            self.position += vector;
            return Ok(());
        }
        self.ensure_degree(degree);
        let converted = self.convert(vector, frame, self.native_frame);
        self.components[degree - 1] += converted;
        Ok(())
    }

    /// Read the motion component of the given degree, converted into `frame`
    ///
    /// Degree 0 returns the position and fails for the `Object` frame.
    /// Reads never grow the chain: an unallocated degree fails with
    /// [`SimError::IndexOutOfRange`].
    pub fn motion_component(
        &self,
        degree: usize,
        frame: ReferenceFrame,
    ) -> Result<Vec3, SimError> {
        if degree == 0 {
            self.reject_object_frame_position(frame)?;
            return Ok(self.position);
        }
        let stored = self
            .components
            .get(degree - 1)
            .copied()
            .ok_or(SimError::IndexOutOfRange {
                degree,
                len: self.components.len(),
            })?;
        Ok(self.convert(stored, self.native_frame, frame))
    }

    /// Direct access to a stored component slot in the state's native frame
    ///
    /// Degree 0 yields the position. No conversion is applied and no growth
    /// occurs; growth is deterministic and happens only through the explicit
    /// set/add operations.
    pub fn motion_component_mut(&mut self, degree: usize) -> Result<&mut Vec3, SimError> {
        if degree == 0 {
            return Ok(&mut self.position);
        }
        let len = self.components.len();
        self.components
            .get_mut(degree - 1)
            .ok_or(SimError::IndexOutOfRange { degree, len })
    }

    /// Lower clamp bounds for the given degree
    ///
    /// Returns `None` for degree 0 (positions are unconstrained) and for
    /// unallocated degrees. Constraint accessors uniformly use `Option`
    /// rather than errors.
    pub fn min_constraint(&self, degree: usize) -> Option<&ConstraintSet> {
        if degree == 0 {
            return None;
        }
        self.min_constraints.get(degree - 1)
    }

    /// Mutable lower clamp bounds for the given degree
    pub fn min_constraint_mut(&mut self, degree: usize) -> Option<&mut ConstraintSet> {
        if degree == 0 {
            return None;
        }
        self.min_constraints.get_mut(degree - 1)
    }

    /// Upper clamp bounds for the given degree
    pub fn max_constraint(&self, degree: usize) -> Option<&ConstraintSet> {
        if degree == 0 {
            return None;
        }
        self.max_constraints.get(degree - 1)
    }

    /// Mutable upper clamp bounds for the given degree
    pub fn max_constraint_mut(&mut self, degree: usize) -> Option<&mut ConstraintSet> {
        if degree == 0 {
            return None;
        }
        self.max_constraints.get_mut(degree - 1)
    }

    /// Advance the state by one fixed step of `step_us` microseconds
    ///
    /// Semi-implicit Euler: derivative degrees are processed from highest to
    /// second-lowest, each accumulating the next-higher degree scaled by the
    /// step and clamped per axis against its min then max bounds. Position
    /// then advances by the already-updated degree-1 component, rotated by
    /// the orientation when components are stored object-frame. The highest
    /// degree is never integrated; it is externally driven.
    pub fn update(&mut self, _time_index_us: u64, step_us: u64) {
        let dt = step_us as f32 * 1.0e-6;
        let n = self.components.len();

        if n >= 2 {
            for i in (0..n - 1).rev() {
                let delta = self.components[i + 1] * dt;
                for axis in 0..3 {
                    let mut value = self.components[i][axis] + delta[axis];
                    value = self.min_constraints[i]
                        .axis(axis)
                        .clamp_min(value, self.absolute_clamp);
                    value = self.max_constraints[i]
                        .axis(axis)
                        .clamp_max(value, self.absolute_clamp);
                    self.components[i][axis] = value;
                }
            }
        }

        if n >= 1 {
            let velocity = match self.native_frame {
                ReferenceFrame::Object => self.orientation * self.components[0],
                ReferenceFrame::Scene => self.components[0],
            };
            self.position += velocity * dt;
        }
    }

    /// Convert a vector between reference frames using the current orientation
    fn convert(&self, vector: Vec3, from: ReferenceFrame, to: ReferenceFrame) -> Vec3 {
        match (from, to) {
            (ReferenceFrame::Scene, ReferenceFrame::Object) => self.orientation * vector,
            (ReferenceFrame::Object, ReferenceFrame::Scene) => {
                self.orientation.inverse() * vector
            }
            _ => vector,
        }
    }

    fn reject_object_frame_position(&self, frame: ReferenceFrame) -> Result<(), SimError> {
        if frame == ReferenceFrame::Object {
            return Err(SimError::InvalidOperation(
                "position has no object-frame representation".to_string(),
            ));
        }
        Ok(())
    }

    /// Grow the component chain (and parallel constraints) to hold `degree`
    fn ensure_degree(&mut self, degree: usize) {
        debug_assert!(degree >= 1);
        while self.components.len() < degree {
            self.components.push(Vec3::zeros());
            self.min_constraints.push(ConstraintSet::default());
            self.max_constraints.push(ConstraintSet::default());
        }
        debug_assert_eq!(self.components.len(), self.min_constraints.len());
        debug_assert_eq!(self.components.len(), self.max_constraints.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_rejects_object_frame() {
        let mut state = MotionState::default();

        assert!(matches!(
            state.motion_component(0, ReferenceFrame::Object),
            Err(SimError::InvalidOperation(_))
        ));
        assert!(matches!(
            state.set_motion_component(0, Vec3::new(1.0, 0.0, 0.0), ReferenceFrame::Object),
            Err(SimError::InvalidOperation(_))
        ));
        assert!(matches!(
            state.add_motion_component(0, Vec3::new(1.0, 0.0, 0.0), ReferenceFrame::Object),
            Err(SimError::InvalidOperation(_))
        ));

        // The rejection is unconditional, regardless of prior state
        state.set_orientation(Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI));
        assert!(state.motion_component(0, ReferenceFrame::Object).is_err());
    }

    #[test]
    fn test_growth_zero_fills_lower_degrees() {
        let mut state = MotionState::default();
        let jerk = Vec3::new(0.5, -1.0, 2.0);

        state
            .set_motion_component(3, jerk, ReferenceFrame::Scene)
            .unwrap();

        assert_eq!(state.degree_count(), 3);
        assert_eq!(
            state.motion_component(1, ReferenceFrame::Scene).unwrap(),
            Vec3::zeros()
        );
        assert_eq!(
            state.motion_component(2, ReferenceFrame::Scene).unwrap(),
            Vec3::zeros()
        );
        assert_eq!(
            state.motion_component(3, ReferenceFrame::Scene).unwrap(),
            jerk
        );
    }

    #[test]
    fn test_reads_never_grow() {
        let mut state = MotionState::default();
        state
            .set_motion_component(1, Vec3::zeros(), ReferenceFrame::Scene)
            .unwrap();

        assert!(matches!(
            state.motion_component(2, ReferenceFrame::Scene),
            Err(SimError::IndexOutOfRange { degree: 2, len: 1 })
        ));
        assert!(matches!(
            state.motion_component_mut(2),
            Err(SimError::IndexOutOfRange { degree: 2, len: 1 })
        ));
        assert_eq!(state.degree_count(), 1);
    }

    #[test]
    fn test_constraint_accessors_return_none_out_of_range() {
        let mut state = MotionState::default();
        state
            .set_motion_component(1, Vec3::zeros(), ReferenceFrame::Scene)
            .unwrap();

        assert!(state.min_constraint(0).is_none());
        assert!(state.max_constraint(0).is_none());
        assert!(state.min_constraint(1).is_some());
        assert!(state.max_constraint(2).is_none());
    }

    #[test]
    fn test_clamped_integration_advances_position_with_clamped_velocity() {
        let mut state = MotionState::default();
        state
            .set_motion_component(2, Vec3::new(1.0, 0.0, 0.0), ReferenceFrame::Scene)
            .unwrap();
        state.max_constraint_mut(1).unwrap().x = Constraint::enabled(0.5);

        // One full second: velocity would reach 1.0 but clamps to 0.5, and
        // position advances with the already-clamped velocity.
        state.update(0, 1_000_000);

        let velocity = state.motion_component(1, ReferenceFrame::Scene).unwrap();
        assert_relative_eq!(velocity.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(state.position().x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_min_constraint_clamps_up() {
        let mut state = MotionState::default();
        state
            .set_motion_component(1, Vec3::new(0.2, 0.0, 0.0), ReferenceFrame::Scene)
            .unwrap();
        state
            .set_motion_component(2, Vec3::zeros(), ReferenceFrame::Scene)
            .unwrap();
        state.min_constraint_mut(1).unwrap().x = Constraint::enabled(1.0);

        state.update(0, 1_000);

        let velocity = state.motion_component(1, ReferenceFrame::Scene).unwrap();
        assert_relative_eq!(velocity.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_absolute_clamp_preserves_sign() {
        let mut state = MotionState::default();
        state.set_absolute_clamp(true);
        state
            .set_motion_component(1, Vec3::new(-2.0, 0.0, 0.0), ReferenceFrame::Scene)
            .unwrap();
        state
            .set_motion_component(2, Vec3::zeros(), ReferenceFrame::Scene)
            .unwrap();
        state.max_constraint_mut(1).unwrap().x = Constraint::enabled(0.5);

        state.update(0, 1_000);

        // Magnitude clamps to 0.5 while direction is preserved
        let velocity = state.motion_component(1, ReferenceFrame::Scene).unwrap();
        assert_relative_eq!(velocity.x, -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_highest_degree_is_never_integrated() {
        let mut state = MotionState::default();
        let acceleration = Vec3::new(3.0, 0.0, 0.0);
        state
            .set_motion_component(2, acceleration, ReferenceFrame::Scene)
            .unwrap();

        state.update(0, 100_000);

        assert_eq!(
            state.motion_component(2, ReferenceFrame::Scene).unwrap(),
            acceleration
        );
    }

    #[test]
    fn test_frame_conversion_round_trip() {
        let mut state = MotionState::new(ReferenceFrame::Scene);
        state.set_orientation(Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI));

        let object_vec = Vec3::new(1.0, 0.0, 0.0);
        state
            .set_motion_component(1, object_vec, ReferenceFrame::Object)
            .unwrap();

        // Reading back in the object frame recovers the original vector
        let read_back = state.motion_component(1, ReferenceFrame::Object).unwrap();
        assert_relative_eq!(read_back, object_vec, epsilon = 1e-6);

        // Stored scene-frame value is rotated by the inverse orientation
        let stored = state.motion_component(1, ReferenceFrame::Scene).unwrap();
        let expected = state.orientation().inverse() * object_vec;
        assert_relative_eq!(stored, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_scene_frame_set_is_identity_conversion() {
        let mut state = MotionState::new(ReferenceFrame::Scene);
        state.set_orientation(Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI));

        let v = Vec3::new(0.0, 0.0, 1.0);
        state
            .set_motion_component(1, v, ReferenceFrame::Scene)
            .unwrap();

        assert_relative_eq!(
            state.motion_component(1, ReferenceFrame::Scene).unwrap(),
            v,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_object_frame_state_rotates_velocity_into_position() {
        let mut state = MotionState::new(ReferenceFrame::Object);
        state.set_orientation(Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI));
        state
            .set_motion_component(1, Vec3::new(1.0, 0.0, 0.0), ReferenceFrame::Object)
            .unwrap();

        state.update(0, 1_000_000);

        // Object-frame +X rotated 90° about Y lands on scene -Z
        let expected = Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI) * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(state.position(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_mutable_slot_access_bypasses_conversion() {
        let mut state = MotionState::new(ReferenceFrame::Scene);
        state
            .set_motion_component(2, Vec3::zeros(), ReferenceFrame::Scene)
            .unwrap();

        *state.motion_component_mut(2).unwrap() = Vec3::new(0.0, 9.0, 0.0);

        assert_eq!(
            state.motion_component(2, ReferenceFrame::Scene).unwrap(),
            Vec3::new(0.0, 9.0, 0.0)
        );
    }
}
