//! # Arm Equipment Messages
//!
//! Messages exchanged between the arm executable and the rest of the system:
//! the encoder telemetry snapshot, the joint command batch, and the decoded
//! input device snapshot.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Fixed-point scaling factor applied to joint positions and velocities in
/// the telemetry snapshot.
///
/// The transport cannot carry floats losslessly, so values are scaled by this
/// factor and truncated to `i32`. Decoding divides by the same factor.
pub const SCALING_FACTOR: f64 = 10000.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Encoder telemetry snapshot produced by the arm executable.
///
/// All three arrays share the same length and index correspondence, in the
/// stable insertion order of the joint map. Positions and velocities are
/// fixed-point encoded, see [`SCALING_FACTOR`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct JointTelem {
    /// Joint names, in joint map order.
    pub name: Vec<String>,

    /// Fixed-point joint positions.
    pub position: Vec<i32>,

    /// Fixed-point joint velocities.
    pub velocity: Vec<i32>,
}

/// A batch of joint position commands consumed by the arm executable.
///
/// The two arrays share index correspondence. An *absent* batch is a valid
/// "no new command" signal, distinct from a batch of zero-valued positions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct JointCmdBatch {
    /// Names of the commanded joints.
    pub name: Vec<String>,

    /// Demanded positions, in each joint's own normalised units.
    pub position: Vec<f64>,
}

/// A decoded snapshot of the input device (joystick/gamepad) state.
///
/// Indexed by fixed physical ordinal assignments. The mapping of ordinals to
/// physical controls is a configuration table, not protocol.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Digital button states.
    pub buttons: Vec<bool>,

    /// Analog axis values, in [-1, 1].
    pub axes: Vec<f64>,
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Encode a normalised float value into its fixed-point telemetry form.
pub fn encode_fixed_point(value: f64) -> i32 {
    (value * SCALING_FACTOR) as i32
}

/// Decode a fixed-point telemetry value back into a normalised float.
pub fn decode_fixed_point(value: i32) -> f64 {
    value as f64 / SCALING_FACTOR
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JointCmdBatch {
    /// Build a batch from `(name, position)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut batch = Self::default();
        for (name, position) in pairs {
            batch.name.push(name.to_string());
            batch.position.push(position);
        }
        batch
    }

    /// True if the batch contains no commands.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Iterate over the `(name, position)` pairs of the batch.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.name
            .iter()
            .map(|n| n.as_str())
            .zip(self.position.iter().copied())
    }
}

impl InputSnapshot {
    /// Get the state of a button, or `false` if the ordinal is out of range.
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Get the value of an axis, or `0.0` if the ordinal is out of range.
    pub fn axis(&self, index: usize) -> f64 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fixed_point_inverse() {
        assert_eq!(decode_fixed_point(encode_fixed_point(0.56)), 0.56);
        assert_eq!(decode_fixed_point(encode_fixed_point(-0.9)), -0.9);
        assert_eq!(encode_fixed_point(0.0), 0);
    }

    #[test]
    fn test_fixed_point_truncates() {
        // Sub-resolution detail is truncated, not rounded
        assert_eq!(encode_fixed_point(0.00005), 0);
        assert_eq!(encode_fixed_point(0.12345678), 1234);
    }

    #[test]
    fn test_batch_pairs() {
        let batch = JointCmdBatch::from_pairs(vec![("a", 0.1), ("b", 0.2)]);
        assert!(!batch.is_empty());

        let pairs: Vec<(&str, f64)> = batch.iter().collect();
        assert_eq!(pairs, vec![("a", 0.1), ("b", 0.2)]);
    }

    #[test]
    fn test_input_snapshot_out_of_range() {
        let snapshot = InputSnapshot::default();
        assert!(!snapshot.button(3));
        assert_eq!(snapshot.axis(6), 0.0);
    }
}
