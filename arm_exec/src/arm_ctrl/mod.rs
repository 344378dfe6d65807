//! # Arm control module
//!
//! This module implements the joint command multiplexer for the robot's arm:
//! a set of named actuators (pneumatic pistons, a motor-driven elevator axis
//! and a servo) behind a uniform position/velocity contract, driven by
//! incoming joint command batches and by toggle bindings on the input device.
//!
//! The module also owns the command-timeout watchdog: if no command batch
//! arrives within the configured threshold all actuators are stopped once and
//! a single warning is emitted, until a new batch resets the episode.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod actuator;
mod hw;
mod params;
mod state;
mod toggle;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
pub use actuator::*;
pub use hw::*;
pub use params::*;
pub use state::*;
pub use toggle::*;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Possible errors that can occur during ArmCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Failed to load ArmCtrl params: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Toggle \"{0}\" references unknown joint \"{1}\"")]
    UnknownToggleJoint(String, String),
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Apply a toggle's effect list to the joint map and servo.
///
/// Joint names are validated when the binding table is loaded, so a missing
/// joint here is simply skipped. Returns the number of effects applied.
pub(crate) fn apply_effects(
    joints: &mut [state::Joint],
    servo: &mut dyn ServoDriver,
    effects: &[Effect],
) -> usize {
    for effect in effects {
        match effect {
            Effect::Joint { joint, target } => {
                if let Some(j) = joints.iter_mut().find(|j| &j.name == joint) {
                    let (min, max) = j.actuator.bounds();
                    let position = match target {
                        TargetPos::Min => min,
                        TargetPos::Max => max,
                        TargetPos::Value(value) => *value,
                    };
                    j.actuator.set_position(position);
                }
            }
            Effect::Servo { position } => servo.set(*position),
        }
    }

    effects.len()
}
