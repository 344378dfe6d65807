//! Parameters for the arm control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use super::toggle::ToggleConfig;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the arm control module.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Params {
    /// Time in seconds after which the watchdog stops all actuators if no
    /// command batch has been received.
    pub cmd_timeout_s: f64,

    /// Configuration applied to every position motor at initialisation.
    pub motor: MotorConfig,

    /// Joints of the arm, in telemetry order.
    pub joints: Vec<JointConfig>,

    /// Toggle bindings from the input device to actuator moves.
    pub toggles: Vec<ToggleConfig>,
}

/// Gains and motion profile limits for a position motor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MotorConfig {
    /// Encoder ticks per motor revolution.
    pub ticks_per_revolution: f64,

    /// Motion profile cruise velocity in ticks per 100 ms.
    pub cruise_velocity_ticks: f64,

    /// Motion profile acceleration in ticks per 100 ms per second.
    pub acceleration_ticks: f64,

    /// Proportional gain.
    pub k_p: f64,

    /// Integral gain.
    pub k_i: f64,

    /// Derivative gain.
    pub k_d: f64,

    /// Feedforward gain.
    pub k_f: f64,
}

/// Configuration of a single named joint.
#[derive(Debug, Clone, Deserialize)]
pub struct JointConfig {
    /// Unique name of the joint, used as the wire key for commands and
    /// telemetry.
    pub name: String,

    /// The actuator behind the joint.
    pub actuator: ActuatorConfig,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Configuration of an actuator variant.
///
/// `min` and `max` are the joint's position bounds in its own normalised
/// units. They are a convention, not an ordering: a reverse-plumbed piston
/// declares its electrically-reverse extreme as `max`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActuatorConfig {
    /// A two-position pneumatic piston on a double solenoid.
    Piston {
        #[serde(default)]
        min: f64,

        max: f64,

        /// Inverts which solenoid state the above-midpoint branch drives.
        #[serde(default)]
        reverse: bool,
    },

    /// A continuous motor-driven axis with an integrated encoder.
    Axis {
        #[serde(default)]
        min: f64,

        max: f64,

        /// Total motor revolutions over the full [min, max] travel.
        total_revolutions: f64,
    },
}

#[cfg(test)]
mod test {
    use super::super::toggle::{Effect, TargetPos};
    use super::*;

    /// The parameter file shipped with the executable.
    fn shipped_params() -> Params {
        toml::from_str(include_str!("../../../params/arm_exec.toml")).unwrap()
    }

    #[test]
    fn test_shipped_params_parse() {
        let params = shipped_params();

        assert_eq!(params.cmd_timeout_s, 1.0);
        assert_eq!(params.joints.len(), 4);
        assert_eq!(params.toggles.len(), 7);
    }

    #[test]
    fn test_gripper_closes_on_press() {
        let params = shipped_params();

        let gripper = params
            .toggles
            .iter()
            .find(|t| t.name == "gripper")
            .unwrap();

        // Pressing drives the gripper to min (closed), releasing to max
        assert_eq!(
            gripper.on,
            vec![Effect::Joint {
                joint: "top_gripper_left_arm_joint".into(),
                target: TargetPos::Min,
            }]
        );
        assert_eq!(
            gripper.off,
            vec![Effect::Joint {
                joint: "top_gripper_left_arm_joint".into(),
                target: TargetPos::Max,
            }]
        );
    }
}
