//! Implementations for the ArmCtrl state structure

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;
use std::time::Instant;

// Internal
use super::{
    apply_effects, Actuator, ArmCtrlError, ArmHwProvider, LinearAxis, Params, Piston, Toggle,
};
use super::{ActuatorConfig, ServoDriver};
use comms_if::eqpt::arm::{encode_fixed_point, InputSnapshot, JointCmdBatch, JointTelem};
use util::{module::State, params, session::Session};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Arm control module state.
///
/// Owns the joint map, the toggle bindings and the command-timeout watchdog.
pub struct ArmCtrl {
    pub(crate) params: Params,

    /// Named joints, in telemetry order. Order is stable for the lifetime of
    /// the controller and determines the positional arrays of the telemetry
    /// snapshot.
    joints: Vec<Joint>,

    toggles: Vec<Toggle>,

    servo: Box<dyn ServoDriver>,

    /// Time the last non-empty command batch was received.
    last_cmds_time: Instant,

    /// True until the current timeout episode has emitted its warning.
    warn_timeout: bool,
}

/// A named joint of the arm.
pub(crate) struct Joint {
    pub name: String,
    pub actuator: Actuator,
}

/// Input data to arm control.
#[derive(Default)]
pub struct InputData {
    /// The joint command batch for this cycle, or `None` if no new commands
    /// arrived.
    pub batch: Option<JointCmdBatch>,

    /// The input device snapshot for this cycle, or `None` if the input
    /// device was not polled.
    pub input: Option<InputSnapshot>,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True if the watchdog stopped the actuators this cycle.
    pub stopped_on_timeout: bool,

    /// Number of joint commands dispatched from the batch.
    pub joints_commanded: usize,

    /// Number of batch entries naming joints not in the map.
    pub unknown_joints: usize,

    /// Number of toggle effects applied.
    pub effects_applied: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl State for ArmCtrl {
    type InitData = (&'static str, Box<dyn ArmHwProvider>);
    type InitError = ArmCtrlError;

    type InputData = InputData;
    type OutputData = JointTelem;
    type StatusReport = StatusReport;
    type ProcError = ArmCtrlError;

    /// Initialise the ArmCtrl module.
    ///
    /// Expected init data is the path to the parameter file and the hardware
    /// provider to build actuator drivers from.
    fn init(
        &mut self,
        (params_path, mut hw): Self::InitData,
        _session: &Session,
    ) -> Result<(), Self::InitError> {
        let params: Params =
            params::load(params_path).map_err(ArmCtrlError::ParamLoadError)?;

        *self = Self::from_parts(params, hw.as_mut())?;

        info!("ArmCtrl initialised with {} joints", self.joints.len());

        Ok(())
    }

    /// Perform cyclic processing of arm control.
    ///
    /// The telemetry snapshot is produced before any command is dispatched,
    /// so it reflects actuator state as of the previous cycle's commands.
    /// Toggle polling happens before batch dispatch within the cycle.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let mut report = StatusReport::default();

        let telem = self.encoder_telem();

        if let Some(ref snapshot) = input_data.input {
            report.effects_applied = self.apply_input(snapshot);
        }

        match input_data.batch {
            Some(ref batch) if !batch.is_empty() => {
                // A valid batch resets the watchdog episode
                self.last_cmds_time = Instant::now();
                self.warn_timeout = true;

                for (name, position) in batch.iter() {
                    match self.joints.iter_mut().find(|j| j.name == name) {
                        Some(joint) => {
                            joint.actuator.set_position(position);
                            report.joints_commanded += 1;
                        }
                        // Unknown names are dropped without a warning so that
                        // batches from newer peers don't fail wholesale
                        None => {
                            trace!("Ignoring command for unknown joint \"{}\"", name);
                            report.unknown_joints += 1;
                        }
                    }
                }
            }
            _ => {
                if self.last_cmds_time.elapsed().as_secs_f64() > self.params.cmd_timeout_s
                    && self.warn_timeout
                {
                    self.stop();
                    warn!(
                        "Didn't recieve any commands for {} second(s). Halting...",
                        self.params.cmd_timeout_s
                    );
                    self.warn_timeout = false;
                    report.stopped_on_timeout = true;
                }
            }
        }

        Ok((telem, report))
    }
}

impl Default for ArmCtrl {
    /// An empty controller, to be replaced by [`State::init`].
    fn default() -> Self {
        Self {
            params: Params::default(),
            joints: Vec::new(),
            toggles: Vec::new(),
            servo: super::SimArmHw::new().servo(),
            last_cmds_time: Instant::now(),
            warn_timeout: true,
        }
    }
}

impl ArmCtrl {
    /// Build the controller from loaded parameters and a hardware provider.
    pub fn from_parts(
        params: Params,
        hw: &mut dyn ArmHwProvider,
    ) -> Result<Self, ArmCtrlError> {
        let mut joints = Vec::with_capacity(params.joints.len());

        for joint_config in &params.joints {
            let actuator = match joint_config.actuator {
                ActuatorConfig::Piston { min, max, reverse } => Actuator::Piston(Piston::new(
                    &joint_config.name,
                    min,
                    max,
                    reverse,
                    hw.solenoid(&joint_config.name),
                )),
                ActuatorConfig::Axis {
                    min,
                    max,
                    total_revolutions,
                } => Actuator::Axis(LinearAxis::new(
                    &joint_config.name,
                    min,
                    max,
                    total_revolutions,
                    &params.motor,
                    hw.motor(&joint_config.name),
                )),
            };

            joints.push(Joint {
                name: joint_config.name.clone(),
                actuator,
            });
        }

        // Reject toggles naming joints that don't exist, so a bad binding
        // table fails at init rather than silently at match time
        for toggle_config in &params.toggles {
            for effect in toggle_config.on.iter().chain(toggle_config.off.iter()) {
                if let super::Effect::Joint { joint, .. } = effect {
                    if !joints.iter().any(|j| &j.name == joint) {
                        return Err(ArmCtrlError::UnknownToggleJoint(
                            toggle_config.name.clone(),
                            joint.clone(),
                        ));
                    }
                }
            }
        }

        let toggles = params.toggles.iter().map(Toggle::from_config).collect();

        let servo = hw.servo();

        Ok(Self {
            params,
            joints,
            toggles,
            servo,
            last_cmds_time: Instant::now(),
            warn_timeout: true,
        })
    }

    /// Produce the encoder telemetry snapshot.
    ///
    /// Values are fixed-point encoded, see
    /// [`comms_if::eqpt::arm::SCALING_FACTOR`].
    pub fn encoder_telem(&self) -> JointTelem {
        let mut telem = JointTelem::default();

        for joint in &self.joints {
            telem.name.push(joint.name.clone());
            telem
                .position
                .push(encode_fixed_point(joint.actuator.get_position()));
            telem
                .velocity
                .push(encode_fixed_point(joint.actuator.get_velocity()));
        }

        telem
    }

    /// Stop every joint unconditionally.
    pub fn stop(&mut self) {
        for joint in self.joints.iter_mut() {
            joint.actuator.stop();
        }
    }

    /// Poll every toggle against the input snapshot, applying any fired
    /// effect lists. Returns the number of effects applied.
    fn apply_input(&mut self, snapshot: &InputSnapshot) -> usize {
        let mut applied = 0;

        for toggle in self.toggles.iter_mut() {
            if let Some(effects) = toggle.poll(snapshot) {
                applied += apply_effects(&mut self.joints, self.servo.as_mut(), effects);
            }
        }

        applied
    }

    #[cfg(test)]
    pub(crate) fn backdate_watchdog(&mut self, seconds: f64) {
        self.last_cmds_time = Instant::now() - std::time::Duration::from_secs_f64(seconds);
    }

    #[cfg(test)]
    pub(crate) fn joint_last_command(&self, name: &str) -> Option<f64> {
        self.joints
            .iter()
            .find(|j| j.name == name)
            .and_then(|j| j.actuator.last_command())
    }
}

#[cfg(test)]
mod test {
    use super::super::hw::SimArmHw;
    use super::super::params::{JointConfig, MotorConfig};
    use super::super::toggle::{Effect, InputBinding, TargetPos, ToggleConfig};
    use super::super::SolenoidState;
    use super::*;

    fn test_params() -> Params {
        Params {
            cmd_timeout_s: 1.0,
            motor: MotorConfig {
                ticks_per_revolution: 2048.0,
                cruise_velocity_ticks: 48000.0,
                acceleration_ticks: 45000.0,
                k_p: 0.2,
                k_i: 0.0,
                k_d: 0.1,
                k_f: 0.2,
            },
            joints: vec![
                JointConfig {
                    name: "arm_roller_bar_joint".into(),
                    actuator: ActuatorConfig::Piston {
                        min: 0.0,
                        max: 0.07,
                        reverse: false,
                    },
                },
                JointConfig {
                    name: "top_slider_joint".into(),
                    actuator: ActuatorConfig::Piston {
                        min: 0.0,
                        max: 0.30,
                        reverse: false,
                    },
                },
                JointConfig {
                    name: "top_gripper_left_arm_joint".into(),
                    actuator: ActuatorConfig::Piston {
                        min: 0.0,
                        max: -0.9,
                        reverse: true,
                    },
                },
                JointConfig {
                    name: "elevator_center_joint".into(),
                    actuator: ActuatorConfig::Axis {
                        min: 0.0,
                        max: 0.56,
                        total_revolutions: 164.0,
                    },
                },
            ],
            toggles: vec![ToggleConfig {
                name: "elevator_loading_station".into(),
                input: InputBinding::Button { index: 5 },
                on: vec![
                    Effect::Joint {
                        joint: "elevator_center_joint".into(),
                        target: TargetPos::Value(0.15),
                    },
                    Effect::Joint {
                        joint: "top_slider_joint".into(),
                        target: TargetPos::Max,
                    },
                ],
                off: vec![
                    Effect::Joint {
                        joint: "elevator_center_joint".into(),
                        target: TargetPos::Min,
                    },
                    Effect::Joint {
                        joint: "top_slider_joint".into(),
                        target: TargetPos::Min,
                    },
                ],
            }],
        }
    }

    fn batch(pairs: Vec<(&str, f64)>) -> InputData {
        InputData {
            batch: Some(JointCmdBatch::from_pairs(pairs)),
            input: None,
        }
    }

    #[test]
    fn test_watchdog_stops_once_per_episode() {
        let mut hw = SimArmHw::new();
        let mut ctrl = ArmCtrl::from_parts(test_params(), &mut hw).unwrap();
        let slider = hw.solenoids["top_slider_joint"].clone();
        let elevator = hw.motors["elevator_center_joint"].clone();

        // Batch at t=0
        ctrl.proc(&batch(vec![("top_slider_joint", 0.30)])).unwrap();
        let writes_after_cmd = slider.borrow().writes;

        // No batch until t=1.5s: exactly one stop across the gap
        ctrl.backdate_watchdog(1.5);
        let (_, report) = ctrl.proc(&InputData::default()).unwrap();
        assert!(report.stopped_on_timeout);
        assert_eq!(slider.borrow().last, Some(SolenoidState::Off));
        assert_eq!(slider.borrow().writes, writes_after_cmd + 1);
        assert_eq!(elevator.borrow().output_writes, 1);

        let (_, report) = ctrl.proc(&InputData::default()).unwrap();
        assert!(!report.stopped_on_timeout);
        assert_eq!(slider.borrow().writes, writes_after_cmd + 1);

        // A new batch resets the episode so a later gap re-triggers
        ctrl.proc(&batch(vec![("top_slider_joint", 0.0)])).unwrap();
        ctrl.backdate_watchdog(1.5);
        let (_, report) = ctrl.proc(&InputData::default()).unwrap();
        assert!(report.stopped_on_timeout);
        assert_eq!(elevator.borrow().output_writes, 2);
    }

    #[test]
    fn test_unknown_joint_silently_ignored() {
        let mut hw = SimArmHw::new();
        let mut ctrl = ArmCtrl::from_parts(test_params(), &mut hw).unwrap();

        let (_, report) = ctrl.proc(&batch(vec![("ghost", 0.5)])).unwrap();

        assert_eq!(report.unknown_joints, 1);
        assert_eq!(report.joints_commanded, 0);
        for name in [
            "arm_roller_bar_joint",
            "top_slider_joint",
            "top_gripper_left_arm_joint",
            "elevator_center_joint",
        ]
        .iter()
        {
            assert_eq!(ctrl.joint_last_command(name), None);
        }
    }

    #[test]
    fn test_telem_order_and_scaling() {
        let mut hw = SimArmHw::new();
        let mut ctrl = ArmCtrl::from_parts(test_params(), &mut hw).unwrap();

        ctrl.proc(&batch(vec![("top_slider_joint", 0.30)])).unwrap();

        // The snapshot reflects the previous cycle's commands
        let (telem, _) = ctrl.proc(&InputData::default()).unwrap();
        assert_eq!(
            telem.name,
            vec![
                "arm_roller_bar_joint",
                "top_slider_joint",
                "top_gripper_left_arm_joint",
                "elevator_center_joint",
            ]
        );
        assert_eq!(telem.position[1], 3000);
        assert_eq!(telem.velocity, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_toggle_compound_move() {
        let mut hw = SimArmHw::new();
        let mut ctrl = ArmCtrl::from_parts(test_params(), &mut hw).unwrap();

        // First snapshot establishes the released baseline
        let baseline = InputData {
            batch: None,
            input: Some(InputSnapshot {
                buttons: vec![false; 6],
                axes: vec![],
            }),
        };
        let (_, report) = ctrl.proc(&baseline).unwrap();
        assert_eq!(report.effects_applied, 0);

        let mut buttons = vec![false; 6];
        buttons[5] = true;
        let input = InputData {
            batch: None,
            input: Some(InputSnapshot {
                buttons,
                axes: vec![],
            }),
        };

        let (_, report) = ctrl.proc(&input).unwrap();
        assert_eq!(report.effects_applied, 2);
        assert_eq!(ctrl.joint_last_command("elevator_center_joint"), Some(0.15));
        assert_eq!(ctrl.joint_last_command("top_slider_joint"), Some(0.30));

        // Released: both joints return to their minimums
        let input = InputData {
            batch: None,
            input: Some(InputSnapshot {
                buttons: vec![false; 6],
                axes: vec![],
            }),
        };
        let (_, report) = ctrl.proc(&input).unwrap();
        assert_eq!(report.effects_applied, 2);
        assert_eq!(ctrl.joint_last_command("elevator_center_joint"), Some(0.0));
        assert_eq!(ctrl.joint_last_command("top_slider_joint"), Some(0.0));
    }

    #[test]
    fn test_unknown_toggle_joint_rejected() {
        let mut params = test_params();
        params.toggles[0].on.push(Effect::Joint {
            joint: "phantom_joint".into(),
            target: TargetPos::Max,
        });

        let mut hw = SimArmHw::new();
        assert!(matches!(
            ArmCtrl::from_parts(params, &mut hw),
            Err(ArmCtrlError::UnknownToggleJoint(_, _))
        ));
    }
}
