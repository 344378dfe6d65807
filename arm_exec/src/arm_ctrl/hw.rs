//! # Actuator hardware drivers
//!
//! This module provides the traits which abstract over the vendor hardware
//! layer (solenoid banks, smart motor controllers, PWM servos), plus
//! simulation implementations used on the bench and in tests.
//!
//! The vendor-backed implementations live outside this repository; the
//! traits here are the seam they plug into.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::params::MotorConfig;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The three stable states of a double solenoid valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolenoidState {
    /// Both coils de-energised.
    Off,
    /// Forward coil energised.
    Forward,
    /// Reverse coil energised.
    Reverse,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Driver for a double solenoid valve.
pub trait SolenoidDriver {
    /// Set the state of the solenoid.
    fn set(&mut self, state: SolenoidState);
}

/// Driver for a position-controlled motor with an integrated encoder.
///
/// Sensor units are encoder ticks; rates are ticks per 100 ms, the native
/// convention of the motor controller.
pub trait PositionMotor {
    /// Apply the motor configuration (gains and motion profile limits).
    fn configure(&mut self, config: &MotorConfig);

    /// Current sensor position in ticks.
    fn sensor_position(&self) -> f64;

    /// Current sensor velocity in ticks per 100 ms.
    fn sensor_velocity(&self) -> f64;

    /// Issue a motion-profiled (trapezoidal) move to the given absolute tick
    /// target.
    fn motion_profile_to(&mut self, target_ticks: f64);

    /// Command a raw percent output, in [-1, 1].
    fn percent_output(&mut self, output: f64);
}

/// Driver for a PWM servo.
pub trait ServoDriver {
    /// Set the servo position, in [0, 1].
    fn set(&mut self, position: f64);
}

/// Provider of hardware drivers for the arm's actuators.
///
/// The arm controller asks the provider for one driver per configured joint
/// at initialisation. The simulation provider hands out recording drivers;
/// the robot provider hands out vendor-backed ones.
pub trait ArmHwProvider {
    fn solenoid(&mut self, joint: &str) -> Box<dyn SolenoidDriver>;
    fn motor(&mut self, joint: &str) -> Box<dyn PositionMotor>;
    fn servo(&mut self) -> Box<dyn ServoDriver>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Recorded state of a simulated solenoid.
#[derive(Debug, Clone, Default)]
pub struct SimSolenoidState {
    /// Last state written, or `None` before any write.
    pub last: Option<SolenoidState>,

    /// Total number of writes issued.
    pub writes: usize,
}

/// Recorded state of a simulated motor.
#[derive(Debug, Clone, Default)]
pub struct SimMotorState {
    /// Sensor position in ticks, settable by tests.
    pub sensor_position_ticks: f64,

    /// Sensor velocity in ticks per 100 ms, settable by tests.
    pub sensor_velocity_ticks: f64,

    /// Last motion profile target issued, or `None` before any.
    pub profile_target_ticks: Option<f64>,

    /// Number of motion profile moves issued.
    pub profile_writes: usize,

    /// Last percent output commanded.
    pub output: f64,

    /// Number of percent output writes issued.
    pub output_writes: usize,
}

/// A simulated double solenoid.
pub struct SimSolenoid {
    state: Rc<RefCell<SimSolenoidState>>,
}

/// A simulated position motor.
pub struct SimMotor {
    state: Rc<RefCell<SimMotorState>>,
}

/// A simulated servo.
pub struct SimServo {
    position: Rc<RefCell<f64>>,
}

/// Simulation hardware provider.
///
/// Keeps shared handles to every driver it hands out so the bench executable
/// and tests can inspect what the controller commanded.
#[derive(Default)]
pub struct SimArmHw {
    /// Handles to the solenoid states, keyed by joint name.
    pub solenoids: HashMap<String, Rc<RefCell<SimSolenoidState>>>,

    /// Handles to the motor states, keyed by joint name.
    pub motors: HashMap<String, Rc<RefCell<SimMotorState>>>,

    /// Handle to the servo position.
    pub servo: Rc<RefCell<f64>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SolenoidDriver for SimSolenoid {
    fn set(&mut self, state: SolenoidState) {
        let mut s = self.state.borrow_mut();
        s.last = Some(state);
        s.writes += 1;
    }
}

impl PositionMotor for SimMotor {
    fn configure(&mut self, _config: &MotorConfig) {}

    fn sensor_position(&self) -> f64 {
        self.state.borrow().sensor_position_ticks
    }

    fn sensor_velocity(&self) -> f64 {
        self.state.borrow().sensor_velocity_ticks
    }

    fn motion_profile_to(&mut self, target_ticks: f64) {
        let mut s = self.state.borrow_mut();
        s.profile_target_ticks = Some(target_ticks);
        s.profile_writes += 1;
    }

    fn percent_output(&mut self, output: f64) {
        let mut s = self.state.borrow_mut();
        s.output = output;
        s.output_writes += 1;
    }
}

impl ServoDriver for SimServo {
    fn set(&mut self, position: f64) {
        *self.position.borrow_mut() = position;
    }
}

impl ArmHwProvider for SimArmHw {
    fn solenoid(&mut self, joint: &str) -> Box<dyn SolenoidDriver> {
        let state = Rc::new(RefCell::new(SimSolenoidState::default()));
        self.solenoids.insert(joint.to_string(), state.clone());
        Box::new(SimSolenoid { state })
    }

    fn motor(&mut self, joint: &str) -> Box<dyn PositionMotor> {
        let state = Rc::new(RefCell::new(SimMotorState::default()));
        self.motors.insert(joint.to_string(), state.clone());
        Box::new(SimMotor { state })
    }

    fn servo(&mut self) -> Box<dyn ServoDriver> {
        Box::new(SimServo {
            position: self.servo.clone(),
        })
    }
}

impl SimArmHw {
    pub fn new() -> Self {
        Self::default()
    }
}
