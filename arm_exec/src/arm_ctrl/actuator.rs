//! # Actuator position-control abstraction
//!
//! Uniform get/set position and velocity contract over the arm's actuator
//! variants: two-position pneumatic pistons and continuous motor-driven axes.
//!
//! Both variants de-duplicate commands: a demand equal to the last one issued
//! is logged but produces no new hardware write.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::hw::{PositionMotor, SolenoidDriver, SolenoidState};
use super::params::MotorConfig;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A two-position pneumatic piston on a double solenoid.
///
/// The piston is a quantizing actuator: it has exactly two stable physical
/// positions, and any demanded position is driven to one extreme or the other
/// by comparing against the midpoint of the [min, max] span.
pub struct Piston {
    name: String,

    /// Position bound conventions, see [`super::ActuatorConfig`].
    pub min: f64,
    pub max: f64,

    reverse: bool,

    last_command: Option<f64>,

    solenoid: Box<dyn SolenoidDriver>,
}

/// A continuous motor-driven axis with an integrated encoder.
///
/// Demands are issued as motion-profiled moves to an absolute encoder target.
pub struct LinearAxis {
    name: String,

    pub min: f64,
    pub max: f64,

    /// Total encoder travel over the full [min, max] span.
    total_ticks: f64,

    last_command: Option<f64>,

    motor: Box<dyn PositionMotor>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The closed set of actuator variants owned by the arm controller.
pub enum Actuator {
    Piston(Piston),
    Axis(LinearAxis),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Piston {
    pub fn new(
        name: &str,
        min: f64,
        max: f64,
        reverse: bool,
        solenoid: Box<dyn SolenoidDriver>,
    ) -> Self {
        Self {
            name: name.to_string(),
            min,
            max,
            reverse,
            last_command: None,
            solenoid,
        }
    }

    /// The last commanded position, or 0.0 before any command.
    ///
    /// The solenoid has no continuous feedback, so this is NOT a sensed
    /// position.
    pub fn get_position(&self) -> f64 {
        self.last_command.unwrap_or(0.0)
    }

    /// The solenoid has no velocity feedback, so this is always zero.
    pub fn get_velocity(&self) -> f64 {
        0.0
    }

    pub fn set_position(&mut self, position: f64) {
        info!("{} position demand: {}", self.name, position);

        if Some(position) == self.last_command {
            return;
        }

        // Quantize the demand to one of the two physical extremes by
        // comparing against the midpoint of the [min, max] span. The reverse
        // flag swaps which coil the above-midpoint branch drives, so callers
        // only ever deal in logical positions.
        let centre = ((self.max - self.min) / 2.0 + self.min).abs();
        let above = position.abs() >= centre;

        let state = if above != self.reverse {
            SolenoidState::Forward
        } else {
            SolenoidState::Reverse
        };

        self.solenoid.set(state);
        self.last_command = Some(position);
    }

    pub fn stop(&mut self) {
        self.solenoid.set(SolenoidState::Off);
    }
}

impl LinearAxis {
    pub fn new(
        name: &str,
        min: f64,
        max: f64,
        total_revolutions: f64,
        config: &MotorConfig,
        mut motor: Box<dyn PositionMotor>,
    ) -> Self {
        motor.configure(config);

        Self {
            name: name.to_string(),
            min,
            max,
            total_ticks: config.ticks_per_revolution * total_revolutions,
            last_command: None,
            motor,
        }
    }

    /// Sensed position mapped into the [min, max] span.
    pub fn get_position(&self) -> f64 {
        let fraction = self.motor.sensor_position() / self.total_ticks;
        fraction * (self.max - self.min) + self.min
    }

    /// Sensed velocity mapped into the [min, max] span.
    ///
    /// The sensor reports ticks per 100 ms; the factor of 10 converts to the
    /// per-second convention.
    pub fn get_velocity(&self) -> f64 {
        let fraction = self.motor.sensor_velocity() * 10.0 / self.total_ticks;
        fraction * (self.max - self.min) + self.min
    }

    pub fn set_position(&mut self, position: f64) {
        info!("{} position demand: {}", self.name, position);

        if Some(position) == self.last_command {
            return;
        }

        let fraction = (position - self.min) / (self.max - self.min);
        self.motor.motion_profile_to(fraction * self.total_ticks);
        self.last_command = Some(position);
    }

    pub fn stop(&mut self) {
        self.motor.percent_output(0.0);
    }
}

impl Actuator {
    pub fn get_position(&self) -> f64 {
        match self {
            Actuator::Piston(p) => p.get_position(),
            Actuator::Axis(a) => a.get_position(),
        }
    }

    pub fn get_velocity(&self) -> f64 {
        match self {
            Actuator::Piston(p) => p.get_velocity(),
            Actuator::Axis(a) => a.get_velocity(),
        }
    }

    pub fn set_position(&mut self, position: f64) {
        match self {
            Actuator::Piston(p) => p.set_position(position),
            Actuator::Axis(a) => a.set_position(position),
        }
    }

    pub fn stop(&mut self) {
        match self {
            Actuator::Piston(p) => p.stop(),
            Actuator::Axis(a) => a.stop(),
        }
    }

    /// The last position command issued, or `None` before the first.
    pub fn last_command(&self) -> Option<f64> {
        match self {
            Actuator::Piston(p) => p.last_command,
            Actuator::Axis(a) => a.last_command,
        }
    }

    /// The joint's declared position bounds.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Actuator::Piston(p) => (p.min, p.max),
            Actuator::Axis(a) => (a.min, a.max),
        }
    }
}
