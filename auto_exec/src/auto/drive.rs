//! # Drivetrain interface
//!
//! Commands drive the robot through the [`DriveInterface`] trait rather than
//! talking to the swerve modules directly. The trait covers velocity demands,
//! the wheel lock, and the gyro readings the balance and turn commands need.
//!
//! [`SimDrive`] is a kinematic stand-in used on the bench and in tests. It
//! integrates heading from the commanded rotation rate and records every call
//! so tests can assert on command ordering.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use util::maths::wrap_to_180;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Interface to the swerve drivetrain.
///
/// Velocities are metres per second in the robot frame unless
/// `field_relative` is set, rotation rates are degrees per second, and angles
/// are degrees wrapped into [-180, 180].
pub trait DriveInterface {
    /// Demand a chassis velocity.
    fn swerve_drive(&mut self, vx_ms: f64, vy_ms: f64, omega_degs: f64, field_relative: bool);

    /// Halt all drive motors.
    fn stop(&mut self);

    /// Turn the wheels into the X lock pattern.
    fn lock_drive(&mut self);

    /// Release the wheel lock.
    fn unlock_drive(&mut self);

    fn is_locked(&self) -> bool;

    /// Gyro heading in degrees, wrapped into [-180, 180].
    fn heading_180(&self) -> f64;

    /// Gyro roll in degrees, wrapped into [-180, 180].
    fn roll_180(&self) -> f64;

    /// Gyro pitch in degrees, wrapped into [-180, 180].
    fn pitch_180(&self) -> f64;

    /// Last commanded chassis velocity, `(vx_ms, vy_ms)`.
    fn velocity(&self) -> (f64, f64);

    /// Zero the gyro heading.
    fn hard_reset_gyro(&mut self);

    /// Start a gyro recalibration. Non-blocking.
    fn recalibrate_gyro(&mut self);
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A single recorded call into [`SimDrive`].
#[derive(Debug, Clone, PartialEq)]
pub enum DriveCall {
    Swerve {
        vx_ms: f64,
        vy_ms: f64,
        omega_degs: f64,
        field_relative: bool,
    },
    Stop,
    Lock,
    Unlock,
    HardResetGyro,
    RecalibrateGyro,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated drivetrain.
pub struct SimDrive {
    heading_deg: f64,
    roll_deg: f64,
    pitch_deg: f64,

    /// Last commanded chassis velocity.
    vx_ms: f64,
    vy_ms: f64,
    omega_degs: f64,

    locked: bool,

    /// Every call made through [`DriveInterface`], in order.
    pub history: Vec<DriveCall>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimDrive {
    pub fn new() -> Self {
        Self {
            heading_deg: 0.0,
            roll_deg: 0.0,
            pitch_deg: 0.0,
            vx_ms: 0.0,
            vy_ms: 0.0,
            omega_degs: 0.0,
            locked: true,
            history: Vec::new(),
        }
    }

    /// Propagate the simulated state over one cycle.
    pub fn step(&mut self, dt_s: f64) {
        self.heading_deg = wrap_to_180(self.heading_deg + self.omega_degs * dt_s);
    }

    /// Set the simulated roll, for bench scenarios and tests.
    pub fn set_roll(&mut self, roll_deg: f64) {
        self.roll_deg = roll_deg;
    }

    /// Set the simulated pitch, for bench scenarios and tests.
    pub fn set_pitch(&mut self, pitch_deg: f64) {
        self.pitch_deg = pitch_deg;
    }
}

impl Default for SimDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveInterface for SimDrive {
    fn swerve_drive(&mut self, vx_ms: f64, vy_ms: f64, omega_degs: f64, field_relative: bool) {
        self.vx_ms = vx_ms;
        self.vy_ms = vy_ms;
        self.omega_degs = omega_degs;
        self.history.push(DriveCall::Swerve {
            vx_ms,
            vy_ms,
            omega_degs,
            field_relative,
        });
    }

    fn stop(&mut self) {
        self.vx_ms = 0.0;
        self.vy_ms = 0.0;
        self.omega_degs = 0.0;
        self.history.push(DriveCall::Stop);
    }

    fn lock_drive(&mut self) {
        self.locked = true;
        self.history.push(DriveCall::Lock);
    }

    fn unlock_drive(&mut self) {
        self.locked = false;
        self.history.push(DriveCall::Unlock);
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn heading_180(&self) -> f64 {
        self.heading_deg
    }

    fn roll_180(&self) -> f64 {
        self.roll_deg
    }

    fn pitch_180(&self) -> f64 {
        self.pitch_deg
    }

    fn velocity(&self) -> (f64, f64) {
        (self.vx_ms, self.vy_ms)
    }

    fn hard_reset_gyro(&mut self) {
        self.heading_deg = 0.0;
        self.history.push(DriveCall::HardResetGyro);
    }

    fn recalibrate_gyro(&mut self) {
        self.history.push(DriveCall::RecalibrateGyro);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_integrates_and_wraps() {
        let mut drive = SimDrive::new();
        drive.swerve_drive(0.0, 0.0, 90.0, false);

        drive.step(1.0);
        assert!((drive.heading_180() - 90.0).abs() < 1e-9);

        // Another 180 degrees wraps past the boundary
        drive.step(2.0);
        assert!((drive.heading_180() + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_stop_zeroes_demand() {
        let mut drive = SimDrive::new();
        drive.swerve_drive(1.5, 0.0, 10.0, false);
        drive.stop();

        drive.step(1.0);
        assert_eq!(drive.heading_180(), 0.0);
        assert_eq!(drive.velocity(), (0.0, 0.0));
    }
}
