//! Balance the robot on the charge station using roll feedback.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::auto::drive::DriveInterface;
use crate::auto::params::BalanceParams;
use crate::auto::pid::PidController;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive up and down the charge station ramp under PID control on roll until
/// the platform is level, then lock the wheels.
#[derive(Debug)]
pub struct Balance {
    pid: PidController,

    output_scale: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Balance {
    pub fn new(params: &BalanceParams) -> Self {
        let mut pid = PidController::new(params.k_p, params.k_i, params.k_d);
        pid.set_setpoint(0.0);
        pid.set_tolerance(params.tolerance_deg);
        // Roll is an angle, so error is always the short way round the circle
        pid.enable_continuous_input();

        Self {
            pid,
            output_scale: params.output_scale,
        }
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        drive.unlock_drive();
        self.pid.reset();
    }

    pub fn execute(&mut self, drive: &mut dyn DriveInterface) {
        let output = self.pid.calculate(drive.roll_180());

        // Positive roll means nose-up, so drive against the controller output
        drive.swerve_drive(-output * self.output_scale, 0.0, 0.0, false);
    }

    pub fn is_finished(&self) -> bool {
        self.pid.at_setpoint()
    }

    /// Lock the wheels so the station can settle level without the robot
    /// rolling off.
    pub fn end(&mut self, drive: &mut dyn DriveInterface) {
        drive.swerve_drive(0.0, 0.0, 0.0, false);
        drive.lock_drive();
        drive.stop();
    }
}
