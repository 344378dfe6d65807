//! Rotate the chassis to a target heading at a fixed rate.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::auto::drive::DriveInterface;
use crate::auto::params::TurnParams;
use util::maths::{ang_dist_180, wrap_to_180};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Rotate to a target heading at a fixed rate, bang-bang on the error sign.
///
/// The target is resolved against the current heading at initialize when the
/// command is relative, so re-running the same command turns again.
#[derive(Debug)]
pub struct TurnToAngle {
    angle_deg: f64,
    relative: bool,

    rate_degs: f64,
    threshold_deg: f64,

    /// Resolved at initialize.
    target_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TurnToAngle {
    pub fn new(angle_deg: f64, relative: bool, params: &TurnParams) -> Self {
        Self {
            angle_deg,
            relative,
            rate_degs: params.rate_degs,
            threshold_deg: params.threshold_deg,
            target_deg: 0.0,
        }
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        self.target_deg = if self.relative {
            wrap_to_180(drive.heading_180() + self.angle_deg)
        } else {
            wrap_to_180(self.angle_deg)
        };

        drive.unlock_drive();
    }

    pub fn execute(&mut self, drive: &mut dyn DriveInterface) {
        let error_deg = ang_dist_180(drive.heading_180(), self.target_deg);

        drive.swerve_drive(0.0, 0.0, self.rate_degs * error_deg.signum(), false);
    }

    pub fn is_finished(&self, drive: &dyn DriveInterface) -> bool {
        ang_dist_180(drive.heading_180(), self.target_deg).abs() < self.threshold_deg
    }

    /// Zero the rotation demand while preserving the translational velocity,
    /// so a following command can blend straight in.
    pub fn end(&mut self, drive: &mut dyn DriveInterface) {
        let (vx_ms, vy_ms) = drive.velocity();
        drive.swerve_drive(vx_ms, vy_ms, 0.0, false);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::drive::{DriveCall, SimDrive};

    fn test_params() -> TurnParams {
        TurnParams {
            rate_degs: 2.5,
            threshold_deg: 5.0,
        }
    }

    #[test]
    fn test_bang_bang_sign_follows_error() {
        let mut drive = SimDrive::new();
        let mut cmd = TurnToAngle::new(90.0, false, &test_params());

        cmd.initialize(&mut drive);
        cmd.execute(&mut drive);
        assert_eq!(
            drive.history.last(),
            Some(&DriveCall::Swerve {
                vx_ms: 0.0,
                vy_ms: 0.0,
                omega_degs: 2.5,
                field_relative: false,
            })
        );

        // Overshoot past the target reverses the demand
        drive.swerve_drive(0.0, 0.0, 2.5, false);
        drive.step(40.0);
        cmd.execute(&mut drive);
        assert_eq!(
            drive.history.last(),
            Some(&DriveCall::Swerve {
                vx_ms: 0.0,
                vy_ms: 0.0,
                omega_degs: -2.5,
                field_relative: false,
            })
        );
    }

    #[test]
    fn test_finishes_within_threshold() {
        let mut drive = SimDrive::new();
        let mut cmd = TurnToAngle::new(4.0, false, &test_params());

        cmd.initialize(&mut drive);

        // Error of 4 degrees is already inside the 5 degree threshold
        assert!(cmd.is_finished(&drive));
    }

    #[test]
    fn test_end_preserves_translation() {
        let mut drive = SimDrive::new();
        let mut cmd = TurnToAngle::new(90.0, false, &test_params());

        cmd.initialize(&mut drive);
        drive.swerve_drive(1.0, 0.5, 2.5, false);

        cmd.end(&mut drive);
        assert_eq!(
            drive.history.last(),
            Some(&DriveCall::Swerve {
                vx_ms: 1.0,
                vy_ms: 0.5,
                omega_degs: 0.0,
                field_relative: false,
            })
        );
    }

    #[test]
    fn test_relative_target_wraps() {
        let mut drive = SimDrive::new();
        drive.swerve_drive(0.0, 0.0, 170.0, false);
        drive.step(1.0);

        let mut cmd = TurnToAngle::new(20.0, true, &test_params());
        cmd.initialize(&mut drive);

        // 170 + 20 wraps to -170
        assert!((cmd.target_deg + 170.0).abs() < 1e-9);
    }
}
