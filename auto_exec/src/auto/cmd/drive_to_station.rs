//! Approach the charge station until the ramp tilts the robot.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::auto::drive::DriveInterface;
use crate::auto::params::StationParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive towards the charge station at a fixed velocity until the measured
/// roll shows the robot is on the ramp.
#[derive(Debug)]
pub struct DriveToStation {
    approach_speed_ms: f64,
    tilt_threshold_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveToStation {
    pub fn new(params: &StationParams) -> Self {
        Self {
            approach_speed_ms: params.approach_speed_ms,
            tilt_threshold_deg: params.tilt_threshold_deg,
        }
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        drive.unlock_drive();
    }

    pub fn execute(&mut self, drive: &mut dyn DriveInterface) {
        drive.swerve_drive(self.approach_speed_ms, 0.0, 0.0, false);
    }

    pub fn is_finished(&self, drive: &dyn DriveInterface) -> bool {
        drive.roll_180().abs() >= self.tilt_threshold_deg
    }

    pub fn end(&mut self, drive: &mut dyn DriveInterface) {
        drive.swerve_drive(0.0, 0.0, 0.0, false);
        drive.stop();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::drive::{DriveCall, SimDrive};

    fn test_params() -> StationParams {
        StationParams {
            approach_speed_ms: -3.5,
            tilt_threshold_deg: 10.0,
        }
    }

    #[test]
    fn test_approaches_until_tilted() {
        let mut drive = SimDrive::new();
        let mut cmd = DriveToStation::new(&test_params());

        cmd.initialize(&mut drive);
        cmd.execute(&mut drive);

        assert_eq!(
            drive.history.last(),
            Some(&DriveCall::Swerve {
                vx_ms: -3.5,
                vy_ms: 0.0,
                omega_degs: 0.0,
                field_relative: false,
            })
        );
        assert!(!cmd.is_finished(&drive));

        // Tilt in either direction ends the approach
        drive.set_roll(-12.0);
        assert!(cmd.is_finished(&drive));
    }
}
