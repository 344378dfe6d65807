//! Re-zero the gyro so field-relative driving matches the robot's current
//! facing.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::auto::drive::DriveInterface;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One-shot unlock, gyro reset and recalibration. Finished as soon as it has
/// run.
#[derive(Debug)]
pub struct FieldOrient;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FieldOrient {
    pub fn new() -> Self {
        Self
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        drive.unlock_drive();
        drive.hard_reset_gyro();
        drive.recalibrate_gyro();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::drive::{DriveCall, DriveInterface, SimDrive};

    #[test]
    fn test_resets_then_recalibrates() {
        let mut drive = SimDrive::new();
        drive.swerve_drive(0.0, 0.0, 45.0, false);
        drive.step(1.0);

        let mut cmd = FieldOrient::new();
        cmd.initialize(&mut drive);

        assert_eq!(drive.heading_180(), 0.0);
        assert_eq!(
            &drive.history[drive.history.len() - 3..],
            &[
                DriveCall::Unlock,
                DriveCall::HardResetGyro,
                DriveCall::RecalibrateGyro,
            ]
        );
    }

    #[test]
    fn test_unlocks_a_locked_drive() {
        let mut drive = SimDrive::new();
        assert!(drive.is_locked());

        let mut cmd = FieldOrient::new();
        cmd.initialize(&mut drive);

        // Standalone field orient must leave the drivetrain usable
        assert!(!drive.is_locked());
    }
}
