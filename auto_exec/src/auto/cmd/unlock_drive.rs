//! Release the wheel lock.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::auto::drive::DriveInterface;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Release the wheel lock. Finished once the drivetrain reports unlocked.
#[derive(Debug)]
pub struct UnlockDrive;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl UnlockDrive {
    pub fn new() -> Self {
        Self
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        drive.unlock_drive();
    }
}
