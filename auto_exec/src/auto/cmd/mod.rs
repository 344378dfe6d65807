//! # Autonomous drive commands
//!
//! The closed set of commands the autonomous layer can run. Each command
//! follows the same lifecycle:
//!
//! 1. `initialize` once when the command starts,
//! 2. `execute` every cycle,
//! 3. `is_finished` polled after each execute,
//! 4. `end` exactly once, with `interrupted` set if the command was preempted
//!    rather than finishing on its own.
//!
//! Commands declare the resources they touch so the executor can interrupt a
//! running command when a new one needs the same hardware.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod balance;
mod drive_to_station;
mod field_orient;
mod sequence;
mod timed_drive;
mod turn_to_angle;
mod unlock_drive;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use balance::Balance;
pub use drive_to_station::DriveToStation;
pub use field_orient::FieldOrient;
pub use sequence::Sequence;
pub use timed_drive::TimedDrive;
pub use turn_to_angle::TurnToAngle;
pub use unlock_drive::UnlockDrive;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::drive::DriveInterface;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Hardware resources a command can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Drive,
}

/// An autonomous command.
#[derive(Debug)]
pub enum Command {
    TimedDrive(TimedDrive),
    TurnToAngle(TurnToAngle),
    Balance(Balance),
    DriveToStation(DriveToStation),
    FieldOrient(FieldOrient),
    UnlockDrive(UnlockDrive),
    Sequence(Sequence),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Command {
    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        match self {
            Command::TimedDrive(c) => c.initialize(drive),
            Command::TurnToAngle(c) => c.initialize(drive),
            Command::Balance(c) => c.initialize(drive),
            Command::DriveToStation(c) => c.initialize(drive),
            Command::FieldOrient(c) => c.initialize(drive),
            Command::UnlockDrive(c) => c.initialize(drive),
            Command::Sequence(c) => c.initialize(drive),
        }
    }

    pub fn execute(&mut self, drive: &mut dyn DriveInterface) {
        match self {
            Command::TimedDrive(c) => c.execute(drive),
            Command::TurnToAngle(c) => c.execute(drive),
            Command::Balance(c) => c.execute(drive),
            Command::DriveToStation(c) => c.execute(drive),
            Command::FieldOrient(_) => (),
            Command::UnlockDrive(_) => (),
            Command::Sequence(c) => c.execute(drive),
        }
    }

    pub fn is_finished(&self, drive: &dyn DriveInterface) -> bool {
        match self {
            Command::TimedDrive(c) => c.is_finished(),
            Command::TurnToAngle(c) => c.is_finished(drive),
            Command::Balance(c) => c.is_finished(),
            Command::DriveToStation(c) => c.is_finished(drive),
            Command::FieldOrient(_) => true,
            Command::UnlockDrive(_) => !drive.is_locked(),
            Command::Sequence(c) => c.is_finished(),
        }
    }

    pub fn end(&mut self, drive: &mut dyn DriveInterface, interrupted: bool) {
        match self {
            Command::TimedDrive(c) => c.end(drive),
            Command::TurnToAngle(c) => c.end(drive),
            Command::Balance(c) => c.end(drive),
            Command::DriveToStation(c) => c.end(drive),
            Command::FieldOrient(_) => (),
            Command::UnlockDrive(_) => (),
            Command::Sequence(c) => c.end(drive, interrupted),
        }
    }

    /// The resources this command requires while running.
    pub fn requirements(&self) -> &'static [Resource] {
        // Every current command owns the drivetrain; the distinction matters
        // once arm commands join this set
        &[Resource::Drive]
    }
}
