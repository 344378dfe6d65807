//! # Command executor
//!
//! Runs at most one command tree at a time. Starting a new command whose
//! resource requirements overlap the running one's interrupts the running
//! command before the new one initializes, so a command's `end` always runs
//! exactly once.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;

use super::cmd::Command;
use super::drive::DriveInterface;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The autonomous command executor.
pub struct CmdExecutor {
    active: Option<Command>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdExecutor {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Start a command, interrupting any running command that shares a
    /// resource with it.
    pub fn start(&mut self, mut cmd: Command, drive: &mut dyn DriveInterface) {
        let conflict = match self.active {
            Some(ref running) => running
                .requirements()
                .iter()
                .any(|r| cmd.requirements().contains(r)),
            None => false,
        };

        if conflict {
            if let Some(mut running) = self.active.take() {
                info!("Interrupting running command for a new one");
                running.end(drive, true);
            }
        }

        cmd.initialize(drive);
        self.active = Some(cmd);
    }

    /// Step the running command by one cycle. Returns true while a command is
    /// still running.
    pub fn step(&mut self, drive: &mut dyn DriveInterface) -> bool {
        if let Some(ref mut cmd) = self.active {
            cmd.execute(drive);

            if cmd.is_finished(drive) {
                cmd.end(drive, false);
                self.active = None;
                info!("Command complete");
            }
        }

        self.active.is_some()
    }

    /// Interrupt and discard the running command, if any.
    pub fn abort(&mut self, drive: &mut dyn DriveInterface) {
        if let Some(mut cmd) = self.active.take() {
            info!("Aborting running command");
            cmd.end(drive, true);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }
}

impl Default for CmdExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::cmd::TimedDrive;
    use crate::auto::drive::{DriveCall, SimDrive};

    #[test]
    fn test_runs_command_to_completion() {
        let mut drive = SimDrive::new();
        let mut exec = CmdExecutor::new();

        exec.start(
            Command::TimedDrive(TimedDrive::new(0.0, -1.5, 0.0, 0.0)),
            &mut drive,
        );
        assert!(!exec.is_idle());

        // Zero duration finishes on the first step
        assert!(!exec.step(&mut drive));
        assert!(exec.is_idle());
        assert_eq!(drive.history.last(), Some(&DriveCall::Stop));
    }

    #[test]
    fn test_conflicting_start_interrupts() {
        let mut drive = SimDrive::new();
        let mut exec = CmdExecutor::new();

        exec.start(
            Command::TimedDrive(TimedDrive::new(10.0, -1.5, 0.0, 0.0)),
            &mut drive,
        );
        exec.step(&mut drive);

        exec.start(
            Command::TimedDrive(TimedDrive::new(10.0, 2.0, 0.0, 0.0)),
            &mut drive,
        );

        // The first command's interrupted end (stop) lands before the second
        // command's initialize (unlock)
        let stop_idx = drive
            .history
            .iter()
            .rposition(|c| *c == DriveCall::Stop)
            .unwrap();
        let unlock_idx = drive
            .history
            .iter()
            .rposition(|c| *c == DriveCall::Unlock)
            .unwrap();
        assert!(stop_idx < unlock_idx);

        assert!(!exec.is_idle());
    }

    #[test]
    fn test_abort_interrupts() {
        let mut drive = SimDrive::new();
        let mut exec = CmdExecutor::new();

        exec.start(
            Command::TimedDrive(TimedDrive::new(10.0, -1.5, 0.0, 0.0)),
            &mut drive,
        );
        exec.abort(&mut drive);

        assert!(exec.is_idle());
        assert_eq!(drive.history.last(), Some(&DriveCall::Stop));
    }
}
