//! Run a list of commands one after another.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;

use super::Command;
use crate::auto::drive::DriveInterface;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Run child commands strictly in order.
///
/// Each child runs its full lifecycle before the next starts: the child's
/// `end(false)` is called before the next child's `initialize`. Interrupting
/// the sequence interrupts whichever child is currently running.
#[derive(Debug)]
pub struct Sequence {
    children: Vec<Command>,

    /// Index of the running child, `children.len()` once all are done.
    cursor: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Sequence {
    pub fn new(children: Vec<Command>) -> Self {
        Self {
            children,
            cursor: 0,
        }
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        self.cursor = 0;

        if let Some(child) = self.children.first_mut() {
            child.initialize(drive);
        }
    }

    pub fn execute(&mut self, drive: &mut dyn DriveInterface) {
        let child = match self.children.get_mut(self.cursor) {
            Some(c) => c,
            None => return,
        };

        child.execute(drive);

        if child.is_finished(drive) {
            child.end(drive, false);
            self.cursor += 1;

            trace!("Sequence advancing to child {}", self.cursor);

            if let Some(next) = self.children.get_mut(self.cursor) {
                next.initialize(drive);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.children.len()
    }

    pub fn end(&mut self, drive: &mut dyn DriveInterface, interrupted: bool) {
        if interrupted {
            if let Some(child) = self.children.get_mut(self.cursor) {
                child.end(drive, true);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::cmd::{FieldOrient, TimedDrive};
    use crate::auto::drive::{DriveCall, SimDrive};

    #[test]
    fn test_children_run_in_order() {
        let mut drive = SimDrive::new();

        let mut seq = Sequence::new(vec![
            Command::FieldOrient(FieldOrient::new()),
            Command::TimedDrive(TimedDrive::new(0.0, -1.5, 0.0, 0.0)),
        ]);

        seq.initialize(&mut drive);

        // First cycle: the field orient finishes and hands over, so the gyro
        // calls strictly precede the drive demand
        seq.execute(&mut drive);
        assert_eq!(
            drive.history,
            vec![
                DriveCall::Unlock,
                DriveCall::HardResetGyro,
                DriveCall::RecalibrateGyro,
                DriveCall::Unlock,
            ]
        );
        assert!(!seq.is_finished());

        // Second cycle: the zero-duration drive executes, finishes and ends
        seq.execute(&mut drive);
        assert!(seq.is_finished());
        assert_eq!(drive.history.last(), Some(&DriveCall::Stop));
    }

    #[test]
    fn test_interrupt_forwards_to_running_child() {
        let mut drive = SimDrive::new();

        let mut seq = Sequence::new(vec![Command::TimedDrive(TimedDrive::new(
            10.0, -1.5, 0.0, 0.0,
        ))]);

        seq.initialize(&mut drive);
        seq.execute(&mut drive);
        assert!(!seq.is_finished());

        seq.end(&mut drive, true);
        assert_eq!(drive.history.last(), Some(&DriveCall::Stop));
    }
}
