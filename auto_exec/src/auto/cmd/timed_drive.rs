//! Drive at a fixed chassis velocity for a fixed duration.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use std::time::Instant;

// Internal
use crate::auto::drive::DriveInterface;
use comms_if::tc::auto::DistanceUnits;
use util::maths::{feet_to_meters, inches_to_meters};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive at a fixed chassis velocity for a fixed duration, then stop.
#[derive(Debug)]
pub struct TimedDrive {
    duration_s: f64,

    vx_ms: f64,
    vy_ms: f64,
    omega_degs: f64,

    /// Set at initialize, `None` before the command has started.
    start: Option<Instant>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TimedDrive {
    pub fn new(duration_s: f64, vx_ms: f64, vy_ms: f64, omega_degs: f64) -> Self {
        Self {
            duration_s,
            vx_ms,
            vy_ms,
            omega_degs,
            start: None,
        }
    }

    /// Build a timed drive covering the given distance at the given velocity.
    ///
    /// The duration is distance over speed, so a zero velocity produces a
    /// zero-duration command rather than an unbounded one.
    pub fn from_distance(distance: f64, units: DistanceUnits, vx_ms: f64, vy_ms: f64) -> Self {
        let distance_m = match units {
            DistanceUnits::Meters => distance,
            DistanceUnits::Feet => feet_to_meters(distance),
            DistanceUnits::Inches => inches_to_meters(distance),
        };

        let speed_ms = (vx_ms * vx_ms + vy_ms * vy_ms).sqrt();

        let duration_s = if speed_ms > 0.0 {
            distance_m.abs() / speed_ms
        } else {
            0.0
        };

        Self::new(duration_s, vx_ms, vy_ms, 0.0)
    }

    pub fn initialize(&mut self, drive: &mut dyn DriveInterface) {
        drive.unlock_drive();
        self.start = Some(Instant::now());
    }

    pub fn execute(&mut self, drive: &mut dyn DriveInterface) {
        drive.swerve_drive(self.vx_ms, self.vy_ms, self.omega_degs, false);
    }

    pub fn is_finished(&self) -> bool {
        match self.start {
            Some(start) => start.elapsed().as_secs_f64() >= self.duration_s,
            None => false,
        }
    }

    pub fn end(&mut self, drive: &mut dyn DriveInterface) {
        drive.swerve_drive(0.0, 0.0, 0.0, false);
        drive.stop();
    }

    #[cfg(test)]
    pub(crate) fn backdate_start(&mut self, seconds: f64) {
        self.start = Some(Instant::now() - std::time::Duration::from_secs_f64(seconds));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::drive::{DriveCall, SimDrive};

    #[test]
    fn test_runs_for_duration() {
        let mut drive = SimDrive::new();
        let mut cmd = TimedDrive::new(1.75, -1.5, 0.0, 0.0);

        cmd.initialize(&mut drive);
        cmd.execute(&mut drive);

        assert!(!cmd.is_finished());
        assert_eq!(
            drive.history.last(),
            Some(&DriveCall::Swerve {
                vx_ms: -1.5,
                vy_ms: 0.0,
                omega_degs: 0.0,
                field_relative: false,
            })
        );

        cmd.backdate_start(2.0);
        assert!(cmd.is_finished());

        cmd.end(&mut drive);
        assert_eq!(drive.history.last(), Some(&DriveCall::Stop));
    }

    #[test]
    fn test_from_distance_duration() {
        // 3 m at 1.5 m/s takes 2 s
        let cmd = TimedDrive::from_distance(3.0, DistanceUnits::Meters, -1.5, 0.0);
        assert!((cmd.duration_s - 2.0).abs() < 1e-9);

        // 10 ft at 0.3048 m/s takes 10 s
        let cmd = TimedDrive::from_distance(10.0, DistanceUnits::Feet, 0.3048, 0.0);
        assert!((cmd.duration_s - 10.0).abs() < 1e-9);

        // 12 inches is one foot
        let cmd = TimedDrive::from_distance(12.0, DistanceUnits::Inches, 1.0, 0.0);
        assert!((cmd.duration_s - feet_to_meters(1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_from_distance_zero_velocity() {
        let cmd = TimedDrive::from_distance(3.0, DistanceUnits::Meters, 0.0, 0.0);
        assert_eq!(cmd.duration_s, 0.0);
    }
}
