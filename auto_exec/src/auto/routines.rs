//! # Autonomous routines
//!
//! Maps incoming autonomy telecommands onto command trees. Simple commands
//! map one to one; the mount-and-balance routine is a sequence built from the
//! primitive commands.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use comms_if::tc::auto::{AutoCmd, TaxiSide};

// Internal
use super::cmd::{
    Balance, Command, DriveToStation, FieldOrient, Sequence, TimedDrive, TurnToAngle, UnlockDrive,
};
use super::params::AutoParams;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the command tree for an autonomy telecommand.
///
/// Returns `None` for [`AutoCmd::Abort`], which interrupts rather than
/// starts a command.
pub fn build(cmd: &AutoCmd, params: &AutoParams) -> Option<Command> {
    let command = match cmd {
        AutoCmd::Taxi { side } => {
            let duration_s = match side {
                TaxiSide::Bump => params.taxi.bump_duration_s,
                TaxiSide::Flat => params.taxi.flat_duration_s,
            };

            Command::TimedDrive(TimedDrive::new(duration_s, params.taxi.vx_ms, 0.0, 0.0))
        }

        AutoCmd::MountBalance => Command::Sequence(Sequence::new(vec![
            Command::FieldOrient(FieldOrient::new()),
            Command::DriveToStation(DriveToStation::new(&params.station)),
            Command::Balance(Balance::new(&params.balance)),
        ])),

        AutoCmd::DriveTime {
            duration_s,
            vx_ms,
            vy_ms,
            omega_degs,
        } => Command::TimedDrive(TimedDrive::new(*duration_s, *vx_ms, *vy_ms, *omega_degs)),

        AutoCmd::DriveDistance {
            distance,
            units,
            vx_ms,
            vy_ms,
        } => Command::TimedDrive(TimedDrive::from_distance(*distance, *units, *vx_ms, *vy_ms)),

        AutoCmd::Turn {
            angle_deg,
            relative,
        } => Command::TurnToAngle(TurnToAngle::new(*angle_deg, *relative, &params.turn)),

        AutoCmd::FieldOrient => Command::FieldOrient(FieldOrient::new()),

        AutoCmd::Unlock => Command::UnlockDrive(UnlockDrive::new()),

        AutoCmd::Abort => return None,
    };

    Some(command)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auto::drive::{DriveCall, DriveInterface, SimDrive};
    use crate::auto::params::{BalanceParams, StationParams, TaxiParams, TurnParams};

    fn test_params() -> AutoParams {
        AutoParams {
            turn: TurnParams {
                rate_degs: 2.5,
                threshold_deg: 5.0,
            },
            balance: BalanceParams {
                k_p: 0.3,
                k_i: 0.0,
                k_d: 0.1,
                tolerance_deg: 2.5,
                output_scale: 1.0,
            },
            station: StationParams {
                approach_speed_ms: -3.5,
                tilt_threshold_deg: 10.0,
            },
            taxi: TaxiParams {
                bump_duration_s: 1.75,
                flat_duration_s: 1.3,
                vx_ms: -1.5,
            },
        }
    }

    #[test]
    fn test_abort_builds_nothing() {
        assert!(build(&AutoCmd::Abort, &test_params()).is_none());
    }

    #[test]
    fn test_taxi_side_selects_duration() {
        let params = test_params();
        let mut drive = SimDrive::new();

        let mut bump = build(&AutoCmd::Taxi { side: TaxiSide::Bump }, &params).unwrap();
        bump.initialize(&mut drive);
        bump.execute(&mut drive);

        // The bump taxi outlasts the flat duration but not its own
        match &mut bump {
            Command::TimedDrive(td) => {
                td.backdate_start(1.5);
                assert!(!td.is_finished());
                td.backdate_start(1.8);
                assert!(td.is_finished());
            }
            other => panic!("expected a timed drive, got {:?}", other),
        }

        assert_eq!(
            drive.history.last(),
            Some(&DriveCall::Swerve {
                vx_ms: -1.5,
                vy_ms: 0.0,
                omega_degs: 0.0,
                field_relative: false,
            })
        );
    }

    #[test]
    fn test_mount_balance_runs_to_lock() {
        let params = test_params();
        let mut drive = SimDrive::new();

        let mut cmd = build(&AutoCmd::MountBalance, &params).unwrap();
        cmd.initialize(&mut drive);

        // Approach on flat ground
        cmd.execute(&mut drive);
        assert!(!cmd.is_finished(&drive));

        // Hitting the ramp hands over to the balance command
        drive.set_roll(12.0);
        cmd.execute(&mut drive);
        assert!(!cmd.is_finished(&drive));

        // Level again: balance finishes and locks the wheels
        drive.set_roll(0.5);
        cmd.execute(&mut drive);
        cmd.execute(&mut drive);
        assert!(cmd.is_finished(&drive));
        assert!(drive.is_locked());
    }
}
