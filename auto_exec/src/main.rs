//! # Autonomous Control Executable
//!
//! This executable runs a single autonomous routine against the swerve
//! drivetrain: taxi out of the community, mount and balance on the charge
//! station, timed and distance drives, turns, and gyro field orientation.
//!
//! The routine to run is selected on the command line. The drivetrain is the
//! kinematic simulation; the vendor-backed drivetrain plugs into the same
//! interface on the robot.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomous control module.
mod auto;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use auto::drive::SimDrive;
use auto::executor::CmdExecutor;
use auto::params::AutoParams;
use auto::routines;
use auto::AutoError;
use comms_if::tc::auto::AutoCmd;
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Duration of one control cycle in seconds (20 Hz).
const CYCLE_PERIOD_S: f64 = 0.05;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Autonomous control executable options.
#[derive(Debug, StructOpt)]
#[structopt(name = "auto_exec")]
struct Opt {
    /// The autonomous routine to run.
    #[structopt(subcommand)]
    cmd: AutoCmd,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    let opt = Opt::from_args();

    // Initialise session
    let session = Session::new("auto_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Autonomous Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: AutoParams = util::params::load("auto_exec.toml")
        .map_err(AutoError::ParamLoadError)
        .wrap_err("Could not load autonomy params")?;

    info!("Parameters loaded");

    // ---- INITIALISE DRIVE AND EXECUTOR ----

    let mut drive = SimDrive::new();
    let mut executor = CmdExecutor::new();

    // ---- START ROUTINE ----

    info!("Running routine: {:?}", opt.cmd);

    match routines::build(&opt.cmd, &params) {
        Some(cmd) => executor.start(cmd, &mut drive),
        None => {
            // Abort from the command line has nothing to interrupt
            warn!("Nothing to do for {:?}, exiting", opt.cmd);
            return Ok(());
        }
    }

    // ---- MAIN LOOP ----

    loop {
        let cycle_start_instant = Instant::now();

        let running = executor.step(&mut drive);

        drive.step(CYCLE_PERIOD_S);

        if !running {
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
            ),
        }
    }

    // ---- SHUTDOWN ----

    info!("Routine complete");
    info!("End of execution");

    Ok(())
}
