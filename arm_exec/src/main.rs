//! # Arm Control Executable
//!
//! This executable is responsible for controlling the robot's arm:
//! - Pneumatic pistons (roller bar, slider, gripper)
//! - The motor-driven elevator axis
//! - The gripper servo
//!
//! Joint command batches and input device snapshots arrive as telecommands
//! from a script, and encoder telemetry is produced every cycle.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arm control module.
mod arm_ctrl;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::eyre, eyre::WrapErr, Result};
use log::{info, trace, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use arm_ctrl::{ArmCtrl, InputData, SimArmHw};
use comms_if::tc::{arm_ctrl::ArmCmd, Tc, TcType};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Duration of one control cycle in seconds (50 Hz).
const CYCLE_PERIOD_S: f64 = 0.02;

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Arm Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- INITIALISE TC SOURCE ----

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        return Err(eyre!(
            "Expected a single argument (the script path), found {}",
            args.len() - 1
        ));
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        si.get_duration(),
        si.get_num_tcs()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut arm_ctrl = ArmCtrl::default();
    arm_ctrl
        .init(("arm_exec.toml", Box::new(SimArmHw::new())), &session)
        .wrap_err("Failed to initialise ArmCtrl")?;
    info!("ArmCtrl init complete");

    info!("Initialisation complete, entering main loop\n");

    // ---- MAIN LOOP ----

    loop {
        let cycle_start_instant = Instant::now();

        // ---- TELECOMMAND PROCESSING ----

        let mut input_data = InputData::default();
        let mut end_of_script = false;

        match si.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    exec_tc(&mut arm_ctrl, &mut input_data, tc);
                }
            }
            PendingTcs::EndOfScript => {
                info!("End of TC script reached, stopping");
                end_of_script = true;
            }
        }

        if end_of_script {
            arm_ctrl.stop();
            break;
        }

        // ---- ARM PROCESSING ----

        let (telem, report) = arm_ctrl
            .proc(&input_data)
            .wrap_err("ArmCtrl processing error")?;

        trace!("Joint telemetry: {:?}", telem);

        if report.stopped_on_timeout {
            trace!("Status report: {:?}", report);
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

    info!("End of execution");

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Execute a single telecommand against the arm controller.
fn exec_tc(arm_ctrl: &mut ArmCtrl, input_data: &mut InputData, tc: &Tc) {
    match tc.tc_type {
        TcType::Heartbeat => (),
        TcType::MakeSafe => {
            warn!("Make safe TC received, stopping all actuators");
            arm_ctrl.stop();
        }
        TcType::Arm => match tc.payload_as::<ArmCmd>() {
            Ok(ArmCmd::SetJoints { batch }) => input_data.batch = Some(batch),
            Ok(ArmCmd::Input { snapshot }) => input_data.input = Some(snapshot),
            Ok(ArmCmd::Stop) => {
                info!("Arm stop TC received");
                arm_ctrl.stop();
            }
            Err(e) => warn!("Could not parse arm TC payload: {}", e),
        },
        ref t => warn!("TC type {:?} is not handled by arm_exec, ignoring", t),
    }
}
