//! # Arm control telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::eqpt::arm::{InputSnapshot, JointCmdBatch};
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command that can be completed by arm control.
#[derive(Debug, Clone, Serialize, Deserialize, StructOpt)]
pub enum ArmCmd {
    /// A batch of joint position demands.
    ///
    /// Each named joint is driven to the demanded position. Joints not named
    /// in the batch hold their last demand.
    #[structopt(name = "joints")]
    SetJoints {
        #[structopt(skip)]
        batch: JointCmdBatch,
    },

    /// A decoded input device snapshot for the toggle bindings.
    ///
    /// On the robot this comes from the driver station joystick poller; on
    /// the bench it can be injected from a script.
    #[structopt(name = "input")]
    Input {
        #[structopt(skip)]
        snapshot: InputSnapshot,
    },

    /// Stop all joints immediately.
    #[structopt(name = "stop")]
    Stop,
}
