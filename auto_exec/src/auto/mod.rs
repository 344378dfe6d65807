//! # Autonomous control module
//!
//! This module implements the autonomous command layer for the robot's swerve
//! drivetrain: a closed set of drive commands with the usual
//! initialize/execute/is_finished/end lifecycle, an executor that runs one
//! command at a time and interrupts on resource conflict, and routines that
//! build command trees from incoming telecommands.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod cmd;
pub mod drive;
pub mod executor;
pub mod params;
pub mod pid;
pub mod routines;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Possible errors that can occur during autonomous operation.
#[derive(Debug, thiserror::Error)]
pub enum AutoError {
    #[error("Failed to load autonomy params: {0}")]
    ParamLoadError(util::params::LoadError),
}
