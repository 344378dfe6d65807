//! # Communications interface crate.
//!
//! Provides all common message and telecommand definitions for the software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod tc;

/// Command and telemetry definitions for equipment (like the arm)
pub mod eqpt;
