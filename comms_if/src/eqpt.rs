//! # Equipment interface module
//!
//! This module contains the command and telemetry definitions exchanged with
//! the robot's equipment.

/// Arm (joint multiplexer) commands and telemetry
pub mod arm;
