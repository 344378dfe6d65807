//! Parameters for the autonomous control module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the autonomous control module.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoParams {
    pub turn: TurnParams,
    pub balance: BalanceParams,
    pub station: StationParams,
    pub taxi: TaxiParams,
}

/// Parameters for the turn-to-angle command.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TurnParams {
    /// Fixed rotation rate in degrees per second.
    pub rate_degs: f64,

    /// Heading error magnitude in degrees below which the turn is complete.
    pub threshold_deg: f64,
}

/// Parameters for the balance command.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BalanceParams {
    /// Proportional gain on roll error.
    pub k_p: f64,

    /// Integral gain on roll error.
    pub k_i: f64,

    /// Derivative gain on roll error.
    pub k_d: f64,

    /// Roll magnitude in degrees considered level.
    pub tolerance_deg: f64,

    /// Scale from controller output to chassis velocity in metres per second.
    pub output_scale: f64,
}

/// Parameters for the drive-to-station command.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StationParams {
    /// Chassis velocity while approaching the charge station, negative drives
    /// towards it.
    pub approach_speed_ms: f64,

    /// Roll magnitude in degrees at which the robot is considered to be on
    /// the station ramp.
    pub tilt_threshold_deg: f64,
}

/// Parameters for the taxi routines.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TaxiParams {
    /// Drive duration when exiting over the cable bump.
    pub bump_duration_s: f64,

    /// Drive duration when exiting over open floor.
    pub flat_duration_s: f64,

    /// Chassis velocity while taxiing, negative drives out of the community.
    pub vx_ms: f64,
}
