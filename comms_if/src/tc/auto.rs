//! # Autonomy Telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use structopt::StructOpt;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command that can be performed by the Autonomy system.
#[derive(Debug, Clone, Serialize, Deserialize, StructOpt)]
pub enum AutoCmd {
    /// Drive out of the starting zone (taxi), with a side-dependent duration.
    #[structopt(name = "taxi")]
    Taxi {
        /// Which side of the field the robot starts on.
        side: TaxiSide,
    },

    /// Mount the charge station and balance on it, locking the wheels once
    /// level.
    #[structopt(name = "mount-balance")]
    MountBalance,

    /// Drive at a constant velocity for a fixed duration.
    #[structopt(name = "drive-time")]
    DriveTime {
        /// Duration of the drive in seconds.
        duration_s: f64,

        /// Velocity along the field X axis in meters/second.
        vx_ms: f64,

        /// Velocity along the field Y axis in meters/second.
        vy_ms: f64,

        /// Rotational rate in degrees/second.
        omega_degs: f64,
    },

    /// Drive a given distance at a constant velocity.
    #[structopt(name = "drive-distance")]
    DriveDistance {
        /// Distance to cover, in the given units.
        distance: f64,

        /// Units the distance is expressed in.
        units: DistanceUnits,

        /// Velocity along the field X axis in meters/second.
        vx_ms: f64,

        /// Velocity along the field Y axis in meters/second.
        vy_ms: f64,
    },

    /// Turn to a heading.
    #[structopt(name = "turn")]
    Turn {
        /// Target heading in degrees.
        angle_deg: f64,

        /// If set the target is relative to the current heading rather than
        /// absolute.
        #[structopt(long)]
        relative: bool,
    },

    /// Unlock the drive, zero the heading reference and recalibrate the gyro.
    #[structopt(name = "field-orient")]
    FieldOrient,

    /// Unlock the drive wheels.
    #[structopt(name = "unlock")]
    Unlock,

    /// Interrupt the currently running command.
    #[structopt(name = "abort")]
    Abort,
}

/// Field side the robot starts the taxi from.
///
/// The bump side has a cable protector to drive over, so the taxi runs
/// longer there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxiSide {
    Bump,
    Flat,
}

/// Unit systems accepted for distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnits {
    Meters,
    Feet,
    Inches,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FromStr for TaxiSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bump" => Ok(TaxiSide::Bump),
            "flat" => Ok(TaxiSide::Flat),
            _ => Err(format!("{} is not a taxi side (expected bump or flat)", s)),
        }
    }
}

impl FromStr for DistanceUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "meters" => Ok(DistanceUnits::Meters),
            "ft" | "feet" => Ok(DistanceUnits::Feet),
            "in" | "inches" => Ok(DistanceUnits::Inches),
            _ => Err(format!(
                "{} is not a distance unit (expected meters, feet or inches)",
                s
            )),
        }
    }
}
