//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arm_ctrl;
pub mod auto;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the robot by an operator,
/// script, or the driver station.
#[derive(Serialize, Deserialize, Debug)]
pub struct Tc {
    /// The type of the telecommand
    pub tc_type: TcType,

    /// The payload associated with this TC
    pub payload: TcPayload,
}

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static TYPE_HAS_NO_PAYLOAD: [TcType; 4] = [
    TcType::None,
    TcType::Heartbeat,
    TcType::MakeSafe,
    TcType::MakeUnsafe,
];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Telecommand types.
///
/// The type is used to identify the purpose of the telecommand, and should be
/// used by the telecommand processor to determine where to send the command.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum TcType {
    None,
    Heartbeat,
    MakeSafe,
    MakeUnsafe,
    Arm,
    Auto,
}

/// Telecommand payload.
///
/// The payload allows the data contained in the TC to be serialised in many
/// ways. The payload only indicates which serialisation format the data is in.
/// It is up to the user to properly deserialise the data contained within it.
#[derive(Debug, Serialize, Deserialize)]
pub enum TcPayload {
    None,
    Json(String),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0:?} is expected to have a payload but it doesn't")]
    MissingPayload(TcType),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e)),
        };

        // Get the type of the TC
        let tc_type = match TcType::from_str(match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(TcParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        }) {
            Some(t) => t,
            None => {
                return Err(TcParseError::InvalidType(format!(
                    "{} is not a recognised TC type",
                    val["type"].as_str().unwrap()
                )))
            }
        };

        // Get the payload. If it's null and the type does not have a payload
        // then an error is returned
        if val["payload"].is_null() {
            if !TYPE_HAS_NO_PAYLOAD.contains(&tc_type) {
                return Err(TcParseError::MissingPayload(tc_type));
            }

            return Ok(Tc {
                tc_type,
                payload: TcPayload::None,
            });
        }

        Ok(Tc {
            tc_type,
            payload: TcPayload::Json(val["payload"].to_string()),
        })
    }

    /// Deserialise the TC's JSON payload into the given type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, TcParseError> {
        match self.payload {
            TcPayload::Json(ref s) => {
                serde_json::from_str(s).map_err(TcParseError::InvalidJson)
            }
            TcPayload::None => Err(TcParseError::MissingPayload(TcType::None)),
        }
    }
}

impl TcType {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(TcType::None),
            "HEARTBEAT" => Some(TcType::Heartbeat),
            "SAFE" => Some(TcType::MakeSafe),
            "UNSAFE" => Some(TcType::MakeUnsafe),
            "ARM" => Some(TcType::Arm),
            "AUTO" => Some(TcType::Auto),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eqpt::arm::JointCmdBatch;
    use crate::tc::arm_ctrl::ArmCmd;

    #[test]
    fn test_parse_no_payload() {
        let tc = Tc::from_json(r#"{"type": "HEARTBEAT"}"#).unwrap();
        assert_eq!(tc.tc_type, TcType::Heartbeat);
    }

    #[test]
    fn test_parse_arm_payload() {
        let json = concat!(
            r#"{"type": "ARM", "payload": {"SetJoints": {"batch": "#,
            r#"{"name": ["elevator_center_joint"], "position": [0.15]}}}}"#
        );

        let tc = Tc::from_json(json).unwrap();
        assert_eq!(tc.tc_type, TcType::Arm);

        let cmd: ArmCmd = tc.payload_as().unwrap();
        match cmd {
            ArmCmd::SetJoints { batch } => {
                assert_eq!(
                    batch,
                    JointCmdBatch::from_pairs(vec![("elevator_center_joint", 0.15)])
                );
            }
            other => panic!("Expected SetJoints, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            Tc::from_json(r#"{"type": "WARP_DRIVE"}"#),
            Err(TcParseError::InvalidType(_))
        ));
    }

    #[test]
    fn test_missing_payload_rejected() {
        assert!(matches!(
            Tc::from_json(r#"{"type": "ARM"}"#),
            Err(TcParseError::MissingPayload(TcType::Arm))
        ));
    }
}
