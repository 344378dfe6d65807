//! # Toggle input bindings
//!
//! A toggle edge-detects a button press or an axis threshold crossing against
//! the shared input snapshot, and fires one of two effect lists exactly once
//! per physical transition.
//!
//! Effects are explicit records of actuator moves rather than callbacks, so
//! the whole binding table is data driven from the parameter file.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::arm::InputSnapshot;
use log::trace;
use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Configuration of a single toggle binding.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleConfig {
    /// Human readable name, used in logs only.
    pub name: String,

    /// The input the toggle observes.
    pub input: InputBinding,

    /// Effects applied on the false-to-true transition.
    pub on: Vec<Effect>,

    /// Effects applied on the true-to-false transition.
    pub off: Vec<Effect>,
}

/// Runtime state of a toggle binding.
pub struct Toggle {
    name: String,
    input: InputBinding,

    /// Last observed input state, `None` until the first poll. The first
    /// poll only establishes a baseline so an input held from startup does
    /// not count as a transition.
    last_state: Option<bool>,

    on: Vec<Effect>,
    off: Vec<Effect>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The input a toggle is bound to.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputBinding {
    /// A digital button, edge detected directly.
    Button { index: usize },

    /// An analog axis, thresholded into a boolean before edge detection.
    Axis { index: usize, threshold: f64 },
}

/// A single actuator move applied when a toggle fires.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Drive a named joint to a target position.
    Joint { joint: String, target: TargetPos },

    /// Drive the servo to a position.
    Servo { position: f64 },
}

/// Target position specification for a joint effect.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TargetPos {
    /// The joint's declared minimum bound.
    Min,

    /// The joint's declared maximum bound.
    Max,

    /// An explicit position value.
    Value(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Toggle {
    pub fn from_config(config: &ToggleConfig) -> Self {
        Self {
            name: config.name.clone(),
            input: config.input,
            last_state: None,
            on: config.on.clone(),
            off: config.off.clone(),
        }
    }

    /// Poll the toggle against the current input snapshot.
    ///
    /// Returns the effect list to apply if the observed input transitioned
    /// since the last poll, or `None` if the state is unchanged. Called once
    /// per control cycle; a held input does not re-fire.
    pub fn poll(&mut self, snapshot: &InputSnapshot) -> Option<&[Effect]> {
        let current = match self.input {
            InputBinding::Button { index } => snapshot.button(index),
            InputBinding::Axis { index, threshold } => snapshot.axis(index) > threshold,
        };

        let previous = self.last_state.replace(current);

        match previous {
            Some(p) if p != current => {
                trace!(
                    "Toggle \"{}\" {} transition",
                    self.name,
                    if current { "on" } else { "off" }
                );

                if current {
                    Some(&self.on)
                } else {
                    Some(&self.off)
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn snapshot_with_button(pressed: bool) -> InputSnapshot {
        InputSnapshot {
            buttons: vec![pressed],
            axes: vec![],
        }
    }

    fn test_toggle() -> Toggle {
        Toggle::from_config(&ToggleConfig {
            name: "test".into(),
            input: InputBinding::Button { index: 0 },
            on: vec![Effect::Servo { position: 0.5 }],
            off: vec![Effect::Servo { position: 0.0 }],
        })
    }

    #[test]
    fn test_fires_once_per_transition() {
        let mut toggle = test_toggle();

        let mut on_count = 0;
        let mut off_count = 0;

        for pressed in [false, false, true, true, false].iter() {
            match toggle.poll(&snapshot_with_button(*pressed)) {
                Some(effects) if effects == [Effect::Servo { position: 0.5 }] => on_count += 1,
                Some(_) => off_count += 1,
                None => (),
            }
        }

        assert_eq!(on_count, 1);
        assert_eq!(off_count, 1);
    }

    #[test]
    fn test_input_held_from_startup_never_fires() {
        let mut toggle = test_toggle();

        let mut fired = 0;
        for pressed in [true, true, true].iter() {
            if toggle.poll(&snapshot_with_button(*pressed)).is_some() {
                fired += 1;
            }
        }

        // The first poll is a baseline, not a transition
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_axis_thresholding() {
        let mut toggle = Toggle::from_config(&ToggleConfig {
            name: "trigger".into(),
            input: InputBinding::Axis {
                index: 0,
                threshold: 0.5,
            },
            on: vec![Effect::Servo { position: 0.5 }],
            off: vec![Effect::Servo { position: 0.0 }],
        });

        let snapshot = |value: f64| InputSnapshot {
            buttons: vec![],
            axes: vec![value],
        };

        assert!(toggle.poll(&snapshot(0.2)).is_none());
        assert!(toggle.poll(&snapshot(0.8)).is_some());
        assert!(toggle.poll(&snapshot(0.9)).is_none());
        assert!(toggle.poll(&snapshot(0.1)).is_some());
    }
}
