//! # PID controller
//!
//! Time-aware PID controller used by the balance command. The controller
//! tracks its own sample times so callers never pass a delta-time in, and
//! optionally treats its input as an angle so that error is always taken
//! through the short way round the circle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::Serialize;
use std::time::Instant;

// Internal
use util::maths::ang_dist_180;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A PID controller
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Previous instant that the error was passed in
    #[serde(skip)]
    prev_time: Option<Instant>,

    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Derivative gain
    k_d: f64,

    /// Previous error
    prev_error: Option<f64>,

    /// The integral accumulation
    integral: f64,

    /// The measurement the controller drives towards
    setpoint: f64,

    /// Error magnitude below which the controller is at its setpoint
    tolerance: f64,

    /// Treat measurements as angles in degrees, wrapping error into
    /// [-180, 180]
    continuous: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl PidController {
    /// Create a new controller with the given gains.
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self {
            k_p,
            k_i,
            k_d,
            integral: 0f64,
            prev_time: None,
            prev_error: None,
            setpoint: 0f64,
            tolerance: 0f64,
            continuous: false,
        }
    }

    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Treat measurements as angles in degrees.
    pub fn enable_continuous_input(&mut self) {
        self.continuous = true;
    }

    /// Clear accumulated state, keeping gains, setpoint and tolerance.
    pub fn reset(&mut self) {
        self.integral = 0f64;
        self.prev_time = None;
        self.prev_error = None;
    }

    /// Get the controller output for the given measurement.
    ///
    /// This function is time-aware so there is no need to pass in a
    /// delta-time value.
    pub fn calculate(&mut self, measurement: f64) -> f64 {
        let error = if self.continuous {
            ang_dist_180(measurement, self.setpoint)
        } else {
            self.setpoint - measurement
        };

        self.get(error)
    }

    /// True once the most recent measurement was within tolerance of the
    /// setpoint. False before the first [`Self::calculate`] call.
    pub fn at_setpoint(&self) -> bool {
        match self.prev_error {
            Some(e) => e.abs() <= self.tolerance,
            None => false,
        }
    }

    /// Get the value of the controller for the given error.
    fn get(&mut self, error: f64) -> f64 {
        let curr_time = Instant::now();

        let dt = self
            .prev_time
            .map(|t0| (curr_time - t0).as_secs_f64());

        // If there's no time difference then we don't accumulate the
        // integral. The other option is to add on the error and that will
        // produce a large spike in integral compared to normal operation, so
        // we don't do this.
        self.integral += match dt {
            Some(t) => error * t,
            None => 0f64,
        };

        // If there's no time difference again we assume no derivative, for
        // the same reasons as for integral.
        let deriv = match (self.prev_error, dt) {
            (Some(e), Some(t)) => (error - e) / t,
            _ => 0f64,
        };

        let out = self.k_p * error + self.k_i * self.integral + self.k_d * deriv;

        self.prev_time = Some(curr_time);
        self.prev_error = Some(error);

        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_proportional_response() {
        let mut pid = PidController::new(0.5, 0.0, 0.0);
        pid.set_setpoint(10.0);

        // First sample has no dt, so output is pure proportional
        let out = pid.calculate(4.0);
        assert!((out - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_at_setpoint_requires_a_sample() {
        let mut pid = PidController::new(0.3, 0.0, 0.1);
        pid.set_setpoint(0.0);
        pid.set_tolerance(2.5);

        assert!(!pid.at_setpoint());

        pid.calculate(10.0);
        assert!(!pid.at_setpoint());

        pid.calculate(1.0);
        assert!(pid.at_setpoint());
    }

    #[test]
    fn test_continuous_input_wraps_error() {
        let mut pid = PidController::new(1.0, 0.0, 0.0);
        pid.set_setpoint(170.0);
        pid.enable_continuous_input();

        // From -170 the short way to 170 is -20 degrees, not +340
        let out = pid.calculate(-170.0);
        assert!((out + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_clears_accumulation() {
        let mut pid = PidController::new(0.0, 1.0, 0.0);
        pid.set_setpoint(0.0);

        pid.calculate(5.0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        pid.calculate(5.0);

        pid.reset();
        // After a reset the first sample accumulates no integral
        let out = pid.calculate(5.0);
        assert_eq!(out, 0.0);
    }
}
