//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of meters in one foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Number of inches in one foot.
pub const INCHES_PER_FOOT: f64 = 12.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Convert a distance in feet into meters.
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

/// Convert a distance in inches into meters.
///
/// Inches are routed through feet first.
pub fn inches_to_meters(inches: f64) -> f64 {
    feet_to_meters(inches / INCHES_PER_FOOT)
}

/// Wrap an angle in degrees into the [-180, 180) range.
pub fn wrap_to_180<T>(angle_deg: T) -> T
where
    T: Float,
{
    let full: T = T::from(360.0).unwrap();
    let half: T = T::from(180.0).unwrap();

    let wrapped = rem_euclid(angle_deg + half, full);

    wrapped - half
}

/// Get the signed angular distance between two angles in degrees, accounting
/// for wrapping at +/-180.
///
/// The returned value is the shortest rotation that takes `from` onto `to`.
pub fn ang_dist_180<T>(from: T, to: T) -> T
where
    T: Float,
{
    wrap_to_180(to - from)
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::from(0.0).unwrap() {
        r + rhs.abs()
    } else {
        r
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0.0, 1.0), (0.0, 10.0), 0.5), 5.0);
        assert_eq!(lin_map((0.0, 1.0), (10.0, 0.0), 1.0), 0.0);
        assert_eq!(lin_map((-1.0, 1.0), (0.0, 1.0), 0.0), 0.5);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(feet_to_meters(1.0), 0.3048);
        // 12 inches is exactly one foot
        assert_eq!(inches_to_meters(12.0), feet_to_meters(1.0));
        assert_eq!(inches_to_meters(6.0), feet_to_meters(0.5));
    }

    #[test]
    fn test_wrap_to_180() {
        assert_eq!(wrap_to_180(0f64), 0f64);
        assert_eq!(wrap_to_180(190f64), -170f64);
        assert_eq!(wrap_to_180(-190f64), 170f64);
        assert_eq!(wrap_to_180(360f64), 0f64);
    }

    #[test]
    fn test_ang_dist_180() {
        assert_eq!(ang_dist_180(10f64, 20f64), 10f64);
        assert_eq!(ang_dist_180(20f64, 10f64), -10f64);
        // Shortest path across the wrap
        assert_eq!(ang_dist_180(170f64, -170f64), 20f64);
        assert_eq!(ang_dist_180(-170f64, 170f64), -20f64);
    }
}
