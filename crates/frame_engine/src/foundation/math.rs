//! Math utilities and types
//!
//! Screen-space math works in whole pixels, so the engine's vector types are
//! integer nalgebra vectors. Origin is the top-left corner, y grows downwards.

pub use nalgebra::Vector2;

/// Integer 2D vector used for pixel positions and per-frame velocities
pub type IVec2 = Vector2<i32>;

/// Construct an [`IVec2`] from its components
pub fn ivec2(x: i32, y: i32) -> IVec2 {
    IVec2::new(x, y)
}

/// Reflect a single velocity component when its coordinate has left the
/// open interval `(low, high)`.
///
/// Returns the component negated if `coord <= low` or `coord >= high`,
/// unchanged otherwise. A zero component stays zero.
pub fn reflect_component(coord: f64, velocity: i32, low: f64, high: f64) -> i32 {
    if coord >= high || coord <= low {
        -velocity
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_inside_keeps_sign() {
        assert_eq!(reflect_component(100.0, 15, 0.0, 1228.8), 15);
        assert_eq!(reflect_component(100.0, -15, 0.0, 1228.8), -15);
    }

    #[test]
    fn test_reflect_on_both_edges() {
        // Boundaries are inclusive
        assert_eq!(reflect_component(0.0, -10, 0.0, 691.2), 10);
        assert_eq!(reflect_component(691.2, 10, 0.0, 691.2), -10);
        assert_eq!(reflect_component(-40.0, -10, 0.0, 691.2), 10);
    }

    #[test]
    fn test_ivec2_arithmetic() {
        let position = ivec2(1900, 500);
        let velocity = ivec2(-15, 10);
        assert_eq!(position + velocity, ivec2(1885, 510));
    }
}
