use nalgebra::Vector3;

/// Gravitational constant in m³ kg⁻¹ s⁻².
pub const G: f64 = 6.6743e-11;

/// Separations below this are treated as self-interaction and contribute nothing.
pub const MIN_DISTANCE: f64 = 1e-6;

/// Acceleration exerted on a body at `position` by a point mass `mass` at `source`.
///
/// Expressed directly as an acceleration (`G * mass / d²` towards `source`),
/// so the receiving body's own mass never enters.
/// Returns zero if the two points are closer than `min_distance`.
#[inline]
pub fn acceleration(
    position: &Vector3<f64>,
    mass: f64,
    source: &Vector3<f64>,
    min_distance: f64,
) -> Vector3<f64> {
    let r = source - position;
    let distance = r.norm();
    if distance < min_distance {
        return Vector3::zeros();
    }
    r * (G * mass / (distance * distance * distance))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn attractive() {
        let a = acceleration(
            &Vector3::new(1., 0., 0.),
            1.,
            &Vector3::new(-1., 0., 0.),
            MIN_DISTANCE,
        );

        assert!(a[0] < 0.);
        assert_eq!(a[1], 0.);
        assert_eq!(a[2], 0.);
    }

    #[test]
    fn inverse_square() {
        let near = acceleration(&Vector3::zeros(), 1e10, &Vector3::new(2., 0., 0.), MIN_DISTANCE);
        let far = acceleration(&Vector3::zeros(), 1e10, &Vector3::new(4., 0., 0.), MIN_DISTANCE);

        assert_relative_eq!(near.norm(), G * 1e10 / 4.);
        assert_relative_eq!(near.norm() / far.norm(), 4., epsilon = 1e-12);
    }

    #[test]
    fn coincident_points() {
        let p = Vector3::new(3., 4., 5.);
        assert_eq!(acceleration(&p, 1e30, &p, MIN_DISTANCE), Vector3::zeros());
    }
}
