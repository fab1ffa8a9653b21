use nalgebra::Vector3;

use crate::{bodies::Body, evaluate, gravity, AccelerationSolver, Execution};

/// Exact O(N²) pairwise summation.
///
/// Reference for [`BarnesHut`](crate::BarnesHut) and usable as a solver for
/// small systems.
#[derive(Copy, Clone, Debug)]
pub struct DirectSummation {
    min_distance: f64,
}

impl DirectSummation {
    #[must_use]
    pub fn new(min_distance: f64) -> Self {
        Self { min_distance }
    }
}

impl Default for DirectSummation {
    fn default() -> Self {
        Self::new(gravity::MIN_DISTANCE)
    }
}

impl AccelerationSolver for DirectSummation {
    fn calculate_accelerations(
        &mut self,
        bodies: &[Body],
        accelerations: &mut [Vector3<f64>],
        execution: Execution,
    ) {
        let min_distance = self.min_distance;
        // the distance cutoff also skips the body itself
        evaluate(bodies, accelerations, execution, |body| {
            bodies
                .iter()
                .filter(|other| other.mass > 0.)
                .fold(Vector3::zeros(), |acc, other| {
                    acc + gravity::acceleration(
                        &body.position,
                        other.mass,
                        &other.position,
                        min_distance,
                    )
                })
        });
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_relative_eq, assert_ulps_eq};

    use super::*;
    use crate::{bodies::Color, gravity::G};

    const SINGLE: Execution = Execution::SingleThreaded;

    fn body(mass: f64, position: [f64; 3]) -> Body {
        Body::generated(mass, 1., Color::GRAY, Vector3::from(position), Vector3::zeros())
    }

    #[test]
    fn symmetry() {
        let bodies = [body(1e6, [10., 0., 0.]), body(1e6, [0., 0., 0.])];
        let mut accs = vec![Vector3::zeros(); 2];

        DirectSummation::default().calculate_accelerations(&bodies, &mut accs, SINGLE);

        assert_ulps_eq!(accs[0], -accs[1]);
        assert_relative_eq!(accs[1].x, G * 1e6 / 100.);
    }

    #[test]
    fn massless_sources_ignored() {
        let bodies = [body(0., [1., 0., 0.]), body(-5., [0., 1., 0.]), body(1., [0., 0., 0.])];
        let mut accs = vec![Vector3::zeros(); 3];

        DirectSummation::default().calculate_accelerations(&bodies, &mut accs, SINGLE);

        // a massless body still feels the others
        assert!(accs[0].x < 0.);
        assert_eq!(accs[2], Vector3::zeros());
    }

    #[test]
    fn multithreaded() {
        let bodies: Vec<_> = (0..37)
            .map(|i| {
                let i = f64::from(i);
                body(1e20 * (i + 1.), [i.sin() * 1e9, i.cos() * 1e9, i * 1e7])
            })
            .collect();

        let mut single = vec![Vector3::zeros(); bodies.len()];
        DirectSummation::default().calculate_accelerations(&bodies, &mut single, SINGLE);

        for num_threads in [1, 2, 5, 64] {
            let mut multi = vec![Vector3::zeros(); bodies.len()];
            DirectSummation::default().calculate_accelerations(
                &bodies,
                &mut multi,
                Execution::Multithreaded { num_threads },
            );
            assert_eq!(single, multi);
        }
    }
}
