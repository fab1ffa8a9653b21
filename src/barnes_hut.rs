use nalgebra::Vector3;

use crate::{
    bodies::Body,
    evaluate,
    gravity::MIN_DISTANCE,
    octree::Octree,
    AccelerationSolver, Execution,
};

/// Barnes-Hut force evaluation.
///
/// Builds a fresh [`Octree`] every step and walks it once per body.
/// The arena is kept between steps, so the last built tree stays inspectable
/// through [`BarnesHut::octree`] until the next step replaces it.
#[derive(Clone, Debug)]
pub struct BarnesHut {
    theta: f64,
    min_distance: f64,
    octree: Octree,
}

impl BarnesHut {
    /// Smaller `theta` opens more nodes. At `theta = 0` every internal node is
    /// opened unless its center of mass lies within the minimum distance of
    /// the evaluated body, in which case the whole node is skipped.
    #[must_use]
    pub fn new(theta: f64) -> Self {
        Self {
            theta,
            min_distance: MIN_DISTANCE,
            octree: Octree::new(),
        }
    }

    #[must_use]
    pub fn min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// The tree of the most recent step.
    #[must_use]
    pub fn octree(&self) -> &Octree {
        &self.octree
    }
}

impl Default for BarnesHut {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl AccelerationSolver for BarnesHut {
    fn calculate_accelerations(
        &mut self,
        bodies: &[Body],
        accelerations: &mut [Vector3<f64>],
        execution: Execution,
    ) {
        self.octree.build(bodies, self.min_distance);

        let octree = &self.octree;
        let (theta, min_distance) = (self.theta, self.min_distance);
        evaluate(bodies, accelerations, execution, |body| {
            octree.acceleration_on(&body.position, theta, min_distance)
        });
    }

    fn release(&mut self) {
        self.octree = Octree::new();
    }
}
