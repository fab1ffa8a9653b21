pub mod barnes_hut;
pub mod bodies;
pub mod config;
pub mod csv;
pub mod direct_summation;
pub mod error;
pub mod gravity;
pub mod integrator;
pub mod octree;
pub mod simulation;

use std::thread;

use nalgebra::Vector3;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use barnes_hut::BarnesHut;
pub use bodies::{Bodies, Body, Color, Origin};
pub use config::SimulationConfig;
pub use direct_summation::DirectSummation;
pub use error::SimulationError;
pub use simulation::{Simulation, State};

/// How the per-body accelerations are evaluated.
///
/// Only the evaluation phase runs in parallel. Every worker reads the same
/// tree and writes a disjoint part of the acceleration buffer; integration
/// starts after all of them are done.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    #[default]
    SingleThreaded,
    /// Split the bodies into `num_threads` contiguous chunks.
    Multithreaded { num_threads: usize },
    /// Let rayon distribute the bodies.
    #[cfg(feature = "rayon")]
    RayonIter,
}

/// Computes the acceleration of every body from the positions at the start of a step.
pub trait AccelerationSolver {
    /// Fill `accelerations[i]` with the acceleration acting on `bodies[i]`.
    fn calculate_accelerations(
        &mut self,
        bodies: &[Body],
        accelerations: &mut [Vector3<f64>],
        execution: Execution,
    );

    /// Give back any memory held between steps.
    fn release(&mut self) {}
}

/// Evaluate `acceleration` for every body under the given execution mode.
pub(crate) fn evaluate<F>(
    bodies: &[Body],
    accelerations: &mut [Vector3<f64>],
    execution: Execution,
    acceleration: F,
) where
    F: Fn(&Body) -> Vector3<f64> + Sync,
{
    match execution {
        Execution::SingleThreaded => {
            for (body, a) in bodies.iter().zip(accelerations.iter_mut()) {
                *a = acceleration(body);
            }
        }
        Execution::Multithreaded { num_threads } => {
            let chunk_size = bodies.len().div_ceil(num_threads.max(1)).max(1);
            let acceleration = &acceleration;

            thread::scope(|s| {
                for (bodies, accelerations) in bodies
                    .chunks(chunk_size)
                    .zip(accelerations.chunks_mut(chunk_size))
                {
                    s.spawn(move || {
                        for (body, a) in bodies.iter().zip(accelerations.iter_mut()) {
                            *a = acceleration(body);
                        }
                    });
                }
            });
        }
        #[cfg(feature = "rayon")]
        Execution::RayonIter => {
            accelerations
                .par_iter_mut()
                .zip(bodies.par_iter())
                .for_each(|(a, body)| *a = acceleration(body));
        }
    }
}
