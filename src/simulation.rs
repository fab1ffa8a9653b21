use nalgebra::{DMatrix, Vector3};
use tracing::{debug, info, warn};

use crate::{
    bodies::{
        AsteroidCreator, Bodies, Body, BodyCreator, ALPHA_CENTAURI, BLACK_HOLE, JUPITER,
        SOLAR_SYSTEM,
    },
    config::SimulationConfig,
    integrator, AccelerationSolver, BarnesHut, Execution, SimulationError,
};

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Built, not stepped yet.
    Constructed,
    /// At least one step taken.
    Stepping,
    /// Bodies released. Stepping does nothing.
    Destroyed,
}

/// Owns the bodies and advances them in fixed time steps.
///
/// Every step computes the accelerations from the positions at the start of
/// the step, then integrates all velocities and all positions.
#[derive(Debug)]
pub struct Simulation<S = BarnesHut> {
    time_step: f64,
    elapsed_time: f64,
    bodies: Bodies,
    solver: S,
    execution: Execution,
    state: State,
}

impl Simulation<BarnesHut> {
    /// Seed a Barnes-Hut simulation from `config`.
    ///
    /// Named bodies come first in catalog order, followed by the bodies listed
    /// in the configuration and finally the asteroid belt.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let count = config.body_count();
        let mut bodies = Bodies::with_capacity(count).map_err(|source| SimulationError::Allocation {
            bodies: count,
            source,
        })?;

        if config.groups.solar_system {
            for (i, entry) in SOLAR_SYSTEM.iter().enumerate() {
                let mut body = entry.to_body();
                if let (JUPITER, Some(factor)) = (i, config.groups.massive_jupiter) {
                    body.mass *= factor;
                }
                bodies.push(body);
            }
        } else if config.groups.massive_jupiter.is_some() {
            warn!("massive Jupiter requested without the solar system, ignored");
        }
        if config.groups.alpha_centauri {
            for entry in &ALPHA_CENTAURI {
                bodies.push(entry.to_body());
            }
        }
        if config.groups.black_hole {
            bodies.push(BLACK_HOLE.to_body());
        }
        for body in &config.bodies {
            bodies.push(body.to_body());
        }

        let named = bodies.len();
        if config.asteroids.count > 0 {
            let central_mass = bodies.central_mass().unwrap_or_else(|| {
                warn!("no named body to orbit, asteroids start at rest");
                0.
            });
            let mut creator =
                AsteroidCreator::new(central_mass, config.asteroids.clone(), config.seed);
            for _ in 0..config.asteroids.count {
                bodies.push(creator.create_body());
            }
        }

        info!(
            named,
            asteroids = bodies.len() - named,
            time_step = config.time_step,
            theta = config.theta,
            "simulation constructed"
        );

        let solver = BarnesHut::new(config.theta).min_distance(config.min_distance);
        Ok(Self::from_parts(bodies, config.time_step, solver, config.execution))
    }
}

impl<S: AccelerationSolver> Simulation<S> {
    /// A simulation over `bodies` with any solver.
    pub fn with_solver(bodies: Bodies, time_step: f64, solver: S) -> Result<Self, SimulationError> {
        if !(time_step.is_finite() && time_step > 0.) {
            return Err(SimulationError::InvalidTimeStep(time_step));
        }
        Ok(Self::from_parts(bodies, time_step, solver, Execution::default()))
    }

    fn from_parts(bodies: Bodies, time_step: f64, solver: S, execution: Execution) -> Self {
        Self {
            time_step,
            elapsed_time: 0.,
            bodies,
            solver,
            execution,
            state: State::Constructed,
        }
    }

    #[must_use]
    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Evaluate the accelerations on `num_threads` scoped threads.
    #[must_use]
    pub fn multithreaded(self, num_threads: usize) -> Self {
        self.execution(Execution::Multithreaded { num_threads })
    }

    /// Use Rayon to evaluate the accelerations.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(self) -> Self {
        self.execution(Execution::RayonIter)
    }

    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Simulated time in s.
    #[must_use]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        self.bodies.as_slice()
    }

    #[must_use]
    pub fn body_store(&self) -> &Bodies {
        &self.bodies
    }

    /// Accelerations of the last step.
    #[must_use]
    pub fn accelerations(&self) -> &[Vector3<f64>] {
        self.bodies.accelerations()
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Advance all bodies by one time step.
    ///
    /// Does nothing once the simulation is destroyed or if there are no bodies.
    pub fn step(&mut self) {
        if self.state == State::Destroyed {
            warn!("step on a destroyed simulation ignored");
            return;
        }
        if self.bodies.is_empty() {
            warn!("step without bodies ignored");
            return;
        }

        let (bodies, accelerations) = self.bodies.split_mut();
        self.solver
            .calculate_accelerations(bodies, accelerations, self.execution);
        integrator::semi_implicit_euler(bodies, accelerations, self.time_step);

        self.elapsed_time += self.time_step;
        self.state = State::Stepping;
        debug!(elapsed_time = self.elapsed_time, bodies = bodies.len(), "step");
    }

    /// Take `num_steps` steps and record the positions.
    ///
    /// Row `t` holds the positions after `t` steps, so row 0 is the state
    /// before the first step. Columns follow the body order.
    pub fn simulate(&mut self, num_steps: usize) -> DMatrix<Vector3<f64>> {
        let n = self.bodies.len();
        let mut positions = DMatrix::from_element(num_steps + 1, n, Vector3::zeros());
        self.record(&mut positions, 0);

        for t in 1..=num_steps {
            self.step();
            self.record(&mut positions, t);
        }

        positions
    }

    fn record(&self, positions: &mut DMatrix<Vector3<f64>>, row: usize) {
        for (j, body) in self.bodies.iter().enumerate() {
            positions[(row, j)] = body.position;
        }
    }

    /// Release the bodies and the solver's memory.
    ///
    /// Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.state == State::Destroyed {
            return;
        }

        let bodies = self.bodies.len();
        self.bodies.release();
        self.solver.release();
        self.state = State::Destroyed;
        info!(bodies, elapsed_time = self.elapsed_time, "simulation destroyed");
    }
}
