//! Simulation configuration.
//!
//! Everything the controller needs to seed a run: the time step, the
//! Barnes-Hut parameters, which named body groups to include and how to place
//! the asteroid belt. A configuration can be built in code or read from YAML:
//!
//! ```yaml
//! time_step: 3600.0
//! theta: 0.5
//! seed: 42
//! groups:
//!   solar_system: true
//!   massive_jupiter: 1000.0
//!   alpha_centauri: false
//!   black_hole: false
//! bodies:
//!   - name: "Rogue"
//!     mass: 1.0e27
//!     radius: 7.0e7
//!     position: [1.0e13, 0.0, 0.0]
//!     velocity: [-2.0e4, 0.0, 0.0]
//! asteroids:
//!   count: 500
//!   distribution: logit
//!   jitter: velocity
//! ```

use std::{fs, path::Path};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    bodies::{Body, Color, SOLAR_SYSTEM, ALPHA_CENTAURI},
    Execution, SimulationError,
};

pub const SECONDS_PER_DAY: f64 = 86_400.;

/// Time step that advances `days_per_second` simulated days for every real
/// second when the caller steps once per frame at `fps`.
#[must_use]
pub fn time_step_from_rate(fps: u32, days_per_second: f64) -> f64 {
    days_per_second * SECONDS_PER_DAY / f64::from(fps)
}

/// How the radius of an asteroid orbit is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialDistribution {
    /// `r = mean_radius * sqrt(|l|)` with `l = ln(x) - ln(1 - x) + 1`, `x ~ U(0, 1)`.
    #[default]
    Logit,
    /// 70% between the orbits of Mars and Jupiter, 20% within 20% of Jupiter's
    /// orbit, the remaining 10% drawn from [`RadialDistribution::Logit`].
    Regions,
}

/// Where the small out-of-plane component goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitterPlacement {
    /// Into `velocity.y`, in m/s. Asteroids start in the orbital plane.
    #[default]
    Velocity,
    /// Into `position.y`, in m. Asteroids start with no vertical velocity.
    Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidBeltConfig {
    pub count: usize,
    /// [kg]
    pub mass: f64,
    /// [m]
    pub radius: f64,
    /// [m]
    pub mean_radius: f64,
    /// Range the circular orbital speed is scaled by.
    pub speed_factor: [f64; 2],
    /// Amplitude of the uniform out-of-plane component.
    pub vertical_jitter: f64,
    pub jitter: JitterPlacement,
    pub distribution: RadialDistribution,
}

impl Default for AsteroidBeltConfig {
    fn default() -> Self {
        Self {
            count: 500,
            mass: 1e12,
            radius: 2e3,
            mean_radius: 4e11,
            speed_factor: [0.6, 1.2],
            vertical_jitter: 1e2,
            jitter: JitterPlacement::default(),
            distribution: RadialDistribution::default(),
        }
    }
}

impl AsteroidBeltConfig {
    #[must_use]
    pub fn none() -> Self {
        Self {
            count: 0,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        if self.count == 0 {
            return Ok(());
        }
        if !(self.mass.is_finite() && self.mass > 0.) {
            return Err(SimulationError::InvalidConfig(format!(
                "asteroid mass must be positive, got {}",
                self.mass
            )));
        }
        if !(self.mean_radius.is_finite() && self.mean_radius > 0.) {
            return Err(SimulationError::InvalidConfig(format!(
                "asteroid mean radius must be positive, got {}",
                self.mean_radius
            )));
        }
        let [low, high] = self.speed_factor;
        if !(low.is_finite() && high.is_finite() && 0. <= low && low <= high) {
            return Err(SimulationError::InvalidConfig(format!(
                "asteroid speed factor range [{low}, {high}] is empty or negative"
            )));
        }
        if !(self.vertical_jitter.is_finite() && self.vertical_jitter >= 0.) {
            return Err(SimulationError::InvalidConfig(format!(
                "vertical jitter must be non-negative, got {}",
                self.vertical_jitter
            )));
        }
        Ok(())
    }
}

/// Optional groups of named bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyGroups {
    /// The Sun and the eight planets.
    pub solar_system: bool,
    /// Multiply Jupiter's mass by this factor.
    pub massive_jupiter: Option<f64>,
    /// Alpha Centauri A, B and Proxima.
    pub alpha_centauri: bool,
    /// An intermediate-mass black hole passing through.
    pub black_hole: bool,
}

impl Default for BodyGroups {
    fn default() -> Self {
        Self {
            solar_system: true,
            massive_jupiter: None,
            alpha_centauri: false,
            black_hole: false,
        }
    }
}

impl BodyGroups {
    #[must_use]
    pub fn none() -> Self {
        Self {
            solar_system: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.solar_system) * SOLAR_SYSTEM.len()
            + usize::from(self.alpha_centauri) * ALPHA_CENTAURI.len()
            + usize::from(self.black_hole)
    }
}

/// A named body given directly in the configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub radius: f64,
    #[serde(default = "default_color")]
    pub color: Color,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

fn default_color() -> Color {
    Color::WHITE
}

impl BodyConfig {
    #[must_use]
    pub fn to_body(&self) -> Body {
        Body::named(
            self.name.clone(),
            self.mass,
            self.radius,
            self.color,
            Vector3::from(self.position),
            Vector3::from(self.velocity),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// [s]
    pub time_step: f64,
    /// Barnes-Hut opening angle.
    pub theta: f64,
    /// Separations below this contribute no acceleration and octree cells
    /// smaller than this are not split. [m]
    pub min_distance: f64,
    /// Seed for the asteroid placement. Drawn from the OS if absent.
    pub seed: Option<u64>,
    pub execution: Execution,
    pub groups: BodyGroups,
    pub bodies: Vec<BodyConfig>,
    pub asteroids: AsteroidBeltConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: time_step_from_rate(140, 100.),
            theta: 0.5,
            min_distance: crate::gravity::MIN_DISTANCE,
            seed: None,
            execution: Execution::default(),
            groups: BodyGroups::default(),
            bodies: Vec::new(),
            asteroids: AsteroidBeltConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// The full solar system with the default asteroid belt.
    #[must_use]
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            ..Default::default()
        }
    }

    /// No catalog bodies and no asteroids, only what is added to `bodies`.
    #[must_use]
    pub fn empty(time_step: f64) -> Self {
        Self {
            time_step,
            groups: BodyGroups::none(),
            asteroids: AsteroidBeltConfig::none(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: BodyConfig) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimulationError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Number of bodies a simulation built from this configuration holds.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.groups.count() + self.bodies.len() + self.asteroids.count
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.time_step.is_finite() && self.time_step > 0.) {
            return Err(SimulationError::InvalidTimeStep(self.time_step));
        }
        if !(self.theta.is_finite() && self.theta >= 0.) {
            return Err(SimulationError::InvalidTheta(self.theta));
        }
        if !(self.min_distance.is_finite() && self.min_distance > 0.) {
            return Err(SimulationError::InvalidConfig(format!(
                "minimum distance must be positive, got {}",
                self.min_distance
            )));
        }
        if let Some(factor) = self.groups.massive_jupiter {
            if !(factor.is_finite() && factor > 0.) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Jupiter mass factor must be positive, got {factor}"
                )));
            }
        }
        if let Execution::Multithreaded { num_threads: 0 } = self.execution {
            return Err(SimulationError::InvalidConfig(
                "multithreaded execution needs at least one thread".to_string(),
            ));
        }
        self.asteroids.validate()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rate() {
        assert_relative_eq!(time_step_from_rate(24, 1.), 3600.);
        assert_relative_eq!(SimulationConfig::default().time_step, 100. * 86_400. / 140.);
    }

    #[test]
    fn body_count() {
        let mut config = SimulationConfig::new(1.);
        assert_eq!(config.body_count(), 9 + 500);

        config.groups.alpha_centauri = true;
        config.groups.black_hole = true;
        assert_eq!(config.body_count(), 9 + 3 + 1 + 500);

        assert_eq!(SimulationConfig::empty(1.).body_count(), 0);
    }

    #[test]
    fn parse_yaml() {
        let yaml = r#"
time_step: 3600.0
theta: 0.3
seed: 7
groups:
  solar_system: false
  black_hole: true
bodies:
  - name: "Rogue"
    mass: 1.0e27
    radius: 7.0e7
    position: [1.0e13, 0.0, 0.0]
    velocity: [-2.0e4, 0.0, 0.0]
asteroids:
  count: 10
  distribution: regions
  jitter: position
"#;
        let config = SimulationConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.time_step, 3600.);
        assert_eq!(config.theta, 0.3);
        assert_eq!(config.seed, Some(7));
        assert!(!config.groups.solar_system);
        assert!(config.groups.black_hole);
        assert_eq!(config.bodies[0].name, "Rogue");
        assert_eq!(config.bodies[0].color, Color::WHITE);
        assert_eq!(config.asteroids.count, 10);
        assert_eq!(config.asteroids.mass, 1e12);
        assert_eq!(config.asteroids.distribution, RadialDistribution::Regions);
        assert_eq!(config.asteroids.jitter, JitterPlacement::Position);
        assert_eq!(config.body_count(), 12);
    }

    #[test]
    fn rejects_invalid() {
        assert!(matches!(
            SimulationConfig::new(0.).validate(),
            Err(SimulationError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            SimulationConfig::new(f64::NAN).validate(),
            Err(SimulationError::InvalidTimeStep(_))
        ));

        let mut config = SimulationConfig::new(1.);
        config.theta = -0.5;
        assert!(matches!(config.validate(), Err(SimulationError::InvalidTheta(_))));

        let mut config = SimulationConfig::new(1.);
        config.min_distance = 0.;
        assert!(matches!(config.validate(), Err(SimulationError::InvalidConfig(_))));

        let mut config = SimulationConfig::new(1.);
        config.asteroids.speed_factor = [1.2, 0.6];
        assert!(matches!(config.validate(), Err(SimulationError::InvalidConfig(_))));

        assert!(SimulationConfig::from_yaml_str("time_step: -1.0").is_err());
        assert!(SimulationConfig::from_yaml_str("time_step: [").is_err());
    }
}
