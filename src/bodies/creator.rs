use std::f64::consts::PI;

use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Open01, Uniform};

use super::{Body, Color};
use crate::{
    config::{AsteroidBeltConfig, JitterPlacement, RadialDistribution},
    gravity::G,
};

/// Orbital radius of Mars. [m]
const MARS_ORBIT: f64 = 2.28e11;
/// Orbital radius of Jupiter. [m]
const JUPITER_ORBIT: f64 = 7.79e11;

pub trait BodyCreator {
    fn create_body(&mut self) -> Body;

    fn create_bodies(&mut self, n: usize) -> Vec<Body> {
        (0..n).map(|_| self.create_body()).collect()
    }
}

/// Places asteroids on near-circular orbits around a central mass in the x-z plane.
pub struct AsteroidCreator<R: Rng> {
    rng: R,
    central_mass: f64,
    config: AsteroidBeltConfig,
    phi_distr: Uniform<f64>,
    speed_distr: Uniform<f64>,
    jitter_distr: Uniform<f64>,
}

impl AsteroidCreator<StdRng> {
    /// Seeded from `seed`, or from the OS if there is none.
    pub fn new(central_mass: f64, config: AsteroidBeltConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::rng(central_mass, config, rng)
    }
}

impl<R: Rng> AsteroidCreator<R> {
    /// `config` has to be validated, the speed and jitter ranges must not be empty.
    pub fn rng(central_mass: f64, config: AsteroidBeltConfig, rng: R) -> Self {
        let [low, high] = config.speed_factor;
        Self {
            rng,
            central_mass,
            phi_distr: Uniform::new(0., 2. * PI),
            speed_distr: Uniform::new_inclusive(low, high),
            jitter_distr: Uniform::new_inclusive(-config.vertical_jitter, config.vertical_jitter),
            config,
        }
    }

    /// Radius from the logit distribution around the belt's mean radius.
    fn logit_radius(&mut self) -> f64 {
        let x: f64 = Open01.sample(&mut self.rng);
        let l = x.ln() - (1. - x).ln() + 1.;
        self.config.mean_radius * l.abs().sqrt()
    }

    fn radius_and_color(&mut self) -> (f64, Color) {
        match self.config.distribution {
            RadialDistribution::Logit => (self.logit_radius(), Color::GRAY),
            RadialDistribution::Regions => {
                let region: f64 = self.rng.gen();
                if region < 0.7 {
                    (self.rng.gen_range(MARS_ORBIT..JUPITER_ORBIT), Color::GRAY)
                } else if region < 0.9 {
                    (JUPITER_ORBIT * self.rng.gen_range(0.8..1.2), Color::DARKGRAY)
                } else {
                    (self.logit_radius(), Color::LIGHTGRAY)
                }
            }
        }
    }
}

impl<R: Rng> BodyCreator for AsteroidCreator<R> {
    fn create_body(&mut self) -> Body {
        let (r, color) = self.radius_and_color();
        let phi = self.phi_distr.sample(&mut self.rng);

        let v = (G * self.central_mass / r).sqrt() * self.speed_distr.sample(&mut self.rng);
        let jitter = self.jitter_distr.sample(&mut self.rng);

        let (pos_y, vel_y) = match self.config.jitter {
            JitterPlacement::Velocity => (0., jitter),
            JitterPlacement::Position => (jitter, 0.),
        };
        let pos = Vector3::new(r * phi.cos(), pos_y, r * phi.sin());
        let vel = Vector3::new(-v * phi.sin(), vel_y, v * phi.cos());

        Body::generated(self.config.mass, self.config.radius, color, pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::bodies::{Origin, SOLAR_SYSTEM};

    fn belt() -> AsteroidBeltConfig {
        AsteroidBeltConfig {
            count: 200,
            ..Default::default()
        }
    }

    #[test]
    fn near_circular_orbits() {
        let sun = SOLAR_SYSTEM[0].mass;
        let mut creator = AsteroidCreator::new(sun, belt(), Some(1));

        for body in creator.create_bodies(200) {
            let r = body.position.norm();
            let v_circ = (G * sun / r).sqrt();
            let horizontal = Vector3::new(body.velocity.x, 0., body.velocity.z);

            assert_eq!(body.origin, Origin::Generated);
            assert!(body.name.is_none());
            assert_eq!(body.mass, 1e12);
            assert_eq!(body.position.y, 0.);
            assert!(body.velocity.y.abs() <= 100.);
            assert!(r > 0.);
            assert!(horizontal.norm() >= 0.6 * v_circ * (1. - 1e-12));
            assert!(horizontal.norm() <= 1.2 * v_circ * (1. + 1e-12));
            // velocity is tangential
            let cos = horizontal.dot(&body.position) / (r * horizontal.norm());
            assert_abs_diff_eq!(cos, 0., epsilon = 1e-9);
        }
    }

    #[test]
    fn position_jitter() {
        let config = AsteroidBeltConfig {
            jitter: JitterPlacement::Position,
            ..belt()
        };
        let mut creator = AsteroidCreator::new(SOLAR_SYSTEM[0].mass, config, Some(2));

        for body in creator.create_bodies(100) {
            assert_eq!(body.velocity.y, 0.);
            assert!(body.position.y.abs() <= 100.);
        }
    }

    #[test]
    fn regions() {
        let config = AsteroidBeltConfig {
            distribution: RadialDistribution::Regions,
            ..belt()
        };
        let mut creator = AsteroidCreator::new(SOLAR_SYSTEM[0].mass, config, Some(3));

        let bodies = creator.create_bodies(1000);
        for body in &bodies {
            let r = body.position.norm();
            match body.color {
                Color::GRAY => assert!((MARS_ORBIT..JUPITER_ORBIT).contains(&r)),
                Color::DARKGRAY => {
                    assert!((0.8 * JUPITER_ORBIT..1.2 * JUPITER_ORBIT).contains(&r))
                }
                Color::LIGHTGRAY => assert!(r > 0.),
                other => panic!("unexpected color {other:?}"),
            }
        }

        let main_belt = bodies.iter().filter(|b| b.color == Color::GRAY).count();
        assert!(main_belt > 600 && main_belt < 800);
    }

    #[test]
    fn seeded_is_reproducible() {
        let sun = SOLAR_SYSTEM[0].mass;
        let a = AsteroidCreator::new(sun, belt(), Some(42)).create_bodies(10);
        let b = AsteroidCreator::new(sun, belt(), Some(42)).create_bodies(10);

        for (a, b) in a.iter().zip(&b) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity, b.velocity);
        }
    }

    #[test]
    fn no_central_mass() {
        let mut creator = AsteroidCreator::new(0., belt(), Some(5));
        let body = creator.create_body();

        assert_eq!(body.velocity.x, 0.);
        assert_eq!(body.velocity.z, 0.);
    }
}
