pub mod catalog;
pub mod creator;

pub use catalog::*;
pub use creator::*;

use std::collections::TryReserveError;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// An RGBA display color. Only the rendering layer cares about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const GOLD: Self = Self::rgb(255, 203, 0);
    pub const YELLOW: Self = Self::rgb(253, 249, 0);
    pub const ORANGE: Self = Self::rgb(255, 161, 0);
    pub const BEIGE: Self = Self::rgb(211, 176, 131);
    pub const BLUE: Self = Self::rgb(0, 121, 241);
    pub const SKYBLUE: Self = Self::rgb(102, 191, 255);
    pub const DARKBLUE: Self = Self::rgb(0, 82, 172);
    pub const RED: Self = Self::rgb(230, 41, 55);
    pub const MAROON: Self = Self::rgb(190, 33, 55);
    pub const BROWN: Self = Self::rgb(127, 106, 79);
    pub const LIGHTGRAY: Self = Self::rgb(200, 200, 200);
    pub const GRAY: Self = Self::rgb(130, 130, 130);
    pub const DARKGRAY: Self = Self::rgb(80, 80, 80);
    pub const DARKPURPLE: Self = Self::rgb(112, 31, 126);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

/// Where a body came from.
///
/// Stored on every body so named bodies and asteroids are told apart by tag,
/// never by their index in the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// A body from a reference catalog or from the configuration.
    Named,
    /// A procedurally placed asteroid.
    Generated,
}

/// A single orbital body.
#[derive(Clone, Debug)]
pub struct Body {
    /// Mass in kg.
    pub mass: f64,
    /// Radius in m. Only used for drawing, never for dynamics.
    pub radius: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub color: Color,
    pub name: Option<String>,
    pub origin: Origin,
}

impl Body {
    pub fn named(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        color: Color,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            mass,
            radius,
            position,
            velocity,
            color,
            name: Some(name.into()),
            origin: Origin::Named,
        }
    }

    pub fn generated(
        mass: f64,
        radius: f64,
        color: Color,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> Self {
        Self {
            mass,
            radius,
            position,
            velocity,
            color,
            name: None,
            origin: Origin::Generated,
        }
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        self.origin == Origin::Named
    }
}

/// The body collection together with the per-body acceleration scratch space.
///
/// The number of bodies is fixed once the store is built.
#[derive(Clone, Debug, Default)]
pub struct Bodies {
    pub(crate) bodies: Vec<Body>,
    pub(crate) accelerations: Vec<Vector3<f64>>,
}

impl Bodies {
    /// Reserve room for exactly `capacity` bodies, reporting allocation failure
    /// instead of aborting.
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut bodies = Vec::new();
        bodies.try_reserve_exact(capacity)?;
        let mut accelerations = Vec::new();
        accelerations.try_reserve_exact(capacity)?;

        Ok(Self {
            bodies,
            accelerations,
        })
    }

    pub(crate) fn push(&mut self, body: Body) {
        self.bodies.push(body);
        self.accelerations.push(Vector3::zeros());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Accelerations computed by the most recent step.
    #[must_use]
    pub fn accelerations(&self) -> &[Vector3<f64>] {
        &self.accelerations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn named(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.origin == Origin::Named)
    }

    pub fn generated(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.origin == Origin::Generated)
    }

    /// Find a named body.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name.as_deref() == Some(name))
    }

    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Mass of the heaviest named body, the one asteroids are set to orbit.
    #[must_use]
    pub fn central_mass(&self) -> Option<f64> {
        self.named().map(|b| b.mass).reduce(f64::max)
    }

    /// Drop every body and give the memory back.
    pub(crate) fn release(&mut self) {
        self.bodies = Vec::new();
        self.accelerations = Vec::new();
    }

    pub(crate) fn split_mut(&mut self) -> (&mut [Body], &mut [Vector3<f64>]) {
        (&mut self.bodies, &mut self.accelerations)
    }
}

impl FromIterator<Body> for Bodies {
    fn from_iter<T: IntoIterator<Item = Body>>(iter: T) -> Self {
        let bodies: Vec<Body> = iter.into_iter().collect();
        let accelerations = vec![Vector3::zeros(); bodies.len()];
        Self {
            bodies,
            accelerations,
        }
    }
}

impl<'a> IntoIterator for &'a Bodies {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Bodies {
        [
            Body::named("Sun", 2e30, 7e8, Color::GOLD, Vector3::zeros(), Vector3::zeros()),
            Body::generated(1e12, 2e3, Color::GRAY, Vector3::new(1., 0., 0.), Vector3::zeros()),
            Body::named(
                "Earth",
                6e24,
                6e6,
                Color::BLUE,
                Vector3::new(2., 0., 0.),
                Vector3::zeros(),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn origin_tags() {
        let bodies = store();

        assert_eq!(bodies.named().count(), 2);
        assert_eq!(bodies.generated().count(), 1);
        assert!(bodies.get("Earth").is_some_and(Body::is_named));
        assert!(bodies.get("Asteroid").is_none());
    }

    #[test]
    fn central_mass() {
        let bodies = store();
        assert_eq!(bodies.central_mass(), Some(2e30));

        let asteroids: Bodies = [Body::generated(
            1e12,
            2e3,
            Color::GRAY,
            Vector3::zeros(),
            Vector3::zeros(),
        )]
        .into_iter()
        .collect();
        assert_eq!(asteroids.central_mass(), None);
    }

    #[test]
    fn scratch_matches_bodies() {
        let mut bodies = Bodies::with_capacity(2).unwrap();
        bodies.push(Body::generated(1., 1., Color::GRAY, Vector3::zeros(), Vector3::zeros()));

        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies.accelerations().len(), 1);

        bodies.release();
        assert!(bodies.is_empty());
        assert!(bodies.accelerations().is_empty());
    }
}
