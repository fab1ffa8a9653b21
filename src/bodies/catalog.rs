//! Static reference data for the named bodies.
//!
//! Planet states are heliocentric circular orbits at the mean orbital distance,
//! laid out in the x-z plane (y is "up"). The Sun carries the velocity that
//! cancels the planets' total momentum, so the barycenter stays at rest.

use nalgebra::Vector3;

use super::{Body, Color};

/// One entry of a reference catalog.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    pub name: &'static str,
    /// [kg]
    pub mass: f64,
    /// [m]
    pub radius: f64,
    pub color: Color,
    /// [m]
    pub position: [f64; 3],
    /// [m/s]
    pub velocity: [f64; 3],
}

impl CatalogEntry {
    #[must_use]
    pub fn to_body(&self) -> Body {
        Body::named(
            self.name,
            self.mass,
            self.radius,
            self.color,
            Vector3::from(self.position),
            Vector3::from(self.velocity),
        )
    }
}

/// Index of Jupiter in [`SOLAR_SYSTEM`].
pub const JUPITER: usize = 5;

pub const SOLAR_SYSTEM: [CatalogEntry; 9] = [
    CatalogEntry {
        name: "Sun",
        mass: 1.98847e30,
        radius: 6.957e8,
        color: Color::GOLD,
        position: [0., 0., 0.],
        velocity: [4.69795, 0., -9.849109],
    },
    CatalogEntry {
        name: "Mercury",
        mass: 3.3011e23,
        radius: 2.4397e6,
        color: Color::GRAY,
        position: [5.081993e10, 0., 2.776305e10],
        velocity: [-2.295147e4, 0., 4.201238e4],
    },
    CatalogEntry {
        name: "Venus",
        mass: 4.8675e24,
        radius: 6.0518e6,
        color: Color::BEIGE,
        position: [-5.462889e10, 0., 9.340702e10],
        velocity: [-3.02306e4, 0., -1.76803e4],
    },
    CatalogEntry {
        name: "Earth",
        mass: 5.9724e24,
        radius: 6.371e6,
        color: Color::BLUE,
        position: [-2.666525e10, 0., 1.472023e11],
        velocity: [-2.930815e4, 0., -5.309082e3],
    },
    CatalogEntry {
        name: "Mars",
        mass: 6.4171e23,
        radius: 3.3895e6,
        color: Color::RED,
        position: [1.446713e11, 0., -1.761432e11],
        velocity: [1.864662e4, 0., 1.531499e4],
    },
    CatalogEntry {
        name: "Jupiter",
        mass: 1.89819e27,
        radius: 6.9911e7,
        color: Color::BEIGE,
        position: [6.425064e11, 0., 4.395623e11],
        velocity: [-7.372461e3, 0., 1.07763e4],
    },
    CatalogEntry {
        name: "Saturn",
        mass: 5.6834e26,
        radius: 5.8232e7,
        color: Color::BROWN,
        position: [-4.401133e11, 0., -1.362733e12],
        velocity: [9.16094e3, 0., -2.958651e3],
    },
    CatalogEntry {
        name: "Uranus",
        mass: 8.681e25,
        radius: 2.5362e7,
        color: Color::SKYBLUE,
        position: [1.8922e12, 0., 2.153953e12],
        velocity: [-5.111488e3, 0., 4.490329e3],
    },
    CatalogEntry {
        name: "Neptune",
        mass: 1.02413e26,
        radius: 2.4622e7,
        color: Color::DARKBLUE,
        position: [4.187522e12, 0., -1.688036e12],
        velocity: [2.027048e3, 0., 5.028513e3],
    },
];

/// Alpha Centauri A and B as a circular binary, Proxima on a wide orbit
/// around the pair, the whole system approaching the Sun at 22.4 km/s.
pub const ALPHA_CENTAURI: [CatalogEntry; 3] = [
    CatalogEntry {
        name: "Alpha Centauri A",
        mass: 2.1886e30,
        radius: 8.51e8,
        color: Color::YELLOW,
        position: [-4.13184184e16, 0., 0.],
        velocity: [2.24e4, 0., 3.943e3],
    },
    CatalogEntry {
        name: "Alpha Centauri B",
        mass: 1.8042e30,
        radius: 5.99e8,
        color: Color::ORANGE,
        position: [-4.13219184e16, 0., 0.],
        velocity: [2.24e4, 0., -4.783e3],
    },
    CatalogEntry {
        name: "Proxima Centauri",
        mass: 2.428e29,
        radius: 1.07e8,
        color: Color::MAROON,
        position: [-4.132e16, 0., 1.94e15],
        velocity: [2.2029e4, 0., 0.],
    },
];

/// An intermediate-mass black hole of 100 solar masses passing through the system.
pub const BLACK_HOLE: CatalogEntry = CatalogEntry {
    name: "Black Hole",
    mass: 1.98847e32,
    radius: 2e20,
    color: Color::DARKPURPLE,
    position: [4.431790029686977e12, -8.954348456482631e10, 0.],
    velocity: [
        -9.431790029686977e4,
        8.954348456482631e1,
        6.114486878028781e1,
    ],
};
