use rand::Rng;
use rand::rngs::StdRng;

use super::{Point, Rect};

/// A planet is the primitive element of a generation: a point mass with a
/// visible radius. Plain value type; stepping produces new planets instead
/// of mutating old ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub pos: Point,
    pub velocity: Point,
    pub mass: f64,
    pub radius: f64,
    /// Pinned planets (the central star) ignore forces and never move.
    pub pinned: bool,
}

impl Planet {
    pub const fn new(pos: Point, velocity: Point, mass: f64, radius: f64) -> Self {
        Self {
            pos,
            velocity,
            mass,
            radius,
            pinned: false,
        }
    }

    /// The pinned star seeding the center of every fresh generation.
    pub fn star(pos: Point) -> Self {
        Self {
            pos,
            velocity: Point::ZERO,
            mass: 50_000.0,
            radius: 18.0,
            pinned: true,
        }
    }

    /// Draw a planet with random position, drift and mass from the given
    /// generator. All randomness flows through `rng` so seeded universes
    /// reproduce exactly.
    pub fn from_rng(rng: &mut StdRng, bounds: &Rect) -> Self {
        let pos = Point::new(
            rng.random_range(0.0..bounds.width()),
            rng.random_range(0.0..bounds.height()),
        );
        let velocity = Point::new(rng.random_range(-1.5..1.5), rng.random_range(-1.5..1.5));
        let mass = rng.random_range(100.0..1_500.0);
        let radius = rng.random_range(2.0..5.0);
        Self::new(pos, velocity, mass, radius)
    }

    pub fn momentum(&self) -> Point {
        self.velocity * self.mass
    }

    /// Advance one fixed timestep under the given acceleration, wrapping
    /// toroidally at the surface edges. Pinned planets hold position.
    pub fn stepped(self, accel: Point, dt: f64, bounds: &Rect) -> Self {
        if self.pinned {
            return self;
        }
        let velocity = self.velocity + accel * dt;
        let pos = bounds.wrap(self.pos + velocity * dt);
        Self { pos, velocity, ..self }
    }

    /// Merge a lighter planet into this one, conserving mass, momentum and
    /// volume. A pinned planet stays pinned and in place.
    pub fn absorbing(self, prey: Planet) -> Self {
        let mass = self.mass + prey.mass;
        let velocity = if self.pinned {
            Point::ZERO
        } else {
            (self.momentum() + prey.momentum()) / mass
        };
        let radius = (self.radius.powi(3) + prey.radius.powi(3)).cbrt();
        Self {
            mass,
            velocity,
            radius,
            ..self
        }
    }
}
