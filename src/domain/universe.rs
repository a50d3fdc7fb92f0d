//! The generation buffer and the step function.
//!
//! A `Universe` is one immutable generation of planets. `advance` builds
//! the next generation without touching the current one, so the renderer
//! can keep reading a generation while controls queue the next step.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use super::quadtree::{Influence, QuadTree};
use super::{Algorithm, Planet, Point, Rect};

/// Gravitational constant, pre-scaled so on-screen pixel masses produce
/// visible motion (the physical constant would need ~10^14 scaling).
const GRAVITY: f64 = 0.05;

/// Softening term (px²) added to squared distance so close encounters and
/// coincident positions never divide by zero.
const SOFTENING: f64 = 4.0;

/// A force above this between touching planets collapses them into one.
const EATING_FORCE: f64 = 400.0;

/// Planet count for a freshly seeded universe.
pub const DEFAULT_PLANET_COUNT: usize = 100;

/// Per-planet result of one force pass: net acceleration plus the indices
/// of lighter neighbors this planet pulls in.
#[derive(Clone, Debug, Default)]
struct StepOutcome {
    accel: Point,
    eats: Vec<usize>,
}

/// One generation of the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    bounds: Rect,
    planets: Vec<Planet>,
}

impl Universe {
    pub const fn empty(bounds: Rect) -> Self {
        Self {
            bounds,
            planets: Vec::new(),
        }
    }

    pub fn from_planets(bounds: Rect, planets: Vec<Planet>) -> Self {
        Self { bounds, planets }
    }

    /// Generation 0: a pinned star at the center plus `count` random
    /// planets. Every random draw comes from one seeded generator, so the
    /// same seed always reproduces the same universe.
    pub fn seeded(seed: u64, bounds: Rect, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut planets = Vec::with_capacity(count + 1);
        planets.push(Planet::star(bounds.center()));
        for _ in 0..count {
            planets.push(Planet::from_rng(&mut rng, &bounds));
        }
        Self { bounds, planets }
    }

    pub const fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// True when no step has produced a NaN or infinite coordinate.
    pub fn is_finite(&self) -> bool {
        self.planets
            .iter()
            .all(|p| p.pos.is_finite() && p.velocity.is_finite())
    }

    /// A new generation with one extra planet at the given position. The
    /// newcomer's drift is derived from the click position itself, so
    /// identical clicks reproduce identical planets.
    pub fn with_spawned(&self, x: f64, y: f64) -> Self {
        let seed = x.to_bits() ^ y.to_bits().rotate_left(32);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut spawned = Planet::from_rng(&mut rng, &self.bounds);
        spawned.pos = self.bounds.wrap(Point::new(x, y));

        let mut planets = self.planets.clone();
        planets.push(spawned);
        Self {
            bounds: self.bounds,
            planets,
        }
    }

    /// Build the next generation. Total for any well-formed input: an
    /// empty generation advances to an empty generation, and no planet is
    /// ever spontaneously created.
    ///
    /// Deterministic per algorithm: the parallel variants fan bodies out
    /// over rayon but keep each body's accumulation order sequential, so
    /// they are bit-identical to their serial counterparts.
    pub fn advance(&self, algorithm: Algorithm, dt: f64) -> Self {
        if self.planets.is_empty() {
            return Self::empty(self.bounds);
        }

        let n = self.planets.len();
        let outcomes: Vec<StepOutcome> = match algorithm {
            Algorithm::BruteForce => (0..n).map(|i| self.outcome_brute(i)).collect(),
            Algorithm::BruteForceParallel => (0..n)
                .into_par_iter()
                .map(|i| self.outcome_brute(i))
                .collect(),
            Algorithm::BarnesHut => {
                let tree = QuadTree::build(&self.planets, self.bounds);
                (0..n).map(|i| self.outcome_tree(&tree, i)).collect()
            }
            Algorithm::BarnesHutParallel => {
                let tree = QuadTree::build(&self.planets, self.bounds);
                (0..n)
                    .into_par_iter()
                    .map(|i| self.outcome_tree(&tree, i))
                    .collect()
            }
        };

        self.resolve(outcomes, dt)
    }

    /// Pairwise force pass for one planet.
    fn outcome_brute(&self, i: usize) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        for (j, other) in self.planets.iter().enumerate() {
            if j != i {
                self.accumulate(i, other.pos, other.mass, Some(j), &mut outcome);
            }
        }
        outcome
    }

    /// Tree force pass for one planet: individual bodies up close,
    /// aggregated clusters far away.
    fn outcome_tree(&self, tree: &QuadTree, i: usize) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        tree.for_each_influence(i, self.planets[i].pos, |influence| match influence {
            Influence::Body { index, pos, mass } => {
                self.accumulate(i, pos, mass, Some(index), &mut outcome);
            }
            Influence::Cluster { com, mass } => {
                self.accumulate(i, com, mass, None, &mut outcome);
            }
        });
        outcome
    }

    /// The rule itself: Newtonian attraction with softening. A touching
    /// neighbor under high force becomes an absorption candidate instead
    /// of contributing acceleration. Clusters (`source = None`) only pull.
    fn accumulate(
        &self,
        i: usize,
        source_pos: Point,
        source_mass: f64,
        source: Option<usize>,
        outcome: &mut StepOutcome,
    ) {
        let planet = &self.planets[i];
        let direction = source_pos - planet.pos;
        let d = direction.mag();
        let force = GRAVITY * planet.mass * source_mass / (d * d + SOFTENING);

        if let Some(j) = source {
            if d <= planet.radius && force > EATING_FORCE {
                outcome.eats.push(j);
                return;
            }
        }

        outcome.accel += direction.norm() * (force / planet.mass);
    }

    /// Fold the force pass into the next generation: merges resolve in
    /// planet-index order (deterministic regardless of force-pass
    /// parallelism), then survivors integrate and wrap.
    fn resolve(&self, outcomes: Vec<StepOutcome>, dt: f64) -> Self {
        let mut merged: Vec<Option<Planet>> = self.planets.iter().copied().map(Some).collect();

        for i in 0..merged.len() {
            let Some(mut eater) = merged[i] else { continue };
            for &j in &outcomes[i].eats {
                if let Some(prey) = merged[j].take() {
                    eater = eater.absorbing(prey);
                }
            }
            merged[i] = Some(eater);
        }

        let planets = merged
            .into_iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| p.stepped(outcomes[i].accel, dt, &self.bounds)))
            .collect();

        Self {
            bounds: self.bounds,
            planets,
        }
    }
}
