//! Force-evaluation strategy selection for the step function.

/// Available step algorithms. All four compute the same rule; they trade
/// asymptotic cost against per-body overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Every pair, serial. O(n²) but exact.
    BruteForce,
    /// Every pair, bodies fanned out over rayon.
    BruteForceParallel,
    /// Barnes-Hut quadtree, serial. O(n log n) for sparse generations.
    #[default]
    BarnesHut,
    /// Barnes-Hut with parallel per-body traversal.
    BarnesHutParallel,
}

impl Algorithm {
    pub const fn all() -> [Algorithm; 4] {
        [
            Algorithm::BruteForce,
            Algorithm::BruteForceParallel,
            Algorithm::BarnesHut,
            Algorithm::BarnesHutParallel,
        ]
    }

    /// Display name for the HUD.
    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute",
            Algorithm::BruteForceParallel => "Brute+Par",
            Algorithm::BarnesHut => "BarnesHut",
            Algorithm::BarnesHutParallel => "BarnesHut+Par",
        }
    }

    /// Cycle to the next algorithm (bound to a HUD key).
    pub const fn next(&self) -> Algorithm {
        match self {
            Algorithm::BruteForce => Algorithm::BruteForceParallel,
            Algorithm::BruteForceParallel => Algorithm::BarnesHut,
            Algorithm::BarnesHut => Algorithm::BarnesHutParallel,
            Algorithm::BarnesHutParallel => Algorithm::BruteForce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_visits_every_algorithm() {
        let mut algo = Algorithm::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(algo);
            algo = algo.next();
        }
        assert_eq!(algo, Algorithm::default());
        for expected in Algorithm::all() {
            assert!(seen.contains(&expected));
        }
    }
}
