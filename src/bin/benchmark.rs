//! Performance benchmark comparing the step algorithms.

use std::time::Instant;

use liniverse::domain::{Algorithm, Rect, Universe};

fn benchmark_advance(algorithm: Algorithm, count: usize, iterations: u32) -> (f64, usize) {
    let bounds = Rect::surface(1920.0, 1080.0);
    let mut universe = Universe::seeded(42, bounds, count);

    let start = Instant::now();
    for _ in 0..iterations {
        universe = universe.advance(algorithm, 1.0);
    }
    let per_step = start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations);
    (per_step, universe.len())
}

fn main() {
    let counts = [100usize, 500, 2_000, 5_000];
    let iterations = 50;

    println!("Step time per generation (ms), {iterations} iterations each\n");
    print!("{:>8}", "bodies");
    for algorithm in Algorithm::all() {
        print!("{:>16}", algorithm.name());
    }
    println!();

    for count in counts {
        print!("{count:>8}");
        for algorithm in Algorithm::all() {
            let (ms, survivors) = benchmark_advance(algorithm, count, iterations);
            print!("{:>13.3} ms", ms);
            // Merges shrink the population; keep the result observable.
            let _ = survivors;
        }
        println!();
    }
}
