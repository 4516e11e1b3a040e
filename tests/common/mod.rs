#![allow(dead_code)]

pub use specimen::*;

pub const COUNT: usize = 1000;

/// Produces `count` templates, drawing a new parameter for every template so
/// that many runs are covered.
pub fn templates<S: Strategy + ?Sized>(strategy: &S, seed: u64, count: usize) -> Vec<S::Template> {
    let mut random = Random::with_seed(seed);
    (0..count)
        .map(|_| {
            let parameter = strategy.draw(&mut random);
            strategy.produce_template(&mut random, &parameter).unwrap()
        })
        .collect()
}

/// Follows the first simplification of `template` until there is none, and
/// returns the number of steps taken, or `None` if `limit` steps did not
/// suffice.
pub fn descend<S: Strategy + ?Sized>(strategy: &S, template: S::Template, limit: usize) -> Option<usize> {
    let mut current = template;
    for steps in 0..limit {
        match strategy.simplify(&current).next() {
            Some(next) => current = next,
            None => return Some(steps),
        }
    }
    None
}

pub fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
