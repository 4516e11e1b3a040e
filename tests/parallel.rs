#![cfg(feature = "parallel")]

pub mod common;
use common::*;
use specimen::{integer::Range, sample::Sampler};

#[test]
fn parallel_samples_do_not_depend_on_scheduling() {
    let mut sampler = Sampler::new(Range::new(-1_000, 1_000).unwrap(), 17);
    sampler.count = COUNT;
    let left = sampler.par_samples();
    let right = sampler.par_samples();
    assert_eq!(left.len(), COUNT);
    assert_eq!(left, right);
    assert!(left.iter().all(|value| (-1_000..=1_000).contains(value)));
}

#[test]
fn parallel_samples_match_seeded_samples() {
    let strategy = Range::new(0, 100).unwrap();
    let sampler = Sampler::new(&strategy, 3);
    let samples = sampler.par_samples();
    for (index, value) in samples.into_iter().enumerate() {
        assert_eq!(strategy.sample(3 + index as u64), Some(value));
    }
}
