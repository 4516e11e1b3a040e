use crate::{
    log::warn,
    parameter::Parameter,
    random::Random,
    strategy::Strategy,
    RUN, SAMPLES,
};
use core::iter;

/// Configures the sampling process.
///
/// This struct is created by the [`Sample::sampler`] method.
#[derive(Debug, Clone)]
pub struct Sampler<S> {
    /// The seed of the randomness source.
    ///
    /// Using the same seed produces the same sequence of values. It defaults
    /// to a random value.
    pub seed: u64,
    /// The number of samples to produce.
    ///
    /// Defaults to `SAMPLES`.
    pub count: usize,
    pub strategy: S,
}

/// An iterator that yields reified values from a strategy.
///
/// A fresh parameter is drawn every few samples, so that the samples cover
/// several runs of the strategy.
#[derive(Debug, Clone)]
pub struct Samples<S: Strategy> {
    strategy: S,
    random: Random,
    parameter: Option<Parameter>,
    index: usize,
    count: usize,
}

/// An extension trait, implemented for all [`Strategy`] types, that provides
/// methods for sampling values.
pub trait Sample: Strategy {
    fn sampler(self) -> Sampler<Self>
    where
        Self: Sized,
    {
        Sampler::new(self, Random::new(None).seed())
    }

    /// Creates an iterator that produces up to `count` values.
    fn samples(self, count: usize) -> Samples<Self>
    where
        Self: Sized,
    {
        let mut sampler = self.sampler();
        sampler.count = count;
        sampler.samples()
    }

    /// Produces a single value from a generator seeded with `seed`.
    fn sample(&self, seed: u64) -> Option<Self::Value> {
        sample(self, &mut Random::with_seed(seed))
    }
}

impl<S: Strategy + ?Sized> Sample for S {}

impl<S> Sampler<S> {
    pub const fn new(strategy: S, seed: u64) -> Self {
        Self {
            strategy,
            seed,
            count: SAMPLES,
        }
    }
}

impl<S: Strategy> Sampler<S> {
    pub fn samples(self) -> Samples<S> {
        Samples {
            strategy: self.strategy,
            random: Random::with_seed(self.seed),
            parameter: None,
            index: 0,
            count: self.count,
        }
    }

    /// Produces the samples on the rayon thread pool.
    ///
    /// The sample at `index` comes from its own generator seeded with
    /// `seed + index`, so the result does not depend on scheduling.
    #[cfg(feature = "parallel")]
    pub fn par_samples(&self) -> Vec<S::Value>
    where
        S::Value: Send,
    {
        use rayon::prelude::*;

        (0..self.count)
            .into_par_iter()
            .filter_map(|index| {
                let seed = self.seed.wrapping_add(index as u64);
                sample(&self.strategy, &mut Random::with_seed(seed))
            })
            .collect()
    }
}

fn sample<S: Strategy + ?Sized>(strategy: &S, random: &mut Random) -> Option<S::Value> {
    let parameter = strategy.draw(random);
    match strategy.produce_template(random, &parameter) {
        Ok(template) => Some(strategy.reify(&template)),
        Err(error) => {
            warn!("failed to produce a sample: {error}");
            None
        }
    }
}

impl<S: Strategy> Iterator for Samples<S> {
    type Item = S::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        if self.index % RUN == 0 {
            self.parameter = None;
        }
        self.index += 1;

        let parameter = self
            .parameter
            .get_or_insert_with(|| self.strategy.draw(&mut self.random));
        match self.strategy.produce_template(&mut self.random, parameter) {
            Ok(template) => Some(self.strategy.reify(&template)),
            Err(error) => {
                warn!("failed to produce a sample: {error}");
                self.index = self.count;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.index))
    }
}

impl<S: Strategy> iter::FusedIterator for Samples<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::Range;

    #[test]
    fn same_seed_same_samples() {
        let strategy = Range::new(-100, 100).unwrap();
        let left = Sampler::new(&strategy, 5).samples().collect::<Vec<_>>();
        let right = Sampler::new(&strategy, 5).samples().collect::<Vec<_>>();
        assert_eq!(left.len(), SAMPLES);
        assert_eq!(left, right);
    }

    #[test]
    fn samples_respect_the_count() {
        let strategy = Range::new(0, 1).unwrap();
        assert_eq!(strategy.samples(7).count(), 7);
        assert_eq!(Range::new(4, 4).unwrap().sample(0), Some(4));
    }
}
