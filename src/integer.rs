use crate::{
    basic::Basic,
    error::{Error, Result},
    parameter::{Distribution, Parameter},
    random::Random,
    strategy::{Simplify, Strategy},
    DRAWS, SMALL,
};
use core::iter;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct Integers {
    parameter: Distribution,
}

/// Integers in `[start, end]`.
#[derive(Clone, Debug)]
pub struct Range {
    start: i64,
    end: i64,
    parameter: Distribution,
}

#[derive(Clone, Debug)]
pub struct Shrinker {
    magnitude: i64,
    negative: bool,
    stage: Stage,
}

#[derive(Clone, Debug)]
enum Stage {
    Negate,
    Zero,
    Half,
    Countdown(i64),
    Sample {
        random: Random,
        remaining: usize,
        seen: HashSet<i64>,
    },
    Done,
}

/// Returns the simplification sequence of `value`.
///
/// - `0` has no simpler value.
/// - A negative value first yields its absolute value, then the negation of
///   every candidate of its absolute value.
/// - A positive value yields `0`, then `value / 2`, then either every integer
///   from `value - 1` down to `1` (when `value <= 100`) or up to `100` distinct
///   integers of `[0, value)` drawn from a generator seeded with `value`.
///
/// The sequence is finite and never contains `value` itself.
pub fn simplify(value: i64) -> Shrinker {
    let (magnitude, negative, stage) = match value {
        0 => (0, false, Stage::Done),
        1.. => (value, false, Stage::Zero),
        // `i64::MIN` has no positive counterpart; `-i64::MAX` stands in for it.
        _ => (value.checked_neg().unwrap_or(i64::MAX), true, Stage::Negate),
    };
    Shrinker {
        magnitude,
        negative,
        stage,
    }
}

impl Shrinker {
    #[inline]
    const fn emit(&self, value: i64) -> i64 {
        if self.negative {
            -value
        } else {
            value
        }
    }
}

impl Iterator for Shrinker {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let magnitude = self.magnitude;
        let half = magnitude / 2;
        loop {
            match &mut self.stage {
                Stage::Negate => {
                    self.stage = Stage::Zero;
                    return Some(magnitude);
                }
                Stage::Zero => {
                    self.stage = if magnitude == 1 {
                        Stage::Done
                    } else {
                        Stage::Half
                    };
                    return Some(0);
                }
                Stage::Half => {
                    self.stage = if magnitude == 2 {
                        Stage::Done
                    } else if magnitude <= SMALL {
                        Stage::Countdown(magnitude - 1)
                    } else {
                        Stage::Sample {
                            random: Random::with_seed(magnitude.unsigned_abs()),
                            remaining: DRAWS,
                            seen: HashSet::from([0, half]),
                        }
                    };
                    return Some(self.emit(half));
                }
                Stage::Countdown(0) => self.stage = Stage::Done,
                Stage::Countdown(current) => {
                    let value = *current;
                    *current -= 1;
                    if value != half {
                        return Some(self.emit(value));
                    }
                }
                Stage::Sample {
                    random,
                    remaining,
                    seen,
                } => {
                    let Some(left) = remaining.checked_sub(1) else {
                        self.stage = Stage::Done;
                        continue;
                    };
                    *remaining = left;
                    let value = random.i64(0..magnitude);
                    if seen.insert(value) {
                        return Some(self.emit(value));
                    }
                }
                Stage::Done => return None,
            }
        }
    }
}

impl Integers {
    pub fn new() -> Self {
        Self {
            parameter: Distribution::composite([
                ("negative_probability", Distribution::beta(0.5, 0.5)),
                ("p", Distribution::beta(0.2, 1.8)),
            ]),
        }
    }
}

impl Default for Integers {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Integers {
    type Template = i64;
    type Value = i64;

    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<i64> {
        let value = random.geometric(parameter.float("p")?);
        if random.coin(parameter.float("negative_probability")?) {
            Ok(-value)
        } else {
            Ok(value)
        }
    }

    fn reify(&self, template: &i64) -> i64 {
        *template
    }

    fn simplify(&self, template: &i64) -> Simplify<i64> {
        Simplify::new(simplify(*template))
    }

    fn to_basic(&self, template: &i64) -> Basic {
        Basic::from(*template)
    }

    fn from_basic(&self, basic: &Basic) -> Result<i64> {
        basic.integer()
    }
}

impl Range {
    /// Fails with [`Error::InvalidRange`] when `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_range(start, end));
        }
        let count = end.abs_diff(start) as f64 + 1.0;
        Ok(Self {
            start,
            end,
            parameter: Distribution::non_empty_subset(start, end, f64::min(0.5, 3.0 / count)),
        })
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn end(&self) -> i64 {
        self.end
    }
}

impl Strategy for Range {
    type Template = i64;
    type Value = i64;

    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<i64> {
        if self.start == self.end {
            return Ok(self.start);
        }
        let subset = parameter
            .as_subset()
            .ok_or_else(|| Error::parameter("subset"))?;
        random
            .choose(subset)
            .copied()
            .ok_or_else(|| Error::parameter("subset"))
    }

    fn reify(&self, template: &i64) -> i64 {
        *template
    }

    fn simplify(&self, template: &i64) -> Simplify<i64> {
        let (start, end, value) = (self.start, self.end, *template);
        if value == start || !self.contains(template) {
            return Simplify::empty();
        }

        let down = (start..value).rev();
        let middle = (i128::from(start) + i128::from(end)).div_euclid(2);
        if i128::from(value) > middle {
            // Lies in `[start, end]` because `start <= value <= end`.
            let reflection = (i128::from(start) + i128::from(end) - i128::from(value)) as i64;
            Simplify::new(
                down.chain(iter::once(reflection))
                    .chain((value..=end).skip(1)),
            )
        } else {
            Simplify::new(down)
        }
    }

    fn to_basic(&self, template: &i64) -> Basic {
        Basic::from(*template)
    }

    fn from_basic(&self, basic: &Basic) -> Result<i64> {
        let value = basic.integer()?;
        if self.contains(&value) {
            Ok(value)
        } else {
            Err(Error::bad_data(format!(
                "{value} lies outside [{}, {}]",
                self.start, self.end
            )))
        }
    }

    fn contains(&self, template: &i64) -> bool {
        (self.start..=self.end).contains(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(value: i64) -> Vec<i64> {
        simplify(value).collect()
    }

    #[test]
    fn zero_is_simplest() {
        assert!(collect(0).is_empty());
    }

    #[test]
    fn small_values_enumerate_everything_below() {
        assert_eq!(collect(1), [0]);
        assert_eq!(collect(2), [0, 1]);
        assert_eq!(collect(3), [0, 1, 2]);
        let mut expected = vec![0, 50];
        expected.extend((1..100).rev().filter(|&value| value != 50));
        assert_eq!(collect(100), expected);
    }

    #[test]
    fn negative_values_try_their_absolute_value_first() {
        assert_eq!(collect(-1), [1, 0]);
        assert_eq!(collect(-5), [5, 0, -2, -4, -3, -1]);
    }

    #[test]
    fn large_values_draw_a_bounded_reproducible_sample() {
        let first = collect(1_000_000);
        assert_eq!(&first[..2], &[0, 500_000]);
        assert!(first.len() <= 2 + DRAWS);
        assert!(first[2..].iter().all(|&value| (0..1_000_000).contains(&value)));
        let unique = first.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), first.len());
        assert_eq!(first, collect(1_000_000));
    }

    #[test]
    fn extremes_do_not_overflow() {
        assert_eq!(collect(i64::MIN)[0], i64::MAX);
        assert!(collect(i64::MAX).iter().all(|&value| value < i64::MAX));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert_eq!(Range::new(6, 5).unwrap_err(), Error::invalid_range(6, 5));
    }

    #[test]
    fn range_simplify_pulls_toward_start_then_reflects() {
        let range = Range::new(0, 10).unwrap();
        assert_eq!(
            range.simplify(&8).collect::<Vec<_>>(),
            [7, 6, 5, 4, 3, 2, 1, 0, 2, 9, 10]
        );
        assert_eq!(
            range.simplify(&3).collect::<Vec<_>>(),
            [2, 1, 0]
        );
        assert!(range.simplify(&0).next().is_none());
    }

    #[test]
    fn range_simplify_handles_the_whole_line() {
        let range = Range::new(i64::MIN, i64::MAX).unwrap();
        let candidates = range.simplify(&i64::MAX).take(3).collect::<Vec<_>>();
        assert_eq!(candidates, [i64::MAX - 1, i64::MAX - 2, i64::MAX - 3]);
    }
}
