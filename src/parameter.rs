use crate::{
    error::{Error, Result},
    random::Random,
};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    /// Uniform float in `[low, high)`.
    UniformFloat { low: f64, high: f64 },
    /// Uniform integer in `[low, high]`.
    UniformInteger { low: i64, high: i64 },
    Normal { mean: f64, deviation: f64 },
    Beta { alpha: f64, beta: f64 },
    Gamma { shape: f64, scale: f64 },
    Exponential { rate: f64 },
    BiasedCoin { probability: f64 },
    /// Every integer of `[start, end]` is activated independently with
    /// probability `activation`; at least one element is always active.
    NonEmptySubset { start: i64, end: i64, activation: f64 },
    Composite(Vec<(&'static str, Distribution)>),
    Sequence(Vec<Distribution>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Parameter {
    Float(f64),
    Integer(i64),
    Coin(bool),
    Subset(Arc<[i64]>),
    Composite(Vec<(&'static str, Parameter)>),
    Sequence(Vec<Parameter>),
}

impl Distribution {
    pub const fn uniform_float(low: f64, high: f64) -> Self {
        Self::UniformFloat { low, high }
    }

    pub const fn uniform_integer(low: i64, high: i64) -> Self {
        Self::UniformInteger { low, high }
    }

    pub const fn normal(mean: f64, deviation: f64) -> Self {
        Self::Normal { mean, deviation }
    }

    pub const fn beta(alpha: f64, beta: f64) -> Self {
        Self::Beta { alpha, beta }
    }

    pub const fn gamma(shape: f64, scale: f64) -> Self {
        Self::Gamma { shape, scale }
    }

    pub const fn exponential(rate: f64) -> Self {
        Self::Exponential { rate }
    }

    pub const fn biased_coin(probability: f64) -> Self {
        Self::BiasedCoin { probability }
    }

    pub const fn non_empty_subset(start: i64, end: i64, activation: f64) -> Self {
        Self::NonEmptySubset {
            start,
            end,
            activation,
        }
    }

    pub fn composite<I: IntoIterator<Item = (&'static str, Distribution)>>(fields: I) -> Self {
        Self::Composite(fields.into_iter().collect())
    }

    pub fn sequence<I: IntoIterator<Item = Distribution>>(items: I) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Samples a concrete parameter. Only `random` is consumed.
    pub fn draw(&self, random: &mut Random) -> Parameter {
        match *self {
            Self::UniformFloat { low, high } => Parameter::Float(random.uniform(low, high)),
            Self::UniformInteger { low, high } => {
                Parameter::Integer(random.i64(low.min(high)..=high.max(low)))
            }
            Self::Normal { mean, deviation } => Parameter::Float(random.normal(mean, deviation)),
            Self::Beta { alpha, beta } => Parameter::Float(random.beta(alpha, beta)),
            Self::Gamma { shape, scale } => Parameter::Float(random.gamma(shape, scale)),
            Self::Exponential { rate } => Parameter::Float(random.exponential(rate)),
            Self::BiasedCoin { probability } => Parameter::Coin(random.coin(probability)),
            Self::NonEmptySubset {
                start,
                end,
                activation,
            } => Parameter::Subset(subset(random, start, end, activation).into()),
            Self::Composite(ref fields) => Parameter::Composite(
                fields
                    .iter()
                    .map(|(name, field)| (*name, field.draw(random)))
                    .collect(),
            ),
            Self::Sequence(ref items) => {
                Parameter::Sequence(items.iter().map(|item| item.draw(random)).collect())
            }
        }
    }
}

/// Activates each element of `[start, end]` with probability `activation` by
/// skipping geometrically distributed gaps, which is equivalent to flipping a
/// coin per element without ever enumerating the range.
fn subset(random: &mut Random, start: i64, end: i64, activation: f64) -> Vec<i64> {
    let (start, end) = (start.min(end), start.max(end));
    let span = end.abs_diff(start);
    let mut active = Vec::new();
    let mut offset = 0u64;
    loop {
        let gap = u64::try_from(random.geometric(activation)).unwrap_or(0);
        offset = match offset.checked_add(gap) {
            Some(offset) if offset <= span => offset,
            _ => break,
        };
        active.push(start.wrapping_add_unsigned(offset));
        offset = match offset.checked_add(1) {
            Some(offset) if offset <= span => offset,
            _ => break,
        };
    }
    if active.is_empty() {
        active.push(start.wrapping_add_unsigned(random.u64(0..=span)));
    }
    active
}

impl Parameter {
    pub fn field(&self, name: &'static str) -> Result<&Parameter> {
        match self {
            Self::Composite(fields) => fields
                .iter()
                .find_map(|(key, value)| (*key == name).then_some(value))
                .ok_or_else(|| Error::parameter(name)),
            _ => Err(Error::parameter(name)),
        }
    }

    pub fn at(&self, index: usize) -> Result<&Parameter> {
        match self {
            Self::Sequence(items) => items
                .get(index)
                .ok_or_else(|| Error::parameter(format!("[{index}]"))),
            _ => Err(Error::parameter(format!("[{index}]"))),
        }
    }

    pub fn float(&self, name: &'static str) -> Result<f64> {
        match self.field(name)? {
            Self::Float(value) => Ok(*value),
            _ => Err(Error::parameter(name)),
        }
    }

    pub fn integer(&self, name: &'static str) -> Result<i64> {
        match self.field(name)? {
            Self::Integer(value) => Ok(*value),
            _ => Err(Error::parameter(name)),
        }
    }

    pub fn coin(&self, name: &'static str) -> Result<bool> {
        match self.field(name)? {
            Self::Coin(value) => Ok(*value),
            _ => Err(Error::parameter(name)),
        }
    }

    pub fn subset(&self, name: &'static str) -> Result<&[i64]> {
        self.field(name)?.as_subset().ok_or_else(|| Error::parameter(name))
    }

    pub fn as_subset(&self) -> Option<&[i64]> {
        match self {
            Self::Subset(values) => Some(values),
            _ => None,
        }
    }
}
