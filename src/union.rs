use crate::{
    basic::Basic,
    error::{Error, Result},
    parameter::{Distribution, Parameter},
    random::Random,
    strategy::{Boxed, Simplify, Strategy},
};
use core::fmt;

/// A branch of a [`Union`] with its relative weight.
pub struct Weight<T, V> {
    weight: f64,
    strategy: Boxed<V, T>,
}

/// A weighted choice between strategies that share a template type.
///
/// Templates are not tagged with the branch that produced them. Operations
/// that need a branch attribute the template to the first branch, in declared
/// order, that [contains](Strategy::contains) it.
pub struct Union<T, V> {
    branches: Vec<Weight<T, V>>,
    parameter: Distribution,
}

impl<T, V> Weight<T, V> {
    /// Fails with [`Error::InvalidWeight`] unless `weight` is finite and
    /// positive.
    pub fn new(weight: f64, strategy: Boxed<V, T>) -> Result<Self> {
        if weight.is_finite() && weight > 0.0 {
            Ok(Self { weight, strategy })
        } else {
            Err(Error::InvalidWeight { weight })
        }
    }

    pub fn one(strategy: Boxed<V, T>) -> Self {
        Self {
            weight: 1.0,
            strategy,
        }
    }

    pub const fn weight(&self) -> f64 {
        self.weight
    }

    pub fn strategy(&self) -> &Boxed<V, T> {
        &self.strategy
    }
}

impl<T, V> Clone for Weight<T, V> {
    fn clone(&self) -> Self {
        Self {
            weight: self.weight,
            strategy: self.strategy.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Weight<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Weight")
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static, V: 'static> Union<T, V> {
    pub fn new(first: Weight<T, V>) -> Self {
        Self::build(vec![first])
    }

    pub fn with(mut self, branch: Weight<T, V>) -> Self {
        self.branches.push(branch);
        Self::build(self.branches)
    }

    pub fn branches(&self) -> &[Weight<T, V>] {
        &self.branches
    }

    fn build(branches: Vec<Weight<T, V>>) -> Self {
        let last = branches.len() as i64 - 1;
        let parameter = Distribution::composite([
            ("enabled", Distribution::non_empty_subset(0, last, 0.5)),
            (
                "branches",
                Distribution::sequence(
                    branches
                        .iter()
                        .map(|branch| branch.strategy.parameter().clone()),
                ),
            ),
        ]);
        Self {
            branches,
            parameter,
        }
    }

    fn owner(&self, template: &T) -> &Weight<T, V> {
        self.branches
            .iter()
            .find(|branch| branch.strategy.contains(template))
            .unwrap_or(&self.branches[0])
    }

    fn choose(&self, random: &mut Random, enabled: &[i64]) -> Option<usize> {
        let enabled = enabled
            .iter()
            .filter_map(|&index| usize::try_from(index).ok())
            .filter(|&index| index < self.branches.len());
        // Relative to the heaviest weight, so that the total stays finite.
        let heaviest = enabled
            .clone()
            .map(|index| self.branches[index].weight)
            .fold(0.0, f64::max);
        let total = enabled
            .clone()
            .map(|index| self.branches[index].weight / heaviest)
            .sum::<f64>();
        let mut cursor = random.uniform(0.0, total);
        let mut last = None;
        for index in enabled {
            cursor -= self.branches[index].weight / heaviest;
            last = Some(index);
            if cursor < 0.0 {
                break;
            }
        }
        last
    }
}

impl<T: Clone + Send + 'static, V: 'static, const N: usize> From<[Weight<T, V>; N]>
    for Union<T, V>
{
    fn from(branches: [Weight<T, V>; N]) -> Self {
        const { assert!(N > 0, "a union needs at least one branch") };
        Self::build(branches.into())
    }
}

impl<T, V> Clone for Union<T, V> {
    fn clone(&self) -> Self {
        Self {
            branches: self.branches.clone(),
            parameter: self.parameter.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Union<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Union")
            .field("branches", &self.branches)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static, V: 'static> Strategy for Union<T, V> {
    type Template = T;
    type Value = V;

    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<T> {
        let index = self
            .choose(random, parameter.subset("enabled")?)
            .ok_or_else(|| Error::parameter("enabled"))?;
        let branch = parameter.field("branches")?.at(index)?;
        self.branches[index]
            .strategy
            .produce_template(random, branch)
    }

    fn reify(&self, template: &T) -> V {
        self.owner(template).strategy.reify(template)
    }

    fn simplify(&self, template: &T) -> Simplify<T> {
        for branch in &self.branches {
            if !branch.strategy.contains(template) {
                continue;
            }
            let mut candidates = branch.strategy.simplify(template).peekable();
            if candidates.peek().is_some() {
                return Simplify::new(candidates);
            }
        }
        Simplify::empty()
    }

    fn to_basic(&self, template: &T) -> Basic {
        self.owner(template).strategy.to_basic(template)
    }

    fn from_basic(&self, basic: &Basic) -> Result<T> {
        let mut error = None;
        for branch in &self.branches {
            match branch.strategy.from_basic(basic) {
                Ok(template) if branch.strategy.contains(&template) => return Ok(template),
                Ok(_) => {}
                Err(cause) => error = error.or(Some(cause)),
            }
        }
        Err(error.unwrap_or_else(|| Error::bad_data("no branch contains the decoded template")))
    }

    fn contains(&self, template: &T) -> bool {
        self.branches
            .iter()
            .any(|branch| branch.strategy.contains(template))
    }
}
