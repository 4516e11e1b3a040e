use crate::{
    basic::Basic,
    error::Result,
    parameter::{Distribution, Parameter},
    random::Random,
    strategy::{Simplify, Strategy},
};

/// Two independent strategies combined into a tuple.
#[derive(Debug, Clone)]
pub struct Pair<A, B> {
    first: A,
    second: B,
    parameter: Distribution,
}

impl<A: Strategy, B: Strategy> Pair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        let parameter = Distribution::composite([
            ("first", first.parameter().clone()),
            ("second", second.parameter().clone()),
        ]);
        Self {
            first,
            second,
            parameter,
        }
    }
}

impl<A: Strategy, B: Strategy> Strategy for Pair<A, B> {
    type Template = (A::Template, B::Template);
    type Value = (A::Value, B::Value);

    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<Self::Template> {
        let first = self
            .first
            .produce_template(random, parameter.field("first")?)?;
        let second = self
            .second
            .produce_template(random, parameter.field("second")?)?;
        Ok((first, second))
    }

    fn reify(&self, (first, second): &Self::Template) -> Self::Value {
        (self.first.reify(first), self.second.reify(second))
    }

    /// Simplifies the first component while the second stays fixed, then the
    /// second while the first stays fixed.
    fn simplify(&self, (first, second): &Self::Template) -> Simplify<Self::Template> {
        let lefts = {
            let second = second.clone();
            self.first
                .simplify(first)
                .map(move |first| (first, second.clone()))
        };
        let rights = {
            let first = first.clone();
            self.second
                .simplify(second)
                .map(move |second| (first.clone(), second))
        };
        Simplify::new(lefts.chain(rights))
    }

    fn to_basic(&self, (first, second): &Self::Template) -> Basic {
        Basic::from([self.first.to_basic(first), self.second.to_basic(second)])
    }

    fn from_basic(&self, basic: &Basic) -> Result<Self::Template> {
        let [first, second] = basic.sequence::<2>()?;
        Ok((self.first.from_basic(first)?, self.second.from_basic(second)?))
    }

    fn contains(&self, (first, second): &Self::Template) -> bool {
        self.first.contains(first) && self.second.contains(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        float::{Float, Interval},
        integer::Range,
    };

    #[test]
    fn simplifies_one_side_at_a_time() {
        let pair = Pair::new(Range::new(0, 10).unwrap(), Range::new(0, 10).unwrap());
        assert_eq!(
            pair.simplify(&(2, 1)).collect::<Vec<_>>(),
            [(1, 1), (0, 1), (2, 0)]
        );
    }

    #[test]
    fn basic_is_a_two_item_sequence() {
        let pair = Pair::new(
            Range::new(-5, 5).unwrap(),
            Float::new(Interval::new(0.0, 1.0).unwrap()),
        );
        let basic = pair.to_basic(&(-3, 0.5));
        assert_eq!(
            basic,
            Basic::from([Basic::from(-3i64), Basic::from(0.5f64.to_bits())])
        );
        assert_eq!(pair.from_basic(&basic), Ok((-3, 0.5)));
        assert!(pair.from_basic(&Basic::from(1i64)).unwrap_err().is_bad_data());
        assert!(pair
            .from_basic(&Basic::from([Basic::from(9i64), Basic::from(0u64)]))
            .unwrap_err()
            .is_bad_data());
    }

    #[test]
    fn produces_both_sides_in_range() {
        let pair = Pair::new(Range::new(3, 4).unwrap(), Range::new(-2, -1).unwrap());
        let mut random = Random::with_seed(12);
        for _ in 0..100 {
            let parameter = pair.draw(&mut random);
            let template = pair.produce_template(&mut random, &parameter).unwrap();
            assert!(pair.contains(&template));
        }
    }
}
