use crate::{
    basic::Basic,
    error::Result,
    parameter::{Distribution, Parameter},
    random::Random,
    strategy::{Simplify, Strategy},
};

/// Generates through an inner strategy and packs its values with `pack`.
///
/// The template stays the inner template: simplification and encoding happen
/// on the inner representation, and `pack` only runs in [`Strategy::reify`].
#[derive(Debug, Clone)]
pub struct Mapped<S: ?Sized, F> {
    pack: F,
    strategy: S,
}

impl<S: Strategy, T, F: Fn(S::Value) -> T> Mapped<S, F> {
    pub const fn new(strategy: S, pack: F) -> Self {
        Self { strategy, pack }
    }

    pub const fn inner(&self) -> &S {
        &self.strategy
    }
}

impl<S: Strategy + ?Sized, T, F: Fn(S::Value) -> T + Send + Sync> Strategy for Mapped<S, F> {
    type Template = S::Template;
    type Value = T;

    fn parameter(&self) -> &Distribution {
        self.strategy.parameter()
    }

    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<S::Template> {
        self.strategy.produce_template(random, parameter)
    }

    fn reify(&self, template: &S::Template) -> T {
        (self.pack)(self.strategy.reify(template))
    }

    fn simplify(&self, template: &S::Template) -> Simplify<S::Template> {
        self.strategy.simplify(template)
    }

    fn to_basic(&self, template: &S::Template) -> Basic {
        self.strategy.to_basic(template)
    }

    fn from_basic(&self, basic: &Basic) -> Result<S::Template> {
        self.strategy.from_basic(basic)
    }

    fn contains(&self, template: &S::Template) -> bool {
        self.strategy.contains(template)
    }
}
