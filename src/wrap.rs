use crate::{
    error::Result,
    float::Policy,
    parameter::{Distribution, Parameter},
    random::Random,
    strategy::Strategy,
};

/// A float policy that resolves a sub-strategy's template into its final value
/// in one step, so that the value itself becomes the template.
///
/// Simplification and encoding then apply to the value rather than to the
/// sub-strategy's template.
#[derive(Debug, Clone)]
pub struct Wrap<S>(S);

impl<S: Strategy<Value = f64>> Wrap<S> {
    pub const fn new(strategy: S) -> Self {
        Self(strategy)
    }

    pub const fn inner(&self) -> &S {
        &self.0
    }
}

impl<S: Strategy<Value = f64>> Policy for Wrap<S> {
    fn parameter(&self) -> &Distribution {
        self.0.parameter()
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let template = self.0.produce_template(random, parameter)?;
        Ok(self.0.reify(&template))
    }
}
