use crate::{
    basic::Basic,
    error::Result,
    map::Mapped,
    parameter::{Distribution, Parameter},
    random::Random,
    union::{Union, Weight},
};
use core::{fmt, iter};
use std::sync::Arc;

/// The generation, simplification and serialization capabilities of one value
/// shape.
///
/// A strategy is immutable once built and may be shared between threads. All
/// of its randomness comes from the [`Random`] passed in by the caller, and all
/// of its per-run bias comes from the [`Parameter`] drawn from
/// [`Strategy::parameter`].
///
/// The lifecycle of a run is:
/// 1. [`Strategy::draw`] a parameter once;
/// 2. [`Strategy::produce_template`] repeatedly with that parameter;
/// 3. [`Strategy::reify`] templates into the values handed to the test;
/// 4. on failure, walk [`Strategy::simplify`] to find simpler templates;
/// 5. persist templates with [`Strategy::to_basic`] and read them back with
///    [`Strategy::from_basic`].
pub trait Strategy: Send + Sync {
    /// The in-memory representation of one example.
    type Template: Clone + Send + 'static;
    /// The value produced from a template.
    type Value;

    /// The specification from which one [`Parameter`] is drawn per run.
    fn parameter(&self) -> &Distribution;

    /// Produces a template from a parameter previously drawn from
    /// [`Strategy::parameter`].
    ///
    /// Fails with [`crate::Error::ParameterMismatch`] if `parameter` was not
    /// drawn from this strategy's specification.
    fn produce_template(&self, random: &mut Random, parameter: &Parameter)
        -> Result<Self::Template>;

    fn reify(&self, template: &Self::Template) -> Self::Value;

    /// A finite sequence of simpler templates, preferred ones first.
    ///
    /// Calling this twice with the same template yields the same sequence.
    fn simplify(&self, template: &Self::Template) -> Simplify<Self::Template>;

    fn to_basic(&self, template: &Self::Template) -> Basic;

    fn from_basic(&self, basic: &Basic) -> Result<Self::Template>;

    /// Whether `template` is something this strategy could have produced.
    fn contains(&self, _template: &Self::Template) -> bool {
        true
    }

    #[inline]
    fn draw(&self, random: &mut Random) -> Parameter {
        self.parameter().draw(random)
    }

    /// Wraps `self` in an [`Arc`] to erase its concrete type.
    fn boxed(self) -> Boxed<Self::Value, Self::Template>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }

    /// Packs reified values into a richer value; see [`Mapped`].
    fn map<T, F: Fn(Self::Value) -> T + Send + Sync>(self, pack: F) -> Mapped<Self, F>
    where
        Self: Sized,
    {
        Mapped::new(self, pack)
    }

    /// Creates a weighted union of `self` and `other`, each with weight `1`.
    fn or<S>(self, other: S) -> Union<Self::Template, Self::Value>
    where
        Self: Sized + 'static,
        S: Strategy<Template = Self::Template, Value = Self::Value> + 'static,
    {
        Union::from([Weight::one(self.boxed()), Weight::one(other.boxed())])
    }
}

/// A type-erased strategy producing values of type `V`.
pub type Boxed<V, T = <V as Example>::Template> = Arc<dyn Strategy<Template = T, Value = V>>;

/// Links a value type to the template type its strategies produce, which lets
/// the [`Registry`](crate::Registry) hand out typed strategies.
pub trait Example: 'static {
    type Template: Clone + fmt::Debug + Send + Sync + 'static;
}

/// The lazily produced, owned sequence returned by [`Strategy::simplify`].
///
/// The sequence does not borrow the strategy, so a search loop can hold it
/// across suspension points.
pub struct Simplify<T>(Box<dyn Iterator<Item = T> + Send>);

impl<T> Simplify<T> {
    pub fn new<I: Iterator<Item = T> + Send + 'static>(iterator: I) -> Self {
        Self(Box::new(iterator))
    }

    pub fn empty() -> Self
    where
        T: 'static,
    {
        Self::new(iter::empty())
    }
}

impl<T> Iterator for Simplify<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> fmt::Debug for Simplify<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Simplify").finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static, V> fmt::Debug for dyn Strategy<Template = T, Value = V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("parameter", self.parameter())
            .finish_non_exhaustive()
    }
}

impl Example for i64 {
    type Template = i64;
}

impl Example for f64 {
    type Template = f64;
}

impl<A: Example, B: Example> Example for (A, B) {
    type Template = (A::Template, B::Template);
}

macro_rules! pointer {
    ($t: ident) => {
        impl<S: Strategy + ?Sized> Strategy for $t<S> {
            type Template = S::Template;
            type Value = S::Value;

            #[inline]
            fn parameter(&self) -> &Distribution {
                S::parameter(self)
            }

            #[inline]
            fn produce_template(
                &self,
                random: &mut Random,
                parameter: &Parameter,
            ) -> Result<Self::Template> {
                S::produce_template(self, random, parameter)
            }

            #[inline]
            fn reify(&self, template: &Self::Template) -> Self::Value {
                S::reify(self, template)
            }

            #[inline]
            fn simplify(&self, template: &Self::Template) -> Simplify<Self::Template> {
                S::simplify(self, template)
            }

            #[inline]
            fn to_basic(&self, template: &Self::Template) -> Basic {
                S::to_basic(self, template)
            }

            #[inline]
            fn from_basic(&self, basic: &Basic) -> Result<Self::Template> {
                S::from_basic(self, basic)
            }

            #[inline]
            fn contains(&self, template: &Self::Template) -> bool {
                S::contains(self, template)
            }
        }
    };
}

pointer!(Box);
pointer!(Arc);

impl<S: Strategy + ?Sized> Strategy for &S {
    type Template = S::Template;
    type Value = S::Value;

    #[inline]
    fn parameter(&self) -> &Distribution {
        S::parameter(self)
    }

    #[inline]
    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<Self::Template> {
        S::produce_template(self, random, parameter)
    }

    #[inline]
    fn reify(&self, template: &Self::Template) -> Self::Value {
        S::reify(self, template)
    }

    #[inline]
    fn simplify(&self, template: &Self::Template) -> Simplify<Self::Template> {
        S::simplify(self, template)
    }

    #[inline]
    fn to_basic(&self, template: &Self::Template) -> Basic {
        S::to_basic(self, template)
    }

    #[inline]
    fn from_basic(&self, basic: &Basic) -> Result<Self::Template> {
        S::from_basic(self, basic)
    }

    #[inline]
    fn contains(&self, template: &Self::Template) -> bool {
        S::contains(self, template)
    }
}
