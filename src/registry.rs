use crate::{
    complex::Complex,
    descriptor::{Class, Descriptor, Kind},
    error::{Error, Result},
    float::{Float, Interval},
    integer::{Integers, Range},
    log::{debug, trace},
    pair::Pair,
    strategy::{Boxed, Example, Strategy},
};
use core::{
    any::{type_name, Any, TypeId},
    fmt,
};

/// Builds the strategy for a descriptor, resolving sub-descriptors through the
/// registry it is handed.
pub type Factory<V> = dyn Fn(&Registry, &Descriptor) -> Result<Boxed<V>> + Send + Sync;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    Type(Kind),
    Instances(Class),
}

struct Entry {
    rule: Rule,
    value: TypeId,
    name: &'static str,
    /// A `Box<Factory<V>>` where `V` is the type behind `value`.
    factory: Box<dyn Any + Send + Sync>,
}

/// A table of strategy factories keyed by descriptor and value type.
///
/// Registration happens up front through `&mut self`; resolution only needs
/// `&self`, so a populated registry can be shared between threads.
///
/// For a descriptor and a requested value type, resolution considers only the
/// entries registered for that value type and picks:
/// 1. the most recent entry registered for the descriptor's exact [`Kind`];
/// 2. otherwise the first entry, in registration order, registered for the
///    descriptor's [`Class`].
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A registry with the numeric strategies registered:
    ///
    /// | descriptor | value | strategy |
    /// |---|---|---|
    /// | [`Kind::Integer`] | `i64` | [`Integers`] |
    /// | [`Kind::Float`] | `f64` | [`Float::composite`] |
    /// | [`Kind::Complex`] | [`Complex`] | a [`Pair`] of floats, packed |
    /// | [`Class::IntegerRange`] | `i64` | [`Range`] |
    /// | [`Class::FloatRange`] | `f64` | [`Interval`] |
    /// | [`Class::Tuple`] | `(i64, i64)`, `(f64, f64)`, `(i64, f64)`, `(f64, i64)` | [`Pair`] |
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register_for_type(Kind::Integer, |_, _| Ok(Integers::new().boxed()))
            .register_for_type(Kind::Float, |registry, _| {
                let integers = registry.resolve::<i64>(&Descriptor::INTEGER)?;
                Ok(Float::composite(integers).boxed())
            })
            .register_for_type(Kind::Complex, |registry, _| {
                let floats = Descriptor::tuple([Descriptor::FLOAT, Descriptor::FLOAT]);
                let pair = registry.resolve::<(f64, f64)>(&floats)?;
                Ok(pair.map(|(re, im)| Complex::new(re, im)).boxed())
            })
            .register_for_instances(Class::IntegerRange, |_, descriptor| match *descriptor {
                Descriptor::IntegerRange { start, end } => Ok(Range::new(start, end)?.boxed()),
                _ => Err(not_found(descriptor)),
            })
            .register_for_instances(Class::FloatRange, |_, descriptor| match *descriptor {
                Descriptor::FloatRange { start, end } => {
                    Ok(Float::new(Interval::new(start, end)?).boxed())
                }
                _ => Err(not_found(descriptor)),
            })
            .register_for_instances(Class::Tuple, pair::<i64, i64>)
            .register_for_instances(Class::Tuple, pair::<f64, f64>)
            .register_for_instances(Class::Tuple, pair::<i64, f64>)
            .register_for_instances(Class::Tuple, pair::<f64, i64>);
        registry
    }

    pub fn register_for_type<V: Example>(
        &mut self,
        kind: Kind,
        factory: impl Fn(&Registry, &Descriptor) -> Result<Boxed<V>> + Send + Sync + 'static,
    ) -> &mut Self {
        self.register(Rule::Type(kind), factory)
    }

    pub fn register_for_instances<V: Example>(
        &mut self,
        class: Class,
        factory: impl Fn(&Registry, &Descriptor) -> Result<Boxed<V>> + Send + Sync + 'static,
    ) -> &mut Self {
        self.register(Rule::Instances(class), factory)
    }

    fn register<V: Example>(
        &mut self,
        rule: Rule,
        factory: impl Fn(&Registry, &Descriptor) -> Result<Boxed<V>> + Send + Sync + 'static,
    ) -> &mut Self {
        let factory: Box<Factory<V>> = Box::new(factory);
        trace!("register {rule:?} for `{}`", type_name::<V>());
        self.entries.push(Entry {
            rule,
            value: TypeId::of::<V>(),
            name: type_name::<V>(),
            factory: Box::new(factory),
        });
        self
    }

    /// Builds a fresh strategy producing `V` for `descriptor`.
    ///
    /// Fails with [`Error::DescriptorNotFound`] when nothing is registered for
    /// the pair, and with whatever error the factory reports otherwise.
    pub fn resolve<V: Example>(&self, descriptor: &Descriptor) -> Result<Boxed<V>> {
        let Some(factory) = self.lookup::<V>(descriptor) else {
            debug!("no `{}` strategy for {descriptor}", type_name::<V>());
            return Err(not_found(descriptor));
        };
        trace!("resolve {descriptor} as `{}`", type_name::<V>());
        factory(self, descriptor)
    }

    fn lookup<V: Example>(&self, descriptor: &Descriptor) -> Option<&Factory<V>> {
        let mut candidates = self
            .entries
            .iter()
            .filter(|entry| entry.value == TypeId::of::<V>());
        let entry = match (descriptor.kind(), descriptor.class()) {
            (Some(kind), _) => candidates.rev().find(|entry| entry.rule == Rule::Type(kind)),
            (_, Some(class)) => candidates.find(|entry| entry.rule == Rule::Instances(class)),
            (None, None) => None,
        }?;
        entry
            .factory
            .downcast_ref::<Box<Factory<V>>>()
            .map(|factory| &**factory)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|Entry { rule, name, .. }| (rule, name)),
            )
            .finish()
    }
}

fn not_found(descriptor: &Descriptor) -> Error {
    Error::DescriptorNotFound {
        descriptor: descriptor.to_string(),
    }
}

fn pair<A: Example, B: Example>(
    registry: &Registry,
    descriptor: &Descriptor,
) -> Result<Boxed<(A, B)>> {
    match descriptor {
        Descriptor::Tuple(items) => match items.as_slice() {
            [first, second] => Ok(Pair::new(
                registry.resolve::<A>(first)?,
                registry.resolve::<B>(second)?,
            )
            .boxed()),
            _ => Err(not_found(descriptor)),
        },
        _ => Err(not_found(descriptor)),
    }
}
