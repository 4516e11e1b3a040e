use core::fmt;

/// A value type that strategies are registered for as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Float,
    Complex,
    /// A user-defined type, identified by name.
    Named(&'static str),
}

/// A family of parameterized descriptors, matched by shape regardless of the
/// parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Class {
    IntegerRange,
    FloatRange,
    Tuple,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Descriptor {
    Type(Kind),
    /// Integers in `[start, end]`.
    IntegerRange { start: i64, end: i64 },
    /// Floats in `[start, end]`.
    FloatRange { start: f64, end: f64 },
    Tuple(Vec<Descriptor>),
}

impl Descriptor {
    pub const INTEGER: Self = Self::Type(Kind::Integer);
    pub const FLOAT: Self = Self::Type(Kind::Float);
    pub const COMPLEX: Self = Self::Type(Kind::Complex);

    pub const fn named(name: &'static str) -> Self {
        Self::Type(Kind::Named(name))
    }

    pub const fn integer_range(start: i64, end: i64) -> Self {
        Self::IntegerRange { start, end }
    }

    pub const fn float_range(start: f64, end: f64) -> Self {
        Self::FloatRange { start, end }
    }

    pub fn tuple<I: IntoIterator<Item = Descriptor>>(items: I) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// The kind of a type descriptor.
    pub const fn kind(&self) -> Option<Kind> {
        match *self {
            Self::Type(kind) => Some(kind),
            _ => None,
        }
    }

    /// The class of an instance descriptor.
    pub const fn class(&self) -> Option<Class> {
        match self {
            Self::Type(_) => None,
            Self::IntegerRange { .. } => Some(Class::IntegerRange),
            Self::FloatRange { .. } => Some(Class::FloatRange),
            Self::Tuple(_) => Some(Class::Tuple),
        }
    }
}

impl From<Kind> for Descriptor {
    fn from(kind: Kind) -> Self {
        Self::Type(kind)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Complex => f.write_str("complex"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(kind) => write!(f, "{kind}"),
            Self::IntegerRange { start, end } => write!(f, "integer in [{start}, {end}]"),
            Self::FloatRange { start, end } => write!(f, "float in [{start}, {end}]"),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
