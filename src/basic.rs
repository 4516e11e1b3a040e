use crate::error::{Error, Result};
use core::fmt;

/// A self-describing encoding built from integers and nested sequences.
///
/// Every strategy guarantees that `from_basic(to_basic(template)) == template`
/// for the templates it produces, and that `from_basic` reports
/// [`Error::BadData`] instead of accepting input of the wrong shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Basic {
    Integer(i128),
    Sequence(Vec<Basic>),
}

impl Basic {
    pub fn integer<T: TryFrom<i128>>(&self) -> Result<T> {
        match *self {
            Self::Integer(value) => T::try_from(value).map_err(|_| {
                Error::bad_data(format!(
                    "integer {value} does not fit in `{}`",
                    core::any::type_name::<T>()
                ))
            }),
            Self::Sequence(_) => Err(Error::bad_data("expected an integer, found a sequence")),
        }
    }

    pub fn sequence<const N: usize>(&self) -> Result<&[Basic; N]> {
        match self {
            Self::Sequence(items) => items.as_slice().try_into().map_err(|_| {
                Error::bad_data(format!(
                    "expected a sequence of {N} items, found {}",
                    items.len()
                ))
            }),
            Self::Integer(_) => Err(Error::bad_data("expected a sequence, found an integer")),
        }
    }
}

impl From<i64> for Basic {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u64> for Basic {
    fn from(value: u64) -> Self {
        Self::Integer(value.into())
    }
}

impl<const N: usize> From<[Basic; N]> for Basic {
    fn from(items: [Basic; N]) -> Self {
        Self::Sequence(items.into())
    }
}

impl fmt::Display for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
