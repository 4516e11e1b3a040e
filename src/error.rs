use std::borrow::Cow;

/// A result that is either `Ok(T)` or `Err(specimen::Error)`.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The errors that can cross the boundary of the engine.
///
/// - Construction errors ([`Error::InvalidRange`], [`Error::InvalidWeight`])
///   are raised as soon as a strategy is built and are never clamped away.
/// - Data errors ([`Error::BadData`]) mean that a serialized template no
///   longer matches the shape of the strategy; callers should discard the
///   example rather than abort the run.
/// - Lookup errors ([`Error::DescriptorNotFound`]) come from the
///   [`Registry`](crate::Registry).
///
/// Failures raised by a driven test body are not represented here; they are
/// surfaced unchanged with their own type (see [`crate::drive`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid range [{start}, {end}]")]
    InvalidRange { start: String, end: String },
    #[error("invalid weight {weight}: weights must be finite and positive")]
    InvalidWeight { weight: f64 },
    #[error("bad data: {reason}")]
    BadData { reason: Cow<'static, str> },
    #[error("no strategy registered for descriptor {descriptor}")]
    DescriptorNotFound { descriptor: String },
    #[error("parameter has no field `{field}` of the requested shape")]
    ParameterMismatch { field: Cow<'static, str> },
    #[error("no example satisfying the condition was found after {examples} examples")]
    NoSuchExample { examples: usize },
}

impl Error {
    #[must_use]
    pub fn invalid_range(start: impl ToString, end: impl ToString) -> Self {
        Self::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[must_use]
    pub fn bad_data(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::BadData {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn parameter(field: impl Into<Cow<'static, str>>) -> Self {
        Self::ParameterMismatch {
            field: field.into(),
        }
    }

    /// Whether this error signals a serialized template that must be discarded.
    #[inline]
    #[must_use]
    pub const fn is_bad_data(&self) -> bool {
        matches!(self, Self::BadData { .. })
    }
}
