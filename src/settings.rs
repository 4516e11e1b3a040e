use crate::{EXAMPLES, SHRINKS};
use core::str::FromStr;
use std::env;

/// Configures a search ([`find`](crate::find) and its asynchronous variants).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// The number of examples to draw before giving up.
    ///
    /// Defaults to `EXAMPLES`.
    pub examples: usize,
    /// The number of accepted simplifications after which shrinking stops.
    ///
    /// Defaults to `SHRINKS`.
    pub shrinks: usize,
    /// The seed of the randomness source.
    ///
    /// Using the same seed with the same strategy reproduces the same search.
    /// Defaults to `None`, which picks a random seed.
    pub seed: Option<u64>,
}

impl Settings {
    pub const DEFAULT: Self = Self {
        examples: EXAMPLES,
        shrinks: SHRINKS,
        seed: None,
    };

    /// The default settings, overridden by the `SPECIMEN_EXAMPLES`,
    /// `SPECIMEN_SHRINKS` and `SPECIMEN_SEED` environment variables when they
    /// are set and parse.
    pub fn from_env() -> Self {
        let mut settings = Self::DEFAULT;
        environment::update(&mut settings, |key| env::var(key).ok());
        settings
    }

    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn examples(mut self, examples: usize) -> Self {
        self.examples = examples;
        self
    }

    pub const fn shrinks(mut self, shrinks: usize) -> Self {
        self.shrinks = shrinks;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

mod environment {
    use super::*;

    pub fn update<V: Fn(&str) -> Option<String>>(settings: &mut Settings, variable: V) {
        if let Some(value) = parse(&variable, "SPECIMEN_EXAMPLES") {
            settings.examples = value;
        }
        if let Some(value) = parse(&variable, "SPECIMEN_SHRINKS") {
            settings.shrinks = value;
        }
        if let Some(value) = parse(&variable, "SPECIMEN_SEED") {
            settings.seed = Some(value);
        }
    }

    fn parse<T: FromStr, V: Fn(&str) -> Option<String>>(variable: &V, key: &str) -> Option<T> {
        variable(key)?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_override_defaults() {
        let mut settings = Settings::DEFAULT;
        environment::update(&mut settings, |key| match key {
            "SPECIMEN_EXAMPLES" => Some("17".into()),
            "SPECIMEN_SEED" => Some(" 42 ".into()),
            _ => None,
        });
        assert_eq!(
            settings,
            Settings {
                examples: 17,
                shrinks: SHRINKS,
                seed: Some(42),
            }
        );
    }

    #[test]
    fn unparsable_variables_are_ignored() {
        let mut settings = Settings::DEFAULT.seed(3);
        environment::update(&mut settings, |_| Some("many".into()));
        assert_eq!(settings, Settings::DEFAULT.seed(3));
    }
}
