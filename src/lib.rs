#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod basic;
pub mod complex;
pub mod descriptor;
#[cfg(feature = "asynchronous")]
pub mod drive;
pub mod error;
pub mod find;
pub mod float;
pub mod integer;
mod log;
pub mod map;
pub mod pair;
pub mod parameter;
pub mod random;
pub mod registry;
pub mod sample;
pub mod settings;
pub mod strategy;
pub mod union;
pub mod wrap;

pub use basic::Basic;
pub use complex::Complex;
pub use descriptor::{Class, Descriptor, Kind};
pub use error::{Error, Result};
pub use find::find;
#[cfg(feature = "asynchronous")]
pub use find::{find_async, find_async_with};
pub use parameter::{Distribution, Parameter};
pub use random::Random;
pub use registry::Registry;
pub use sample::Sample;
pub use settings::Settings;
pub use strategy::{Boxed, Example, Simplify, Strategy};

/// Number of examples a search draws before giving up.
const EXAMPLES: usize = 200;
/// Number of accepted simplifications after which a search stops shrinking.
const SHRINKS: usize = 4_096;
/// Number of examples produced from one drawn parameter before a new one is drawn.
const RUN: usize = 10;
/// Number of values a sampler yields by default.
const SAMPLES: usize = 128;
/// Largest positive integer whose simplification enumerates every smaller integer.
const SMALL: i64 = 100;
/// Number of random candidates drawn when simplifying a large integer.
const DRAWS: usize = 100;
