#![allow(unused_macros, unused_imports)]

#[cfg(feature = "log")]
pub(crate) use ::log::{debug, trace, warn};

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "log"))]
pub(crate) use debug;

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "log"))]
pub(crate) use trace;

#[cfg(not(feature = "log"))]
macro_rules! warn_impl {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "log"))]
pub(crate) use warn_impl as warn;
