//! Decoding of the processor identification (`CPUID`) leaves 0 and 1.
//!
//! The decoders are pure functions of the raw register values, the instruction itself is only issued by [`NativeCpuid`].
//!
//! https://en.wikipedia.org/wiki/CPUID

// The derive macros refer to the traits through `onca_cpuid::`, which also needs to resolve inside this crate
extern crate self as onca_cpuid;

mod macro_traits;
pub use macro_traits::*;

mod error;
pub use error::*;

pub mod fmt;
pub mod sys;

pub mod cpuid;
pub use cpuid::*;

mod report;
pub use report::*;

pub use sys::arch::NativeCpuid;
