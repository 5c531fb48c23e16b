//! Access to the identification instruction of the executing processor

use cfg_if::cfg_if;

use crate::{CpuidResult, CpuidSource, Error, Result};

cfg_if!{
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        mod x86;
        use x86 as arch_imp;
    } else {
        mod arch_imp {
            use crate::CpuidResult;

            /// Uninhabited, there is no instruction to issue on this architecture
            #[derive(Clone, Copy, Debug)]
            pub enum Token {}

            pub fn token() -> Option<Token> {
                None
            }

            pub fn cpuid(token: Token, _leaf: u32) -> CpuidResult {
                match token {}
            }
        }
    }
}

/// CPUID source issuing the instruction on the executing processor.
///
/// Results are specific to the logical processor the calling thread runs on at the time of the query.
#[derive(Clone, Copy, Debug)]
pub struct NativeCpuid {
    token: arch_imp::Token,
}

impl NativeCpuid {
    /// Check if the instruction is available on the host, returns [`Error::UnsupportedPlatform`] if it isn't.
    pub fn new() -> Result<Self> {
        arch_imp::token()
            .map(|token| Self { token })
            .ok_or(Error::UnsupportedPlatform(std::env::consts::ARCH))
    }
}

impl CpuidSource for NativeCpuid {
    fn query(&self, leaf: u32) -> CpuidResult {
        arch_imp::cpuid(self.token, leaf)
    }
}
