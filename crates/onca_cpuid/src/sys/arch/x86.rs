#[cfg(target_arch = "x86")]
use core::arch::x86 as arch;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64 as arch;

use crate::CpuidResult;

/// Proof that the instruction is available
#[derive(Clone, Copy, Debug)]
pub struct Token;

pub fn token() -> Option<Token> {
    // The oldest processors supported by the x86 targets (i586) already implement the instruction
    Some(Token)
}

#[allow(unused_unsafe)]
pub fn cpuid(_: Token, leaf: u32) -> CpuidResult {
    // SAFETY: A `Token` only exists when the instruction is available, the sub-leaf is ignored by leaves that don't use it
    let res = unsafe { arch::__cpuid_count(leaf, 0) };
    CpuidResult::new(res.eax, res.ebx, res.ecx, res.edx)
}
