//! Register model and decoders for the basic CPUID leaves

use std::collections::BTreeMap;

mod vendor;
pub use vendor::*;

mod version;
pub use version::*;

mod additional;
pub use additional::*;

mod features;
pub use features::*;

#[cfg(feature = "brand_string")]
mod brand;
#[cfg(feature = "brand_string")]
pub use brand::*;

/// Leaf returning the highest basic leaf and the vendor id
pub const VENDOR_LEAF: u32 = 0;
/// Leaf returning the version info, additional info and feature flags
pub const FEATURE_LEAF: u32 = 1;

/// Registers returned by a single CPUID query
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct CpuidResult {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl CpuidResult {
    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }
}

/// Something that can answer CPUID queries
pub trait CpuidSource {
    /// Query the registers for the given `leaf`
    fn query(&self, leaf: u32) -> CpuidResult;
}

impl<T: CpuidSource + ?Sized> CpuidSource for &T {
    fn query(&self, leaf: u32) -> CpuidResult {
        (**self).query(leaf)
    }
}

/// CPUID source answering from a set of previously recorded leaves.
///
/// Leaves that were not recorded return all zeros.
#[derive(Clone, Default, Debug)]
pub struct RecordedCpuid {
    leaves: BTreeMap<u32, CpuidResult>,
}

impl RecordedCpuid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the registers returned for `leaf`, replacing any earlier recording
    pub fn with_leaf(mut self, leaf: u32, result: CpuidResult) -> Self {
        self.record(leaf, result);
        self
    }

    /// Record the registers returned for `leaf`, returning the earlier recording if there was one
    pub fn record(&mut self, leaf: u32, result: CpuidResult) -> Option<CpuidResult> {
        self.leaves.insert(leaf, result)
    }
}

impl CpuidSource for RecordedCpuid {
    fn query(&self, leaf: u32) -> CpuidResult {
        self.leaves.get(&leaf).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recorded_leaves() {
        let mut cpuid = RecordedCpuid::new()
            .with_leaf(VENDOR_LEAF, CpuidResult::new(0xD, 1, 2, 3));

        assert_eq!(cpuid.query(VENDOR_LEAF), CpuidResult::new(0xD, 1, 2, 3));
        assert_eq!(cpuid.query(FEATURE_LEAF), CpuidResult::default());

        let prev = cpuid.record(VENDOR_LEAF, CpuidResult::new(1, 0, 0, 0));
        assert_eq!(prev, Some(CpuidResult::new(0xD, 1, 2, 3)));
        assert_eq!((&cpuid).query(VENDOR_LEAF).eax, 1);
    }
}
