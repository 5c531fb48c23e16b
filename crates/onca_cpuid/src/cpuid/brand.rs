use core::fmt;

use super::{CpuidResult, CpuidSource};

/// Leaf returning the highest extended leaf
pub const EXTENDED_LEAF_BASE: u32 = 0x8000_0000;
/// Leaves containing the 48-byte processor brand string
pub const BRAND_STRING_LEAVES: [u32; 3] = [0x8000_0002, 0x8000_0003, 0x8000_0004];

/// Processor brand string, e.g. "Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz"
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BrandString([u8; 48]);

impl BrandString {
    /// Query the brand string, returns `None` if the processor does not report the extended leaves containing it.
    pub fn query<S: CpuidSource + ?Sized>(source: &S) -> Option<Self> {
        let max_extended_leaf = source.query(EXTENDED_LEAF_BASE).eax;
        if max_extended_leaf < BRAND_STRING_LEAVES[2] {
            return None;
        }
        Some(Self::from_leaves(BRAND_STRING_LEAVES.map(|leaf| source.query(leaf))))
    }

    pub fn from_leaves(leaves: [CpuidResult; 3]) -> Self {
        let mut bytes = [0u8; 48];
        for (chunk, res) in bytes.chunks_exact_mut(16).zip(leaves) {
            chunk[0..4].copy_from_slice(&res.eax.to_le_bytes());
            chunk[4..8].copy_from_slice(&res.ebx.to_le_bytes());
            chunk[8..12].copy_from_slice(&res.ecx.to_le_bytes());
            chunk[12..16].copy_from_slice(&res.edx.to_le_bytes());
        }
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }
}

impl fmt::Display for BrandString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        // Some processors right-align the string with leading spaces
        f.write_str(String::from_utf8_lossy(&self.0[..len]).trim())
    }
}

impl fmt::Debug for BrandString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BrandString(\"{self}\")")
    }
}

#[cfg(test)]
mod test {
    use crate::RecordedCpuid;

    use super::*;

    fn leaf(text: &[u8; 16]) -> CpuidResult {
        let reg = |idx: usize| u32::from_le_bytes([text[idx], text[idx + 1], text[idx + 2], text[idx + 3]]);
        CpuidResult::new(reg(0), reg(4), reg(8), reg(12))
    }

    #[test]
    fn assembles_brand_string() {
        let cpuid = RecordedCpuid::new()
            .with_leaf(EXTENDED_LEAF_BASE, CpuidResult::new(0x8000_0008, 0, 0, 0))
            .with_leaf(0x8000_0002, leaf(b"      Intel(R) C"))
            .with_leaf(0x8000_0003, leaf(b"ore(TM) i7-8700K"))
            .with_leaf(0x8000_0004, leaf(b" CPU @ 3.70GHz\0\0"));

        let brand = BrandString::query(&cpuid).unwrap();
        assert_eq!(brand.to_string(), "Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz");
        assert_eq!(&brand.as_bytes()[..6], b"      ");
    }

    #[test]
    fn missing_extended_leaves() {
        let cpuid = RecordedCpuid::new()
            .with_leaf(EXTENDED_LEAF_BASE, CpuidResult::new(0x8000_0001, 0, 0, 0));
        assert_eq!(BrandString::query(&cpuid), None);
    }
}
