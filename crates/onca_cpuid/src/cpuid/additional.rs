/// Additional feature info: `ebx` of leaf 1
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AdditionalFeatureInfo {
    /// Brand index
    pub brand_index:         u8,
    /// `CLFLUSH` line size, in units of 8 bytes.
    ///
    /// # Note
    ///
    /// Only populated since the Pentium 4, older and some virtualized processors report 0.
    pub clflush_line_size:   u8,
    /// Maximum number of addressable IDs for logical processors in this physical package.
    ///
    /// The nearest power-of-2 integer that is not smaller than this value is the number of unique initial APIC IDs reserved for addressing different logical processors in a physical package.
    pub max_addressable_ids: u8,
    /// Local APIC ID: The initial APIC-ID is used to identify the executing logical processor.
    ///
    /// Differs between cores, so it is only meaningful if the querying thread is pinned to a single core.
    pub local_apic_id:       u8,
}

impl AdditionalFeatureInfo {
    pub const fn from_ebx(ebx: u32) -> Self {
        Self {
            brand_index: (ebx & 0xFF) as u8,
            clflush_line_size: ((ebx >> 8) & 0xFF) as u8,
            max_addressable_ids: ((ebx >> 16) & 0xFF) as u8,
            local_apic_id: ((ebx >> 24) & 0xFF) as u8,
        }
    }

    /// Cache line size in bytes, a multiple of 8 in the range `[0, 2040]`
    pub const fn cacheline_size(&self) -> u16 {
        self.clflush_line_size as u16 * 8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_ebx() {
        let info = AdditionalFeatureInfo::from_ebx(0x0510_0800);

        assert_eq!(info, AdditionalFeatureInfo {
            brand_index: 0x00,
            clflush_line_size: 0x08,
            max_addressable_ids: 0x10,
            local_apic_id: 0x05,
        });
        assert_eq!(info.cacheline_size(), 64);
    }

    #[test]
    fn cacheline_bounds() {
        assert_eq!(AdditionalFeatureInfo::from_ebx(0).cacheline_size(), 0);
        assert_eq!(AdditionalFeatureInfo::from_ebx(0xFFFF_FFFF).cacheline_size(), 2040);
        assert_eq!(AdditionalFeatureInfo::from_ebx(0xFFFF_FFFF).brand_index, 0xFF);
        assert_eq!(AdditionalFeatureInfo::from_ebx(0xFFFF_FFFF).local_apic_id, 0xFF);
    }
}
