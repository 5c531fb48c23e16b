use core::fmt::{self, Write};

use onca_cpuid_macros::{EnumCount, EnumDisplay, EnumFromIndex};

use crate::{fmt::Indenter, EnumFromIndexT};

/// Processor type, stored in bits 12-13 of the version info
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, EnumDisplay, EnumFromIndex, EnumCount)]
pub enum ProcessorType {
    #[default]
    #[display("Original OEM Processor")]
    OEM,
    #[display("Intel OverDrive® Processor")]
    IntelOverdrive,
    #[display("Dual processor (not applicable to Intel486 processors)")]
    DualProcessor,
    #[display("Intel reserved")]
    Reserved,
}

impl ProcessorType {
    /// Decode the 2-bit processor type field
    pub fn from_bits(bits: u8) -> Self {
        // All 4 values of the field have a variant
        Self::from_idx_or((bits & 0x3) as usize, ProcessorType::Reserved)
    }

    /// Raw value of the processor type field
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Version info: `eax` of leaf 1
///
/// ```text
/// +----------+----------+----------+----------+------+----------+--------+--------+
/// | reserved | ext      | ext      | reserved | type | family   | model  | step   |
/// |          | family   | model    |          |      |          |        |        |
/// +----------+----------+----------+----------+------+----------+--------+--------+
/// 31         28         20         16         14     12         8        4        0
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct VersionInfo(u32);

impl VersionInfo {
    pub const fn from_eax(eax: u32) -> Self {
        Self(eax)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn stepping_id(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// Base model id, without the extended model id folded in
    pub const fn model_id(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    /// Base family id, without the extended family id folded in
    pub const fn family_id(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub const fn processor_type_bits(self) -> u8 {
        ((self.0 >> 12) & 0x3) as u8
    }

    pub const fn extended_model_id(self) -> u8 {
        ((self.0 >> 16) & 0xF) as u8
    }

    pub const fn extended_family_id(self) -> u8 {
        ((self.0 >> 20) & 0xFF) as u8
    }

    /// Display family: the extended family id is only added when the base family id is 0Fh
    pub const fn family(self) -> u16 {
        let family_id = self.family_id() as u16;
        if family_id == 0x0F {
            self.extended_family_id() as u16 + family_id
        } else {
            family_id
        }
    }

    /// Display model: the extended model id is only prepended when the base model id is 06h or 0Fh
    pub const fn model(self) -> u16 {
        let model_id = self.model_id() as u16;
        if model_id == 0x06 || model_id == 0x0F {
            ((self.extended_model_id() as u16) << 4) + model_id
        } else {
            model_id
        }
    }

    pub fn processor_type(self) -> ProcessorType {
        ProcessorType::from_bits(self.processor_type_bits())
    }
}

/// CPU family info, with the extended ids folded in
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FamilyInfo {
    pub family_id:      u16,
    pub model_id:       u16,
    pub processor_type: ProcessorType,
    pub stepping_id:    u8,
}

impl From<VersionInfo> for FamilyInfo {
    fn from(version: VersionInfo) -> Self {
        Self {
            family_id: version.family(),
            model_id: version.model(),
            processor_type: version.processor_type(),
            stepping_id: version.stepping_id(),
        }
    }
}

impl fmt::Display for FamilyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Family info:")?;

        let mut indenter = Indenter::new(f);
        writeln!(indenter, "Family ID:      0x{:X}", self.family_id)?;
        writeln!(indenter, "Model ID:       0x{:X}", self.model_id)?;
        writeln!(indenter, "Processor type: {}", self.processor_type)?;
        write!  (indenter, "Stepping ID:    {}", self.stepping_id)
    }
}

#[cfg(test)]
mod test {
    use crate::{EnumCountT, EnumFromIndexT};

    use super::*;

    fn version(stepping: u32, model: u32, family: u32, ty: u32, ext_model: u32, ext_family: u32) -> VersionInfo {
        VersionInfo::from_eax(stepping | (model << 4) | (family << 8) | (ty << 12) | (ext_model << 16) | (ext_family << 20))
    }

    #[test]
    fn extracts_fields() {
        let info = version(0xA, 0x5, 0x6, 0x1, 0x9, 0x12);

        assert_eq!(info.stepping_id(), 0xA);
        assert_eq!(info.model_id(), 0x5);
        assert_eq!(info.family_id(), 0x6);
        assert_eq!(info.processor_type_bits(), 0x1);
        assert_eq!(info.extended_model_id(), 0x9);
        assert_eq!(info.extended_family_id(), 0x12);
    }

    #[test]
    fn ignores_reserved_bits() {
        let info = VersionInfo::from_eax(0xF000_C000);

        assert_eq!(info.processor_type_bits(), 0);
        assert_eq!(info.extended_family_id(), 0);
        assert_eq!(info.family(), 0);
        assert_eq!(info.model(), 0);
    }

    #[test]
    fn family_folding() {
        assert_eq!(version(0, 0, 0x6, 0, 0, 0x0).family(), 0x6);
        assert_eq!(version(0, 0, 0x6, 0, 0, 0x3).family(), 0x6);
        assert_eq!(version(0, 0, 0xF, 0, 0, 0x2).family(), 0x11);
        assert_eq!(version(0, 0, 0xF, 0, 0, 0xFF).family(), 0x10E);
    }

    #[test]
    fn model_folding() {
        assert_eq!(version(0, 0xF, 0, 0, 0x3, 0).model(), 0x3F);
        assert_eq!(version(0, 0x6, 0, 0, 0x9, 0).model(), 0x96);
        assert_eq!(version(0, 0x5, 0, 0, 0x9, 0).model(), 0x5);
        // Only the base model id selects the folding
        assert_eq!(version(0, 0xE, 0x6, 0, 0x9, 0).model(), 0xE);
    }

    #[test]
    fn processor_type_table() {
        assert_eq!(ProcessorType::COUNT, 4);
        for bits in 0..4 {
            assert!(ProcessorType::from_idx(bits as usize).is_some());
            assert_eq!(ProcessorType::from_bits(bits).code(), bits);
        }

        assert_eq!(ProcessorType::from_bits(0).to_string(), "Original OEM Processor");
        assert_eq!(ProcessorType::from_bits(1).to_string(), "Intel OverDrive® Processor");
        assert_eq!(ProcessorType::from_bits(2).to_string(), "Dual processor (not applicable to Intel486 processors)");
        assert_eq!(ProcessorType::from_bits(3).to_string(), "Intel reserved");
        assert_eq!(version(0, 0, 0, 2, 0, 0).processor_type(), ProcessorType::DualProcessor);
    }

    #[test]
    fn family_info() {
        let info = FamilyInfo::from(version(0x3, 0xF, 0xF, 0x0, 0x3, 0x2));

        assert_eq!(info, FamilyInfo {
            family_id: 0x11,
            model_id: 0x3F,
            processor_type: ProcessorType::OEM,
            stepping_id: 0x3,
        });
        assert_eq!(info.to_string(), "Family info:\n    Family ID:      0x11\n    Model ID:       0x3F\n    Processor type: Original OEM Processor\n    Stepping ID:    3");
    }
}
