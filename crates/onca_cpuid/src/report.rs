use core::fmt::{self, Write};

use crate::{
    fmt::Indenter,
    AdditionalFeatureInfo, CpuidResult, CpuidSource, Error, FamilyInfo, FeatureFlags, Manufacturer, Register, Result, VendorInfo, VersionInfo,
    FEATURE_LEAF, FEATURE_TABLE, VENDOR_LEAF,
};
#[cfg(feature = "brand_string")]
use crate::BrandString;

/// Everything decoded from the basic leaves, printed as the identification report
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CpuidReport {
    /// Highest basic leaf and vendor id (leaf 0)
    pub vendor_info:             VendorInfo,
    /// Version info (leaf 1, `eax`)
    pub version_info:            VersionInfo,
    /// Additional feature info (leaf 1, `ebx`)
    pub additional_feature_info: AdditionalFeatureInfo,
    /// Feature flags (leaf 1, `ecx` and `edx`)
    pub feature_flags:           FeatureFlags,
    /// Brand string (leaves 8000_0002h-8000_0004h), if reported
    #[cfg(feature = "brand_string")]
    pub brand_string:            Option<BrandString>,
}

impl CpuidReport {
    /// Query and decode all leaves needed for the report.
    ///
    /// Fails with [`Error::UnsupportedLeaf`] if the processor does not report leaf 1.
    pub fn gather<S: CpuidSource + ?Sized>(source: &S) -> Result<Self> {
        let vendor = source.query(VENDOR_LEAF);
        if vendor.eax < FEATURE_LEAF {
            return Err(Error::UnsupportedLeaf { leaf: FEATURE_LEAF, max_leaf: vendor.eax });
        }

        let report = Self::from_leaves(vendor, source.query(FEATURE_LEAF));
        #[cfg(feature = "brand_string")]
        let report = Self { brand_string: BrandString::query(source), ..report };
        Ok(report)
    }

    /// Decode the report from the registers of leaf 0 and leaf 1
    pub fn from_leaves(leaf0: CpuidResult, leaf1: CpuidResult) -> Self {
        Self {
            vendor_info: VendorInfo::from_leaf(leaf0),
            version_info: VersionInfo::from_eax(leaf1.eax),
            additional_feature_info: AdditionalFeatureInfo::from_ebx(leaf1.ebx),
            feature_flags: FeatureFlags::from_registers(leaf1.ecx, leaf1.edx),
            #[cfg(feature = "brand_string")]
            brand_string: None,
        }
    }

    pub fn family_info(&self) -> FamilyInfo {
        FamilyInfo::from(self.version_info)
    }

    pub fn manufacturer(&self) -> Manufacturer {
        self.vendor_info.manufacturer()
    }

    /// Get a formatter for the indented, per-feature form of the report
    pub fn detailed(&self) -> DetailedReport<'_> {
        DetailedReport(self)
    }
}

impl fmt::Display for CpuidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = self.family_info();
        let additional = &self.additional_feature_info;

        writeln!(f, "Maximum input value for basic CPUID information: 0x{:X}", self.vendor_info.max_basic_leaf)?;
        writeln!(f, "CPU vendor ID: {}", self.vendor_info.vendor_id)?;
        writeln!(f, "version_info.stepping_id: {}", family.stepping_id)?;
        writeln!(f, "version_info.model: 0x{:X}", family.model_id)?;
        writeln!(f, "version_info.family: 0x{:X}", family.family_id)?;
        writeln!(f, "version_info.processor_type: 0x{:X}, {}", family.processor_type.code(), family.processor_type)?;
        writeln!(f, "CPU brand index: 0x{:X}", additional.brand_index)?;
        #[cfg(feature = "brand_string")]
        if let Some(brand) = &self.brand_string {
            writeln!(f, "CPU brand string: {brand}")?;
        }
        writeln!(f, "CPU cacheline_size: {}", additional.cacheline_size())?;
        writeln!(f, "CPU Local APIC ID: {}", additional.local_apic_id)?;
        writeln!(f, "CPU features: {}", self.feature_flags)
    }
}

/// Indented form of a [`CpuidReport`], listing every known feature
pub struct DetailedReport<'a>(&'a CpuidReport);

impl fmt::Display for DetailedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let additional = &report.additional_feature_info;

        writeln!(f, "CPUID info:")?;

        let mut indenter = Indenter::new(f);
        writeln!(indenter, "Manufacturer:        {}", report.manufacturer())?;
        writeln!(indenter, "Max basic leaf:      0x{:X}", report.vendor_info.max_basic_leaf)?;
        writeln!(indenter, "{}", report.family_info())?;
        writeln!(indenter, "Brand index:         0x{:X}", additional.brand_index)?;
        #[cfg(feature = "brand_string")]
        if let Some(brand) = &report.brand_string {
            writeln!(indenter, "Brand string:        {brand}")?;
        }
        writeln!(indenter, "CLFLUSH line size:   {} bytes", additional.cacheline_size())?;
        writeln!(indenter, "Max addressable IDs: {}", additional.max_addressable_ids)?;
        writeln!(indenter, "Local APIC ID:       {}", additional.local_apic_id)?;

        writeln!(indenter, "Features:")?;
        for register in [Register::Ecx, Register::Edx] {
            indenter.set_spaces(8);
            writeln!(indenter, "CPUID(EAX=1).{register}:")?;

            indenter.set_spaces(12);
            for feature in FEATURE_TABLE.iter().filter(|feature| feature.register == register) {
                let mark = if report.feature_flags.is_set(feature) { "[X]" } else { "[ ]" };
                writeln!(indenter, "{mark} {:<11} : {}", feature.name, feature.description)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::RecordedCpuid;

    use super::*;

    #[test]
    fn requires_leaf_1() {
        let cpuid = RecordedCpuid::new();
        assert_eq!(CpuidReport::gather(&cpuid), Err(Error::UnsupportedLeaf { leaf: 1, max_leaf: 0 }));
    }

    #[test]
    fn empty_feature_line() {
        let report = CpuidReport::from_leaves(CpuidResult::new(1, 0, 0, 0), CpuidResult::default());
        let text = report.to_string();

        assert!(text.starts_with("Maximum input value for basic CPUID information: 0x1\nCPU vendor ID: \n"));
        assert!(text.ends_with("CPU Local APIC ID: 0\nCPU features: \n"));
    }

    #[test]
    fn detailed_lists_every_feature() {
        let report = CpuidReport::from_leaves(CpuidResult::new(1, 0, 0, 0), CpuidResult::new(0, 0x0510_0800, 0x1, 0x1));
        let text = report.detailed().to_string();

        assert!(text.starts_with("CPUID info:\n    Manufacturer:        Unknown ("));
        assert!(text.contains("\n    Family info:\n        Family ID:      0x0\n"));
        assert!(text.contains("\n    CLFLUSH line size:   64 bytes\n"));
        assert!(text.contains("\n    Max addressable IDs: 16\n"));
        assert!(text.contains("\n        CPUID(EAX=1).ECX:\n            [X] SSE3        : SSE3 (Prescott New Instructions - PNI)\n"));
        assert!(text.contains("\n            [ ] PCLMULQDQ   : "));
        assert!(text.contains("\n        CPUID(EAX=1).EDX:\n            [X] FPU         : Onboard x87 FPU\n"));
        assert_eq!(text.matches("[X]").count(), 2);
        assert_eq!(text.matches("] ").count(), FEATURE_TABLE.len());
    }
}
