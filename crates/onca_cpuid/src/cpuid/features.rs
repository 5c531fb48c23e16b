use core::fmt;

use onca_cpuid_macros::EnumDisplay;
use static_assertions::{const_assert, const_assert_eq};

/// Register of leaf 1 containing a feature bit
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumDisplay)]
pub enum Register {
    #[display("ECX")]
    Ecx,
    #[display("EDX")]
    Edx,
}

/// A named feature, and the bit in leaf 1 that reports it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FeatureBit {
    pub name:        &'static str,
    pub register:    Register,
    pub bit:         u8,
    pub description: &'static str,
}

impl FeatureBit {
    const fn ecx(name: &'static str, bit: u8, description: &'static str) -> Self {
        Self { name, register: Register::Ecx, bit, description }
    }

    const fn edx(name: &'static str, bit: u8, description: &'static str) -> Self {
        Self { name, register: Register::Edx, bit, description }
    }

    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }
}

/// All features reported by leaf 1, in reporting order.
///
/// Reserved bits (ecx bit 16 and 31, edx bit 10, 20, and 30) are not listed and are ignored when decoding.
pub const FEATURE_TABLE: &[FeatureBit] = &[
    // cpuid(eax=1).ecx
    FeatureBit::ecx("SSE3",        0,  "SSE3 (Prescott New Instructions - PNI)"),
    FeatureBit::ecx("PCLMULQDQ",   1,  "`PCLMULQDQ` (carry-less multiply) instruction"),
    FeatureBit::ecx("DTES64",      2,  "64-bit debug store"),
    FeatureBit::ecx("MONITOR",     3,  "`MONITOR` and `MWAIT` instructions"),
    FeatureBit::ecx("DSCPL",       4,  "CPL qualified debug store"),
    FeatureBit::ecx("VMX",         5,  "Virtual Machine eXtensions"),
    FeatureBit::ecx("SMX",         6,  "Safer Mode eXtensions (`GETSEC` instruction)"),
    FeatureBit::ecx("EIST",        7,  "Enhanced Intel SpeedStep technology"),
    FeatureBit::ecx("TM2",         8,  "Thermal Monitor 2"),
    FeatureBit::ecx("SSSE3",       9,  "Supplemental SSE3 instructions"),
    FeatureBit::ecx("CNXTID",      10, "L1 Context ID"),
    FeatureBit::ecx("SDBG",        11, "Silicon Debug interface"),
    FeatureBit::ecx("FMA",         12, "Fused Multiply-Add (FMA3)"),
    FeatureBit::ecx("CMPXCHG16B",  13, "`CMPXCHG16B` instruction"),
    FeatureBit::ecx("xTPR",        14, "Can disable sending task priority messages"),
    FeatureBit::ecx("PDCM",        15, "Perfmon & debug capability"),
    FeatureBit::ecx("PCID",        17, "Process context identifiers (`CR4` bit 17)"),
    FeatureBit::ecx("DCA",         18, "Direct Cache Access for DMA writes"),
    FeatureBit::ecx("SSE4_1",      19, "SSE4.1 instructions"),
    FeatureBit::ecx("SSE4_2",      20, "SSE4.2 instructions"),
    FeatureBit::ecx("x2APIC",      21, "x2APIC (enhanced APIC)"),
    FeatureBit::ecx("MOVBE",       22, "`MOVBE` instruction (big-endian)"),
    FeatureBit::ecx("POPCNT",      23, "`POPCNT` instruction"),
    FeatureBit::ecx("TSCDeadline", 24, "APIC implements one-shot operation using a TSC deadline value"),
    FeatureBit::ecx("AES",         25, "AES instruction set"),
    FeatureBit::ecx("XSAVE",       26, "`XSAVE`, `XRSTOR`, `XSETBV`, and `XGETBV` instructions"),
    FeatureBit::ecx("OSXSAVE",     27, "`XSAVE` enabled by the OS"),
    FeatureBit::ecx("AVX",         28, "Advanced Vector Extensions (256-bit SIMD)"),
    FeatureBit::ecx("F16C",        29, "Floating point conversion instructions to/from FP16 format"),
    FeatureBit::ecx("RDRND",       30, "`RDRAND` (on-chip random number generator) instruction"),

    // cpuid(eax=1).edx
    FeatureBit::edx("FPU",         0,  "Onboard x87 FPU"),
    FeatureBit::edx("VME",         1,  "Virtual 8086 mode extensions (such as VIF, VIP, and PVI)"),
    FeatureBit::edx("DE",          2,  "Debugging Extensions (`CR4` bit 3)"),
    FeatureBit::edx("PSE",         3,  "Page Size Extension (4MiB pages)"),
    FeatureBit::edx("TSC",         4,  "Time Stamp Counter"),
    FeatureBit::edx("MSR",         5,  "Model-specific registers and `RDMSR`/`WRMSR` instructions"),
    FeatureBit::edx("PAE",         6,  "Physical Address Extension"),
    FeatureBit::edx("MCE",         7,  "Machine Check Exception"),
    FeatureBit::edx("CX8",         8,  "`CMPXCHG8B` (compare-and-swap) instruction"),
    FeatureBit::edx("APIC",        9,  "Onboard Advanced Programmable Interrupt Controller"),
    FeatureBit::edx("SEP",         11, "`SYSENTER` and `SYSEXIT` fast system call instructions"),
    FeatureBit::edx("MTRR",        12, "Memory Type Range Registers"),
    FeatureBit::edx("PGE",         13, "Page Global Enable bit in `CR4`"),
    FeatureBit::edx("MCA",         14, "Machine Check Architecture"),
    FeatureBit::edx("CMOV",        15, "Conditional move `CMOV`, `FCMOV`, and `FCOMI` instructions"),
    FeatureBit::edx("PAT",         16, "Page Attribute Table"),
    FeatureBit::edx("PSE36",       17, "36-bit Page Size Extension"),
    FeatureBit::edx("PSN",         18, "Processor Serial Number supported and enabled"),
    FeatureBit::edx("CLFSH",       19, "`CLFLUSH` cache line flush instruction"),
    FeatureBit::edx("DS",          21, "Debug store: save trace of executed jumps"),
    FeatureBit::edx("ACPI",        22, "Onboard thermal control MSRs for ACPI"),
    FeatureBit::edx("MMX",         23, "MMX instructions (64-bit SIMD)"),
    FeatureBit::edx("FXSR",        24, "`FXSAVE` and `FXRSTOR` instructions, `CR4` bit 9"),
    FeatureBit::edx("SSE",         25, "Streaming SIMD Extensions (128-bit SIMD)"),
    FeatureBit::edx("SSE2",        26, "SSE2 instructions"),
    FeatureBit::edx("SS",          27, "CPU cache implements self-snoop"),
    FeatureBit::edx("HTT",         28, "Max APIC IDs reserved field is valid"),
    FeatureBit::edx("TM",          29, "Thermal monitor automatically limits temperature"),
    FeatureBit::edx("PBE",         31, "Pending Break Enable (PBE# pin) wakeup capability"),
];

const fn count_in(table: &[FeatureBit], register: Register) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i].register as u8 == register as u8 {
            count += 1;
        }
        i += 1;
    }
    count
}

/// Every bit is in range and no two entries share a (register, bit) pair
const fn is_injective(table: &[FeatureBit]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if table[i].bit >= 32 {
            return false;
        }

        let mut j = i + 1;
        while j < table.len() {
            if table[i].register as u8 == table[j].register as u8 && table[i].bit == table[j].bit {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const_assert!(is_injective(FEATURE_TABLE));
const_assert_eq!(count_in(FEATURE_TABLE, Register::Ecx), 30);
const_assert_eq!(count_in(FEATURE_TABLE, Register::Edx), 29);

/// Feature flags reported by leaf 1
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct FeatureFlags {
    ecx: u32,
    edx: u32,
}

impl FeatureFlags {
    pub const fn from_registers(ecx: u32, edx: u32) -> Self {
        Self { ecx, edx }
    }

    /// Get the raw value of a register
    pub const fn register(&self, register: Register) -> u32 {
        match register {
            Register::Ecx => self.ecx,
            Register::Edx => self.edx,
        }
    }

    pub const fn is_set(&self, feature: &FeatureBit) -> bool {
        self.register(feature.register) & feature.mask() != 0
    }

    /// Check if the feature with the given name is set, unknown names are never set
    pub fn contains(&self, name: &str) -> bool {
        FEATURE_TABLE.iter().any(|feature| feature.name == name && self.is_set(feature))
    }

    /// Iterate over the set features, in table order
    pub fn iter(&self) -> impl Iterator<Item = &'static FeatureBit> {
        let flags = *self;
        FEATURE_TABLE.iter().filter(move |feature| flags.is_set(feature))
    }

    /// Iterate over the names of the set features, in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|feature| feature.name)
    }
}

/// Space separated names of the set features
impl fmt::Display for FeatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, name) in self.names().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_is_unique() {
        assert!(is_injective(FEATURE_TABLE));

        let names: HashSet<_> = FEATURE_TABLE.iter().map(|feature| feature.name).collect();
        assert_eq!(names.len(), FEATURE_TABLE.len());

        let positions: HashSet<_> = FEATURE_TABLE.iter().map(|feature| (feature.register, feature.bit)).collect();
        assert_eq!(positions.len(), FEATURE_TABLE.len());
    }

    #[test]
    fn detects_duplicates() {
        let table = [
            FeatureBit::ecx("A", 3, ""),
            FeatureBit::edx("B", 3, ""),
            FeatureBit::ecx("C", 3, ""),
        ];
        assert!(!is_injective(&table));
        assert!(is_injective(&table[..2]));
        assert!(!is_injective(&[FeatureBit::edx("D", 32, "")]));
    }

    #[test]
    fn single_sse3() {
        let flags = FeatureFlags::from_registers(0x1, 0);

        assert_eq!(flags.names().collect::<Vec<_>>(), ["SSE3"]);
        assert_eq!(flags.to_string(), "SSE3");
        assert!(flags.contains("SSE3"));
        assert!(!flags.contains("FPU"));
        assert!(!flags.contains("NotAFeature"));
    }

    #[test]
    fn ecx_before_edx() {
        // FPU (edx 0), SSE2 (edx 26), SSE3 (ecx 0), AVX (ecx 28)
        let flags = FeatureFlags::from_registers(0x1000_0001, 0x0400_0001);
        assert_eq!(flags.to_string(), "SSE3 AVX FPU SSE2");
    }

    #[test]
    fn reserved_bits_are_ignored() {
        let reserved_ecx = (1 << 16) | (1 << 31);
        let reserved_edx = (1 << 10) | (1 << 20) | (1 << 30);
        let flags = FeatureFlags::from_registers(reserved_ecx, reserved_edx);

        assert_eq!(flags.iter().count(), 0);
        assert_eq!(flags.to_string(), "");
    }

    #[test]
    fn all_bits_set() {
        let flags = FeatureFlags::from_registers(u32::MAX, u32::MAX);

        assert_eq!(flags.iter().count(), FEATURE_TABLE.len());
        assert!(flags.names().eq(FEATURE_TABLE.iter().map(|feature| feature.name)));
        assert_eq!(flags.register(Register::Ecx), u32::MAX);
    }
}
