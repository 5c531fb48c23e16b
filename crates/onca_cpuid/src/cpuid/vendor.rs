use core::fmt;

use super::CpuidResult;

/// Raw 12-byte vendor identification string, as stored in `ebx`, `edx`, and `ecx` of leaf 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct VendorId([u8; 12]);

impl VendorId {
    pub const fn new(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Assemble the vendor id from its registers, in the order the processor expects them to be read.
    pub fn from_registers(ebx: u32, edx: u32, ecx: u32) -> Self {
        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&ebx.to_le_bytes());
        bytes[4..8].copy_from_slice(&edx.to_le_bytes());
        bytes[8..12].copy_from_slice(&ecx.to_le_bytes());
        Self(bytes)
    }

    /// Split the vendor id back into its registers: `(ebx, edx, ecx)`
    pub fn to_registers(&self) -> (u32, u32, u32) {
        let [b0, b1, b2, b3, d0, d1, d2, d3, c0, c1, c2, c3] = self.0;
        (
            u32::from_le_bytes([b0, b1, b2, b3]),
            u32::from_le_bytes([d0, d1, d2, d3]),
            u32::from_le_bytes([c0, c1, c2, c3]),
        )
    }

    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Bytes up to, but not including, the first NUL
    pub fn trimmed_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        &self.0[..len]
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.trimmed_bytes()))
    }
}

/// CPU manufacturer, recognized from the vendor id.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Manufacturer {
    /// Early engineering samples for the AMD K5 processor: "AMDisbetter!"
    EarlyAMD,
    /// AMD: "AuthenticAMD"
    AMD,
    /// IDT WinChip/Centaur (including some VIA and Zhaoxin CPUs): "CentaurHauls"
    Centaur,
    /// Cyrix/early STMicroelectronics and IBM: "CyrixInstead"
    Cyrix,
    /// Intel: "GenuineIntel"
    Intel,
    /// Intel (rare): "GenuineIotel"
    Iotel,
    /// Transmeta: "TransmetaCPU"
    Transmeta,
    /// Transmeta: "GenuineTMx86"
    Transmeta2,
    /// National Semiconductor: "Geode by NSC"
    NationalSemiconductor,
    /// NexGen: "NexGenDriven"
    NexGen,
    /// Rise: "RiseRiseRise"
    Rise,
    /// SiS (Silicon Integrated Systems): "SiS SiS SiS "
    SIS,
    /// UMC (United Microelectronics Corporation): "UMC UMC UMC "
    UMC,
    /// VIA (VIA Technologies Inc.): "VIA VIA VIA "
    VIA,
    /// DM&P Vortex86: "Vortex86 SoC"
    DmPVortex86,
    /// Zhaoxin: "  Shanghai  "
    Zhaoxin,
    /// Hygon: "HygonGenuine"
    Hygon,
    /// RDC Semiconductor Co. Ltd.: "Genuine  RDC"
    RDC,
    /// MCST Elbrus: "E2K MACHINE\0"
    MCST,
    /// ao486 CPU: "MiSTer AO486"
    AO486,
    /// Bhyve: "bhyve bhyve "
    Bhyve,
    /// KVM (Kernel-based Virtual Machine): "KVMKVMKVM\0\0\0"
    KVM,
    /// QEMU (Quick EMUlator): "TCGTCGTCGTCG"
    QEMU,
    /// Microsoft Hyper-V or Windows Virtual PC: "Microsoft Hv"
    HyperV,
    /// Microsoft x86-to-ARM: "MicrosoftXTA"
    MsXTA,
    /// Parallels: " lrpepyh  vr"
    Parallels,
    /// VMware: "VMwareVMware"
    VMware,
    /// Xen HVM: "XenVMMXenVMM"
    XenHVM,
    /// Project ACRN: "ACRNACRNACRN"
    ProjectACRN,
    /// QNX hypervisor: " QNXQVMBSQG "
    QNX,
    /// Apple Rosetta 2: "VirtualApple"
    AppleRosetta,
    /// Unknown
    Unknown(VendorId),
}

impl Manufacturer {
    pub fn from_vendor_id(vendor_id: &VendorId) -> Self {
        match vendor_id.as_bytes() {
            b"AMDisbetter!"      => Manufacturer::EarlyAMD,
            b"AuthenticAMD"      => Manufacturer::AMD,
            b"CentaurHauls"      => Manufacturer::Centaur,
            b"CyrixInstead"      => Manufacturer::Cyrix,
            b"GenuineIntel"      => Manufacturer::Intel,
            b"GenuineIotel"      => Manufacturer::Iotel,
            b"TransmetaCPU"      => Manufacturer::Transmeta,
            b"GenuineTMx86"      => Manufacturer::Transmeta2,
            b"Geode by NSC"      => Manufacturer::NationalSemiconductor,
            b"NexGenDriven"      => Manufacturer::NexGen,
            b"RiseRiseRise"      => Manufacturer::Rise,
            b"SiS SiS SiS "      => Manufacturer::SIS,
            b"UMC UMC UMC "      => Manufacturer::UMC,
            b"VIA VIA VIA "      => Manufacturer::VIA,
            b"Vortex86 SoC"      => Manufacturer::DmPVortex86,
            b"  Shanghai  "      => Manufacturer::Zhaoxin,
            b"HygonGenuine"      => Manufacturer::Hygon,
            b"Genuine  RDC"      => Manufacturer::RDC,
            b"E2K MACHINE\0"     => Manufacturer::MCST,
            b"MiSTer AO486"      => Manufacturer::AO486,
            b"bhyve bhyve "      => Manufacturer::Bhyve,
            b"KVMKVMKVM\0\0\0"   => Manufacturer::KVM,
            b"TCGTCGTCGTCG"      => Manufacturer::QEMU,
            b"Microsoft Hv"      => Manufacturer::HyperV,
            b"MicrosoftXTA"      => Manufacturer::MsXTA,
            b" lrpepyh  vr"      => Manufacturer::Parallels,
            b"VMwareVMware"      => Manufacturer::VMware,
            b"XenVMMXenVMM"      => Manufacturer::XenHVM,
            b"ACRNACRNACRN"      => Manufacturer::ProjectACRN,
            b" QNXQVMBSQG "      => Manufacturer::QNX,
            b"VirtualApple"      => Manufacturer::AppleRosetta,
            _                    => Manufacturer::Unknown(*vendor_id),
        }
    }

    /// Is the vendor id one reported by a hypervisor or translation layer, instead of a physical processor
    pub fn is_virtual(&self) -> bool {
        matches!(self,
            Manufacturer::Bhyve |
            Manufacturer::KVM |
            Manufacturer::QEMU |
            Manufacturer::HyperV |
            Manufacturer::MsXTA |
            Manufacturer::Parallels |
            Manufacturer::VMware |
            Manufacturer::XenHVM |
            Manufacturer::ProjectACRN |
            Manufacturer::QNX |
            Manufacturer::AppleRosetta
        )
    }
}

impl Default for Manufacturer {
    fn default() -> Self {
        Manufacturer::Unknown(VendorId::default())
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Manufacturer::EarlyAMD              => f.write_str("AMD, early engineering sample of the AMD K5 (\"AMDisbetter!\")"),
            Manufacturer::AMD                   => f.write_str("AMD (\"AuthenticAMD\")"),
            Manufacturer::Centaur               => f.write_str("IDT WinChip/Centaur, including some VIA and Zhaoxin CPUs (\"CentaurHauls\")"),
            Manufacturer::Cyrix                 => f.write_str("Cyrix/early STMicroelectronics and IBM (\"CyrixInstead\")"),
            Manufacturer::Intel                 => f.write_str("Intel (\"GenuineIntel\")"),
            Manufacturer::Iotel                 => f.write_str("Intel (\"GenuineIotel\")"),
            Manufacturer::Transmeta             => f.write_str("Transmeta (\"TransmetaCPU\")"),
            Manufacturer::Transmeta2            => f.write_str("Transmeta (\"GenuineTMx86\")"),
            Manufacturer::NationalSemiconductor => f.write_str("National Semiconductor (\"Geode by NSC\")"),
            Manufacturer::NexGen                => f.write_str("NexGen (\"NexGenDriven\")"),
            Manufacturer::Rise                  => f.write_str("Rise (\"RiseRiseRise\")"),
            Manufacturer::SIS                   => f.write_str("Silicon Integrated Systems (\"SiS SiS SiS \")"),
            Manufacturer::UMC                   => f.write_str("United Microelectronics Corporation (\"UMC UMC UMC \")"),
            Manufacturer::VIA                   => f.write_str("VIA Technologies Inc. (\"VIA VIA VIA \")"),
            Manufacturer::DmPVortex86           => f.write_str("DM&P Vortex86 (\"Vortex86 SoC\")"),
            Manufacturer::Zhaoxin               => f.write_str("Zhaoxin (\"  Shanghai  \")"),
            Manufacturer::Hygon                 => f.write_str("Hygon (\"HygonGenuine\")"),
            Manufacturer::RDC                   => f.write_str("RDC Semiconductor Co. Ltd. (\"Genuine  RDC\")"),
            Manufacturer::MCST                  => f.write_str("MCST Elbrus (\"E2K MACHINE\")"),
            Manufacturer::AO486                 => f.write_str("ao486 CPU (\"MiSTer AO486\")"),
            Manufacturer::Bhyve                 => f.write_str("bhyve (\"bhyve bhyve \")"),
            Manufacturer::KVM                   => f.write_str("KVM (Kernel-based Virtual Machine) (\"KVMKVMKVM\\0\\0\\0\")"),
            Manufacturer::QEMU                  => f.write_str("QEMU (Quick Emulator) (\"TCGTCGTCGTCG\")"),
            Manufacturer::HyperV                => f.write_str("Microsoft Hyper-V (\"Microsoft Hv\")"),
            Manufacturer::MsXTA                 => f.write_str("Microsoft x86-to-ARM (\"MicrosoftXTA\")"),
            Manufacturer::Parallels             => f.write_str("Parallels (\" lrpepyh  vr\")"),
            Manufacturer::VMware                => f.write_str("VMware (\"VMwareVMware\")"),
            Manufacturer::XenHVM                => f.write_str("Xen HVM (\"XenVMMXenVMM\")"),
            Manufacturer::ProjectACRN           => f.write_str("Project ACRN (\"ACRNACRNACRN\")"),
            Manufacturer::QNX                   => f.write_str("QNX (\" QNXQVMBSQG \")"),
            Manufacturer::AppleRosetta          => f.write_str("Apple Rosetta 2 (\"VirtualApple\")"),
            Manufacturer::Unknown(id)           => {
                let [b0, b1, b2, b3, b4, b5, b6, b7, b8, b9, b10, b11] = id.as_bytes();
                write!(f, "Unknown ({b0:X},{b1:X},{b2:X},{b3:X},{b4:X},{b5:X},{b6:X},{b7:X},{b8:X},{b9:X},{b10:X},{b11:X})")
            },
        }
    }
}

/// Info returned by leaf 0
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct VendorInfo {
    /// Highest leaf supported for basic CPUID information
    pub max_basic_leaf: u32,
    /// Vendor identification string
    pub vendor_id:      VendorId,
}

impl VendorInfo {
    pub fn from_leaf(res: CpuidResult) -> Self {
        Self {
            max_basic_leaf: res.eax,
            vendor_id: VendorId::from_registers(res.ebx, res.edx, res.ecx),
        }
    }

    pub fn manufacturer(&self) -> Manufacturer {
        Manufacturer::from_vendor_id(&self.vendor_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // "GenuineIntel" as returned by leaf 0
    const INTEL_EBX: u32 = 0x756E_6547;
    const INTEL_EDX: u32 = 0x4965_6E69;
    const INTEL_ECX: u32 = 0x6C65_746E;

    #[test]
    fn assembles_ebx_edx_ecx() {
        let info = VendorInfo::from_leaf(CpuidResult::new(0x16, INTEL_EBX, INTEL_ECX, INTEL_EDX));

        assert_eq!(info.max_basic_leaf, 0x16);
        assert_eq!(info.vendor_id.as_bytes(), b"GenuineIntel");
        assert_eq!(info.vendor_id.to_string(), "GenuineIntel");
        assert_eq!(info.manufacturer(), Manufacturer::Intel);
    }

    #[test]
    fn stops_at_nul() {
        let kvm = VendorId::new(*b"KVMKVMKVM\0\0\0");
        assert_eq!(kvm.to_string(), "KVMKVMKVM");
        assert_eq!(kvm.trimmed_bytes(), b"KVMKVMKVM");

        let manufacturer = Manufacturer::from_vendor_id(&kvm);
        assert_eq!(manufacturer, Manufacturer::KVM);
        assert!(manufacturer.is_virtual());
    }

    #[test]
    fn registers_round_trip() {
        let vendor_id = VendorId::from_registers(0x0000_0805, 0, 0);
        assert_eq!(vendor_id.as_bytes(), &[0x05, 0x08, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(vendor_id.to_registers(), (0x0000_0805, 0, 0));

        let (ebx, edx, ecx) = VendorId::new(*b"AuthenticAMD").to_registers();
        assert_eq!(VendorId::from_registers(ebx, edx, ecx).as_bytes(), b"AuthenticAMD");
    }

    #[test]
    fn unknown_vendor() {
        let vendor_id = VendorId::new(*b"NotAVendor!!");
        let manufacturer = Manufacturer::from_vendor_id(&vendor_id);

        assert_eq!(manufacturer, Manufacturer::Unknown(vendor_id));
        assert!(!manufacturer.is_virtual());
        assert_eq!(manufacturer.to_string(), "Unknown (4E,6F,74,41,56,65,6E,64,6F,72,21,21)");
    }
}
