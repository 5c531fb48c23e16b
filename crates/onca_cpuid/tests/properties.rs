use onca_cpuid::{AdditionalFeatureInfo, FeatureFlags, VendorId, VersionInfo, FEATURE_TABLE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn family_folds_extended_family_only_for_0f(eax in any::<u32>()) {
        let version = VersionInfo::from_eax(eax);
        let family_id = ((eax >> 8) & 0xF) as u16;
        let extended_family_id = ((eax >> 20) & 0xFF) as u16;

        let expected = if family_id == 0xF { extended_family_id + 0xF } else { family_id };
        prop_assert_eq!(version.family(), expected);
    }

    #[test]
    fn model_folds_extended_model_for_06_and_0f(eax in any::<u32>()) {
        let version = VersionInfo::from_eax(eax);
        let model_id = ((eax >> 4) & 0xF) as u16;
        let extended_model_id = ((eax >> 16) & 0xF) as u16;

        let expected = if model_id == 0x6 || model_id == 0xF { (extended_model_id << 4) + model_id } else { model_id };
        prop_assert_eq!(version.model(), expected);
        prop_assert!(version.model() <= 0xFF);
    }

    #[test]
    fn cacheline_is_multiple_of_8(ebx in any::<u32>()) {
        let size = AdditionalFeatureInfo::from_ebx(ebx).cacheline_size();
        prop_assert_eq!(size % 8, 0);
        prop_assert!(size <= 2040);
    }

    #[test]
    fn vendor_round_trip(ebx in any::<u32>(), edx in any::<u32>(), ecx in any::<u32>()) {
        let vendor_id = VendorId::from_registers(ebx, edx, ecx);
        prop_assert_eq!(vendor_id.to_registers(), (ebx, edx, ecx));
        prop_assert_eq!(VendorId::new(*vendor_id.as_bytes()), vendor_id);
    }

    #[test]
    fn features_are_ordered_subset_of_table(ecx in any::<u32>(), edx in any::<u32>()) {
        let flags = FeatureFlags::from_registers(ecx, edx);
        let expected = FEATURE_TABLE.iter()
            .filter(|feature| flags.register(feature.register) & (1 << feature.bit) != 0)
            .map(|feature| feature.name);

        prop_assert!(flags.names().eq(expected));
        prop_assert!(!flags.to_string().ends_with(' '));
    }
}
