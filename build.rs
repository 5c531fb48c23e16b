use embed_manifest::{
    manifest::{ActiveCodePage, SupportedOS::{Windows10}, Setting},
    embed_manifest, new_manifest,
};

fn main() {
    if std::env::var_os("CARGO_CFG_WINDOWS").is_some() {
        // The processor type descriptions contain non-ASCII characters, so the console needs the UTF-8 code page
        embed_manifest(new_manifest("onca_cpuid_info.exe.manifest")
            // Remove defaults we don't care about
            .remove_dependency("Microsoft.Windows.Common-Controls")
            .remove_max_version_tested()
            // Set what we care about
            .active_code_page(ActiveCodePage::Utf8)
            .supported_os(Windows10..=Windows10) // Also includes Windows 11
            .long_path_aware(Setting::Enabled)
        )
        .expect("unable to embed manifest file");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
