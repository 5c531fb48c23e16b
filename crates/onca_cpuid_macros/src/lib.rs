//! Derive macros for the enums used by `onca_cpuid`.
//!
//! The generated code refers to the traits through the `onca_cpuid` path, so the crate using these derives needs to be able to name itself that way.

use proc_macro::TokenStream;

mod derive;

/// Implement `onca_cpuid::EnumCountT` for a fieldless enum.
#[proc_macro_derive(EnumCount)]
pub fn enum_count(item: TokenStream) -> TokenStream {
    derive::enum_count(item.into()).into()
}

/// Implement `onca_cpuid::EnumFromIndexT` for a fieldless enum, honoring explicit integer discriminants.
#[proc_macro_derive(EnumFromIndex)]
pub fn enum_from_index(item: TokenStream) -> TokenStream {
    derive::enum_from_index(item.into()).into()
}

/// Implement `core::fmt::Display` for a fieldless enum.
///
/// Each variant is displayed using its `#[display("...")]` attribute, or its identifier when none is given.
#[proc_macro_derive(EnumDisplay, attributes(display))]
pub fn enum_display(item: TokenStream) -> TokenStream {
    derive::enum_display(item.into()).into()
}
