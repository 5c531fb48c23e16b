use proc_macro2::*;
use quote::quote;
use syn::*;

/// Parse the derive input and make sure it's an enum without fields.
fn parse_fieldless_enum(item: TokenStream, derive_name: &str) -> core::result::Result<(Ident, Vec<Variant>), TokenStream> {
    let input_parsed = syn::parse2::<DeriveInput>(item).map_err(|err| err.to_compile_error())?;

    let body_data = match input_parsed.data {
        Data::Enum(body) => body,
        _ => {
            let msg = format!("{derive_name} can only be derived for an enum");
            return Err(quote!( compile_error!(#msg); ));
        }
    };

    if let Some(variant) = body_data.variants.iter().find(|variant| !matches!(variant.fields, Fields::Unit)) {
        let msg = format!("{derive_name} does not support variants with fields (`{}`)", variant.ident);
        return Err(quote!( compile_error!(#msg); ));
    }

    Ok((input_parsed.ident, body_data.variants.into_iter().collect()))
}

pub fn enum_count(item: TokenStream) -> TokenStream {
    let (ident, variants) = match parse_fieldless_enum(item, "EnumCount") {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let count = variants.len();

    quote!{
        impl onca_cpuid::EnumCountT for #ident {
            const COUNT: usize = #count;
        }
    }
}

pub fn enum_from_index(item: TokenStream) -> TokenStream {
    let (ident, variants) = match parse_fieldless_enum(item, "EnumFromIndex") {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let mut members = Vec::with_capacity(variants.len());
    let mut indices = Vec::with_capacity(variants.len());
    let mut next_idx = 0usize;
    for variant in variants {
        let idx = match &variant.discriminant {
            Some((_, Expr::Lit(ExprLit { lit: Lit::Int(int), .. }))) => match int.base10_parse::<usize>() {
                Ok(int) => int,
                Err(err) => return err.to_compile_error(),
            },
            Some(_) => return quote!(compile_error!("Only integer literal discriminants are supported by EnumFromIndex");),
            None => next_idx,
        };

        members.push(variant.ident);
        indices.push(idx);
        next_idx = idx + 1;
    }

    quote!{
        impl onca_cpuid::EnumFromIndexT for #ident {
            fn from_idx(idx: usize) -> Option<Self> {
                match idx {
                    #(#indices => Some(Self::#members),)*
                    _ => None,
                }
            }

            fn from_idx_or(idx: usize, default: Self) -> Self {
                Self::from_idx(idx).unwrap_or(default)
            }
        }
    }
}

pub fn enum_display(item: TokenStream) -> TokenStream {
    let (ident, variants) = match parse_fieldless_enum(item, "EnumDisplay") {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let mut members = Vec::with_capacity(variants.len());
    let mut names = Vec::with_capacity(variants.len());

    for variant in &variants {
        members.push(variant.ident.clone());
        let name = variant.attrs.iter()
            .find(|attr| attr.path().is_ident("display"))
            .map(|attr| attr.parse_args::<LitStr>().map_or_else(|err| err.to_compile_error(), |parsed| {
                let val = parsed.value();
                quote!(#val)
            }))
            .unwrap_or_else(|| {
                let val = variant.ident.to_string();
                quote!(#val)
            });
        names.push(name);
    }

    quote!{
        impl core::fmt::Display for #ident {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    #(#ident::#members => core::fmt::Display::fmt(#names, f),)*
                }
            }
        }
    }
}
