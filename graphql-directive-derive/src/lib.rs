use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, DeriveInput, Expr, Lit, Meta};

/// Registers a `ResolverClass` under `#[class(name = "...")]`, or under the
/// type's own name when the attribute is missing. The type must implement
/// `Default`.
#[proc_macro_derive(RegisterClass, attributes(class))]
pub fn derive_register_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let class_name = match registered_name(&input.attrs, "class") {
        Ok(class_name) => class_name.unwrap_or_else(|| name.to_string()),
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        ::graphql_directive::inventory::submit! {
            ::graphql_directive::ClassRegistration::new(
                #class_name,
                <#name as ::graphql_directive::ResolverClass>::methods,
                || Box::new(<#name as ::core::default::Default>::default())
                    as Box<dyn ::graphql_directive::ResolverClass>,
            )
        }
    };
    TokenStream::from(expanded)
}

/// Registers a model class name so `@model`-style directives can find it.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let model_name = match registered_name(&input.attrs, "model") {
        Ok(model_name) => model_name.unwrap_or_else(|| name.to_string()),
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        ::graphql_directive::inventory::submit! {
            ::graphql_directive::ModelRegistration::new(#model_name)
        }
    };
    TokenStream::from(expanded)
}

fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

fn registered_name(attrs: &[Attribute], attr_name: &str) -> syn::Result<Option<String>> {
    let Some(attr) = find_attribute(attrs, attr_name) else {
        return Ok(None);
    };

    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            format!("expected #[{}(name = \"...\")]", attr_name),
        ));
    };

    let nested = list.parse_args_with(
        syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
    )?;

    for meta in nested {
        if let Meta::NameValue(nv) = meta {
            if nv.path.is_ident("name") {
                if let Expr::Lit(expr_lit) = &nv.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        if lit_str.value().is_empty() {
                            return Err(syn::Error::new_spanned(lit_str, "name must not be empty"));
                        }
                        return Ok(Some(lit_str.value()));
                    }
                }
                return Err(syn::Error::new_spanned(&nv.value, "name must be a string literal"));
            }
        }
    }

    Ok(None)
}
