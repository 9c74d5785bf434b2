//! # deepcmp derive macros
//!
//! `#[derive(Reflect)]` implements `deepcmp::Reflect` and
//! `deepcmp::StructAccess` for structs, so they can be compared field by
//! field.
//!
//! Supported attributes:
//! - `#[reflect(equal)]` on the struct publishes `PartialEq` as the `Equal`
//!   method
//! - `#[reflect(cmp)]` on the struct publishes `Ord` as the `Cmp` method
//! - `#[reflect(skip)]` on a field hides it from comparison
//! - `#[reflect(rename = "Name")]` on a field changes the name used in paths
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, LitStr,
    Member, WhereClause,
};

/// Derives `deepcmp::Reflect` and `deepcmp::StructAccess`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ContainerAttrs {
    equal: bool,
    cmp: bool,
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

struct ReflectField {
    label: String,
    member: Member,
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Reflect can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Reflect can only be derived for structs",
            ));
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Reflect requires 'static types; lifetime parameters are not supported",
        ));
    }

    let container = parse_container_attrs(&input.attrs)?;
    let fields = collect_fields(&data.fields)?;

    for param in &mut input.generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::deepcmp::Reflect));
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut reflect_where = where_clause.cloned().unwrap_or_else(|| WhereClause {
        where_token: Default::default(),
        predicates: Punctuated::new(),
    });
    if container.equal {
        reflect_where
            .predicates
            .push(parse_quote!(#name #ty_generics: ::core::cmp::PartialEq));
    }
    if container.cmp {
        reflect_where
            .predicates
            .push(parse_quote!(#name #ty_generics: ::core::cmp::Ord));
    }

    let methods = generate_methods(&container);
    let access = generate_struct_access(&fields);

    Ok(quote! {
        impl #impl_generics ::deepcmp::Reflect for #name #ty_generics #reflect_where {
            fn reflect(&self) -> ::deepcmp::Kind<'_> {
                ::deepcmp::Kind::Struct(self)
            }

            #methods
        }

        impl #impl_generics ::deepcmp::StructAccess for #name #ty_generics #where_clause {
            #access
        }
    })
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("equal") {
                parsed.equal = true;
                return Ok(());
            }
            if meta.path.is_ident("cmp") {
                parsed.cmp = true;
                return Ok(());
            }
            Err(meta.error("unknown reflect attribute on struct. Supported: equal, cmp"))
        })?;
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(lit.value());
                return Ok(());
            }
            Err(meta.error("unknown reflect attribute on field. Supported: skip, rename"))
        })?;
    }
    Ok(parsed)
}

/// Fields in declaration order, skipped ones removed. Tuple fields are
/// labelled by position.
fn collect_fields(fields: &Fields) -> syn::Result<Vec<ReflectField>> {
    let mut out = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let (member, default_label) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(syn::Index::from(index)), index.to_string()),
        };
        out.push(ReflectField {
            label: attrs.rename.unwrap_or(default_label),
            member,
        });
    }
    Ok(out)
}

fn generate_methods(container: &ContainerAttrs) -> TokenStream2 {
    if !container.equal && !container.cmp {
        return TokenStream2::new();
    }

    let mut methods = Vec::new();
    if container.equal {
        methods.push(quote! { ::deepcmp::Method::equal::<Self>() });
    }
    if container.cmp {
        methods.push(quote! { ::deepcmp::Method::cmp::<Self>() });
    }

    quote! {
        fn methods(&self) -> ::std::vec::Vec<::deepcmp::Method> {
            ::std::vec![#(#methods),*]
        }
    }
}

fn generate_struct_access(fields: &[ReflectField]) -> TokenStream2 {
    let count = fields.len();
    let arms = fields.iter().enumerate().map(|(index, field)| {
        let label = &field.label;
        let member = &field.member;
        quote! {
            #index => ::core::option::Option::Some(::deepcmp::Field::new(#label, &self.#member)),
        }
    });

    quote! {
        fn field_count(&self) -> usize {
            #count
        }

        fn field(&self, index: usize) -> ::core::option::Option<::deepcmp::Field<'_>> {
            match index {
                #(#arms)*
                _ => ::core::option::Option::None,
            }
        }
    }
}
