use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, GenericArgument, Ident,
    PathArguments, Type, Variant,
};

/// What the expansion needs to know about one enum variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    contextual: bool,
    cfgs: Vec<&'a Attribute>,
}

impl ErrorVariant<'_> {
    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("stk_error can only be applied to enums"); };
    };

    let variants = match data.variants.iter().map(inspect_variant).collect::<Result<Vec<_>, _>>()
    {
        Ok(variants) => variants,
        Err(err) => return err.to_compile_error(),
    };

    if let Some(orphan) = variants.iter().find(|v| v.source.is_some() && !v.contextual) {
        return syn::Error::new_spanned(
            orphan.ident,
            "stk_error requires `context: Option<Cow<'static, str>>` next to a source field",
        )
        .to_compile_error();
    }

    let derives = missing_derives(&input);
    let context_trait = context_trait(name, &ext, &variants);
    let source_impls = variants.iter().filter_map(|v| source_conversion(name, &ext, v));
    let message_impls = variants.iter().find(|v| v.is_internal()).map(|v| message_conversion(name, v));

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #message_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            match context {
                Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn inspect_variant(variant: &Variant) -> Result<ErrorVariant<'_>, syn::Error> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "stk_error variants must use named fields (`source`, `message`, `context`)",
        ));
    };

    let contextual = match named(fields, "context") {
        Some(field) if is_cow_context(&field.ty) => true,
        Some(field) => {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "`context` must be typed Option<Cow<'static, str>>",
            ));
        },
        None => false,
    };

    let source = fields
        .named
        .iter()
        .find(|field| {
            field.ident.as_ref().is_some_and(|ident| ident == "source")
                || has_attr(field, "source")
                || has_attr(field, "from")
        })
        .and_then(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)));

    Ok(ErrorVariant {
        ident: &variant.ident,
        source,
        contextual,
        cfgs: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
    })
}

fn named<'a>(fields: &'a FieldsNamed, name: &str) -> Option<&'a Field> {
    fields.named.iter().find(|field| field.ident.as_ref().is_some_and(|ident| ident == name))
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                present.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { quote! {} } else { quote! { #[derive(#(#derives),*)] } }
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.contextual).map(|v| {
        let ident = v.ident;
        let cfgs = &v.cfgs;
        quote! { #(#cfgs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {},
                    }
                    err
                })
            }
        }
    }
}

fn source_conversion(name: &Ident, ext: &Ident, variant: &ErrorVariant<'_>) -> Option<TokenStream> {
    if variant.is_internal() {
        return None;
    }
    let (field, ty) = variant.source?;
    let ident = variant.ident;
    let cfgs = &variant.cfgs;

    Some(quote! {
        #(#cfgs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfgs)*
        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn message_conversion(name: &Ident, internal: &ErrorVariant<'_>) -> TokenStream {
    let cfgs = &internal.cfgs;

    quote! {
        #(#cfgs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfgs)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

/// Matches `Option<Cow<'static, str>>` by its last path segments.
fn is_cow_context(ty: &Type) -> bool {
    let Some(inner) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(cow) = inner else {
        return false;
    };
    let Some(segment) = cow.path.segments.last() else {
        return false;
    };
    if segment.ident != "Cow" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let lifetime_ok =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );

    lifetime_ok && str_ok
}

fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
