//! ProtoMessage derive macro implementation

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Expr, GenericArgument, Lit, PathArguments, Type};

use crate::parse::{parse_proto_message, ProtoClassArgs, ProtoFieldArgs};

/// Extract the inner type from `FieldSlot<T>` if present, otherwise return the type as-is
fn extract_inner_type(ty: &Type) -> &Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "FieldSlot" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return inner;
                    }
                }
            }
        }
    }
    ty
}

/// A default expression whose value can also be recorded as untyped metadata
fn literal_default(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(_) | Lit::Int(_) | Lit::Float(_) | Lit::Bool(_) => Some(expr),
            _ => None,
        },
        _ => None,
    }
}

/// Generate the ProtoMessage implementation
pub fn derive_proto_message(input: DeriveInput) -> TokenStream {
    match parse_proto_message(&input) {
        Ok(args) => generate_impl(args),
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: ProtoClassArgs) -> TokenStream {
    let struct_name = &args.ident;

    // Get fields
    let fields = match &args.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        _ => {
            return syn::Error::new_spanned(
                &args.ident,
                "ProtoMessage can only be derived for structs",
            )
            .to_compile_error()
        }
    };

    // The raw cache field is where setters signal staleness
    if !fields.iter().any(|f| f.is_raw_field()) {
        return syn::Error::new_spanned(
            &args.ident,
            "ProtoMessage structs need a `raw: RawCache` field",
        )
        .to_compile_error();
    }

    // Generate getter/setter methods
    let accessors: Vec<_> = fields
        .iter()
        .filter(|f| f.is_proto_field())
        .map(|f| generate_accessors(struct_name, f))
        .collect();

    // Generate constants
    let constants = generate_constants(&args);

    // Generate the schema function body
    let schema_fn = generate_schema_fn(&args, fields);

    quote! {
        impl #struct_name {
            #constants
        }

        #(#accessors)*

        impl ::protoclass_core::schema::ProtoMessage for #struct_name {
            #schema_fn

            fn raw_cache(&self) -> &::protoclass_core::message::RawCache {
                &self.raw
            }

            fn raw_cache_mut(&mut self) -> &mut ::protoclass_core::message::RawCache {
                &mut self.raw
            }
        }
    }
}

fn generate_constants(args: &ProtoClassArgs) -> TokenStream {
    let local_name = match &args.name {
        Some(name) => name.clone(),
        None => args.ident.to_string(),
    };

    quote! {
        /// Wire-level schema name
        pub const LOCAL_NAME: &'static str = #local_name;
    }
}

fn generate_schema_fn(args: &ProtoClassArgs, fields: &[ProtoFieldArgs]) -> TokenStream {
    let struct_name = &args.ident;

    let name_setter = args.name.as_ref().map(|name| {
        quote! {
            builder = builder.name(#name);
        }
    });

    let extends_setter = args.extends.as_ref().map(|parent| {
        quote! {
            builder = builder.extending(
                <#parent as ::protoclass_core::schema::ProtoMessage>::class_schema(),
            );
        }
    });

    let declares: Vec<_> = fields
        .iter()
        .filter(|f| f.is_proto_field())
        .map(generate_declare)
        .collect();

    quote! {
        fn class_schema() -> &'static ::protoclass_core::schema::ClassSchema {
            static SCHEMA: ::std::sync::OnceLock<
                ::std::sync::Arc<::protoclass_core::schema::ClassSchema>,
            > = ::std::sync::OnceLock::new();

            ::std::sync::Arc::as_ref(SCHEMA.get_or_init(|| {
                #[allow(unused_mut)]
                let mut builder =
                    ::protoclass_core::schema::SchemaBuilder::for_type::<Self>();
                #name_setter
                #extends_setter
                #(#declares)*
                builder
                    .finalize()
                    .expect(concat!("invalid proto schema for ", stringify!(#struct_name)))
            }))
        }
    }
}

fn generate_declare(field: &ProtoFieldArgs) -> TokenStream {
    let key = field.ident.as_ref().unwrap().to_string();
    let id = field.id.unwrap();

    let mut setters = Vec::new();

    if let Some(wire_type) = &field.wire_type {
        setters.push(quote! {
            options.wire_type = ::std::option::Option::Some(#wire_type.to_string());
        });
    }
    if let Some(name) = &field.name {
        setters.push(quote! {
            options.name = ::std::option::Option::Some(#name.to_string());
        });
    }
    if field.required {
        setters.push(quote! {
            options.required = true;
        });
    }
    if field.repeated {
        setters.push(quote! {
            options.repeated = true;
        });
    }
    // Only plain literals can be carried as untyped metadata; any other
    // default expression still drives the getter
    if let Some(lit) = field.default.as_ref().and_then(literal_default) {
        setters.push(quote! {
            options.default_value = ::std::option::Option::Some(
                ::protoclass_core::schema::DefaultValue::from(#lit),
            );
        });
    }
    if let Some(converter) = &field.converter {
        setters.push(quote! {
            options.converter = ::std::option::Option::Some(#converter);
        });
    }
    if let Some(parser) = &field.parser {
        setters.push(quote! {
            options.parser = ::std::option::Option::Some(
                ::protoclass_core::schema::NestedRef::of::<#parser>(),
            );
        });
    }

    quote! {
        builder.declare_field(#key, {
            #[allow(unused_mut)]
            let mut options = ::protoclass_core::schema::FieldOptions::new(#id);
            #(#setters)*
            options
        });
    }
}

fn generate_accessors(struct_name: &syn::Ident, field: &ProtoFieldArgs) -> TokenStream {
    let field_ident = field.ident.as_ref().unwrap();
    let inner_ty = extract_inner_type(&field.ty);
    let setter_name = format_ident!("set_{}", field_ident);

    let getter_doc = format!("Get the value of `{}`", field_ident);
    let setter_doc = format!("Set the value of `{}`", field_ident);

    // A non-repeated nested field defaults to an empty instance of the
    // nested type; otherwise the declared default drives lazy init. With
    // no default at all the slot simply stays unset.
    let getter = if field.parser.is_some() && !field.repeated {
        quote! {
            #[doc = #getter_doc]
            #[inline]
            pub fn #field_ident(&mut self) -> &#inner_ty {
                self.#field_ident
                    .get_or_init(<#inner_ty as ::std::default::Default>::default)
            }
        }
    } else if let Some(default) = &field.default {
        quote! {
            #[doc = #getter_doc]
            #[inline]
            pub fn #field_ident(&mut self) -> &#inner_ty {
                self.#field_ident.get_or_init(|| #default)
            }
        }
    } else {
        quote! {
            #[doc = #getter_doc]
            #[inline]
            pub fn #field_ident(&self) -> ::std::option::Option<&#inner_ty> {
                self.#field_ident.get()
            }
        }
    };

    let setter = quote! {
        #[doc = #setter_doc]
        #[inline]
        pub fn #setter_name(&mut self, value: #inner_ty) {
            if self.#field_ident.assign(value) {
                self.raw.invalidate();
            }
        }
    };

    quote! {
        impl #struct_name {
            #getter
            #setter
        }
    }
}
