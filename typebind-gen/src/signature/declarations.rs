//! Reduces generated Rust source to its declarations.

use std::collections::BTreeSet;

use quote::ToTokens;
use syn::{ImplItem, Item, ItemImpl, TraitItem};

use super::canonical;
use crate::error::TypebindError;

/// Declarations found in one artifact.
#[derive(Debug, Default)]
pub(super) struct Declarations {
    types: BTreeSet<String>,
    funcs: BTreeSet<String>,
    items: Vec<String>,
}

impl Declarations {
    /// Number of distinct type declarations.
    pub(super) fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of distinct function and method declarations.
    pub(super) fn func_count(&self) -> usize {
        self.funcs.len()
    }

    /// Canonical rendering of each top-level item, in source order apart
    /// from sorted import runs.
    pub(super) fn items(&self) -> &[String] {
        &self.items
    }
}

/// Parses `text` as a Rust file and collects its declarations.
///
/// Inline modules are descended into; names are qualified with the module
/// path so equally named items in different modules count separately.
pub(super) fn parse(artifact: &str, text: &str) -> Result<Declarations, TypebindError> {
    let file = syn::parse_file(text).map_err(|err| {
        let start = err.span().start();
        TypebindError::Parse {
            artifact: artifact.to_owned(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    })?;

    let mut declarations = Declarations {
        items: canonical::render_items(&file.items),
        ..Declarations::default()
    };
    collect(&file.items, "", &mut declarations);
    Ok(declarations)
}

fn collect(items: &[Item], scope: &str, out: &mut Declarations) {
    for item in items {
        match item {
            Item::Struct(decl) => {
                out.types.insert(format!("{scope}{}", decl.ident));
            }
            Item::Enum(decl) => {
                out.types.insert(format!("{scope}{}", decl.ident));
            }
            Item::Union(decl) => {
                out.types.insert(format!("{scope}{}", decl.ident));
            }
            Item::Type(decl) => {
                out.types.insert(format!("{scope}{}", decl.ident));
            }
            Item::TraitAlias(decl) => {
                out.types.insert(format!("{scope}{}", decl.ident));
            }
            Item::Trait(decl) => {
                let name = format!("{scope}{}", decl.ident);
                for trait_item in &decl.items {
                    if let TraitItem::Fn(method) = trait_item {
                        out.funcs.insert(format!("{name}::{}", method.sig.ident));
                    }
                }
                out.types.insert(name);
            }
            Item::Fn(decl) => {
                out.funcs.insert(format!("{scope}{}", decl.sig.ident));
            }
            Item::Impl(block) => collect_impl(block, scope, out),
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    let inner = format!("{scope}{}::", module.ident);
                    collect(nested, &inner, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_impl(block: &ItemImpl, scope: &str, out: &mut Declarations) {
    let self_ty = block.self_ty.to_token_stream().to_string();
    let owner = match &block.trait_ {
        Some((_, path, _)) => format!("<{scope}{self_ty} as {}>", path.to_token_stream()),
        None => format!("{scope}{self_ty}"),
    };
    for impl_item in &block.items {
        if let ImplItem::Fn(method) = impl_item {
            out.funcs.insert(format!("{owner}::{}", method.sig.ident));
        }
    }
}
