//! Layout-independent rendering of top-level items.
//!
//! Token rendering already discards whitespace and plain comments. On top of
//! that, commas a formatter may add or drop without changing meaning are
//! removed: a trailing comma closing a list, and a comma after a `{ .. }`
//! group such as a block-bodied match arm. Runs of `use` and bodiless `mod`
//! items are sorted, as are the members of every `use` group.
//!
//! A one-element tuple keeps its trailing comma, since `(a,)` and `(a)`
//! differ.

use proc_macro2::{Delimiter, Group, TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Item, ItemUse, UseTree};

/// Keywords that may directly precede a parenthesised tuple.
const TUPLE_PREFIXES: [&str; 20] = [
    "as", "break", "const", "dyn", "else", "for", "if", "impl", "in", "let", "match", "move",
    "mut", "ref", "return", "static", "type", "where", "while", "yield",
];

/// Renders each item in `items`, sorting reorderable runs.
pub(super) fn render_items(items: &[Item]) -> Vec<String> {
    let mut rendered = Vec::with_capacity(items.len());
    let mut run: Vec<String> = Vec::new();
    for item in items {
        match item {
            Item::Use(decl) => run.push(render_use(decl)),
            Item::Mod(module) if module.content.is_none() => run.push(render(module)),
            _ => {
                flush(&mut run, &mut rendered);
                rendered.push(render(item));
            }
        }
    }
    flush(&mut run, &mut rendered);
    rendered
}

fn flush(run: &mut Vec<String>, rendered: &mut Vec<String>) {
    run.sort();
    rendered.append(run);
}

fn render(item: &impl ToTokens) -> String {
    normalize(item.to_token_stream(), false).to_string()
}

fn render_use(decl: &ItemUse) -> String {
    let attrs: TokenStream = decl.attrs.iter().map(ToTokens::to_token_stream).collect();
    let leading = if decl.leading_colon.is_some() { "::" } else { "" };
    format!(
        "{} {} use {leading}{} ;",
        normalize(attrs, false),
        decl.vis.to_token_stream(),
        use_tree(&decl.tree)
    )
}

fn use_tree(tree: &UseTree) -> String {
    match tree {
        UseTree::Path(path) => format!("{}::{}", path.ident, use_tree(&path.tree)),
        UseTree::Name(name) => name.ident.to_string(),
        UseTree::Rename(rename) => format!("{} as {}", rename.ident, rename.rename),
        UseTree::Glob(_) => "*".to_owned(),
        UseTree::Group(group) => {
            let mut members: Vec<String> = group.items.iter().map(use_tree).collect();
            members.sort();
            format!("{{{}}}", members.join(", "))
        }
    }
}

fn normalize(stream: TokenStream, keep_trailing_comma: bool) -> TokenStream {
    let tokens: Vec<TokenTree> = stream.into_iter().collect();
    let mut out: Vec<TokenTree> = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        if is_comma(token) {
            let trailing = index + 1 == tokens.len() && !keep_trailing_comma;
            if trailing || out.last().is_some_and(is_brace_group) {
                continue;
            }
        }
        let rebuilt = match token {
            TokenTree::Group(group) => {
                let keep = is_one_tuple(group) && !follows_callee(out.last());
                TokenTree::Group(Group::new(group.delimiter(), normalize(group.stream(), keep)))
            }
            other => other.clone(),
        };
        out.push(rebuilt);
    }
    out.into_iter().collect()
}

fn is_comma(token: &TokenTree) -> bool {
    matches!(token, TokenTree::Punct(punct) if punct.as_char() == ',')
}

fn is_brace_group(token: &TokenTree) -> bool {
    matches!(token, TokenTree::Group(group) if group.delimiter() == Delimiter::Brace)
}

/// `( element , )` with exactly one top-level comma, in last position.
fn is_one_tuple(group: &Group) -> bool {
    if group.delimiter() != Delimiter::Parenthesis {
        return false;
    }
    let tokens: Vec<TokenTree> = group.stream().into_iter().collect();
    tokens.iter().filter(|token| is_comma(token)).count() == 1
        && tokens.last().is_some_and(is_comma)
}

/// Whether a parenthesised group after `previous` is an argument list
/// rather than a tuple.
fn follows_callee(previous: Option<&TokenTree>) -> bool {
    match previous {
        Some(TokenTree::Ident(ident)) => !TUPLE_PREFIXES.contains(&ident.to_string().as_str()),
        Some(TokenTree::Punct(punct)) => punct.as_char() == '!',
        Some(TokenTree::Group(group)) => group.delimiter() != Delimiter::Brace,
        Some(TokenTree::Literal(_)) | None => false,
    }
}
