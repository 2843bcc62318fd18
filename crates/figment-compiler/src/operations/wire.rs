//! Wire text: the exact document sent to a remote.

use apollo_parser::SyntaxNode;
use apollo_parser::cst::{self, CstNode};

use super::fragments::Fragment;
use crate::directives::is_internal;
use crate::syntax::{name_of, trimmed_range};

/// Text of `node` with every internal directive cut out.
///
/// A cut also takes the whitespace in front of the directive, so
/// `$id: ID! @id` becomes `$id: ID!` and a directive on its own line
/// leaves no blank line behind.
pub fn wire_text(node: &SyntaxNode) -> String {
    let text = node.text().to_string();
    let base = u32::from(node.text_range().start()) as usize;

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for directive in node.descendants().filter_map(cst::Directive::cast) {
        if !name_of(directive.name()).is_some_and(|name| is_internal(&name)) {
            continue;
        }
        let range = trimmed_range(directive.syntax());
        let start = u32::from(range.start()) as usize - base;
        let end = u32::from(range.end()) as usize - base;
        let start = text[..start].trim_end().len().max(pos);
        out.push_str(&text[pos..start]);
        pos = end;
    }
    out.push_str(&text[pos..]);

    out.trim().to_string()
}

/// Operation text followed by every fragment it uses, one per line block.
pub fn assemble(operation: &str, fragments: &[&Fragment]) -> String {
    let mut out = operation.to_string();
    for fragment in fragments {
        out.push('\n');
        out.push_str(&fragment.text);
    }
    out
}
