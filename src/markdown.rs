// SPDX-License-Identifier: Apache-2.0

//! Inline message markup.
//!
//! Messages are written in a small Markdown-like syntax (see [`ast`] for the
//! full list of constructs) that is converted into markup in two passes:
//!
//! 1. Optionally, [`links::expand()`] rewrites `[label](target)` shorthand
//!    into link tags.
//! 2. [`ast::build()`] parses everything else into a syntax tree, which
//!    [`render::render()`] turns into markup.
//!
//! [`to_markup()`] runs both passes.

pub mod ast;
pub mod links;
pub mod render;

use ast::Node;
use log::{debug, trace};

/// Converts inline markup into the markup tag vocabulary.
///
/// If `expand_links` is true, link shorthand is expanded first.
///
/// # Examples
///
/// ```
/// use formatted_text::markdown::to_markup;
///
/// assert_eq!(to_markup("**hi**", false), "<b>hi</b>");
/// assert_eq!(
///     to_markup("[site](example.com)", true),
///     "<a href='https://example.com'>site</a>",
/// );
/// ```
pub fn to_markup(input: &str, expand_links: bool) -> String {
    let input = if expand_links {
        let expanded = links::expand(input);
        debug!("expanded link shorthand: {expanded:?}");
        expanded
    } else {
        input.to_string()
    };
    let markup = render::render(&ast::build(&input));
    debug!("rendered markup: {markup:?}");
    markup
}

/// "Visit" a node and emit code.
///
/// For example, a `Visitor` can embody an algorithm used to visit each node
/// in a syntax tree and emit markup for the tree.
pub trait Visitor {
    /// The generated text.
    fn text(&self) -> String;

    /// "Visit" a particular node in a tree.
    fn visit(&mut self, node: &Node);

    /// "Swallows" a node.
    ///
    /// Nothing is done by the visitor for the node, but it continues visiting
    /// the node's children. This is generally used to accept a container
    /// node that has no markup of its own.
    fn swallow(&mut self, node: &Node)
    where
        Self: Sized,
    {
        trace!("swallowing node: {node:?}");
        node.accept_children(self);
    }
}

/// A data structure that can be visited.
pub trait Visitable {
    /// Accept a visitor for processing the visitable item.
    fn accept<V: Visitor>(&self, visitor: &mut V);

    /// Accept a visitor for processing all child nodes.
    fn accept_children<V: Visitor>(&self, visitor: &mut V);
}

impl Visitable for Node {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit(self);
    }

    fn accept_children<V: Visitor>(&self, visitor: &mut V) {
        if let Some(children) = self.children() {
            for child in children {
                child.accept(visitor);
            }
        }
    }
}

/// A data type that can append text.
trait TextAppendable {
    /// Appends `text` to the target data structure.
    fn push_text(&mut self, text: &str);
}

#[cfg(test)]
mod test_utils;
