//! Effective visibility of declarations.
//!
//! A declaration is part of the public surface only when neither it nor any
//! enclosing declaration carries `private`, `internal` or `protected`.

use crate::parser::{DeclarationKind, DeclarationTree, NodeId};

/// Returns true when `id` and every ancestor up to the file root lack a
/// restricting modifier.
pub fn is_public(tree: &DeclarationTree, id: NodeId) -> bool {
    let node = tree.node(id);
    if node.modifiers.is_restricted() {
        return false;
    }

    match node.parent {
        Some(parent) => is_public(tree, parent),
        None => true,
    }
}

/// Constructors are additionally gated on the class that declares them.
pub fn constructor_is_visible(tree: &DeclarationTree, id: NodeId) -> bool {
    debug_assert!(matches!(tree.node(id).kind, DeclarationKind::Constructor(_)));

    match tree.nearest_class(id) {
        Some(class) => is_public(tree, class),
        None => true,
    }
}
