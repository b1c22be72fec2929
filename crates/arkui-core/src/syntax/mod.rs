//! Syntax nodes: list-producing nodes without geometry of their own.

mod for_each;
mod lazy_for_each;
mod lazy_layout_wrapper_builder;

pub use for_each::ForEachNode;
pub use lazy_for_each::{LazyForEachBuilder, LazyForEachNode, LazyForEachSource};
pub use lazy_layout_wrapper_builder::LazyLayoutWrapperBuilder;

use crate::tree::UiTree;
use crate::ui_node::{tags, NodeKind, UiNode};
use crate::{NodeError, NodeId};

/// Keyed wrapper around one item built by a ForEach.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyntaxItem {
    key: String,
}

impl SyntaxItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl UiTree {
    pub fn create_syntax_item(&mut self, id: NodeId, key: &str) -> Result<NodeId, NodeError> {
        self.insert_node(UiNode::new(
            id,
            tags::SYNTAX_ITEM,
            NodeKind::SyntaxItem(SyntaxItem::new(key)),
        ))
    }
}
