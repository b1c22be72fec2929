//! Keyed reconciliation of a ForEach child list.

use crate::tree::UiTree;
use crate::ui_node::{tags, NodeKind, UiNode};
use crate::view_stack::ViewStackProcessor;
use crate::{collections::map::HashMap, NodeError, NodeId};
use arkui_ui_layout::PropertyChangeFlag;

/// Children of a ForEach, one per key, in key order.
#[derive(Debug, Default)]
pub struct ForEachNode {
    ids: Vec<String>,
    temp_ids: Vec<String>,
    temp_children: Vec<NodeId>,
}

impl ForEachNode {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn temp_ids(&self) -> &[String] {
        &self.temp_ids
    }
}

impl UiTree {
    pub fn get_or_create_for_each_node(&mut self, id: NodeId) -> Result<NodeId, NodeError> {
        match self.node(id).map(UiNode::kind) {
            Some(NodeKind::ForEach(_)) => Ok(id),
            Some(_) => Err(NodeError::TypeMismatch {
                id,
                expected: "ForEachNode",
            }),
            None => self.insert_node(UiNode::new(
                id,
                tags::FOR_EACH,
                NodeKind::ForEach(ForEachNode::default()),
            )),
        }
    }

    fn for_each_mut(&mut self, id: NodeId) -> Option<&mut ForEachNode> {
        match self.node_mut(id).map(UiNode::kind_mut) {
            Some(NodeKind::ForEach(for_each)) => Some(for_each),
            _ => {
                log::warn!("node {id} is not a ForEach");
                None
            }
        }
    }

    pub fn for_each_node(&self, id: NodeId) -> Option<&ForEachNode> {
        match self.node(id).map(UiNode::kind) {
            Some(NodeKind::ForEach(for_each)) => Some(for_each),
            _ => None,
        }
    }

    /// Moves the current keys and children aside before a rebuild. The
    /// children stay attached; they are only unlisted.
    pub fn create_temp_items(&mut self, id: NodeId) {
        let children = self.take_children(id);
        let Some(for_each) = self.for_each_mut(id) else {
            return;
        };
        for_each.temp_ids = std::mem::take(&mut for_each.ids);
        for_each.temp_children = children;
    }

    pub fn set_ids(&mut self, id: NodeId, ids: Vec<String>) {
        if let Some(for_each) = self.for_each_mut(id) {
            for_each.ids = ids;
        }
    }

    /// Keys of the previous build, available between
    /// [`create_temp_items`](Self::create_temp_items) and
    /// [`compare_and_update_children`](Self::compare_and_update_children).
    pub fn temp_ids(&self, id: NodeId) -> &[String] {
        self.for_each_node(id).map_or(&[], ForEachNode::temp_ids)
    }

    /// Rebuilds the child list in the order of the new keys.
    ///
    /// A key seen in the previous build keeps its node. Every other key
    /// takes the next child built during this pass, in build order. Old nodes
    /// whose keys disappeared are disposed.
    pub fn compare_and_update_children(&mut self, id: NodeId) {
        let additional = self.take_children(id);
        let Some(for_each) = self.for_each_mut(id) else {
            return;
        };
        let new_ids = for_each.ids.clone();
        let old_ids = std::mem::take(&mut for_each.temp_ids);
        let old_children = std::mem::take(&mut for_each.temp_children);

        let mut old_nodes: HashMap<String, NodeId> = HashMap::default();
        for (key, child) in old_ids.into_iter().zip(old_children) {
            old_nodes.insert(key, child);
        }
        let mut additional = additional.into_iter();
        let mut new_children = Vec::with_capacity(new_ids.len());
        for key in &new_ids {
            if let Some(node) = old_nodes.remove(key) {
                new_children.push(node);
            } else if let Some(node) = additional.next() {
                new_children.push(node);
            } else {
                log::warn!("ForEach #{id} has no built child for new key {key}");
            }
        }
        for child in new_children {
            self.add_child(id, child, None);
        }
        for (key, stale) in old_nodes {
            log::trace!("ForEach #{id} drops key {key}");
            self.dispose_node(stale);
        }
        for unused in additional {
            log::warn!("ForEach #{id} built child {unused} that no key claimed");
            self.dispose_node(unused);
        }
    }

    pub fn flush_update_and_mark_dirty(&mut self, id: NodeId) {
        self.mark_need_flush_dirty(id, PropertyChangeFlag::MEASURE);
    }
}

impl ViewStackProcessor {
    /// Opens a keyed item of the ForEach on top of the stack.
    pub fn create_new_child_start(&mut self, tree: &mut UiTree, key: &str) -> Option<NodeId> {
        let id = tree.make_unique_id();
        if let Err(err) = tree.create_syntax_item(id, key) {
            log::error!("cannot create item {key}: {err}");
            return None;
        }
        self.push_key(key);
        self.push(tree, id);
        Some(id)
    }

    pub fn create_new_child_finish(&mut self, tree: &mut UiTree) {
        self.pop_key();
        self.pop_container(tree);
    }
}

#[cfg(test)]
#[path = "../tests/for_each_tests.rs"]
mod tests;
