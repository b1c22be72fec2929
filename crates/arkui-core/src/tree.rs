//! The node arena and the structural operations on it.

use crate::collections::map::HashMap;
use crate::element_register::ElementRegister;
use crate::frame_node::FrameNode;
use crate::pipeline::PipelineConfig;
use crate::ui_node::{NodeKind, UiNode};
use crate::{NodeError, NodeId};
use arkui_ui_layout::PropertyChangeFlag;
use indexmap::IndexSet;
use std::fmt::Write;

/// One UI tree: its nodes, its id register and its pipeline settings.
pub struct UiTree {
    nodes: HashMap<NodeId, UiNode>,
    register: ElementRegister,
    config: PipelineConfig,
    root: Option<NodeId>,
    pub(crate) dirty_layout_nodes: IndexSet<NodeId>,
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTree {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            nodes: HashMap::default(),
            register: ElementRegister::new(),
            config,
            root: None,
            dirty_layout_nodes: IndexSet::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PipelineConfig {
        &mut self.config
    }

    pub fn register(&self) -> &ElementRegister {
        &self.register
    }

    pub fn register_mut(&mut self) -> &mut ElementRegister {
        &mut self.register
    }

    pub fn make_unique_id(&mut self) -> NodeId {
        self.register.make_unique_id()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&UiNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut UiNode> {
        self.nodes.get_mut(&id)
    }

    /// Registers `node` and stores it. The node starts detached.
    pub fn insert_node(&mut self, node: UiNode) -> Result<NodeId, NodeError> {
        let id = node.id();
        self.register.add_element(id)?;
        self.nodes.insert(id, node);
        Ok(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Makes `id` the root: depth 1, attached to the main tree and queued
    /// for its first layout.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), NodeError> {
        if !self.contains(id) {
            return Err(NodeError::Missing { id });
        }
        if let Some(previous) = self.root.replace(id) {
            if previous != id {
                self.detach_from_main_tree(previous);
            }
        }
        self.set_depth(id, 1);
        self.attach_to_main_tree(id);
        self.mark_dirty_node(id, PropertyChangeFlag::MEASURE);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(UiNode::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], UiNode::children)
    }

    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.nodes.get(&id).map(UiNode::depth)
    }

    pub fn is_on_main_tree(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map_or(false, UiNode::is_on_main_tree)
    }

    /// Inserts `child` under `parent` at `slot` (clamped, `None` appends).
    ///
    /// The child inherits main-tree membership from the parent. Adding a node
    /// that is already a child is reported and ignored.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, slot: Option<usize>) {
        if !self.nodes.contains_key(&child) {
            log::warn!("cannot add missing node {child} to {parent}");
            return;
        }
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            log::warn!("cannot add {child} to missing parent {parent}");
            return;
        };
        if parent_node.children.contains(&child) {
            log::warn!("node {child} is already a child of {parent}");
            return;
        }
        let index = slot.map_or(parent_node.children.len(), |slot| {
            slot.min(parent_node.children.len())
        });
        parent_node.children.insert(index, child);
        let depth = parent_node.depth;
        let on_main_tree = parent_node.on_main_tree;
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
        self.set_depth(child, depth + 1);
        if on_main_tree {
            self.attach_to_main_tree(child);
        }
        self.mark_tree_changed(parent);
    }

    /// Appends `child` without flagging the parent. Used when a layout pass
    /// itself reshapes the tree.
    pub(crate) fn append_child_silently(&mut self, parent: NodeId, child: NodeId) {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return;
        };
        if parent_node.children.contains(&child) {
            return;
        }
        parent_node.children.push(child);
        let depth = parent_node.depth;
        let on_main_tree = parent_node.on_main_tree;
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
        self.set_depth(child, depth + 1);
        if on_main_tree {
            self.attach_to_main_tree(child);
        }
    }

    /// Unlinks `child` from `parent` and detaches it. The node stays in the
    /// arena.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let Some(index) = parent_node.children.iter().position(|&id| id == child) else {
            return false;
        };
        parent_node.children.remove(index);
        self.detach_from_main_tree(child);
        if let Some(child_node) = self.nodes.get_mut(&child) {
            if child_node.parent == Some(parent) {
                child_node.parent = None;
            }
        }
        self.mark_tree_changed(parent);
        true
    }

    /// Adds `child` under `parent` unless it is already there. Without a
    /// parent the child becomes a depth 1 subtree head.
    pub fn mount_to_parent(
        &mut self,
        child: NodeId,
        parent: Option<NodeId>,
        slot: Option<usize>,
    ) -> Result<(), NodeError> {
        if !self.contains(child) {
            return Err(NodeError::Missing { id: child });
        }
        let Some(parent) = parent else {
            self.set_depth(child, 1);
            return Ok(());
        };
        if !self.contains(parent) {
            return Err(NodeError::Missing { id: parent });
        }
        if self.children(parent).contains(&child) {
            return Ok(());
        }
        self.add_child(parent, child, slot);
        Ok(())
    }

    /// Moves `id` to `slot` within its parent's child list.
    pub fn move_position(&mut self, id: NodeId, slot: usize) {
        let Some(parent) = self.parent(id) else {
            log::debug!("node {id} has no parent to move within");
            return;
        };
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return;
        };
        let Some(index) = parent_node.children.iter().position(|&child| child == id) else {
            return;
        };
        parent_node.children.remove(index);
        let slot = slot.min(parent_node.children.len());
        parent_node.children.insert(slot, id);
        self.mark_tree_changed(parent);
    }

    /// Sets the depth of `id` and renumbers its subtree below it.
    pub fn set_depth(&mut self, id: NodeId, depth: u32) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.depth = depth;
        let children = node.children.clone();
        for child in children {
            self.set_depth(child, depth + 1);
        }
    }

    /// Empties the child list of `id` without touching the children.
    pub(crate) fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get_mut(&id)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default()
    }

    pub fn attach_to_main_tree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.on_main_tree {
            return;
        }
        node.on_main_tree = true;
        if let Some(frame) = node.frame_node_mut() {
            frame.pattern_mut().on_attach_to_main_tree(id);
        }
        let children = node.children.clone();
        for child in children {
            self.attach_to_main_tree(child);
        }
    }

    pub fn detach_from_main_tree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.on_main_tree {
            return;
        }
        let children = node.children.clone();
        for child in children {
            self.detach_from_main_tree(child);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.on_main_tree = false;
            if let Some(frame) = node.frame_node_mut() {
                frame.pattern_mut().on_detach_from_main_tree(id);
            }
        }
        self.dirty_layout_nodes.shift_remove(&id);
    }

    /// Detaches and unlinks `id`, then drops its whole subtree from the
    /// arena. Every dropped id becomes pending removal in the register.
    pub fn dispose_node(&mut self, id: NodeId) {
        self.detach_from_main_tree(id);
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        self.dispose_subtree(id);
    }

    fn dispose_subtree(&mut self, id: NodeId) {
        let Some(mut node) = self.nodes.remove(&id) else {
            return;
        };
        if let NodeKind::Custom(custom) = &mut node.kind {
            custom.run_destroy_function();
        }
        for child in node.children {
            self.dispose_subtree(child);
        }
        self.register.remove_element(id);
        self.dirty_layout_nodes.shift_remove(&id);
    }

    /// Nearest ancestor that owns a frame.
    pub fn frame_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(candidate) = current {
            let node = self.nodes.get(&candidate)?;
            if node.frame_node().is_some() {
                return Some(candidate);
            }
            current = node.parent;
        }
        None
    }

    /// Merges `flag` into the node's change flag and queues the right node
    /// for the next layout pass.
    ///
    /// A node without a frame forwards the flag to its children. A frame
    /// whose change may alter its own size asks its frame ancestor to lay it
    /// out again, unless it is a measure boundary.
    pub fn mark_dirty_node(&mut self, id: NodeId, flag: PropertyChangeFlag) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.frame_node().is_none() {
            let children = node.children.clone();
            for child in children {
                self.mark_dirty_node(child, flag);
            }
            return;
        }
        let on_main_tree = node.on_main_tree;
        let Some(frame) = node.frame_node_mut() else {
            return;
        };
        frame.layout_property_mut().update_property_change_flag(flag);
        let total = frame.layout_property().property_change_flag();
        if !total.check_need_request_measure_and_layout() || !on_main_tree {
            return;
        }
        let request_parent = !frame.pattern().is_measure_boundary()
            && frame.need_request_parent_measure();
        if request_parent {
            if let Some(parent) = self.frame_ancestor(id) {
                let parent_marked = self
                    .frame_node(parent)
                    .map_or(false, |frame| {
                        frame
                            .layout_property()
                            .property_change_flag()
                            .contains(PropertyChangeFlag::BY_CHILD_REQUEST)
                    });
                if !parent_marked {
                    self.mark_dirty_node(parent, PropertyChangeFlag::BY_CHILD_REQUEST);
                }
                return;
            }
        }
        self.dirty_layout_nodes.insert(id);
    }

    /// Marks the nearest frame ancestor of `id`.
    pub fn mark_need_flush_dirty(&mut self, id: NodeId, flag: PropertyChangeFlag) {
        let target = match self.frame_node(id) {
            Some(_) => Some(id),
            None => self.frame_ancestor(id),
        };
        if let Some(target) = target {
            self.mark_dirty_node(target, flag);
        }
    }

    fn mark_tree_changed(&mut self, parent: NodeId) {
        if !self.is_on_main_tree(parent) {
            if let Some(frame) = self.frame_or_ancestor_mut(parent) {
                frame
                    .layout_property_mut()
                    .update_property_change_flag(PropertyChangeFlag::NODE_TREE);
            }
            return;
        }
        self.mark_need_flush_dirty(
            parent,
            PropertyChangeFlag::NODE_TREE | PropertyChangeFlag::MEASURE,
        );
    }

    fn frame_or_ancestor_mut(&mut self, id: NodeId) -> Option<&mut FrameNode> {
        let target = match self.frame_node(id) {
            Some(_) => id,
            None => self.frame_ancestor(id)?,
        };
        self.frame_node_mut(target)
    }

    /// Number of frame nodes `id` stands for in its parent's layout.
    ///
    /// Syntax nodes are flattened and a LazyForEach counts every item its
    /// source can produce, built or not.
    pub fn frame_count(&self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        match &node.kind {
            NodeKind::Frame(_) | NodeKind::Custom(_) => 1,
            NodeKind::LazyForEach(lazy) => lazy.total_count(),
            NodeKind::ForEach(_) | NodeKind::SyntaxItem(_) => self.total_child_count(id),
        }
    }

    pub fn total_child_count(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .map(|&child| self.frame_count(child))
            .sum()
    }

    /// Human-readable dump of the subtree rooted at `id`.
    pub fn dump_tree(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_node(id, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, indent: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            let _ = writeln!(out, "{:indent$}<missing #{id}>", "", indent = indent * 2);
            return;
        };
        let _ = write!(
            out,
            "{:indent$}{} #{} depth={}",
            "",
            node.tag(),
            id,
            node.depth(),
            indent = indent * 2
        );
        if let Some(frame) = node.frame_node() {
            let rect = frame.geometry_node().frame_rect();
            let _ = write!(
                out,
                " frame=[{:.1}, {:.1}, {:.1} x {:.1}]",
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height()
            );
            if let Some(constraint) = frame.geometry_node().parent_layout_constraint() {
                let _ = write!(
                    out,
                    " constraint=[min {:.1} x {:.1}, max {:.1} x {:.1}]",
                    constraint.min_size.width,
                    constraint.min_size.height,
                    constraint.max_size.width,
                    constraint.max_size.height
                );
            }
            if !frame.is_active() {
                out.push_str(" inactive");
            }
        }
        if !node.is_on_main_tree() {
            out.push_str(" detached");
        }
        out.push('\n');
        for &child in node.children() {
            self.dump_node(child, indent + 1, out);
        }
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
