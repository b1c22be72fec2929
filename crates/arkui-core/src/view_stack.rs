//! Build stack used while a script constructs or updates a subtree.
//!
//! The processor is an explicit value: each UI context owns one next to its
//! [`UiTree`], and every call takes that tree.

use crate::tree::UiTree;
use crate::ui_node::NodeKind;
use crate::NodeId;
use arkui_ui_layout::{LayoutProperty, TypedLayoutProperty};

/// A layout property edit deferred until its node is finished.
pub type LayoutTask = Box<dyn FnOnce(&mut LayoutProperty)>;

struct ModifyTask {
    node: NodeId,
    task: LayoutTask,
}

#[derive(Default)]
pub struct ViewStackProcessor {
    elements: Vec<NodeId>,
    keys: Vec<String>,
    modify_tasks: Vec<ModifyTask>,
}

impl ViewStackProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim_node_id(&self, tree: &mut UiTree) -> NodeId {
        tree.make_unique_id()
    }

    pub fn stack_size(&self) -> usize {
        self.elements.len()
    }

    pub fn main_element_node(&self) -> Option<NodeId> {
        self.elements.last().copied()
    }

    /// The top of the stack if it owns a frame.
    pub fn main_frame_node(&self, tree: &UiTree) -> Option<NodeId> {
        let top = self.main_element_node()?;
        tree.frame_node(top).map(|_| top)
    }

    /// Pushes `id`, first popping an atomic node left on top.
    pub fn push(&mut self, tree: &mut UiTree, id: NodeId) {
        if self.should_pop_immediately(tree) {
            self.pop(tree);
        }
        self.elements.push(id);
    }

    fn should_pop_immediately(&self, tree: &UiTree) -> bool {
        self.elements.len() > 1
            && self
                .main_element_node()
                .and_then(|top| tree.node(top))
                .map_or(false, |node| node.is_atomic_node())
    }

    pub fn implicit_pop_before_continue(&mut self, tree: &mut UiTree) {
        if self.should_pop_immediately(tree) {
            self.pop(tree);
        }
    }

    /// Finishes the top node and mounts it under the node below it. The last
    /// node on the stack is only released by [`finish`](Self::finish).
    pub fn pop(&mut self, tree: &mut UiTree) {
        if self.elements.len() <= 1 {
            return;
        }
        let Some(node) = self.finish(tree) else {
            return;
        };
        let parent = self.main_element_node();
        if let Err(err) = tree.mount_to_parent(node, parent, None) {
            log::error!("cannot mount {node} after build: {err}");
        }
    }

    /// Pops the atomic nodes left on top, then the container below them.
    pub fn pop_container(&mut self, tree: &mut UiTree) {
        while self.should_pop_immediately(tree) {
            self.pop(tree);
        }
        self.pop(tree);
    }

    /// Removes the top node and completes it: deferred layout tasks are
    /// applied, frames get their modify-done hook, a ForEach reconciles its
    /// children.
    pub fn finish(&mut self, tree: &mut UiTree) -> Option<NodeId> {
        let node = self.elements.pop()?;
        self.flush_modify_tasks_for(tree, node);
        match tree.node(node).map(|node| node.kind()) {
            Some(NodeKind::Frame(_)) | Some(NodeKind::Custom(_)) => tree.mark_modify_done(node),
            Some(NodeKind::ForEach(_)) => {
                tree.compare_and_update_children(node);
                tree.flush_update_and_mark_dirty(node);
            }
            _ => {}
        }
        Some(node)
    }

    pub fn push_key(&mut self, key: &str) {
        self.keys.push(key.to_string());
    }

    pub fn pop_key(&mut self) {
        self.keys.pop();
    }

    /// Composite key of the items currently being built, joined by `_`.
    pub fn key(&self) -> String {
        self.keys.join("_")
    }

    pub fn process_view_id(&self, view_id: &str) -> String {
        if self.keys.is_empty() {
            view_id.to_string()
        } else {
            format!("{}_{}", self.key(), view_id)
        }
    }

    /// Defers `task` until the top node is finished. No-op on an empty stack.
    pub fn push_layout_task(&mut self, task: LayoutTask) {
        let Some(node) = self.main_element_node() else {
            log::debug!("layout task dropped: the build stack is empty");
            return;
        };
        self.modify_tasks.push(ModifyTask { node, task });
    }

    /// Applies `update` to the typed layout property of the top frame.
    ///
    /// An empty stack or a property of another type is a silent no-op.
    pub fn update_layout_property<T: TypedLayoutProperty>(
        &mut self,
        tree: &mut UiTree,
        update: impl FnOnce(&mut T) -> bool,
    ) -> bool {
        let Some(top) = self.main_frame_node(tree) else {
            return false;
        };
        tree.frame_node_mut(top)
            .map_or(false, |frame| frame.layout_property_mut().update_typed(update))
    }

    /// Edits the common part of the top frame's layout property right away.
    pub fn with_layout_property(&mut self, tree: &mut UiTree, f: impl FnOnce(&mut LayoutProperty)) {
        if let Some(top) = self.main_frame_node(tree) {
            if let Some(frame) = tree.frame_node_mut(top) {
                f(frame.layout_property_mut());
            }
        }
    }

    fn flush_modify_tasks_for(&mut self, tree: &mut UiTree, node: NodeId) {
        let (tasks, rest): (Vec<ModifyTask>, Vec<ModifyTask>) =
            std::mem::take(&mut self.modify_tasks)
                .into_iter()
                .partition(|task| task.node == node);
        self.modify_tasks = rest;
        tree.flush_modify_task(node, tasks.into_iter().map(|task| task.task));
    }

    /// Applies every task still queued, for nodes that left the stack
    /// without being finished.
    pub fn flush_rerender_task(&mut self, tree: &mut UiTree) {
        let tasks = std::mem::take(&mut self.modify_tasks);
        for task in tasks {
            tree.flush_modify_task(task.node, std::iter::once(task.task));
        }
    }
}

impl UiTree {
    /// Runs deferred layout tasks against the frame `id` and queues the
    /// resulting change.
    pub fn flush_modify_task(&mut self, id: NodeId, tasks: impl IntoIterator<Item = LayoutTask>) {
        let Some(frame) = self.frame_node_mut(id) else {
            return;
        };
        let mut applied = 0usize;
        for task in tasks {
            task(frame.layout_property_mut());
            applied += 1;
        }
        if applied > 0 {
            self.mark_dirty_node(id, arkui_ui_layout::PropertyChangeFlag::NORMAL);
        }
    }
}

#[cfg(test)]
#[path = "tests/view_stack_tests.rs"]
mod tests;
