//! Frame nodes: the nodes that own geometry and take part in layout.

use crate::layout::{CustomNodeLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper};
use crate::pattern::{DirtySwapConfig, Pattern};
use crate::syntax::LazyLayoutWrapperBuilder;
use crate::touch::HitTestMode;
use crate::tree::UiTree;
use crate::ui_node::{NodeKind, UiNode};
use crate::{NodeError, NodeId};
use arkui_ui_layout::{GeometryNode, LayoutConstraintF, LayoutProperty, PropertyChangeFlag};

pub struct FrameNode {
    pattern: Box<dyn Pattern>,
    layout_property: LayoutProperty,
    geometry_node: GeometryNode,
    active: bool,
    hit_test_mode: HitTestMode,
}

impl FrameNode {
    pub fn new(pattern: Box<dyn Pattern>) -> Self {
        let layout_property = pattern.create_layout_property();
        Self {
            pattern,
            layout_property,
            geometry_node: GeometryNode::new(),
            active: true,
            hit_test_mode: HitTestMode::default(),
        }
    }

    pub fn pattern(&self) -> &dyn Pattern {
        self.pattern.as_ref()
    }

    pub fn pattern_mut(&mut self) -> &mut dyn Pattern {
        self.pattern.as_mut()
    }

    pub fn layout_property(&self) -> &LayoutProperty {
        &self.layout_property
    }

    pub fn layout_property_mut(&mut self) -> &mut LayoutProperty {
        &mut self.layout_property
    }

    pub fn geometry_node(&self) -> &GeometryNode {
        &self.geometry_node
    }

    pub fn geometry_node_mut(&mut self) -> &mut GeometryNode {
        &mut self.geometry_node
    }

    /// Inactive frames were dropped from the render tree by their parent's
    /// last layout and do not receive touches.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn hit_test_mode(&self) -> HitTestMode {
        self.hit_test_mode
    }

    pub fn set_hit_test_mode(&mut self, mode: HitTestMode) {
        self.hit_test_mode = mode;
    }

    /// Whether the pending change can alter this node's size and so has to
    /// be answered by the parent. A node with a fully declared size absorbs
    /// requests coming from its children.
    pub fn need_request_parent_measure(&self) -> bool {
        let flag = self.layout_property.property_change_flag();
        if flag == PropertyChangeFlag::BY_CHILD_REQUEST {
            let fixed_size = self
                .layout_property
                .calc_layout_constraint()
                .and_then(|calc| calc.self_ideal_size)
                .map_or(false, |size| size.is_valid());
            return !fixed_size;
        }
        flag.check_need_parent_layout() || flag.contains(PropertyChangeFlag::BY_CHILD_REQUEST)
    }
}

impl UiTree {
    pub fn create_frame_node(
        &mut self,
        tag: &str,
        id: NodeId,
        pattern: Box<dyn Pattern>,
    ) -> Result<NodeId, NodeError> {
        self.insert_node(UiNode::new(id, tag, NodeKind::Frame(FrameNode::new(pattern))))
    }

    /// Creates a frame node that heads its own subtree (depth 1).
    pub fn create_frame_node_with_tree(
        &mut self,
        tag: &str,
        id: NodeId,
        pattern: Box<dyn Pattern>,
    ) -> Result<NodeId, NodeError> {
        self.create_frame_node(tag, id, pattern)?;
        self.set_depth(id, 1);
        Ok(id)
    }

    /// Returns the existing frame node `id`, or creates one with the pattern
    /// built by `make_pattern`.
    pub fn get_or_create_frame_node(
        &mut self,
        tag: &str,
        id: NodeId,
        make_pattern: impl FnOnce() -> Box<dyn Pattern>,
    ) -> Result<NodeId, NodeError> {
        if let Some(node) = self.node(id) {
            if node.frame_node().is_some() && node.tag() == tag {
                return Ok(id);
            }
            return Err(NodeError::TypeMismatch {
                id,
                expected: "FrameNode",
            });
        }
        self.create_frame_node(tag, id, make_pattern())
    }

    pub fn frame_node(&self, id: NodeId) -> Option<&FrameNode> {
        self.node(id).and_then(UiNode::frame_node)
    }

    pub fn frame_node_mut(&mut self, id: NodeId) -> Option<&mut FrameNode> {
        self.node_mut(id).and_then(UiNode::frame_node_mut)
    }

    pub fn with_frame_node<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut FrameNode) -> R,
    ) -> Result<R, NodeError> {
        let node = self.node_mut(id).ok_or(NodeError::Missing { id })?;
        let frame = node.frame_node_mut().ok_or(NodeError::TypeMismatch {
            id,
            expected: "FrameNode",
        })?;
        Ok(f(frame))
    }

    pub fn with_pattern<P: Pattern, R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&P) -> R,
    ) -> Result<R, NodeError> {
        let frame = self.frame_node(id).ok_or(NodeError::Missing { id })?;
        let pattern = frame
            .pattern()
            .downcast_ref::<P>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<P>(),
            })?;
        Ok(f(pattern))
    }

    pub fn with_pattern_mut<P: Pattern, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut P) -> R,
    ) -> Result<R, NodeError> {
        let frame = self.frame_node_mut(id).ok_or(NodeError::Missing { id })?;
        let pattern = frame
            .pattern_mut()
            .downcast_mut::<P>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<P>(),
            })?;
        Ok(f(pattern))
    }

    /// Edits the layout property of `id` and queues whatever the edit made
    /// dirty.
    pub fn update_layout_property(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut LayoutProperty),
    ) -> Result<(), NodeError> {
        let frame = self.frame_node_mut(id).ok_or(NodeError::Missing { id })?;
        f(frame.layout_property_mut());
        self.mark_dirty_node(id, PropertyChangeFlag::NORMAL);
        Ok(())
    }

    pub fn set_hit_test_mode(&mut self, id: NodeId, mode: HitTestMode) {
        if let Some(frame) = self.frame_node_mut(id) {
            frame.set_hit_test_mode(mode);
        }
    }

    /// Frame children of `id` in layout order, looking through syntax nodes.
    pub fn frame_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &child in self.children(id) {
            self.collect_frames(child, &mut out);
        }
        out
    }

    fn collect_frames(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match self.node(id) {
            Some(node) if node.frame_node().is_some() => out.push(id),
            Some(node) => {
                for &child in node.children() {
                    self.collect_frames(child, out);
                }
            }
            None => {}
        }
    }

    /// Runs the pattern's modify-done hook and requests a measure.
    pub fn mark_modify_done(&mut self, id: NodeId) {
        let Some(frame) = self.frame_node_mut(id) else {
            return;
        };
        let FrameNode {
            pattern,
            layout_property,
            ..
        } = frame;
        pattern.on_modify_done(layout_property);
        self.mark_dirty_node(id, PropertyChangeFlag::MEASURE);
    }

    /// Folds the pending changes of children into a node that was only
    /// queued on their behalf.
    pub(crate) fn update_layout_property_flag(&mut self, id: NodeId) {
        let Some(frame) = self.frame_node(id) else {
            return;
        };
        let flag = frame.layout_property().property_change_flag();
        if !flag.contains(PropertyChangeFlag::BY_CHILD_REQUEST) || flag.check_measure_flag() {
            return;
        }
        for child in self.frame_children(id) {
            self.update_layout_property_flag(child);
            let Some(child_flag) = self
                .frame_node(child)
                .map(|frame| frame.layout_property().property_change_flag())
            else {
                continue;
            };
            if let Some(frame) = self.frame_node_mut(id) {
                frame
                    .layout_property_mut()
                    .adjust_property_change_flag_by_child(child_flag);
            }
        }
    }

    /// Snapshots `id` and its subtree for one layout pass.
    ///
    /// The node's change flag decides what the pass does with it: a measure
    /// or tree change measures it and forces its children to measure, a
    /// layout change only lays it out, anything else is skipped. The flag is
    /// cleared on the node; the snapshot keeps a copy.
    pub fn create_layout_wrapper(
        &mut self,
        id: NodeId,
        force_measure: bool,
        force_layout: bool,
    ) -> Option<LayoutWrapper> {
        self.update_layout_property_flag(id);
        let node = self.node_mut(id)?;
        let depth = node.depth();
        let tag = node.tag().to_string();
        let rebuild = match node.kind_mut() {
            NodeKind::Custom(custom) => custom.take_pending_render(),
            _ => None,
        };
        let rebuilding = rebuild.is_some();
        let frame = node.frame_node_mut()?;
        let flag = frame.layout_property().property_change_flag();
        let algorithm: Box<dyn LayoutAlgorithm> = match rebuild {
            Some(render) => Box::new(CustomNodeLayoutAlgorithm::new(Some(render))),
            None => frame.pattern().create_layout_algorithm(),
        };
        let measure_self = force_measure
            || rebuilding
            || flag.check_measure_flag()
            || flag.check_tree_changed_flag();
        let force_children = force_measure
            || flag.contains(PropertyChangeFlag::MEASURE)
            || flag.check_tree_changed_flag();
        let layout_self = measure_self || force_layout || flag.check_need_layout_self();

        let mut wrapper = LayoutWrapper::new(
            id,
            tag,
            depth,
            frame.geometry_node().clone(),
            frame.layout_property().clone(),
            algorithm,
        );
        wrapper.set_active(frame.is_active());
        wrapper.set_skip(!measure_self, !layout_self);
        frame.layout_property_mut().clean_dirty();

        if !rebuilding {
            let children = self.children(id).to_vec();
            for child in children {
                self.adjust_layout_wrapper_tree(child, &mut wrapper, force_children, false);
            }
        }
        Some(wrapper)
    }

    /// Appends the wrappers `id` contributes to `parent`. Syntax nodes are
    /// transparent; a LazyForEach contributes a builder instead of wrappers.
    pub(crate) fn adjust_layout_wrapper_tree(
        &mut self,
        id: NodeId,
        parent: &mut LayoutWrapper,
        force_measure: bool,
        force_layout: bool,
    ) {
        let Some(node) = self.node(id) else {
            return;
        };
        match node.kind() {
            NodeKind::Frame(_) | NodeKind::Custom(_) => {
                if let Some(child) = self.create_layout_wrapper(id, force_measure, force_layout) {
                    parent.append_child(child);
                }
            }
            NodeKind::LazyForEach(lazy) => {
                let builder = LazyLayoutWrapperBuilder::new(id, lazy.builder());
                parent.set_layout_wrapper_builder(Box::new(builder));
            }
            NodeKind::ForEach(_) | NodeKind::SyntaxItem(_) => {
                let children = node.children().to_vec();
                for child in children {
                    self.adjust_layout_wrapper_tree(child, parent, force_measure, force_layout);
                }
            }
        }
    }

    /// Writes a finished wrapper back into its frame node.
    pub(crate) fn commit_layout_wrapper(&mut self, wrapper: &LayoutWrapper) {
        let host = wrapper.host();
        let Some(frame) = self.frame_node_mut(host) else {
            log::debug!("frame {host} vanished before its layout was committed");
            return;
        };
        frame.set_active(wrapper.is_active());
        let current = frame.geometry_node();
        let next = wrapper.geometry_node();
        let config = DirtySwapConfig {
            frame_size_change: current.frame_size() != next.frame_size(),
            frame_offset_change: current.frame_offset() != next.frame_offset(),
            content_size_change: current.content_size() != next.content_size(),
            content_offset_change: current.content_offset() != next.content_offset(),
            skip_measure: wrapper.skip_measure(),
            skip_layout: wrapper.skip_layout(),
        };
        if let Some(algorithm) = wrapper.algorithm() {
            if frame.pattern_mut().on_dirty_layout_wrapper_swap(algorithm, &config) {
                log::trace!("frame {host} needs a repaint after layout");
            }
        }
        let mut layout_property = wrapper.layout_property().clone();
        layout_property.clean_dirty();
        layout_property.update_property_change_flag(frame.layout_property().property_change_flag());
        *frame.layout_property_mut() = layout_property;
        // A skipped child may still have been moved by its parent's layout.
        if frame.geometry_node().check_unchanged(next) {
            return;
        }
        *frame.geometry_node_mut() = next.clone();
    }

    /// The constraint `id` was last measured with, or one derived from its
    /// frame ancestor. `None` for the root.
    pub(crate) fn parent_layout_constraint(&self, id: NodeId) -> Option<LayoutConstraintF> {
        let parent = self.frame_ancestor(id)?;
        let frame = self.frame_node(id)?;
        if let Some(constraint) = frame.geometry_node().parent_layout_constraint() {
            return Some(*constraint);
        }
        self.frame_node(parent)
            .map(|frame| frame.layout_property().create_child_constraint())
    }

    /// A child the pass never measured keeps its pending change for the
    /// next pass.
    pub(crate) fn settle_untouched_child(
        &mut self,
        id: NodeId,
        active: bool,
        pending_flag: PropertyChangeFlag,
    ) {
        if let Some(frame) = self.frame_node_mut(id) {
            frame.set_active(active);
            frame
                .layout_property_mut()
                .update_property_change_flag(pending_flag);
        }
    }
}

#[cfg(test)]
#[path = "tests/frame_node_tests.rs"]
mod tests;
