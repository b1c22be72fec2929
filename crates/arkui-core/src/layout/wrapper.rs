//! Snapshot of one frame node for the duration of a layout pass.

use crate::layout::{LayoutAlgorithm, LayoutAlgorithmWrapper, LayoutWrapperBuilder};
use crate::tree::UiTree;
use crate::NodeId;
use arkui_ui_graphics::OffsetF;
use arkui_ui_layout::{GeometryNode, LayoutConstraintF, LayoutProperty, PropertyChangeFlag};
use std::collections::{BTreeMap, BTreeSet};

/// Measure and layout write into the wrapper's copies of the geometry and
/// layout property; [`swap_dirty_layout_wrapper`](Self::swap_dirty_layout_wrapper)
/// commits them to the frame nodes.
pub struct LayoutWrapper {
    host: NodeId,
    tag: String,
    depth: u32,
    geometry_node: GeometryNode,
    layout_property: LayoutProperty,
    algorithm: LayoutAlgorithmWrapper,
    children: BTreeMap<usize, LayoutWrapper>,
    current_child_count: usize,
    builder: Option<Box<dyn LayoutWrapperBuilder>>,
    pending_render: BTreeSet<usize>,
    active: bool,
    measured: bool,
}

impl LayoutWrapper {
    pub fn new(
        host: NodeId,
        tag: String,
        depth: u32,
        geometry_node: GeometryNode,
        layout_property: LayoutProperty,
        algorithm: Box<dyn LayoutAlgorithm>,
    ) -> Self {
        Self {
            host,
            tag,
            depth,
            geometry_node,
            layout_property,
            algorithm: LayoutAlgorithmWrapper::new(algorithm),
            children: BTreeMap::new(),
            current_child_count: 0,
            builder: None,
            pending_render: BTreeSet::new(),
            active: false,
            measured: false,
        }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn geometry_node(&self) -> &GeometryNode {
        &self.geometry_node
    }

    pub fn geometry_node_mut(&mut self) -> &mut GeometryNode {
        &mut self.geometry_node
    }

    pub fn layout_property(&self) -> &LayoutProperty {
        &self.layout_property
    }

    pub fn layout_property_mut(&mut self) -> &mut LayoutProperty {
        &mut self.layout_property
    }

    pub fn algorithm(&self) -> Option<&dyn LayoutAlgorithm> {
        self.algorithm.algorithm()
    }

    pub fn skip_measure(&self) -> bool {
        self.algorithm.skip_measure()
    }

    pub fn skip_layout(&self) -> bool {
        self.algorithm.skip_layout()
    }

    pub(crate) fn set_skip(&mut self, skip_measure: bool, skip_layout: bool) {
        self.algorithm.set_skip(skip_measure, skip_layout);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Global offset of this node's frame origin.
    pub fn global_offset(&self) -> OffsetF {
        self.geometry_node.parent_global_offset() + self.geometry_node.frame_offset()
    }

    pub fn append_child(&mut self, child: LayoutWrapper) {
        self.children.insert(self.current_child_count, child);
        self.current_child_count += 1;
    }

    /// Hands the next `builder.total_count()` child indices to `builder`.
    pub fn set_layout_wrapper_builder(&mut self, mut builder: Box<dyn LayoutWrapperBuilder>) {
        if self.builder.is_some() {
            log::warn!(
                "{} #{} already has a lazy child builder; replacing it",
                self.tag,
                self.host
            );
        }
        builder.set_start_index(self.current_child_count);
        self.current_child_count += builder.total_count();
        self.builder = Some(builder);
    }

    pub fn total_child_count(&self) -> usize {
        self.current_child_count
    }

    /// The child at `index`, built on demand when it is lazy.
    ///
    /// With `add_to_render_tree` the child is marked active and committed at
    /// swap time.
    pub fn get_or_create_child_by_index(
        &mut self,
        index: usize,
        tree: &mut UiTree,
        add_to_render_tree: bool,
    ) -> Option<&mut LayoutWrapper> {
        let Self {
            host,
            children,
            builder,
            pending_render,
            current_child_count,
            ..
        } = self;
        if index >= *current_child_count {
            log::warn!(
                "child index {index} out of range for #{host} ({} children)",
                current_child_count
            );
            return None;
        }
        let child = match children.get_mut(&index) {
            Some(child) => child,
            None => builder
                .as_mut()?
                .get_or_create_wrapper_by_index(index, tree)?,
        };
        if add_to_render_tree {
            child.set_active(true);
            pending_render.insert(index);
        }
        Some(child)
    }

    /// The child at `index` if it exists without building anything.
    pub fn child_by_index_mut(&mut self, index: usize) -> Option<&mut LayoutWrapper> {
        if self.children.contains_key(&index) {
            return self.children.get_mut(&index);
        }
        self.builder.as_mut()?.wrapper_by_index_mut(index)
    }

    /// Every child in index order, building lazy ones as needed.
    pub fn get_all_children_with_build(
        &mut self,
        tree: &mut UiTree,
        add_to_render_tree: bool,
    ) -> Vec<&mut LayoutWrapper> {
        let Self {
            children,
            builder,
            pending_render,
            ..
        } = self;
        let mut all: Vec<(usize, &mut LayoutWrapper)> = children
            .iter_mut()
            .map(|(index, child)| (*index, child))
            .collect();
        if let Some(builder) = builder.as_mut() {
            all.extend(builder.expand_all(tree));
        }
        all.sort_by_key(|(index, _)| *index);
        all.into_iter()
            .map(|(index, child)| {
                if add_to_render_tree {
                    child.set_active(true);
                    pending_render.insert(index);
                }
                child
            })
            .collect()
    }

    /// Children built so far that are part of the render tree.
    pub fn active_children(&self) -> Vec<&LayoutWrapper> {
        let mut out: Vec<&LayoutWrapper> = self.children.values().filter(|c| c.active).collect();
        if let Some(builder) = &self.builder {
            out.extend(builder.built_wrappers().into_iter().filter(|c| c.active));
        }
        out
    }

    /// Drops the child at `index` from the render tree. The node itself is
    /// kept.
    pub fn remove_child_in_render_tree(&mut self, index: usize) -> bool {
        self.pending_render.remove(&index);
        match self.child_by_index_mut(index) {
            Some(child) => {
                child.set_active(false);
                true
            }
            None => false,
        }
    }

    pub fn remove_all_children_in_render_tree(&mut self) {
        for index in 0..self.current_child_count {
            self.remove_child_in_render_tree(index);
        }
    }

    /// Measures the node against `parent_constraint`, or against the root
    /// constraint of the tree when there is none.
    pub fn measure(&mut self, tree: &mut UiTree, parent_constraint: Option<LayoutConstraintF>) {
        let constraint = parent_constraint.unwrap_or_else(|| tree.config().root_constraint());
        let unchanged = self.geometry_node.parent_layout_constraint() == Some(&constraint);
        if self.algorithm.skip_measure() {
            if unchanged {
                return;
            }
            log::trace!("{} #{} measured again for a new constraint", self.tag, self.host);
            self.algorithm.set_skip(false, false);
        }
        self.geometry_node.set_parent_layout_constraint(constraint);
        self.layout_property.update_layout_constraint(&constraint, true);
        self.layout_property.update_content_constraint();

        let Some(mut algorithm) = self.algorithm.take() else {
            log::error!("{} #{} has no layout algorithm", self.tag, self.host);
            return;
        };
        let flag = self.layout_property.property_change_flag();
        if !unchanged || flag.check_measure_flag() {
            if let Some(content) = self.layout_property.content_constraint().copied() {
                if let Some(size) = algorithm.measure_content(&content, self) {
                    self.geometry_node.set_content_size(size);
                }
            }
        }
        algorithm.measure(self, tree);
        self.algorithm.restore(algorithm);
        self.measured = true;
        log::trace!(
            "measured {} #{} to {:?}",
            self.tag,
            self.host,
            self.geometry_node.frame_size()
        );
    }

    /// Lays out the node below `parent_global_offset`.
    ///
    /// A node that still needs a measure this pass is measured first with the
    /// constraint it was last given.
    pub fn layout(&mut self, tree: &mut UiTree, parent_global_offset: OffsetF) {
        self.geometry_node.set_parent_global_offset(parent_global_offset);
        if !self.measured && !self.algorithm.skip_measure() {
            let constraint = self.geometry_node.parent_layout_constraint().copied();
            self.measure(tree, constraint);
        }
        if self.algorithm.skip_layout() {
            return;
        }
        let Some(mut algorithm) = self.algorithm.take() else {
            log::error!("{} #{} has no layout algorithm", self.tag, self.host);
            return;
        };
        algorithm.layout(self, tree);
        self.algorithm.restore(algorithm);
    }

    /// Commits the pass: children added to the render tree first, then the
    /// lazy build cache, then this node.
    pub fn swap_dirty_layout_wrapper(&mut self, tree: &mut UiTree) {
        let pending: Vec<usize> = self.pending_render.iter().copied().collect();
        for index in pending {
            if let Some(child) = self.child_by_index_mut(index) {
                child.swap_dirty_layout_wrapper(tree);
            }
        }
        for (index, child) in &self.children {
            if !self.pending_render.contains(index) {
                let pending_flag = if child.measured {
                    PropertyChangeFlag::NORMAL
                } else {
                    child.layout_property.property_change_flag()
                };
                tree.settle_untouched_child(child.host, child.active, pending_flag);
            }
        }
        if let Some(builder) = self.builder.as_mut() {
            builder.update_build_cache(tree);
        }
        tree.commit_layout_wrapper(self);
    }
}

#[cfg(test)]
#[path = "../tests/layout_wrapper_tests.rs"]
mod tests;
