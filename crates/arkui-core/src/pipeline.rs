//! Pipeline settings and the dirty layout flush.

use crate::collections::map::HashSet;
use crate::tree::UiTree;
use crate::NodeId;
use arkui_ui_graphics::{OptionalSizeF, SizeF};
use arkui_ui_layout::{LayoutConstraintF, ScaleProperty};

/// Per-tree settings of the layout pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    pub root_size: SizeF,
    pub scale: ScaleProperty,
    /// Share of the main size a virtualized list keeps built on each side of
    /// its viewport.
    pub list_cache_ratio: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root_size: SizeF::new(720.0, 1280.0),
            scale: ScaleProperty::default(),
            list_cache_ratio: 0.1,
        }
    }
}

impl PipelineConfig {
    /// Constraint the root is measured with: exactly the root size.
    pub fn root_constraint(&self) -> LayoutConstraintF {
        LayoutConstraintF {
            scale_property: self.scale,
            min_size: SizeF::ZERO,
            max_size: self.root_size,
            percent_reference: self.root_size,
            parent_ideal_size: OptionalSizeF::from_size(self.root_size),
            self_ideal_size: OptionalSizeF::from_size(self.root_size),
        }
    }
}

impl UiTree {
    pub fn dirty_layout_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dirty_layout_nodes.iter().copied()
    }

    pub fn has_dirty_layout(&self) -> bool {
        !self.dirty_layout_nodes.is_empty()
    }

    /// Measures, lays out and commits every queued node, parents first.
    /// A node whose ancestor was handled in this flush is skipped.
    pub fn flush_layout(&mut self) {
        if self.dirty_layout_nodes.is_empty() {
            return;
        }
        let start = web_time::Instant::now();
        let mut dirty: Vec<NodeId> = self.dirty_layout_nodes.drain(..).collect();
        dirty.sort_by_key(|&id| self.depth(id).unwrap_or(u32::MAX));
        let mut handled: HashSet<NodeId> = HashSet::default();
        for id in dirty {
            if !self.is_on_main_tree(id) || self.has_handled_ancestor(id, &handled) {
                continue;
            }
            self.layout_dirty_node(id);
            handled.insert(id);
        }
        log::debug!(
            "layout flush over {} nodes took {:?}",
            handled.len(),
            start.elapsed()
        );
    }

    fn has_handled_ancestor(&self, id: NodeId, handled: &HashSet<NodeId>) -> bool {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if handled.contains(&ancestor) {
                return true;
            }
            current = self.parent(ancestor);
        }
        false
    }

    fn layout_dirty_node(&mut self, id: NodeId) {
        let constraint = self.parent_layout_constraint(id);
        let offset = self
            .frame_node(id)
            .map(|frame| frame.geometry_node().parent_global_offset())
            .unwrap_or_default();
        let Some(mut wrapper) = self.create_layout_wrapper(id, false, false) else {
            return;
        };
        wrapper.set_active(true);
        wrapper.measure(self, constraint);
        wrapper.layout(self, offset);
        wrapper.swap_dirty_layout_wrapper(self);
    }
}
