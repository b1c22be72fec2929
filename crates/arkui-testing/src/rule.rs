use crate::fixtures::root_stack;
use arkui_core::{NodeId, PipelineConfig, UiTree, ViewStackProcessor};
use arkui_ui_graphics::{OffsetF, RectF, SizeF};

/// Headless harness around one tree: a stack root of the configured size,
/// a build stack, and helpers to flush layout and read results.
pub struct LayoutTestRule {
    tree: UiTree,
    stack: ViewStackProcessor,
    root: NodeId,
}

impl LayoutTestRule {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_root_size(width: f32, height: f32) -> Self {
        Self::with_config(PipelineConfig {
            root_size: SizeF::new(width, height),
            ..PipelineConfig::default()
        })
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        let mut tree = UiTree::with_config(config);
        let root = root_stack(&mut tree);
        Self {
            tree,
            stack: ViewStackProcessor::new(),
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    /// The tree and the build stack together, for driving builds.
    pub fn parts_mut(&mut self) -> (&mut UiTree, &mut ViewStackProcessor) {
        (&mut self.tree, &mut self.stack)
    }

    /// Appends `child` to the root.
    pub fn mount(&mut self, child: NodeId) {
        self.tree.add_child(self.root, child, None);
    }

    /// Flushes layout until nothing is dirty.
    pub fn pump_until_idle(&mut self) {
        let mut passes = 0;
        while self.tree.has_dirty_layout() {
            passes += 1;
            if passes > 16 {
                panic!("layout did not settle after {passes} passes");
            }
            self.tree.flush_layout();
        }
    }

    pub fn frame_rect(&self, id: NodeId) -> Option<RectF> {
        self.tree
            .frame_node(id)
            .map(|frame| frame.geometry_node().frame_rect())
    }

    pub fn frame_size(&self, id: NodeId) -> Option<SizeF> {
        self.frame_rect(id).map(|rect| rect.size())
    }

    /// Offset of the frame of `id` relative to the root.
    pub fn global_offset(&self, id: NodeId) -> Option<OffsetF> {
        self.tree.frame_node(id).map(|frame| {
            frame.geometry_node().parent_global_offset() + frame.geometry_node().frame_offset()
        })
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.tree.frame_node(id).map_or(false, |frame| frame.is_active())
    }

    pub fn dump_tree(&self) -> String {
        self.tree.dump_tree(self.root)
    }
}

impl Default for LayoutTestRule {
    fn default() -> Self {
        Self::new()
    }
}
