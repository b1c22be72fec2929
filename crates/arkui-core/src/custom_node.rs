//! Nodes whose single child comes from a script-side render function.

use crate::frame_node::FrameNode;
use crate::layout::{CustomNodeLayoutAlgorithm, LayoutAlgorithm};
use crate::pattern::Pattern;
use crate::tree::UiTree;
use crate::ui_node::{tags, NodeKind, UiNode};
use crate::{NodeError, NodeId};
use arkui_ui_layout::PropertyChangeFlag;
use std::rc::Rc;

/// Builds the child subtree of a custom node and returns its head.
pub type RenderFunction = Rc<dyn Fn(&mut UiTree) -> Option<NodeId>>;

/// Runs once when the custom node leaves the arena.
pub type DestroyFunction = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, Default)]
pub struct CustomNodePattern;

impl Pattern for CustomNodePattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(CustomNodeLayoutAlgorithm::new(None))
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}

pub struct CustomNode {
    frame: FrameNode,
    view_key: String,
    render: Option<RenderFunction>,
    needs_render: bool,
    destroy: Option<DestroyFunction>,
}

impl CustomNode {
    pub fn new(view_key: impl Into<String>, render: Option<RenderFunction>) -> Self {
        Self {
            frame: FrameNode::new(Box::new(CustomNodePattern)),
            view_key: view_key.into(),
            needs_render: render.is_some(),
            render,
            destroy: None,
        }
    }

    pub fn frame(&self) -> &FrameNode {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameNode {
        &mut self.frame
    }

    pub fn view_key(&self) -> &str {
        &self.view_key
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// The render function, if a render is due.
    pub(crate) fn take_pending_render(&mut self) -> Option<RenderFunction> {
        if !self.needs_render {
            return None;
        }
        self.needs_render = false;
        self.render.clone()
    }

    pub(crate) fn run_destroy_function(&mut self) {
        if let Some(destroy) = self.destroy.take() {
            destroy();
        }
    }
}

impl UiTree {
    /// Creates a custom node. Its child is rendered on its first measure.
    pub fn create_custom_node(
        &mut self,
        id: NodeId,
        view_key: &str,
        render: RenderFunction,
    ) -> Result<NodeId, NodeError> {
        let node = CustomNode::new(view_key, Some(render));
        self.insert_node(UiNode::new(id, tags::CUSTOM, NodeKind::Custom(node)))
    }

    fn custom_node_mut(&mut self, id: NodeId) -> Result<&mut CustomNode, NodeError> {
        match self.node_mut(id).map(UiNode::kind_mut) {
            Some(NodeKind::Custom(custom)) => Ok(custom),
            Some(_) => Err(NodeError::TypeMismatch {
                id,
                expected: "CustomNode",
            }),
            None => Err(NodeError::Missing { id }),
        }
    }

    pub fn set_render_function(
        &mut self,
        id: NodeId,
        render: RenderFunction,
    ) -> Result<(), NodeError> {
        self.custom_node_mut(id)?.render = Some(render);
        self.mark_need_update(id)
    }

    pub fn set_destroy_function(
        &mut self,
        id: NodeId,
        destroy: DestroyFunction,
    ) -> Result<(), NodeError> {
        self.custom_node_mut(id)?.destroy = Some(destroy);
        Ok(())
    }

    /// Schedules a new render: the current child is replaced during the next
    /// measure of the node.
    pub fn mark_need_update(&mut self, id: NodeId) -> Result<(), NodeError> {
        let custom = self.custom_node_mut(id)?;
        if custom.render.is_none() {
            log::warn!("custom node #{id} has no render function");
            return Ok(());
        }
        custom.needs_render = true;
        self.mark_dirty_node(id, PropertyChangeFlag::MEASURE);
        Ok(())
    }

    /// Renders the node again right away instead of at its next measure.
    pub fn update_custom_node(&mut self, id: NodeId) -> Result<(), NodeError> {
        let custom = self.custom_node_mut(id)?;
        let Some(render) = custom.render.clone() else {
            log::warn!("custom node #{id} has no render function");
            return Ok(());
        };
        custom.needs_render = false;
        for stale in self.take_children(id) {
            self.dispose_node(stale);
        }
        if let Some(child) = render(self) {
            self.add_child(id, child, None);
        }
        self.mark_dirty_node(id, PropertyChangeFlag::MEASURE);
        Ok(())
    }
}
