use crate::custom_node::CustomNode;
use crate::frame_node::FrameNode;
use crate::syntax::{ForEachNode, LazyForEachNode, SyntaxItem};
use crate::NodeId;

/// Tags of the node kinds the core creates itself.
pub mod tags {
    pub const FOR_EACH: &str = "ForEach";
    pub const LAZY_FOR_EACH: &str = "LazyForEach";
    pub const SYNTAX_ITEM: &str = "SyntaxItem";
    pub const CUSTOM: &str = "Custom";
}

pub enum NodeKind {
    Frame(FrameNode),
    Custom(CustomNode),
    ForEach(ForEachNode),
    LazyForEach(LazyForEachNode),
    SyntaxItem(SyntaxItem),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Frame(_) => "FrameNode",
            NodeKind::Custom(_) => "CustomNode",
            NodeKind::ForEach(_) => "ForEachNode",
            NodeKind::LazyForEach(_) => "LazyForEachNode",
            NodeKind::SyntaxItem(_) => "SyntaxItem",
        }
    }
}

pub struct UiNode {
    id: NodeId,
    tag: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: u32,
    pub(crate) on_main_tree: bool,
    pub(crate) kind: NodeKind,
}

impl UiNode {
    pub fn new(id: NodeId, tag: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            tag: tag.into(),
            parent: None,
            children: Vec::new(),
            depth: 0,
            on_main_tree: false,
            kind,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_on_main_tree(&self) -> bool {
        self.on_main_tree
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Frame and custom nodes both own a frame.
    pub fn frame_node(&self) -> Option<&FrameNode> {
        match &self.kind {
            NodeKind::Frame(frame) => Some(frame),
            NodeKind::Custom(custom) => Some(custom.frame()),
            _ => None,
        }
    }

    pub fn frame_node_mut(&mut self) -> Option<&mut FrameNode> {
        match &mut self.kind {
            NodeKind::Frame(frame) => Some(frame),
            NodeKind::Custom(custom) => Some(custom.frame_mut()),
            _ => None,
        }
    }

    /// Atomic nodes cannot take children during a build.
    pub fn is_atomic_node(&self) -> bool {
        match &self.kind {
            NodeKind::Frame(frame) => frame.pattern().is_atomic_node(),
            _ => false,
        }
    }

    /// ForEach, LazyForEach and their item wrappers have no geometry.
    pub fn is_syntax_node(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::ForEach(_) | NodeKind::LazyForEach(_) | NodeKind::SyntaxItem(_)
        )
    }
}
