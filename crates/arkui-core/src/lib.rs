//! UI node tree and layout pipeline core for ArkUI
//!
//! The tree is an arena ([`UiTree`]) of [`UiNode`]s addressed by [`NodeId`].
//! Parents own their children through the child list; a child only records
//! its parent id. Every tree carries its own [`ElementRegister`] and
//! [`PipelineConfig`], so independent trees never share state.
//!
//! A layout pass snapshots the dirty part of the tree into [`LayoutWrapper`]s,
//! runs measure then layout on the snapshot, and swaps the results back into
//! the frame nodes.

pub mod collections;
mod custom_node;
mod element_register;
mod error;
mod frame_node;
pub mod layout;
mod pattern;
mod pipeline;
pub mod syntax;
#[cfg(test)]
mod test_support;
mod touch;
mod tree;
mod ui_node;
mod view_stack;

pub type NodeId = usize;

pub use custom_node::{CustomNode, CustomNodePattern, DestroyFunction, RenderFunction};
pub use element_register::{ElementRegister, ElementState};
pub use error::NodeError;
pub use frame_node::FrameNode;
pub use layout::{
    BoxLayoutAlgorithm, LayoutAlgorithm, LayoutAlgorithmWrapper, LayoutWrapper,
    LayoutWrapperBuilder,
};
pub use pattern::{DirtySwapConfig, Pattern};
pub use pipeline::PipelineConfig;
pub use syntax::{
    ForEachNode, LazyForEachBuilder, LazyForEachNode, LazyForEachSource,
    LazyLayoutWrapperBuilder, SyntaxItem,
};
pub use touch::{HitTestMode, HitTestResult, TouchTestResult};
pub use tree::UiTree;
pub use ui_node::{tags, NodeKind, UiNode};
pub use view_stack::{LayoutTask, ViewStackProcessor};

pub mod prelude {
    pub use crate::layout::{LayoutAlgorithm, LayoutWrapper};
    pub use crate::pattern::Pattern;
    pub use crate::tree::UiTree;
    pub use crate::view_stack::ViewStackProcessor;
    pub use crate::NodeId;
}
