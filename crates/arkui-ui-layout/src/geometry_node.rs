//! Per-node geometry produced by measure and layout.

use crate::constraints::LayoutConstraintF;
use arkui_ui_graphics::{OffsetF, RectF, SizeF};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryProperty {
    pub rect: RectF,
}

/// Frame, content and bound rects of one node.
///
/// The frame offset is relative to the parent's frame; the content offset is
/// relative to the node's own frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryNode {
    frame: GeometryProperty,
    bound: Option<GeometryProperty>,
    content: Option<GeometryProperty>,
    parent_global_offset: OffsetF,
    parent_layout_constraint: Option<LayoutConstraintF>,
}

impl GeometryNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when a commit of `other` would not change what is on screen.
    pub fn check_unchanged(&self, other: &GeometryNode) -> bool {
        self.frame == other.frame
            && self.bound == other.bound
            && self.content == other.content
            && self.parent_layout_constraint == other.parent_layout_constraint
    }

    pub fn frame_rect(&self) -> RectF {
        self.frame.rect
    }

    pub fn set_frame_rect(&mut self, rect: RectF) {
        self.frame.rect = rect;
    }

    pub fn frame_size(&self) -> SizeF {
        self.frame.rect.size()
    }

    pub fn set_frame_size(&mut self, size: SizeF) {
        self.frame.rect.set_size(size);
    }

    pub fn frame_offset(&self) -> OffsetF {
        self.frame.rect.offset()
    }

    pub fn set_frame_offset(&mut self, offset: OffsetF) {
        self.frame.rect.set_offset(offset);
    }

    pub fn bound(&self) -> Option<&GeometryProperty> {
        self.bound.as_ref()
    }

    pub fn set_bound_rect(&mut self, rect: RectF) {
        self.bound.get_or_insert_with(Default::default).rect = rect;
    }

    pub fn content(&self) -> Option<&GeometryProperty> {
        self.content.as_ref()
    }

    /// Zero when no content was measured.
    pub fn content_size(&self) -> SizeF {
        self.content
            .map(|content| content.rect.size())
            .unwrap_or_default()
    }

    pub fn set_content_size(&mut self, size: SizeF) {
        self.content.get_or_insert_with(Default::default).rect.set_size(size);
    }

    pub fn content_offset(&self) -> OffsetF {
        self.content
            .map(|content| content.rect.offset())
            .unwrap_or_default()
    }

    pub fn set_content_offset(&mut self, offset: OffsetF) {
        self.content
            .get_or_insert_with(Default::default)
            .rect
            .set_offset(offset);
    }

    pub fn parent_global_offset(&self) -> OffsetF {
        self.parent_global_offset
    }

    pub fn set_parent_global_offset(&mut self, offset: OffsetF) {
        self.parent_global_offset = offset;
    }

    pub fn parent_layout_constraint(&self) -> Option<&LayoutConstraintF> {
        self.parent_layout_constraint.as_ref()
    }

    pub fn set_parent_layout_constraint(&mut self, constraint: LayoutConstraintF) {
        self.parent_layout_constraint = Some(constraint);
    }

    pub fn reset_parent_layout_constraint(&mut self) {
        self.parent_layout_constraint = None;
    }
}
