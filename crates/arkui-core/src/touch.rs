//! Hit testing over the frame tree.

use crate::tree::UiTree;
use crate::NodeId;
use arkui_ui_graphics::PointF;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTestResult {
    OutOfRegion,
    Bubbling,
    StopBubbling,
}

/// How a hit frame treats the nodes below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitTestMode {
    /// Records itself and stops siblings underneath.
    #[default]
    Default,
    /// Records itself without testing its children.
    Block,
    /// Records itself and lets siblings underneath be tested too.
    Transparent,
    /// Not hittable; its children still are.
    None,
}

/// Hit frames, deepest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchTestResult {
    hits: SmallVec<[NodeId; 8]>,
}

impl TouchTestResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: NodeId) {
        self.hits.push(id);
    }

    pub fn hits(&self) -> &[NodeId] {
        &self.hits
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }
}

impl UiTree {
    /// Tests `point`, given in the coordinate space of the parent of `id`.
    pub fn touch_test(&self, id: NodeId, point: PointF, result: &mut TouchTestResult) -> HitTestResult {
        let Some(node) = self.node(id) else {
            return HitTestResult::OutOfRegion;
        };
        let Some(frame) = node.frame_node() else {
            return self.touch_test_children(id, point, result);
        };
        if !frame.is_active() {
            return HitTestResult::OutOfRegion;
        }
        let rect = frame.geometry_node().frame_rect();
        if !rect.contains(point) {
            return HitTestResult::OutOfRegion;
        }
        let mode = frame.hit_test_mode();
        if mode == HitTestMode::Block {
            result.push(id);
            return HitTestResult::StopBubbling;
        }
        let local = point - rect.offset();
        let children = self.touch_test_children(id, local, result);
        match mode {
            HitTestMode::None => children,
            HitTestMode::Transparent => {
                result.push(id);
                if children == HitTestResult::StopBubbling {
                    HitTestResult::StopBubbling
                } else {
                    HitTestResult::Bubbling
                }
            }
            HitTestMode::Default | HitTestMode::Block => {
                result.push(id);
                HitTestResult::StopBubbling
            }
        }
    }

    /// Children are visited topmost first, which is reverse child order.
    fn touch_test_children(&self, id: NodeId, point: PointF, result: &mut TouchTestResult) -> HitTestResult {
        let mut outcome = HitTestResult::OutOfRegion;
        for &child in self.children(id).iter().rev() {
            match self.touch_test(child, point, result) {
                HitTestResult::StopBubbling => return HitTestResult::StopBubbling,
                HitTestResult::Bubbling => outcome = HitTestResult::Bubbling,
                HitTestResult::OutOfRegion => {}
            }
        }
        outcome
    }
}

#[cfg(test)]
#[path = "tests/touch_tests.rs"]
mod tests;
