//! Scroll input contract shared by the scrollable containers.

use arkui_core::{NodeError, NodeId, Pattern, UiTree};
use arkui_ui_layout::PropertyChangeFlag;

/// Where a scroll offset comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollSource {
    /// A finger drag.
    #[default]
    Update,
    /// A fling or spring animation frame.
    Animation,
    /// The touch that starts a drag. Carries no distance.
    Start,
    /// A programmatic jump.
    Jump,
}

/// A pattern that accepts scroll input.
///
/// Offsets follow the gesture: positive when the finger moves down (or
/// right) and content earlier in the list is revealed.
pub trait Scrollable: Pattern {
    /// What a host whose pattern accepted an offset has to redo.
    const SCROLL_DIRTY_FLAG: PropertyChangeFlag;

    /// Returns false when the input is rejected because the content already
    /// sits at the edge the offset pushes against.
    fn update_scroll_position(&mut self, offset: f32, source: ScrollSource) -> bool;
}

/// Runs `f` on the pattern of `host` and queues `host` with `flag`.
pub fn update_pattern<P: Pattern, R>(
    tree: &mut UiTree,
    host: NodeId,
    flag: PropertyChangeFlag,
    f: impl FnOnce(&mut P) -> R,
) -> Result<R, NodeError> {
    let result = tree.with_pattern_mut::<P, R>(host, f)?;
    tree.mark_dirty_node(host, flag);
    Ok(result)
}

/// Feeds one scroll offset to the pattern of `host`. An accepted offset
/// queues the host for the next layout pass.
pub fn scroll_by<P: Scrollable>(
    tree: &mut UiTree,
    host: NodeId,
    offset: f32,
    source: ScrollSource,
) -> Result<bool, NodeError> {
    let accepted =
        tree.with_pattern_mut::<P, bool>(host, |pattern| pattern.update_scroll_position(offset, source))?;
    if accepted && source != ScrollSource::Start {
        tree.mark_dirty_node(host, P::SCROLL_DIRTY_FLAG);
    } else if !accepted {
        log::trace!("scroll of {offset} rejected at the edge of #{host}");
    }
    Ok(accepted)
}
