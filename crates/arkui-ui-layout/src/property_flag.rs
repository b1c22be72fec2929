//! Bitmask describing which part of a node's layout is stale.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PropertyChangeFlag: u32 {
        const MEASURE = 1 << 0;
        const LAYOUT = 1 << 1;
        const POSITION = 1 << 2;
        const REQUEST_NEW_CHILD_NODE = 1 << 3;
        const BY_CHILD_REQUEST = 1 << 4;
        const RENDER = 1 << 5;
        const RENDER_BY_CHILD_REQUEST = 1 << 6;
        const EVENT = 1 << 7;
        const NODE_TREE = 1 << 8;
    }
}

impl PropertyChangeFlag {
    pub const NORMAL: PropertyChangeFlag = PropertyChangeFlag::empty();

    pub fn check_measure_flag(self) -> bool {
        self.intersects(PropertyChangeFlag::MEASURE | PropertyChangeFlag::REQUEST_NEW_CHILD_NODE)
    }

    pub fn check_layout_flag(self) -> bool {
        self.contains(PropertyChangeFlag::LAYOUT)
    }

    /// The node must be measured or laid out again.
    pub fn check_need_layout_self(self) -> bool {
        self.intersects(
            PropertyChangeFlag::MEASURE
                | PropertyChangeFlag::LAYOUT
                | PropertyChangeFlag::REQUEST_NEW_CHILD_NODE,
        )
    }

    /// A change that has to be answered by the parent's layout.
    pub fn check_need_parent_layout(self) -> bool {
        self.intersects(PropertyChangeFlag::MEASURE | PropertyChangeFlag::POSITION)
    }

    pub fn check_tree_changed_flag(self) -> bool {
        self.contains(PropertyChangeFlag::NODE_TREE)
    }

    pub fn check_need_request_measure_and_layout(self) -> bool {
        self.check_need_layout_self() || self.contains(PropertyChangeFlag::BY_CHILD_REQUEST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_new_child_counts_as_measure() {
        assert!(PropertyChangeFlag::REQUEST_NEW_CHILD_NODE.check_measure_flag());
        assert!(!PropertyChangeFlag::LAYOUT.check_measure_flag());
        assert!(PropertyChangeFlag::LAYOUT.check_need_layout_self());
        assert!(!PropertyChangeFlag::NORMAL.check_need_request_measure_and_layout());
        assert!(PropertyChangeFlag::BY_CHILD_REQUEST.check_need_request_measure_and_layout());
    }
}
