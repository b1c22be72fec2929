//! Id allocation and lifecycle bookkeeping for every node of a tree.
//!
//! Ids are handed out monotonically and never reused. Removal is a two step
//! handshake: a node removed from the tree becomes
//! [`ElementState::PendingRemoval`] and shows up in
//! [`ElementRegister::removed_elements`] until the script layer acknowledges
//! it with [`ElementRegister::clear_removed_element`], after which the id is
//! [`ElementState::Purged`]. Purged ids are kept as tombstones.

use crate::collections::map::HashMap;
use crate::{NodeError, NodeId};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementState {
    Live,
    PendingRemoval,
    Purged,
}

#[derive(Debug, Default)]
pub struct ElementRegister {
    next_unique_id: NodeId,
    states: HashMap<NodeId, ElementState>,
    removed_elements: BTreeSet<NodeId>,
}

impl ElementRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_unique_id(&mut self) -> NodeId {
        let id = self.next_unique_id;
        self.next_unique_id += 1;
        id
    }

    pub fn add_element(&mut self, id: NodeId) -> Result<(), NodeError> {
        match self.states.get(&id) {
            Some(ElementState::Live) => {
                log::error!("element {id} is already registered");
                return Err(NodeError::AlreadyRegistered { id });
            }
            Some(_) => {
                log::error!("element id {id} was retired and cannot be registered again");
                return Err(NodeError::Purged { id });
            }
            None => {}
        }
        self.states.insert(id, ElementState::Live);
        if id >= self.next_unique_id {
            self.next_unique_id = id + 1;
        }
        Ok(())
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.states.get(&id) == Some(&ElementState::Live)
    }

    pub fn state(&self, id: NodeId) -> Option<ElementState> {
        self.states.get(&id).copied()
    }

    /// Moves a live id into the pending removal set.
    pub fn remove_element(&mut self, id: NodeId) -> bool {
        if !self.exists(id) {
            return false;
        }
        self.states.insert(id, ElementState::PendingRemoval);
        self.removed_elements.insert(id);
        true
    }

    /// Retires a live id without reporting it to the script layer.
    pub fn remove_element_silently(&mut self, id: NodeId) -> bool {
        if !self.exists(id) {
            return false;
        }
        self.states.insert(id, ElementState::Purged);
        true
    }

    pub fn removed_elements(&self) -> &BTreeSet<NodeId> {
        &self.removed_elements
    }

    /// Acknowledges the removal of `id`.
    pub fn clear_removed_element(&mut self, id: NodeId) -> bool {
        if !self.removed_elements.remove(&id) {
            return false;
        }
        self.states.insert(id, ElementState::Purged);
        true
    }

    pub fn live_count(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state == ElementState::Live)
            .count()
    }

    /// Forgets every id. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.states.clear();
        self.removed_elements.clear();
    }
}
