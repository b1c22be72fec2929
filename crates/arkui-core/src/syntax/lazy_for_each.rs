//! Lazily materialized children backed by a data source.

use crate::tree::UiTree;
use crate::ui_node::{tags, NodeKind, UiNode};
use crate::{NodeError, NodeId};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Data source of a LazyForEach.
pub trait LazyForEachSource {
    fn total_count(&self) -> usize;

    /// Builds the subtree of item `index` in `tree` and returns its key and
    /// head node. The node must not be mounted anywhere.
    fn build_item(&mut self, tree: &mut UiTree, index: usize) -> Option<(String, NodeId)>;
}

/// Builds items on first access and caches them until the layout evicts
/// them through [`UiTree::update_cached_items`].
pub struct LazyForEachBuilder {
    source: Box<dyn LazyForEachSource>,
    cached_items: BTreeMap<usize, (String, NodeId)>,
}

impl LazyForEachBuilder {
    pub fn new(source: Box<dyn LazyForEachSource>) -> Self {
        Self {
            source,
            cached_items: BTreeMap::new(),
        }
    }

    pub fn shared(source: Box<dyn LazyForEachSource>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(source)))
    }

    pub fn total_count(&self) -> usize {
        self.source.total_count()
    }

    /// The item at `index`, built at most once while it stays cached.
    pub fn child_by_index(&mut self, tree: &mut UiTree, index: usize) -> Option<(String, NodeId)> {
        if let Some(item) = self.cached_items.get(&index) {
            return Some(item.clone());
        }
        if index >= self.total_count() {
            log::warn!("lazy item {index} out of range ({} items)", self.total_count());
            return None;
        }
        let item = self.source.build_item(tree, index)?;
        log::trace!("built lazy item {index} with key {}", item.0);
        self.cached_items.insert(index, item.clone());
        Some(item)
    }

    pub fn cached_items(&self) -> &BTreeMap<usize, (String, NodeId)> {
        &self.cached_items
    }

    /// Keeps the entries whose index is in `active` and returns the others.
    pub(crate) fn retain_cached(&mut self, active: &BTreeSet<usize>) -> Vec<(usize, String, NodeId)> {
        let evicted: Vec<usize> = self
            .cached_items
            .keys()
            .copied()
            .filter(|index| !active.contains(index))
            .collect();
        evicted
            .into_iter()
            .filter_map(|index| {
                self.cached_items
                    .remove(&index)
                    .map(|(key, node)| (index, key, node))
            })
            .collect()
    }
}

/// Tree node standing for every item of a [`LazyForEachBuilder`]. Its child
/// list holds the cached items only.
pub struct LazyForEachNode {
    builder: Rc<RefCell<LazyForEachBuilder>>,
}

impl LazyForEachNode {
    pub fn new(builder: Rc<RefCell<LazyForEachBuilder>>) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> Rc<RefCell<LazyForEachBuilder>> {
        Rc::clone(&self.builder)
    }

    pub fn total_count(&self) -> usize {
        self.builder.borrow().total_count()
    }
}

impl UiTree {
    /// Returns the LazyForEach `id`, creating it around `builder` if needed.
    /// An existing node given a different builder switches to it.
    pub fn get_or_create_lazy_for_each_node(
        &mut self,
        id: NodeId,
        builder: Rc<RefCell<LazyForEachBuilder>>,
    ) -> Result<NodeId, NodeError> {
        match self.node_mut(id).map(UiNode::kind_mut) {
            Some(NodeKind::LazyForEach(lazy)) => {
                if !Rc::ptr_eq(&lazy.builder, &builder) {
                    log::warn!("LazyForEach #{id} replaces its builder");
                    lazy.builder = builder;
                }
                Ok(id)
            }
            Some(_) => Err(NodeError::TypeMismatch {
                id,
                expected: "LazyForEachNode",
            }),
            None => self.insert_node(UiNode::new(
                id,
                tags::LAZY_FOR_EACH,
                NodeKind::LazyForEach(LazyForEachNode::new(builder)),
            )),
        }
    }

    pub fn lazy_for_each_builder(&self, id: NodeId) -> Option<Rc<RefCell<LazyForEachBuilder>>> {
        match self.node(id).map(UiNode::kind) {
            Some(NodeKind::LazyForEach(lazy)) => Some(lazy.builder()),
            _ => None,
        }
    }

    /// Rebuilds the children of the LazyForEach `id` from the cache entries
    /// in `active` and disposes every evicted node.
    pub fn update_cached_items(&mut self, id: NodeId, active: &BTreeSet<usize>) {
        let Some(builder) = self.lazy_for_each_builder(id) else {
            log::warn!("node {id} is not a LazyForEach");
            return;
        };
        let evicted = builder.borrow_mut().retain_cached(active);
        self.take_children(id);
        let kept: Vec<NodeId> = builder
            .borrow()
            .cached_items()
            .values()
            .map(|(_, node)| *node)
            .collect();
        for node in kept {
            self.append_child_silently(id, node);
        }
        for (index, key, node) in evicted {
            log::trace!("LazyForEach #{id} evicts item {index} ({key})");
            self.dispose_node(node);
        }
    }
}
