use crate::layout::{LayoutWrapper, LayoutWrapperBuilder};
use crate::syntax::LazyForEachBuilder;
use crate::tree::UiTree;
use crate::NodeId;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Wrapper builder over the items of one LazyForEach node.
pub struct LazyLayoutWrapperBuilder {
    host: NodeId,
    builder: Rc<RefCell<LazyForEachBuilder>>,
    start_index: usize,
    wrappers: BTreeMap<usize, LayoutWrapper>,
    touched: bool,
}

impl LazyLayoutWrapperBuilder {
    pub fn new(host: NodeId, builder: Rc<RefCell<LazyForEachBuilder>>) -> Self {
        Self {
            host,
            builder,
            start_index: 0,
            wrappers: BTreeMap::new(),
            touched: false,
        }
    }

    fn local_index(&self, index: usize) -> Option<usize> {
        let local = index.checked_sub(self.start_index)?;
        (local < self.total_count()).then_some(local)
    }

    fn build(&mut self, local: usize, tree: &mut UiTree) -> Option<()> {
        if self.wrappers.contains_key(&local) {
            return Some(());
        }
        let (_, node) = self.builder.borrow_mut().child_by_index(tree, local)?;
        if !tree.children(self.host).contains(&node) {
            tree.append_child_silently(self.host, node);
        }
        let wrapper = tree.create_layout_wrapper(node, true, true)?;
        self.wrappers.insert(local, wrapper);
        Some(())
    }
}

impl LayoutWrapperBuilder for LazyLayoutWrapperBuilder {
    fn start_index(&self) -> usize {
        self.start_index
    }

    fn set_start_index(&mut self, index: usize) {
        self.start_index = index;
    }

    fn total_count(&self) -> usize {
        self.builder.borrow().total_count()
    }

    fn get_or_create_wrapper_by_index(
        &mut self,
        index: usize,
        tree: &mut UiTree,
    ) -> Option<&mut LayoutWrapper> {
        let Some(local) = self.local_index(index) else {
            log::warn!(
                "lazy index {index} outside {}..{}",
                self.start_index,
                self.start_index + self.total_count()
            );
            return None;
        };
        self.touched = true;
        self.build(local, tree)?;
        self.wrappers.get_mut(&local)
    }

    fn wrapper_by_index_mut(&mut self, index: usize) -> Option<&mut LayoutWrapper> {
        let local = self.local_index(index)?;
        self.wrappers.get_mut(&local)
    }

    fn built_wrappers(&self) -> Vec<&LayoutWrapper> {
        self.wrappers.values().collect()
    }

    fn expand_all(&mut self, tree: &mut UiTree) -> Vec<(usize, &mut LayoutWrapper)> {
        self.touched = true;
        for local in 0..self.total_count() {
            self.build(local, tree);
        }
        let start = self.start_index;
        self.wrappers
            .iter_mut()
            .map(|(local, wrapper)| (start + local, wrapper))
            .collect()
    }

    /// Items that ended the pass outside the render tree are evicted. A pass
    /// that never asked for an item leaves the cache alone.
    fn update_build_cache(&mut self, tree: &mut UiTree) {
        if !self.touched {
            return;
        }
        let active: BTreeSet<usize> = self
            .wrappers
            .iter()
            .filter(|(_, wrapper)| wrapper.is_active())
            .map(|(local, _)| *local)
            .collect();
        log::debug!(
            "LazyForEach #{} keeps {} of {} built items",
            self.host,
            active.len(),
            self.wrappers.len()
        );
        tree.update_cached_items(self.host, &active);
    }
}
