use crate::layout::LayoutWrapper;
use crate::tree::UiTree;

/// Produces child wrappers on demand for a range of a parent's children.
///
/// Indices are the parent's child indices. The builder covers
/// `start_index()..start_index() + total_count()`.
pub trait LayoutWrapperBuilder {
    fn start_index(&self) -> usize;

    fn set_start_index(&mut self, index: usize);

    fn total_count(&self) -> usize;

    /// Builds the wrapper at `index` on first access.
    fn get_or_create_wrapper_by_index(
        &mut self,
        index: usize,
        tree: &mut UiTree,
    ) -> Option<&mut LayoutWrapper>;

    /// The wrapper at `index` if this pass already built it.
    fn wrapper_by_index_mut(&mut self, index: usize) -> Option<&mut LayoutWrapper>;

    fn built_wrappers(&self) -> Vec<&LayoutWrapper>;

    /// Builds every wrapper in range.
    fn expand_all(&mut self, tree: &mut UiTree) -> Vec<(usize, &mut LayoutWrapper)>;

    /// Settles the build cache once the pass knows which children stayed
    /// active.
    fn update_build_cache(&mut self, tree: &mut UiTree);
}
