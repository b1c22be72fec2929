use crate::custom_node::RenderFunction;
use crate::layout::{BoxLayoutAlgorithm, LayoutAlgorithm, LayoutWrapper};
use crate::tree::UiTree;

/// Layout of a custom node: renders its child on demand, then behaves like
/// a box whose child defaults to the parent's ideal size.
pub struct CustomNodeLayoutAlgorithm {
    render: Option<RenderFunction>,
}

impl CustomNodeLayoutAlgorithm {
    pub fn new(render: Option<RenderFunction>) -> Self {
        Self { render }
    }

    fn render_child(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let Some(render) = self.render.take() else {
            return;
        };
        let host = wrapper.host();
        for stale in tree.take_children(host) {
            tree.dispose_node(stale);
        }
        let Some(child) = render(tree) else {
            log::debug!("custom node #{host} rendered nothing");
            return;
        };
        tree.append_child_silently(host, child);
        let mut children = Vec::new();
        for frame in tree.frame_children(host) {
            if let Some(child_wrapper) = tree.create_layout_wrapper(frame, true, true) {
                children.push(child_wrapper);
            }
        }
        for child_wrapper in children {
            wrapper.append_child(child_wrapper);
        }
    }
}

impl LayoutAlgorithm for CustomNodeLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        self.render_child(wrapper, tree);
        let mut constraint = wrapper.layout_property().create_child_constraint();
        if constraint.self_ideal_size.is_null() {
            constraint.self_ideal_size = constraint.parent_ideal_size;
        }
        for child in wrapper.get_all_children_with_build(tree, true) {
            child.measure(tree, Some(constraint));
        }
        BoxLayoutAlgorithm::perform_measure_self(wrapper);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        BoxLayoutAlgorithm::perform_layout(wrapper, tree);
    }
}
