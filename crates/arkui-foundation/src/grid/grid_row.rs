use arkui_core::{LayoutAlgorithm, LayoutWrapper, Pattern, UiTree};
use arkui_ui_graphics::{OffsetF, OptionalSizeF, SizeF};
use arkui_ui_layout::measure_utils::{
    add_padding_to_size, constrain_size, convert_to_px, minus_padding_to_size, padding_offset,
};
use arkui_ui_layout::{Dimension, GridColLayoutProperty, LayoutProperty};

const DEFAULT_COLUMNS: usize = 12;

/// A responsive row that splits its width into equal columns.
#[derive(Clone, Debug)]
pub struct GridRowPattern {
    columns: usize,
    gutter: Dimension,
}

impl Default for GridRowPattern {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            gutter: Dimension::px(0.0),
        }
    }
}

impl GridRowPattern {
    pub fn new(columns: usize, gutter: Dimension) -> Self {
        Self {
            columns: columns.max(1),
            gutter,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn gutter(&self) -> Dimension {
        self.gutter
    }

    pub fn set_gutter(&mut self, gutter: Dimension) {
        self.gutter = gutter;
    }
}

impl Pattern for GridRowPattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(GridRowLayoutAlgorithm::new(self.columns, self.gutter))
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}

/// A child of a grid row covering `span` columns after skipping `offset`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridColPattern;

impl Pattern for GridColPattern {
    fn create_layout_property(&self) -> LayoutProperty {
        LayoutProperty::with_container(GridColLayoutProperty::default())
    }

    fn is_atomic_node(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    index: usize,
    line: usize,
    column: usize,
}

/// Places grid columns in `order`, wrapping to a new line whenever a
/// column does not fit in what is left of the current one.
#[derive(Clone, Debug)]
pub struct GridRowLayoutAlgorithm {
    columns: usize,
    gutter: Dimension,
    gutter_px: f32,
    column_width: f32,
    placements: Vec<Placement>,
    line_heights: Vec<f32>,
}

impl GridRowLayoutAlgorithm {
    pub fn new(columns: usize, gutter: Dimension) -> Self {
        Self {
            columns: columns.max(1),
            gutter,
            gutter_px: 0.0,
            column_width: 0.0,
            placements: Vec::new(),
            line_heights: Vec::new(),
        }
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn line_count(&self) -> usize {
        self.line_heights.len()
    }

    fn span_width(&self, span: usize) -> f32 {
        span as f32 * self.column_width + span.saturating_sub(1) as f32 * self.gutter_px
    }

    /// `(index, span, offset)` of every column, sorted by order.
    fn collect_columns(&self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) -> Vec<(usize, usize, usize)> {
        let mut columns = Vec::new();
        for index in 0..wrapper.total_child_count() {
            let Some(child) = wrapper.get_or_create_child_by_index(index, tree, true) else {
                continue;
            };
            let (span, offset, order) = child
                .layout_property()
                .typed::<GridColLayoutProperty>()
                .map_or((1, 0, 0), |col| {
                    (col.span_or_default(), col.offset_or_default(), col.order_or_default())
                });
            columns.push((order, index, span.min(self.columns), offset));
        }
        columns.sort_by_key(|(order, index, _, _)| (*order, *index));
        columns
            .into_iter()
            .map(|(_, index, span, offset)| (index, span, offset))
            .collect()
    }

    fn place(&mut self, columns: &[(usize, usize, usize)]) {
        self.placements.clear();
        let (mut line, mut cursor) = (0, 0);
        for &(index, span, offset) in columns {
            let offset = offset % self.columns;
            if cursor + offset + span > self.columns {
                line += 1;
                cursor = 0;
            }
            cursor = (cursor + offset).min(self.columns - span);
            self.placements.push(Placement { index, line, column: cursor });
            cursor += span;
        }
    }
}

impl LayoutAlgorithm for GridRowLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let host = wrapper.host();
        let property = wrapper.layout_property();
        let Some(constraint) = property.layout_constraint().copied() else {
            log::error!("grid row #{host} measured without a constraint");
            return;
        };
        let width = constraint
            .self_ideal_size
            .width()
            .unwrap_or(constraint.max_size.width);
        if !width.is_finite() {
            log::error!("grid row #{host} has an unbounded width; measure aborted");
            return;
        }
        let padding = property.create_padding_and_border();
        let base = property.create_child_constraint();
        let mut content = SizeF::new(width, 0.0);
        minus_padding_to_size(&padding, &mut content);
        self.gutter_px = convert_to_px(Some(self.gutter), &constraint.scale_property, content.width)
            .unwrap_or(0.0);
        let gutters = (self.columns - 1) as f32 * self.gutter_px;
        self.column_width = ((content.width - gutters) / self.columns as f32).max(0.0);

        let columns = self.collect_columns(wrapper, tree);
        self.place(&columns);
        self.line_heights.clear();
        for (placement, &(_, span, _)) in self.placements.iter().zip(&columns) {
            let col_width = self.span_width(span);
            let mut child_constraint = base;
            child_constraint.min_size = SizeF::ZERO;
            child_constraint.max_size.width = col_width;
            child_constraint.percent_reference.width = col_width;
            child_constraint.parent_ideal_size =
                OptionalSizeF::new(Some(col_width), base.parent_ideal_size.height());
            // A column always fills its span.
            child_constraint.self_ideal_size = OptionalSizeF::new(Some(col_width), None);
            let Some(child) = wrapper.get_or_create_child_by_index(placement.index, tree, true) else {
                continue;
            };
            child.measure(tree, Some(child_constraint));
            let height = child.geometry_node().frame_size().height;
            if self.line_heights.len() <= placement.line {
                self.line_heights.resize(placement.line + 1, 0.0);
            }
            self.line_heights[placement.line] = self.line_heights[placement.line].max(height);
        }

        let lines = self.line_heights.len();
        let content_height = self.line_heights.iter().sum::<f32>()
            + lines.saturating_sub(1) as f32 * self.gutter_px;
        let mut frame = SizeF::new(content.width, content_height);
        add_padding_to_size(&padding, &mut frame);
        let mut frame = constrain_size(frame, constraint.min_size, constraint.max_size);
        frame.width = width;
        if let Some(height) = constraint.self_ideal_size.height() {
            frame.height = height;
        }
        wrapper.geometry_node_mut().set_frame_size(frame);
        log::trace!(
            "grid row #{host}: {} columns of {} in {lines} lines",
            self.columns,
            self.column_width
        );
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper, tree: &mut UiTree) {
        let padding = wrapper.layout_property().create_padding_and_border();
        let origin = padding_offset(&padding);
        let global = wrapper.global_offset();
        let mut line_tops = Vec::with_capacity(self.line_heights.len());
        let mut top = 0.0;
        for height in &self.line_heights {
            line_tops.push(top);
            top += height + self.gutter_px;
        }
        for placement in &self.placements {
            let Some(child) = wrapper.get_or_create_child_by_index(placement.index, tree, true) else {
                continue;
            };
            let x = placement.column as f32 * (self.column_width + self.gutter_px);
            let y = line_tops.get(placement.line).copied().unwrap_or(0.0);
            child
                .geometry_node_mut()
                .set_frame_offset(origin + OffsetF::new(x, y));
            child.layout(tree, global);
        }
    }
}
