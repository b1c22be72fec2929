//! Main-axis distribution of children for linear containers

use crate::alignment::FlexAlign;

/// Trait implemented by strategies that distribute children on an axis.
pub trait Arrangement {
    /// Computes the leading position of each child given the available space,
    /// their sizes and a fixed gap inserted between neighbours.
    fn arrange(&self, total_size: f32, gap: f32, sizes: &[f32], out_positions: &mut [f32]);
}

fn fill_positions(start: f32, gap: f32, sizes: &[f32], out_positions: &mut [f32]) {
    debug_assert_eq!(sizes.len(), out_positions.len());
    let mut cursor = start;
    for (index, (size, position)) in sizes.iter().zip(out_positions.iter_mut()).enumerate() {
        *position = cursor;
        cursor += size;
        if index + 1 < sizes.len() {
            cursor += gap;
        }
    }
}

impl Arrangement for FlexAlign {
    fn arrange(&self, total_size: f32, gap: f32, sizes: &[f32], out_positions: &mut [f32]) {
        debug_assert_eq!(sizes.len(), out_positions.len());
        if sizes.is_empty() {
            return;
        }

        let count = sizes.len() as f32;
        let occupied = sizes.iter().copied().sum::<f32>() + gap * (count - 1.0);
        let remaining = total_size - occupied;

        match *self {
            FlexAlign::FlexStart | FlexAlign::Stretch => {
                fill_positions(0.0, gap, sizes, out_positions)
            }
            FlexAlign::FlexEnd => fill_positions(remaining, gap, sizes, out_positions),
            FlexAlign::Center => fill_positions(remaining / 2.0, gap, sizes, out_positions),
            FlexAlign::SpaceBetween => {
                let extra = if sizes.len() <= 1 {
                    0.0
                } else {
                    remaining / (count - 1.0)
                };
                fill_positions(0.0, gap + extra, sizes, out_positions);
            }
            FlexAlign::SpaceAround => {
                let extra = remaining / count;
                fill_positions(extra / 2.0, gap + extra, sizes, out_positions);
            }
            FlexAlign::SpaceEvenly => {
                let extra = remaining / (count + 1.0);
                fill_positions(extra, gap + extra, sizes, out_positions);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;
