use tracing::warn;

use crate::models::{ColumnItem, ColumnModel, ImageDescriptor};

/// Round-robin column layout.
///
/// The image at position `i` goes to column `i % columns`. Within a column
/// images keep their original relative order.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout;

/// Where a single image lands.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub column: usize,
    pub item: ColumnItem,
}

/// What the view last rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedLayout {
    pub columns: usize,
    pub image_count: usize,
}

/// Minimal change needed to bring the view up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    Unchanged,
    /// Same column count, new images from position `from` onward.
    Append { from: usize },
    /// Column set differs; every tile has to move.
    Reflow,
}

pub fn column_for_index(index: usize, columns: usize) -> usize {
    index % columns
}

/// Decide how to update a rendered layout for the current state.
pub fn plan_update(
    previous: Option<RenderedLayout>,
    image_count: usize,
    columns: usize,
) -> LayoutChange {
    let Some(previous) = previous else {
        return LayoutChange::Reflow;
    };

    if previous.columns != columns || image_count < previous.image_count {
        LayoutChange::Reflow
    } else if image_count > previous.image_count {
        LayoutChange::Append {
            from: previous.image_count,
        }
    } else {
        LayoutChange::Unchanged
    }
}

impl ColumnLayout {
    fn column_item(image: &ImageDescriptor) -> Option<ColumnItem> {
        let Some(aspect_ratio) = image.aspect_ratio() else {
            warn!(
                id = image.id,
                width = image.width,
                height = image.height,
                "Skipping image with degenerate size"
            );
            return None;
        };

        Some(ColumnItem {
            image_id: image.id,
            url: image.url.clone(),
            alt: image.alt.clone(),
            intrinsic_width: image.width,
            intrinsic_height: image.height,
            aspect_ratio,
        })
    }

    /// Placements for `images[start..]`.
    ///
    /// Degenerate images are dropped but still consume their slot, so the
    /// placement of every other image is independent of them.
    pub fn place_range(
        &self,
        images: &[ImageDescriptor],
        start: usize,
        columns: usize,
    ) -> Vec<Placement> {
        if columns == 0 || start >= images.len() {
            return Vec::new();
        }

        images[start..]
            .iter()
            .enumerate()
            .filter_map(|(offset, image)| {
                Self::column_item(image).map(|item| Placement {
                    column: column_for_index(start + offset, columns),
                    item,
                })
            })
            .collect()
    }

    /// Partition all images into `columns` columns.
    pub fn compute(&self, images: &[ImageDescriptor], columns: usize) -> Vec<ColumnModel> {
        let mut out: Vec<ColumnModel> = (0..columns)
            .map(|column_index| ColumnModel::new(column_index, Vec::new()))
            .collect();

        for placement in self.place_range(images, 0, columns) {
            out[placement.column].items.push(placement.item);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageSize;

    fn make_images(count: u32) -> Vec<ImageDescriptor> {
        (0..count)
            .map(|id| {
                let size = ImageSize::ALL[id as usize % ImageSize::ALL.len()];
                ImageDescriptor::placeholder(id, size)
            })
            .collect()
    }

    #[test]
    fn test_empty_images() {
        let columns = ColumnLayout.compute(&[], 3);
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn test_zero_columns() {
        assert!(ColumnLayout.compute(&make_images(5), 0).is_empty());
        assert!(ColumnLayout.place_range(&make_images(5), 0, 0).is_empty());
    }

    #[test]
    fn test_round_robin_three_columns() {
        let columns = ColumnLayout.compute(&make_images(7), 3);
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].image_ids(), vec![0, 3, 6]);
        assert_eq!(columns[1].image_ids(), vec![1, 4]);
        assert_eq!(columns[2].image_ids(), vec![2, 5]);
        for (index, column) in columns.iter().enumerate() {
            assert_eq!(column.column_index, index);
        }
    }

    #[test]
    fn test_single_column_keeps_order() {
        let columns = ColumnLayout.compute(&make_images(10), 1);
        assert_eq!(columns[0].image_ids(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_reflow_preserves_source_sequence() {
        let images = make_images(25);
        let snapshot = images.clone();

        for columns in [3, 2, 1, 3] {
            let layout = ColumnLayout.compute(&images, columns);
            let total: usize = layout.iter().map(|c| c.items.len()).sum();
            assert_eq!(total, images.len());

            // Interleaving the columns back gives the original order.
            let mut merged = Vec::new();
            for row in 0.. {
                let before = merged.len();
                for column in &layout {
                    if let Some(item) = column.items.get(row) {
                        merged.push(item.image_id);
                    }
                }
                if merged.len() == before {
                    break;
                }
            }
            assert_eq!(merged, (0..25).collect::<Vec<_>>());
        }

        assert_eq!(images, snapshot);
    }

    #[test]
    fn test_aspect_ratio_and_padding() {
        let columns = ColumnLayout.compute(&make_images(3), 3);
        let tall = &columns[0].items[0];
        let medium = &columns[1].items[0];
        let small = &columns[2].items[0];
        assert!((tall.padding_percent() - 150.0).abs() < 0.01);
        assert!((medium.padding_percent() - 75.0).abs() < 0.01);
        assert!((small.padding_percent() - 50.0).abs() < 0.01);
        assert_eq!(tall.intrinsic_width, 400);
        assert_eq!(tall.intrinsic_height, 600);
    }

    #[test]
    fn test_degenerate_images_are_skipped_without_shifting_others() {
        let mut images = make_images(6);
        images[1].width = 0;
        images[4].height = -3;

        let columns = ColumnLayout.compute(&images, 3);
        assert_eq!(columns[0].image_ids(), vec![0, 3]);
        assert_eq!(columns[1].image_ids(), Vec::<u32>::new());
        assert_eq!(columns[2].image_ids(), vec![2, 5]);
        for column in &columns {
            for item in &column.items {
                assert!(item.aspect_ratio.is_finite() && item.aspect_ratio > 0.0);
            }
        }
    }

    #[test]
    fn test_place_range_matches_full_compute() {
        let images = make_images(30);
        let columns = ColumnLayout.compute(&images, 2);

        let mut incremental: Vec<Vec<u32>> = vec![Vec::new(); 2];
        for start in [0usize, 21] {
            let end = if start == 0 { 21 } else { images.len() };
            for placement in ColumnLayout.place_range(&images[..end], start, 2) {
                incremental[placement.column].push(placement.item.image_id);
            }
        }

        assert_eq!(incremental[0], columns[0].image_ids());
        assert_eq!(incremental[1], columns[1].image_ids());
    }

    #[test]
    fn test_place_range_past_end() {
        assert!(ColumnLayout.place_range(&make_images(4), 4, 2).is_empty());
        assert!(ColumnLayout.place_range(&make_images(4), 9, 2).is_empty());
    }

    #[test]
    fn test_plan_first_render_is_reflow() {
        assert_eq!(plan_update(None, 21, 3), LayoutChange::Reflow);
    }

    #[test]
    fn test_plan_append_on_growth() {
        let previous = RenderedLayout {
            columns: 3,
            image_count: 21,
        };
        assert_eq!(
            plan_update(Some(previous), 42, 3),
            LayoutChange::Append { from: 21 }
        );
    }

    #[test]
    fn test_plan_reflow_on_column_change() {
        let previous = RenderedLayout {
            columns: 3,
            image_count: 21,
        };
        assert_eq!(plan_update(Some(previous), 21, 2), LayoutChange::Reflow);
        assert_eq!(plan_update(Some(previous), 42, 1), LayoutChange::Reflow);
    }

    #[test]
    fn test_plan_unchanged_and_shrink() {
        let previous = RenderedLayout {
            columns: 2,
            image_count: 42,
        };
        assert_eq!(plan_update(Some(previous), 42, 2), LayoutChange::Unchanged);
        assert_eq!(plan_update(Some(previous), 21, 2), LayoutChange::Reflow);
    }
}
