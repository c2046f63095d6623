// Column gallery widget
// Keeps one tile per image id; appends only new tiles and re-parents on reflow

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Orientation};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::tile::TileWidget;
use crate::layout::{plan_update, ColumnLayout, LayoutChange, Placement, RenderedLayout};
use crate::models::{ColumnItem, ImageDescriptor};

/// Remove entries whose image id is no longer in `images`; returns the dropped ids.
fn retain_live<T>(tiles: &mut HashMap<u32, T>, images: &[ImageDescriptor]) -> Vec<u32> {
    let live: HashSet<u32> = images.iter().map(|image| image.id).collect();
    let mut dropped = Vec::new();
    tiles.retain(|id, _| {
        let keep = live.contains(id);
        if !keep {
            dropped.push(*id);
        }
        keep
    });
    dropped
}

/// The entry for `id`, created with `make` only when missing.
fn keyed_entry<T: Clone>(tiles: &mut HashMap<u32, T>, id: u32, make: impl FnOnce() -> T) -> T {
    tiles.entry(id).or_insert_with(make).clone()
}

pub struct GalleryView {
    container: GtkBox,
    columns: RefCell<Vec<GtkBox>>,
    tiles: RefCell<HashMap<u32, TileWidget>>,
    rendered: Cell<Option<RenderedLayout>>,
    layout: ColumnLayout,
    gap: i32,
}

impl GalleryView {
    pub fn new(gap: i32) -> Self {
        let container = GtkBox::new(Orientation::Horizontal, gap);
        container.set_homogeneous(true);
        container.set_hexpand(true);
        container.set_valign(Align::Start);
        container.add_css_class("gallery");

        Self {
            container,
            columns: RefCell::new(Vec::new()),
            tiles: RefCell::new(HashMap::new()),
            rendered: Cell::new(None),
            layout: ColumnLayout,
            gap,
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.container
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.borrow().len()
    }

    /// Bring the widget tree in line with `images` laid out in `columns` columns.
    pub fn sync(&self, images: &[ImageDescriptor], columns: usize) {
        let change = plan_update(self.rendered.get(), images.len(), columns);
        match change {
            LayoutChange::Unchanged => return,
            LayoutChange::Append { from } => {
                let placements = self.layout.place_range(images, from, columns);
                self.append_placements(placements);
            }
            LayoutChange::Reflow => self.reflow(images, columns),
        }

        tracing::debug!(
            ?change,
            columns,
            images = images.len(),
            tiles = self.tile_count(),
            "Gallery synced"
        );
        self.rendered.set(Some(RenderedLayout {
            columns,
            image_count: images.len(),
        }));
    }

    fn new_column(&self) -> GtkBox {
        let column = GtkBox::new(Orientation::Vertical, self.gap);
        column.set_hexpand(true);
        column.set_valign(Align::Start);
        column.add_css_class("gallery-column");
        column
    }

    fn tile_for(&self, item: &ColumnItem) -> TileWidget {
        keyed_entry(&mut self.tiles.borrow_mut(), item.image_id, || {
            TileWidget::new(item)
        })
    }

    fn append_placements(&self, placements: Vec<Placement>) {
        let columns = self.columns.borrow();
        for placement in placements {
            let tile = self.tile_for(&placement.item);
            if let Some(column) = columns.get(placement.column) {
                column.append(&tile);
            }
        }
    }

    fn reflow(&self, images: &[ImageDescriptor], columns: usize) {
        // Detach tiles but keep them; they are re-used by image id.
        for column in self.columns.borrow().iter() {
            while let Some(child) = column.first_child() {
                column.remove(&child);
            }
        }

        {
            let mut column_boxes = self.columns.borrow_mut();
            while column_boxes.len() > columns {
                if let Some(column) = column_boxes.pop() {
                    self.container.remove(&column);
                }
            }
            while column_boxes.len() < columns {
                let column = self.new_column();
                self.container.append(&column);
                column_boxes.push(column);
            }
        }

        let dropped = retain_live(&mut self.tiles.borrow_mut(), images);
        if !dropped.is_empty() {
            tracing::debug!(?dropped, "Dropped tiles for removed images");
        }

        let column_boxes = self.columns.borrow();
        for model in self.layout.compute(images, columns) {
            let Some(column) = column_boxes.get(model.column_index) else {
                continue;
            };
            for item in &model.items {
                column.append(&self.tile_for(item));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageSize;
    use std::rc::Rc;

    fn images(ids: std::ops::Range<u32>) -> Vec<ImageDescriptor> {
        ids.map(|id| ImageDescriptor::placeholder(id, ImageSize::Medium))
            .collect()
    }

    #[test]
    fn test_reflow_reuses_entries_by_id() {
        let gallery = images(0..7);
        let mut tiles: HashMap<u32, Rc<u32>> = HashMap::new();
        let first: Vec<Rc<u32>> = gallery
            .iter()
            .map(|image| keyed_entry(&mut tiles, image.id, || Rc::new(image.id)))
            .collect();

        // Same images laid out again in a different column order
        assert!(retain_live(&mut tiles, &gallery).is_empty());
        for model in ColumnLayout.compute(&gallery, 2) {
            for item in &model.items {
                let tile = keyed_entry(&mut tiles, item.image_id, || {
                    panic!("tile {} was rebuilt", item.image_id)
                });
                assert!(Rc::ptr_eq(&tile, &first[item.image_id as usize]));
            }
        }
        assert_eq!(tiles.len(), 7);
    }

    #[test]
    fn test_new_ids_get_new_entries() {
        let mut tiles: HashMap<u32, Rc<u32>> = HashMap::new();
        let a = keyed_entry(&mut tiles, 1, || Rc::new(1));
        let b = keyed_entry(&mut tiles, 2, || Rc::new(2));
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(tiles.len(), 2);
    }

    #[test]
    fn test_retain_drops_only_missing_ids() {
        let mut tiles: HashMap<u32, Rc<u32>> = (0..5).map(|id| (id, Rc::new(id))).collect();
        let kept = Rc::clone(&tiles[&2]);

        let mut dropped = retain_live(&mut tiles, &images(0..3));
        dropped.sort_unstable();

        assert_eq!(dropped, vec![3, 4]);
        assert_eq!(tiles.len(), 3);
        assert!(Rc::ptr_eq(&tiles[&2], &kept));
    }
}
