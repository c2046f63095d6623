// Tile widget: one image in a fixed aspect-ratio box
// Height follows the allocated width, the picture covers the box and is cropped

use glib::Object;
use gtk4::prelude::*;
use gtk4::subclass::prelude::*;
use gtk4::{glib, ContentFit, Orientation, Picture, SizeRequestMode};
use std::cell::{Cell, RefCell};

use super::tile_loader::request_texture;
use crate::models::ColumnItem;

/// Box height for a given width, falling back to the intrinsic height
/// when GTK asks without a width.
pub fn height_for_width(for_width: i32, aspect_ratio: f32, intrinsic_height: i32) -> i32 {
    if for_width > 0 && aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        ((for_width as f32) * aspect_ratio).round().max(1.0) as i32
    } else {
        intrinsic_height.max(1)
    }
}

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct TileWidgetInner {
        pub picture: RefCell<Option<Picture>>,
        pub aspect_ratio: Cell<f32>,
        pub intrinsic_width: Cell<i32>,
        pub intrinsic_height: Cell<i32>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for TileWidgetInner {
        const NAME: &'static str = "MasonryTileWidget";
        type Type = super::TileWidget;
        type ParentType = gtk4::Widget;

        fn class_init(klass: &mut Self::Class) {
            klass.set_css_name("tile");
        }
    }

    impl ObjectImpl for TileWidgetInner {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_hexpand(true);
            obj.set_overflow(gtk4::Overflow::Hidden);
            obj.add_css_class("media-item");

            let picture = Picture::new();
            picture.set_can_shrink(true);
            picture.set_content_fit(ContentFit::Cover);
            picture.set_parent(&*obj);
            self.picture.replace(Some(picture));
        }

        fn dispose(&self) {
            if let Some(picture) = self.picture.take() {
                picture.unparent();
            }
        }
    }

    impl WidgetImpl for TileWidgetInner {
        fn request_mode(&self) -> SizeRequestMode {
            SizeRequestMode::HeightForWidth
        }

        fn measure(&self, orientation: Orientation, for_size: i32) -> (i32, i32, i32, i32) {
            match orientation {
                Orientation::Horizontal => (1, self.intrinsic_width.get().max(1), -1, -1),
                _ => {
                    let height = height_for_width(
                        for_size,
                        self.aspect_ratio.get(),
                        self.intrinsic_height.get(),
                    );
                    (height, height, -1, -1)
                }
            }
        }

        fn size_allocate(&self, width: i32, height: i32, baseline: i32) {
            if let Some(picture) = self.picture.borrow().as_ref() {
                picture.allocate(width, height, baseline, None);
            }
        }
    }
}

glib::wrapper! {
    pub struct TileWidget(ObjectSubclass<imp::TileWidgetInner>)
        @extends gtk4::Widget,
        @implements gtk4::Accessible, gtk4::Buildable, gtk4::ConstraintTarget;
}

impl TileWidget {
    pub fn new(item: &ColumnItem) -> Self {
        let tile: Self = Object::builder().build();
        let imp = tile.imp();
        imp.aspect_ratio.set(item.aspect_ratio);
        imp.intrinsic_width.set(item.intrinsic_width);
        imp.intrinsic_height.set(item.intrinsic_height);

        if let Some(picture) = imp.picture.borrow().as_ref() {
            picture.set_alternative_text(Some(item.alt.as_str()));
            request_texture(picture, &item.url);
        }
        tile.set_tooltip_text(Some(item.alt.as_str()));
        tile.queue_resize();
        tile
    }
}
