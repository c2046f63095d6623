// Main window for the masonry gallery
// Sticky logo header above an infinitely scrolling column gallery

use gdk4::Display;
use gtk4::prelude::*;
use gtk4::{
    glib, Align, Application, ApplicationWindow, Box as GtkBox, ContentFit, CssProvider,
    Orientation, Picture, STYLE_PROVIDER_PRIORITY_APPLICATION,
};
use std::cell::RefCell;
use std::rc::Rc;

use super::gallery_view::GalleryView;
use super::infinite_scroll::InfiniteScroll;
use super::tile_loader::request_texture;
use super::viewport::{ResizeSubscription, ViewportWatcher};
use crate::config::GalleryConfig;
use crate::models::{GalleryState, LoadOutcome};
use crate::placeholder::PlaceholderSpec;

const LOGO_WIDTH: i32 = 200;
const LOGO_HEIGHT: i32 = 50;
const MAIN_MARGIN_H: i32 = 16;
const MAIN_MARGIN_V: i32 = 32;

const GALLERY_CSS: &str = r#"
window {
    background-color: #ffffff;
    color: #0a0a0a;
}

.gallery-header {
    background-color: #ffffff;
    padding: 16px;
}

tile {
    background-color: #f3f4f6;
}

.scroll-status {
    padding: 16px 0;
}
"#;

/// Load and apply the embedded stylesheet
fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_string(GALLERY_CSS);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        tracing::debug!("Loaded embedded CSS");
    }
}

fn build_header() -> GtkBox {
    let header = GtkBox::new(Orientation::Horizontal, 0);
    header.add_css_class("gallery-header");

    let logo = Picture::new();
    logo.set_content_fit(ContentFit::Contain);
    logo.set_can_shrink(true);
    logo.set_size_request(LOGO_WIDTH, LOGO_HEIGHT);
    logo.set_alternative_text(Some("Logo"));
    logo.set_halign(Align::Center);
    logo.set_hexpand(true);
    request_texture(
        &logo,
        &PlaceholderSpec::new(LOGO_WIDTH as u32, LOGO_HEIGHT as u32).url(),
    );
    header.append(&logo);

    header
}

/// Main window for the gallery
pub struct MainWindow {
    window: ApplicationWindow,
    gallery: GalleryView,
    scroll: InfiniteScroll,
    state: RefCell<GalleryState>,
    resize_subscription: RefCell<Option<ResizeSubscription>>,
}

impl MainWindow {
    pub fn new(app: &Application, config: &GalleryConfig) -> Rc<Self> {
        load_css();

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Masonry Gallery")
            .default_width(config.window_width)
            .default_height(config.window_height)
            .build();

        let gallery = GalleryView::new(config.gap_px);

        let main_box = GtkBox::new(Orientation::Vertical, 0);
        main_box.set_margin_start(MAIN_MARGIN_H);
        main_box.set_margin_end(MAIN_MARGIN_H);
        main_box.set_margin_top(MAIN_MARGIN_V);
        main_box.set_margin_bottom(MAIN_MARGIN_V);
        main_box.append(gallery.widget());

        let scroll = InfiniteScroll::new(&main_box, config.scroll_threshold);

        // The header sits outside the scrolled area so it stays put.
        let root = GtkBox::new(Orientation::Vertical, 0);
        root.append(&build_header());
        root.append(scroll.widget());
        window.set_child(Some(&root));

        let state = GalleryState::new(config);
        tracing::info!(
            images = state.len(),
            columns = state.columns(),
            "Gallery initialised"
        );

        let main_window = Rc::new(Self {
            window,
            gallery,
            scroll,
            state: RefCell::new(state),
            resize_subscription: RefCell::new(None),
        });
        main_window.mount();
        main_window
    }

    fn mount(self: &Rc<Self>) {
        let weak_self = Rc::downgrade(self);
        self.scroll.connect_load_more(move || {
            if let Some(window) = weak_self.upgrade() {
                window.load_more();
            }
        });

        self.render();

        let weak_self = Rc::downgrade(self);
        let subscription = ViewportWatcher::watch(&self.window, move |width| {
            if let Some(window) = weak_self.upgrade() {
                window.on_viewport_width(width);
            }
        });
        self.resize_subscription.replace(Some(subscription));

        // The close handler owns the controller until GTK destroys the window.
        let owner = self.clone();
        self.window.connect_close_request(move |_| {
            owner.unmount();
            glib::Propagation::Proceed
        });
    }

    fn unmount(&self) {
        if let Some(subscription) = self.resize_subscription.take() {
            tracing::info!(active = subscription.is_active(), "Closing gallery window");
        }
    }

    fn load_more(&self) {
        let outcome = self.state.borrow_mut().load_more();
        match outcome {
            LoadOutcome::Appended { range, exhausted } => {
                tracing::debug!(?range, exhausted, "Loaded batch");
                self.render();
            }
            LoadOutcome::Exhausted => {
                tracing::debug!("Load requested after the gallery was exhausted");
            }
        }
    }

    fn on_viewport_width(&self, width: i32) {
        let changed = self.state.borrow_mut().set_viewport_width(width);
        if changed {
            self.render();
        }
    }

    fn render(&self) {
        let (len, has_more) = {
            let state = self.state.borrow();
            self.gallery.sync(state.images(), state.columns());
            (state.len(), state.has_more())
        };
        self.scroll.update(len, has_more);
    }

    /// Present the window
    pub fn present(&self) {
        self.window.present();
    }
}
