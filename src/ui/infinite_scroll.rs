// Infinite scroll container
// Wraps content in a ScrolledWindow and asks for more data near the bottom

use gtk4::prelude::*;
use gtk4::{glib, Adjustment, Align, Box as GtkBox, Label, Orientation, PolicyType, ScrolledWindow};
use std::cell::RefCell;
use std::rc::Rc;

const LOADING_TEXT: &str = "Loading...";
const END_TEXT: &str = "Yay! You have seen it all";

/// Decides when the scroll position should request another batch.
///
/// Fires at most once per data length: after firing it stays quiet until
/// the caller reports a new length.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    threshold: f64,
    data_length: usize,
    has_more: bool,
    triggered: bool,
}

impl ScrollTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            data_length: 0,
            has_more: true,
            triggered: false,
        }
    }

    pub fn set_data_length(&mut self, data_length: usize) {
        if data_length != self.data_length {
            self.data_length = data_length;
            self.triggered = false;
        }
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    /// True when the bottom of the viewport has passed `threshold` of the content.
    pub fn reached(&self, value: f64, page_size: f64, upper: f64) -> bool {
        upper > 0.0 && value + page_size >= upper * self.threshold
    }

    /// Returns true when a load should be started now.
    pub fn check(&mut self, value: f64, page_size: f64, upper: f64) -> bool {
        if !self.has_more || self.triggered || !self.reached(value, page_size, upper) {
            return false;
        }
        self.triggered = true;
        true
    }
}

pub struct InfiniteScroll {
    scrolled_window: ScrolledWindow,
    loading_label: Label,
    end_label: Label,
    trigger: Rc<RefCell<ScrollTrigger>>,
    on_load_more: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl InfiniteScroll {
    pub fn new(content: &impl IsA<gtk4::Widget>, threshold: f64) -> Self {
        let loading_label = Label::new(Some(LOADING_TEXT));
        loading_label.set_halign(Align::Center);
        loading_label.add_css_class("scroll-status");

        let end_label = Label::new(Some(END_TEXT));
        end_label.set_halign(Align::Center);
        end_label.add_css_class("scroll-status");
        end_label.set_visible(false);

        let inner = GtkBox::new(Orientation::Vertical, 0);
        inner.append(content);
        inner.append(&loading_label);
        inner.append(&end_label);

        let scrolled_window = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .kinetic_scrolling(true)
            .propagate_natural_width(false)
            .propagate_natural_height(false)
            .child(&inner)
            .build();
        scrolled_window.set_vexpand(true);
        scrolled_window.set_hexpand(true);

        let scroll = Self {
            scrolled_window,
            loading_label,
            end_label,
            trigger: Rc::new(RefCell::new(ScrollTrigger::new(threshold))),
            on_load_more: Rc::new(RefCell::new(None)),
        };
        scroll.connect_adjustment();
        scroll
    }

    pub fn widget(&self) -> &ScrolledWindow {
        &self.scrolled_window
    }

    fn connect_adjustment(&self) {
        let vadj = self.scrolled_window.vadjustment();

        let check = {
            let trigger = self.trigger.clone();
            let on_load_more = self.on_load_more.clone();
            Rc::new(move |adj: &Adjustment| {
                let fire = trigger
                    .borrow_mut()
                    .check(adj.value(), adj.page_size(), adj.upper());
                if !fire {
                    return;
                }
                tracing::debug!(
                    value = adj.value(),
                    page_size = adj.page_size(),
                    upper = adj.upper(),
                    "Scrolled near the end, loading more"
                );
                // Deferred: the callback re-enters update() while rendering.
                let on_load_more = on_load_more.clone();
                glib::idle_add_local_once(move || {
                    if let Some(ref callback) = *on_load_more.borrow() {
                        callback();
                    }
                });
            })
        };

        let on_value = check.clone();
        vadj.connect_value_changed(move |adj| on_value(adj));
        // Bounds change after a batch is laid out; a short page keeps loading.
        vadj.connect_changed(move |adj| check(adj));
    }

    pub fn connect_load_more<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.on_load_more.borrow_mut() = Some(Box::new(callback));
    }

    /// Report the current item count and whether more can be loaded.
    pub fn update(&self, data_length: usize, has_more: bool) {
        {
            let mut trigger = self.trigger.borrow_mut();
            trigger.set_data_length(data_length);
            trigger.set_has_more(has_more);
        }
        self.loading_label.set_visible(has_more);
        self.end_label.set_visible(!has_more);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_past_threshold() {
        let mut trigger = ScrollTrigger::new(0.8);
        trigger.set_data_length(21);
        assert!(!trigger.check(0.0, 500.0, 2000.0));
        assert!(!trigger.check(1000.0, 500.0, 2000.0));
        assert!(trigger.check(1100.0, 500.0, 2000.0));
    }

    #[test]
    fn test_fires_once_per_data_length() {
        let mut trigger = ScrollTrigger::new(0.8);
        trigger.set_data_length(21);
        assert!(trigger.check(1500.0, 500.0, 2000.0));
        assert!(!trigger.check(1500.0, 500.0, 2000.0));

        trigger.set_data_length(21);
        assert!(!trigger.check(1500.0, 500.0, 2000.0));

        trigger.set_data_length(42);
        assert!(trigger.check(3500.0, 500.0, 4000.0));
    }

    #[test]
    fn test_never_fires_without_more() {
        let mut trigger = ScrollTrigger::new(0.8);
        trigger.set_data_length(105);
        trigger.set_has_more(false);
        assert!(!trigger.check(4500.0, 500.0, 5000.0));
        trigger.set_data_length(126);
        assert!(!trigger.check(4500.0, 500.0, 5000.0));
    }

    #[test]
    fn test_short_content_requests_more() {
        let mut trigger = ScrollTrigger::new(0.8);
        trigger.set_data_length(21);
        assert!(trigger.check(0.0, 900.0, 900.0));
    }

    #[test]
    fn test_unallocated_adjustment_is_ignored() {
        let mut trigger = ScrollTrigger::new(0.8);
        trigger.set_data_length(21);
        assert!(!trigger.check(0.0, 0.0, 0.0));
    }
}
