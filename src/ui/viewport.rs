// Viewport width subscription
// Reports the width of a widget on subscribe and whenever it changes

use gtk4::prelude::*;
use gtk4::{glib, TickCallbackId, Widget};
use std::cell::Cell;

/// Live width subscription. Dropping it stops the updates.
pub struct ResizeSubscription {
    tick_id: Option<TickCallbackId>,
}

impl ResizeSubscription {
    pub fn is_active(&self) -> bool {
        self.tick_id.is_some()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(tick_id) = self.tick_id.take() {
            tick_id.remove();
            tracing::debug!("Viewport subscription released");
        }
    }
}

/// Record `width` and return it when it differs from the last reported one.
fn width_changed(last: &Cell<i32>, width: i32) -> Option<i32> {
    if width <= 0 || width == last.get() {
        return None;
    }
    last.set(width);
    Some(width)
}

pub struct ViewportWatcher;

impl ViewportWatcher {
    /// Call `on_change` with the current width (once allocated) and on every change.
    ///
    /// Widths are sampled once per frame, so bursts of resize events within a
    /// frame collapse into one call.
    pub fn watch<W, F>(widget: &W, on_change: F) -> ResizeSubscription
    where
        W: IsA<Widget>,
        F: Fn(i32) + 'static,
    {
        let last_width = Cell::new(0);
        if let Some(width) = width_changed(&last_width, widget.width()) {
            on_change(width);
        }

        let tick_id = widget.add_tick_callback(move |widget, _clock| {
            if let Some(width) = width_changed(&last_width, widget.width()) {
                on_change(width);
            }
            glib::ControlFlow::Continue
        });
        tracing::debug!("Viewport subscription acquired");

        ResizeSubscription {
            tick_id: Some(tick_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_changed_reports_new_widths_only() {
        let last = Cell::new(0);
        assert_eq!(width_changed(&last, 1200), Some(1200));
        assert_eq!(width_changed(&last, 1200), None);
        assert_eq!(width_changed(&last, 800), Some(800));
        assert_eq!(last.get(), 800);
    }

    #[test]
    fn test_width_changed_ignores_unallocated() {
        let last = Cell::new(0);
        assert_eq!(width_changed(&last, 0), None);
        assert_eq!(width_changed(&last, -1), None);
        assert_eq!(last.get(), 0);
    }
}
