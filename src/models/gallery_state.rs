use std::ops::Range;

use tracing::{debug, info};

use crate::config::{CapPolicy, GalleryConfig};
use crate::generator::ImageGenerator;
use crate::layout::Breakpoints;
use crate::models::ImageDescriptor;

/// Result of a load-more request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A batch was appended; `range` holds the positions of the new images.
    Appended {
        range: Range<usize>,
        exhausted: bool,
    },
    /// Nothing left to load.
    Exhausted,
}

/// Accumulated gallery content plus the current column count.
///
/// `images` only ever grows. `columns` follows the viewport width and never
/// touches `images`.
pub struct GalleryState {
    images: Vec<ImageDescriptor>,
    has_more: bool,
    columns: usize,
    batch_size: usize,
    max_images: usize,
    cap_policy: CapPolicy,
    breakpoints: Breakpoints,
    generator: ImageGenerator,
}

impl GalleryState {
    /// Create the state with the first batch already loaded.
    pub fn new(config: &GalleryConfig) -> Self {
        Self::with_generator(config, ImageGenerator::new(config.seed))
    }

    pub fn with_generator(config: &GalleryConfig, generator: ImageGenerator) -> Self {
        let mut state = Self {
            images: Vec::new(),
            has_more: true,
            columns: config.breakpoints.columns_for_width(config.window_width),
            batch_size: config.batch_size.max(1),
            max_images: config.max_images,
            cap_policy: config.cap_policy,
            breakpoints: config.breakpoints.clone(),
            generator,
        };
        let first = state.next_batch_end();
        state.images = state.generator.generate(0, first as u32);
        state.check_cap();
        state
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn next_batch_end(&self) -> usize {
        let end = self.images.len() + self.batch_size;
        match self.cap_policy {
            CapPolicy::Overshoot => end,
            CapPolicy::Exact => end.min(self.max_images.max(self.images.len())),
        }
    }

    fn check_cap(&mut self) {
        if self.has_more && self.images.len() >= self.max_images {
            self.has_more = false;
            info!(total = self.images.len(), "Gallery reached its image cap");
        }
    }

    /// Append the next batch.
    ///
    /// Once the accumulated length reaches `max_images`, `has_more` flips to
    /// false and stays there; later calls are no-ops.
    pub fn load_more(&mut self) -> LoadOutcome {
        if !self.has_more {
            debug!(len = self.images.len(), "load_more ignored, gallery exhausted");
            return LoadOutcome::Exhausted;
        }

        let start = self.images.len();
        let end = self.next_batch_end();
        if end <= start {
            self.has_more = false;
            return LoadOutcome::Exhausted;
        }
        let batch = self.generator.generate(start as u32, end as u32);
        self.images.extend(batch);
        debug!(start, end, "Appended image batch");
        self.check_cap();

        LoadOutcome::Appended {
            range: start..self.images.len(),
            exhausted: !self.has_more,
        }
    }

    /// Resolve the column count for a new viewport width.
    /// Returns true when the count changed.
    pub fn set_viewport_width(&mut self, width: i32) -> bool {
        let columns = self.breakpoints.columns_for_width(width);
        if columns == self.columns {
            return false;
        }
        debug!(width, from = self.columns, to = columns, "Column count changed");
        self.columns = columns;
        true
    }
}
