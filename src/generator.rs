//! Synthetic image source for the gallery.
//!
//! Every generated image gets one of three fixed sizes, picked uniformly at
//! random. The random source is injectable so callers (and tests) can seed it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{ImageDescriptor, ImageSize};

/// Generate descriptors for ids `start..end`.
///
/// An inverted range yields an empty vector.
pub fn generate_images<R: Rng + ?Sized>(rng: &mut R, start: u32, end: u32) -> Vec<ImageDescriptor> {
    if end <= start {
        return Vec::new();
    }

    (start..end)
        .map(|id| {
            let size = ImageSize::ALL[rng.random_range(0..ImageSize::ALL.len())];
            ImageDescriptor::placeholder(id, size)
        })
        .collect()
}

/// Owns the random source used to generate gallery batches.
pub struct ImageGenerator {
    rng: StdRng,
}

impl ImageGenerator {
    /// Seeded from the OS unless a fixed seed is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                debug!(seed, "Seeding image generator");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn generate(&mut self, start: u32, end: u32) -> Vec<ImageDescriptor> {
        generate_images(&mut self.rng, start, end)
    }
}

impl Default for ImageGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}
