// Texture loader for gallery tiles and the header logo
// Placeholders are rendered on worker threads and handed back to the main loop

use gdk4::Texture;
use gtk4::prelude::*;
use gtk4::{gdk, glib, Picture};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::Duration;

use crate::placeholder;

// Three tile sizes plus the logo; requests are deduplicated per URL
const LOADER_THREADS: usize = 1;
const LOADER_QUEUE: usize = 8;
const CACHE_ENTRIES: usize = 8;

// Flat fill shown until the real texture arrives
pub fn flat_texture() -> &'static Texture {
    static FLAT: OnceLock<Texture> = OnceLock::new();
    FLAT.get_or_init(|| {
        let width = 16;
        let height = 16;
        let mut pixels = vec![0u8; width * height * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[0xf3, 0xf4, 0xf6, 0xff]);
        }

        let bytes = glib::Bytes::from_owned(pixels);
        gdk::MemoryTexture::new(
            width as i32,
            height as i32,
            gdk::MemoryFormat::R8g8b8a8,
            &bytes,
            width * 4,
        )
        .upcast()
    })
}

#[derive(Debug)]
struct RenderRequest {
    url: String,
}

#[derive(Debug)]
struct RenderResult {
    url: String,
    rgba: Option<Vec<u8>>,
    width: u32,
    height: u32,
}

struct LoaderState {
    pending_urls: HashSet<String>,
    waiters: HashMap<String, Vec<glib::WeakRef<Picture>>>,
    cache: lru::LruCache<String, Texture>,
}

struct TileImageLoader {
    request_tx: flume::Sender<RenderRequest>,
    result_rx: flume::Receiver<RenderResult>,
    state: RefCell<LoaderState>,
}

thread_local! {
    static TILE_IMAGE_LOADER: Rc<TileImageLoader> = TileImageLoader::new();
}

/// Show `url` in `picture` once it is rendered. Cached textures apply immediately.
pub fn request_texture(picture: &Picture, url: &str) {
    TILE_IMAGE_LOADER.with(|loader| loader.request(picture, url));
}

impl TileImageLoader {
    fn new() -> Rc<Self> {
        let (request_tx, request_rx) = flume::bounded::<RenderRequest>(LOADER_QUEUE);
        let (result_tx, result_rx) = flume::unbounded::<RenderResult>();

        for _ in 0..LOADER_THREADS {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            std::thread::spawn(move || {
                while let Ok(req) = rx.recv() {
                    let (rgba, width, height) = match placeholder::render_url(&req.url) {
                        Ok(img) => {
                            let (w, h) = img.dimensions();
                            (Some(img.into_raw()), w, h)
                        }
                        Err(err) => {
                            tracing::warn!(error = ?err, "Placeholder render failed");
                            (None, 0, 0)
                        }
                    };
                    let _ = tx.send(RenderResult {
                        url: req.url,
                        rgba,
                        width,
                        height,
                    });
                }
            });
        }

        let loader = Rc::new(Self {
            request_tx,
            result_rx,
            state: RefCell::new(LoaderState {
                pending_urls: HashSet::new(),
                waiters: HashMap::new(),
                cache: lru::LruCache::new(
                    NonZeroUsize::new(CACHE_ENTRIES).unwrap_or(NonZeroUsize::MIN),
                ),
            }),
        });

        let loader_weak = Rc::downgrade(&loader);
        glib::timeout_add_local(Duration::from_millis(16), move || {
            if let Some(loader) = loader_weak.upgrade() {
                loader.process_results();
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });

        loader
    }

    fn request(&self, picture: &Picture, url: &str) {
        let mut state = self.state.borrow_mut();

        if let Some(texture) = state.cache.get(url) {
            picture.set_paintable(Some(texture));
            return;
        }

        picture.set_paintable(Some(flat_texture()));
        state
            .waiters
            .entry(url.to_string())
            .or_default()
            .push(picture.downgrade());

        if state.pending_urls.insert(url.to_string())
            && self
                .request_tx
                .try_send(RenderRequest {
                    url: url.to_string(),
                })
                .is_err()
        {
            tracing::debug!(url, "Render queue full, keeping flat placeholder");
            state.pending_urls.remove(url);
            state.waiters.remove(url);
        }
    }

    fn process_results(&self) {
        while let Ok(result) = self.result_rx.try_recv() {
            let texture = result
                .rgba
                .and_then(|rgba| create_texture_from_rgba(rgba, result.width, result.height));

            let waiters = {
                let mut state = self.state.borrow_mut();
                state.pending_urls.remove(&result.url);
                if let Some(ref texture) = texture {
                    state.cache.put(result.url.clone(), texture.clone());
                }
                state.waiters.remove(&result.url).unwrap_or_default()
            };

            let Some(texture) = texture else {
                continue;
            };
            for waiter in waiters {
                if let Some(picture) = waiter.upgrade() {
                    picture.set_paintable(Some(&texture));
                }
            }
        }
    }
}

fn create_texture_from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Option<Texture> {
    if width == 0 || height == 0 {
        return None;
    }
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if rgba.len() < expected {
        return None;
    }
    let bytes = glib::Bytes::from_owned(rgba);
    let texture = gdk::MemoryTexture::new(
        width as i32,
        height as i32,
        gdk::MemoryFormat::R8g8b8a8,
        &bytes,
        (width * 4) as usize,
    );
    Some(texture.upcast())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageDescriptor, ImageSize};
    use crate::placeholder::PlaceholderSpec;

    #[test]
    fn test_cache_holds_every_placeholder_url() {
        let mut urls: HashSet<String> = ImageSize::ALL
            .into_iter()
            .map(|size| ImageDescriptor::placeholder(0, size).url)
            .collect();
        urls.insert(PlaceholderSpec::new(200, 50).url());

        assert_eq!(urls.len(), 4);
        assert!(urls.len() <= CACHE_ENTRIES);
        assert!(urls.len() <= LOADER_QUEUE);
    }

    #[test]
    fn test_texture_rejects_short_buffers() {
        assert!(create_texture_from_rgba(vec![0; 12], 2, 2).is_none());
        assert!(create_texture_from_rgba(Vec::new(), 0, 4).is_none());
    }
}
