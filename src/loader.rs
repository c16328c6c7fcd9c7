//! Asset loading for sprite sets.
//!
//! Every distinct path is requested once and all requests run concurrently
//! on the caller's task. Images are stored in the order their loads finish.
//! The first failure aborts the whole load: outstanding requests are
//! dropped and no sprite set is produced.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::{KeyedCache, SpriteError};

/// Result type for asset loading operations
pub type LoadResult<T> = Result<T, String>;

/// Trait for async image providers.
///
/// Implement this trait to load images through your platform's I/O
/// (browser image elements, filesystem decoding, an asset server, ...).
///
/// No `Send` bounds, so loaders work in single-threaded WASM contexts.
/// There is no built-in timeout; dropping the future returned by a
/// sprite set constructor cancels every load still in flight.
pub trait AssetLoader {
    /// Loaded image resource
    type Image;

    /// Load the image at `path`.
    fn load(&self, path: &str) -> impl std::future::Future<Output = LoadResult<Self::Image>>;
}

/// Load state of one asset path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadSlot {
    /// Request issued, image not available yet
    Pending,
    /// Image stored at this index of the sprite list
    Loaded(usize),
}

/// Progress of a sprite set load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    /// Number of images loaded so far
    pub loaded: usize,
    /// Number of distinct images requested
    pub total: usize,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self { loaded: 0, total }
    }

    /// Loading percentage (0-100)
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.loaded as f32 / self.total as f32) * 100.0) as u8
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.loaded >= self.total
    }

    /// Format a progress message for display
    pub fn message(&self) -> String {
        if self.total > 0 {
            format!("Loading sprites... {} / {} ({}%)", self.loaded, self.total, self.percent())
        } else {
            "Loading sprites...".to_string()
        }
    }
}

async fn load_one<L: AssetLoader>(loader: &L, path: String) -> (String, LoadResult<L::Image>) {
    let result = loader.load(&path).await;
    (path, result)
}

/// Request each distinct path once and append the images to `sprites` as
/// they finish loading, recording their positions in `cache`.
pub(crate) async fn load_distinct<L, S, P>(
    loader: &L,
    paths: &[S],
    cache: &mut KeyedCache<LoadSlot>,
    sprites: &mut Vec<L::Image>,
    mut on_progress: P,
) -> Result<(), SpriteError>
where
    L: AssetLoader,
    S: AsRef<str>,
    P: FnMut(&LoadProgress),
{
    let mut pending = FuturesUnordered::new();
    for path in paths {
        cache.add_or_get(path.as_ref(), |key| {
            log::debug!("Loading image from \"{}\".", key);
            pending.push(load_one(loader, key.to_string()));
            LoadSlot::Pending
        })?;
    }

    let mut progress = LoadProgress::new(pending.len());
    while let Some((path, result)) = pending.next().await {
        match result {
            Ok(image) => {
                log::info!("Successfully loaded: {}", path);
                cache.add(&path, LoadSlot::Loaded(sprites.len()))?;
                sprites.push(image);
                progress.loaded += 1;
                on_progress(&progress);
            }
            Err(message) => {
                log::error!("Failed to load sprite: {} ({})", path, message);
                return Err(SpriteError::Load { path, message });
            }
        }
    }
    Ok(())
}

/// Browser image loading.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use web_sys::HtmlImageElement;

    /// Loads images through `HtmlImageElement`, resolving on `onload` and
    /// failing on `onerror`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct HtmlImageLoader;

    impl AssetLoader for HtmlImageLoader {
        type Image = HtmlImageElement;

        async fn load(&self, path: &str) -> LoadResult<HtmlImageElement> {
            let image = HtmlImageElement::new().map_err(|_| "Failed to create image element")?;

            let promise = js_sys::Promise::new(&mut |resolve, reject| {
                image.set_onload(Some(&resolve));
                image.set_onerror(Some(&reject));
            });
            image.set_src(path);

            let result = wasm_bindgen_futures::JsFuture::from(promise).await;
            image.set_onload(None);
            image.set_onerror(None);
            result.map_err(|_| format!("Failed to load sprite: {}", path))?;

            Ok(image)
        }
    }
}
