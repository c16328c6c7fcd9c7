//! Sprite sets: loaded images plus the animation frame model over them.

use crate::cache::{CacheError, KeyedCache};
use crate::frames::{resolve_frames, FrameSpec};
use crate::loader::{self, AssetLoader, LoadProgress, LoadSlot};

/// Error type for sprite set operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpriteError {
    /// The list of sprite paths is unusable
    #[error("Invalid sprite input: {0}")]
    InvalidInput(String),
    /// A frame number is outside `1..=sprite_count`
    #[error("{0}")]
    InvalidFrame(String),
    /// An empty frame list was supplied
    #[error("Cannot accept an empty array as the animation frames list.")]
    InvalidFrameList,
    /// Origin is not a pair of finite numbers
    #[error("{0}")]
    InvalidOrigin(String),
    /// An asset failed to load
    #[error("Failed to load sprite: {path} ({message})")]
    Load { path: String, message: String },
    /// Cache misuse while tracking loads
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// The drawing surface rejected a call
    #[error("Drawing failed: {0}")]
    Surface(String),
}

/// An ordered pool of loaded images with an active frame range, a cursor
/// into that range, and an origin used for rotated drawing.
///
/// Sprite sets only come out of the async constructors, which return once
/// every image has loaded. A set whose loading failed is never handed out.
///
/// ## Example
///
/// ```rust
/// use gamelib_sprites::{AssetLoader, LoadResult, SpriteSet};
///
/// struct Names;
///
/// impl AssetLoader for Names {
///     type Image = String;
///
///     async fn load(&self, path: &str) -> LoadResult<String> {
///         Ok(path.to_uppercase())
///     }
/// }
///
/// let paths = ["a.png", "b.png", "c.png"];
/// let mut set = futures::executor::block_on(SpriteSet::load_all(&Names, &paths)).unwrap();
///
/// assert_eq!(set.frame_count(), 3);
/// set.set_animation_frames([3, 2]).unwrap();
/// assert_eq!(set.current_frame_index(), 2);
/// set.next_frame();
/// assert_eq!(set.current_frame_index(), 3);
/// ```
#[derive(Debug)]
pub struct SpriteSet<I> {
    /// Images in load-completion order
    sprites: Vec<I>,
    /// Asset path -> load state, used to deduplicate requests
    cache: KeyedCache<LoadSlot>,
    /// Active frames as 0-based indices into `sprites`
    frame_indices: Vec<usize>,
    /// Position within `frame_indices`
    cursor: usize,
    /// Sprite shown in place of the cursor's frame after a direct jump
    /// outside the active range
    pinned: Option<usize>,
    origin: (f64, f64),
}

impl<I> SpriteSet<I> {
    fn empty() -> Self {
        Self {
            sprites: Vec::new(),
            cache: KeyedCache::new(),
            frame_indices: Vec::new(),
            cursor: 0,
            pinned: None,
            origin: (0.0, 0.0),
        }
    }

    /// Load every distinct path and select `frames` as the active range.
    pub async fn create<L, S>(
        loader: &L,
        paths: &[S],
        frames: impl Into<FrameSpec>,
    ) -> Result<Self, SpriteError>
    where
        L: AssetLoader<Image = I>,
        S: AsRef<str>,
    {
        Self::create_with_progress(loader, paths, frames, |_| {}).await
    }

    /// Load every distinct path and animate over all of them.
    pub async fn load_all<L, S>(loader: &L, paths: &[S]) -> Result<Self, SpriteError>
    where
        L: AssetLoader<Image = I>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.initialize(loader, paths, |_| {}).await?;
        let last = set.sprites.len() as i64;
        set.set_animation_frames([1, last])?;
        Ok(set)
    }

    /// Like [`create`](Self::create), calling `on_progress` after every
    /// image that finishes loading.
    pub async fn create_with_progress<L, S, P>(
        loader: &L,
        paths: &[S],
        frames: impl Into<FrameSpec>,
        on_progress: P,
    ) -> Result<Self, SpriteError>
    where
        L: AssetLoader<Image = I>,
        S: AsRef<str>,
        P: FnMut(&LoadProgress),
    {
        let frames = frames.into();
        let mut set = Self::empty();
        set.initialize(loader, paths, on_progress).await?;
        set.set_animation_frames(frames)?;
        Ok(set)
    }

    async fn initialize<L, S, P>(
        &mut self,
        loader: &L,
        paths: &[S],
        on_progress: P,
    ) -> Result<(), SpriteError>
    where
        L: AssetLoader<Image = I>,
        S: AsRef<str>,
        P: FnMut(&LoadProgress),
    {
        if paths.is_empty() {
            return Err(SpriteError::InvalidInput("Empty array.".to_string()));
        }
        let blank = paths
            .iter()
            .position(|p| !KeyedCache::<LoadSlot>::key_valid(p.as_ref()));
        if let Some(pos) = blank {
            return Err(SpriteError::InvalidInput(format!("Path at position {} is blank.", pos)));
        }

        loader::load_distinct(loader, paths, &mut self.cache, &mut self.sprites, on_progress)
            .await?;
        log::info!("All {} sprites loaded successfully", self.sprites.len());
        Ok(())
    }

    /// Replace the active frame range and rewind to its first entry.
    ///
    /// On error the previous range and cursor are kept.
    pub fn set_animation_frames(
        &mut self,
        frames: impl Into<FrameSpec>,
    ) -> Result<(), SpriteError> {
        self.frame_indices = resolve_frames(&frames.into(), self.sprites.len())?;
        self.cursor = 0;
        self.pinned = None;
        Ok(())
    }

    /// The active frames as 0-based sprite indices.
    #[inline]
    pub fn animation_frames(&self) -> &[usize] {
        &self.frame_indices
    }

    /// Position of the cursor within [`animation_frames`](Self::animation_frames).
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move back to the first frame of the range.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.pinned = None;
    }

    /// Advance to the next frame of the range, wrapping to the first.
    pub fn next_frame(&mut self) {
        self.pinned = None;
        if !self.frame_indices.is_empty() {
            self.cursor = (self.cursor + 1) % self.frame_indices.len();
        }
    }

    /// Step back to the previous frame of the range, wrapping to the last.
    pub fn previous_frame(&mut self) {
        self.pinned = None;
        if !self.frame_indices.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.frame_indices.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    fn current_sprite(&self) -> Option<usize> {
        self.pinned.or_else(|| self.frame_indices.get(self.cursor).copied())
    }

    /// 1-based number of the sprite currently displayed.
    pub fn current_frame_index(&self) -> usize {
        self.current_sprite().map_or(0, |idx| idx + 1)
    }

    /// Show the sprite numbered `frame` (1-based), even if it lies outside
    /// the active range.
    ///
    /// When the sprite is part of the range the cursor moves to its first
    /// occurrence. Otherwise it is shown until the next navigation call or
    /// range change, after which playback continues from the cursor.
    pub fn set_current_frame_index(&mut self, frame: i64) -> Result<(), SpriteError> {
        if frame < 1 || frame as u64 > self.sprites.len() as u64 {
            return Err(SpriteError::InvalidFrame("Frame is not available.".to_string()));
        }
        let idx = (frame - 1) as usize;
        match self.frame_indices.iter().position(|&f| f == idx) {
            Some(pos) => {
                self.cursor = pos;
                self.pinned = None;
            }
            None => self.pinned = Some(idx),
        }
        Ok(())
    }

    /// Offset applied to the anchor point when drawing rotated.
    #[inline]
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Set the rotation origin from an `[x, y]` pair.
    pub fn set_origin(&mut self, value: &[f64]) -> Result<(), SpriteError> {
        let [x, y] = value else {
            return Err(SpriteError::InvalidOrigin(
                "Origin must be an array with exactly 2 elements [x, y].".to_string(),
            ));
        };
        if !x.is_finite() || !y.is_finite() {
            return Err(SpriteError::InvalidOrigin("Origin values must be numbers.".to_string()));
        }
        self.origin = (*x, *y);
        Ok(())
    }

    /// The image for the frame currently displayed.
    pub fn current_frame_image(&self) -> Option<&I> {
        self.current_sprite().and_then(|idx| self.sprites.get(idx))
    }

    /// Number of loaded sprites.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.sprites.len()
    }

    /// All loaded sprites, in load-completion order.
    #[inline]
    pub fn sprites(&self) -> &[I] {
        &self.sprites
    }

    /// 0-based index of the sprite loaded from `path`.
    pub fn sprite_index_of(&self, path: &str) -> Option<usize> {
        match self.cache.get(path)? {
            LoadSlot::Loaded(idx) => Some(*idx),
            LoadSlot::Pending => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::executor::block_on;

    /// Loader that yields the path itself.
    pub(crate) struct PathLoader;

    impl AssetLoader for PathLoader {
        type Image = String;

        async fn load(&self, path: &str) -> crate::LoadResult<String> {
            Ok(path.to_string())
        }
    }

    pub(crate) fn five_sprites() -> SpriteSet<String> {
        let paths = ["1.png", "2.png", "3.png", "4.png", "5.png"];
        block_on(SpriteSet::load_all(&PathLoader, &paths)).unwrap()
    }

    #[test]
    fn test_load_all_covers_every_sprite() {
        let set = five_sprites();
        assert_eq!(set.frame_count(), 5);
        assert_eq!(set.animation_frames(), &[0, 1, 2, 3, 4]);
        assert_eq!(set.cursor(), 0);
        assert_eq!(set.current_frame_image().map(String::as_str), Some("1.png"));
    }

    #[test]
    fn test_create_applies_default_frame() {
        let paths = ["a.png", "b.png"];
        let set = block_on(SpriteSet::create(&PathLoader, &paths, FrameSpec::default())).unwrap();
        assert_eq!(set.animation_frames(), &[0]);
        assert_eq!(set.current_frame_index(), 1);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            block_on(SpriteSet::create(&PathLoader, &empty, 1)),
            Err(SpriteError::InvalidInput(_))
        ));
        assert!(matches!(
            block_on(SpriteSet::create(&PathLoader, &["a.png", "  "], 1)),
            Err(SpriteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_rejects_frames_beyond_sprites() {
        let result = block_on(SpriteSet::create(&PathLoader, &["a.png", "b.png"], 3));
        assert!(matches!(result, Err(SpriteError::InvalidFrame(_))));
    }

    #[test]
    fn test_range_assignment() {
        let mut set = five_sprites();
        set.next_frame();
        set.set_animation_frames([3, 1]).unwrap();

        assert_eq!(set.animation_frames(), &[0, 1, 2]);
        assert_eq!(set.cursor(), 0);
    }

    #[test]
    fn test_single_frame_assignment() {
        let mut set = five_sprites();
        set.set_animation_frames(4).unwrap();
        assert_eq!(set.animation_frames(), &[3]);
        assert_eq!(set.current_frame_index(), 4);
    }

    #[test]
    fn test_failed_assignment_keeps_state() {
        let mut set = five_sprites();
        set.set_animation_frames([2, 4]).unwrap();
        set.next_frame();

        assert_eq!(set.set_animation_frames(Vec::new()), Err(SpriteError::InvalidFrameList));
        assert!(set.set_animation_frames([1, 6]).is_err());
        assert_eq!(set.animation_frames(), &[1, 2, 3]);
        assert_eq!(set.cursor(), 1);
    }

    #[test]
    fn test_frames_past_u32_rejected() {
        let mut set = five_sprites();
        set.set_animation_frames([2, 4]).unwrap();

        let huge: i64 = 4_294_967_297;
        assert!(matches!(set.set_animation_frames(huge), Err(SpriteError::InvalidFrame(_))));
        assert!(matches!(
            set.set_animation_frames([1, huge]),
            Err(SpriteError::InvalidFrame(_))
        ));
        assert_eq!(set.animation_frames(), &[1, 2, 3]);
        assert_eq!(set.cursor(), 0);
    }

    #[test]
    fn test_next_frame_wraps() {
        let mut set = five_sprites();
        set.set_animation_frames(vec![5, 1, 3]).unwrap();
        set.next_frame();
        let start = set.cursor();

        for _ in 0..set.animation_frames().len() {
            set.next_frame();
        }
        assert_eq!(set.cursor(), start);

        set.next_frame();
        set.next_frame();
        assert_eq!(set.cursor(), 0);
        assert_eq!(set.current_frame_index(), 5);
    }

    #[test]
    fn test_previous_frame_wraps() {
        let mut set = five_sprites();
        set.set_animation_frames([2, 4]).unwrap();

        set.previous_frame();
        assert_eq!(set.cursor(), 2);
        assert_eq!(set.current_frame_index(), 4);

        set.previous_frame();
        assert_eq!(set.current_frame_index(), 3);
    }

    #[test]
    fn test_set_current_frame_index_within_range() {
        let mut set = five_sprites();
        set.set_animation_frames([2, 4]).unwrap();

        set.set_current_frame_index(3).unwrap();
        assert_eq!(set.cursor(), 1);
        assert_eq!(set.current_frame_index(), 3);
    }

    #[test]
    fn test_set_current_frame_index_outside_range() {
        let mut set = five_sprites();
        set.set_animation_frames([2, 3]).unwrap();

        set.set_current_frame_index(5).unwrap();
        assert_eq!(set.current_frame_index(), 5);
        assert_eq!(set.current_frame_image().map(String::as_str), Some("5.png"));
        assert_eq!(set.cursor(), 0);

        set.next_frame();
        assert_eq!(set.current_frame_index(), 3);
    }

    #[test]
    fn test_set_current_frame_index_invalid() {
        let mut set = five_sprites();
        set.next_frame();

        for frame in [0, -1, 6, i64::MAX] {
            assert!(matches!(
                set.set_current_frame_index(frame),
                Err(SpriteError::InvalidFrame(_))
            ));
            assert_eq!(set.cursor(), 1);
            assert_eq!(set.current_frame_index(), 2);
        }
    }

    #[test]
    fn test_origin() {
        let mut set = five_sprites();
        assert_eq!(set.origin(), (0.0, 0.0));

        set.set_origin(&[4.0, -2.5]).unwrap();
        assert_eq!(set.origin(), (4.0, -2.5));

        assert!(matches!(set.set_origin(&[1.0]), Err(SpriteError::InvalidOrigin(_))));
        assert!(matches!(set.set_origin(&[1.0, 2.0, 3.0]), Err(SpriteError::InvalidOrigin(_))));
        assert!(matches!(set.set_origin(&[f64::NAN, 0.0]), Err(SpriteError::InvalidOrigin(_))));
        assert_eq!(set.origin(), (4.0, -2.5));
    }

    #[test]
    fn test_sprite_index_of() {
        let set = five_sprites();
        let idx = set.sprite_index_of("3.png").unwrap();
        assert_eq!(set.sprites()[idx], "3.png");
        assert_eq!(set.sprite_index_of("missing.png"), None);
    }
}
