//! Playback controller stepping a sprite set through its frame range.

use crate::SpriteSet;

/// Loop mode for animation playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop on the last frame of the range
    Once,
    /// Wrap back to the first frame of the range
    #[default]
    Loop,
}

/// Current state of playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    /// Reached the end of the range (only in `LoopMode::Once`)
    Finished,
}

/// Timing-agnostic playback state for a [`SpriteSet`].
///
/// The controller does not own a clock. The caller invokes `tick()` every
/// `interval_ms()` milliseconds from whatever timer the platform offers
/// (`requestAnimationFrame`, a game loop, ...).
///
/// ## Example
///
/// ```rust
/// use gamelib_sprites::{AssetLoader, LoadResult, Playback, PlaybackState, SpriteSet};
///
/// struct Names;
///
/// impl AssetLoader for Names {
///     type Image = String;
///
///     async fn load(&self, path: &str) -> LoadResult<String> {
///         Ok(path.to_string())
///     }
/// }
///
/// let load = SpriteSet::load_all(&Names, &["a", "b", "c"]);
/// let mut set = futures::executor::block_on(load).unwrap();
/// let mut playback = Playback::new(12);
///
/// playback.play();
/// playback.tick(&mut set);
/// playback.tick(&mut set);
/// assert_eq!(set.current_frame_index(), 3);
///
/// playback.pause();
/// assert_eq!(playback.state(), PlaybackState::Stopped);
/// assert!(!playback.tick(&mut set));
/// ```
#[derive(Clone, Debug)]
pub struct Playback {
    fps: u32,
    state: PlaybackState,
    loop_mode: LoopMode,
}

impl Playback {
    /// Create a stopped, looping controller running at `fps` (at least 1).
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            state: PlaybackState::Stopped,
            loop_mode: LoopMode::Loop,
        }
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Milliseconds between two ticks.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        (1000.0 / self.fps as f64).max(1.0) as u32
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        if mode == LoopMode::Loop && self.state == PlaybackState::Finished {
            self.state = PlaybackState::Stopped;
        }
    }

    #[inline]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Start or resume playback. Has no effect once finished; use
    /// [`toggle`](Self::toggle) or [`stop`](Self::stop) to rewind.
    pub fn play(&mut self) {
        if self.state != PlaybackState::Finished {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Toggle play/pause. A finished animation restarts from the first frame
    /// of the range.
    pub fn toggle<I>(&mut self, sprites: &mut SpriteSet<I>) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Stopped => self.play(),
            PlaybackState::Finished => {
                sprites.rewind();
                self.state = PlaybackState::Playing;
            }
        }
    }

    /// Stop playback and rewind to the first frame of the range.
    pub fn stop<I>(&mut self, sprites: &mut SpriteSet<I>) {
        self.state = PlaybackState::Stopped;
        sprites.rewind();
    }

    /// Advance `sprites` by one frame.
    ///
    /// Returns `true` if the displayed frame changed.
    pub fn tick<I>(&mut self, sprites: &mut SpriteSet<I>) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let len = sprites.animation_frames().len();
        if len == 0 {
            return false;
        }

        let at_end = sprites.cursor() + 1 >= len;
        if at_end && self.loop_mode == LoopMode::Once {
            self.state = PlaybackState::Finished;
            log::debug!("Playback finished after {} frames", len);
            return false;
        }
        sprites.next_frame();
        true
    }
}
