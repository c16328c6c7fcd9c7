//! # gamelib-sprites
//!
//! Sprite asset cache and animation-frame model for canvas-based games.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Caching values under trimmed string keys with get-or-create semantics
//! - Loading sprite images concurrently, each distinct path exactly once
//! - Selecting animation frames (single frame, range, or explicit list)
//! - Stepping through frames and controlling playback
//! - Drawing the current frame, optionally rotated around an origin
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for manifests and frame specs
//! - `toml` - Parse sprite manifests from TOML
//! - `web` - Enable browser image loading and canvas drawing
//!
//! ## Example
//!
//! ```rust,ignore
//! use gamelib_sprites::{LoopMode, Playback, SpriteSet};
//! use gamelib_sprites::loader::web::HtmlImageLoader;
//!
//! let paths = ["walk_1.png", "walk_2.png", "walk_3.png", "walk_4.png"];
//! let mut walk = SpriteSet::create(&HtmlImageLoader, &paths, [1, 4]).await?;
//! walk.set_origin(&[16.0, 16.0])?;
//!
//! let mut playback = Playback::new(12);
//! playback.play();
//!
//! // From the game loop, every `playback.interval_ms()`:
//! playback.tick(&mut walk);
//! walk.draw_rotated(Some(&mut ctx), x, y, angle, 0.0, 0.0)?;
//! ```

mod animation;
mod cache;
mod frames;
pub mod loader;
mod manifest;
pub mod render;
mod sprite;

pub use animation::{LoopMode, Playback, PlaybackState};
pub use cache::{CacheError, KeyedCache};
pub use frames::{resolve_frame, resolve_frames, FrameSpec};
pub use loader::{AssetLoader, LoadProgress, LoadResult};
pub use manifest::SpriteManifest;
pub use render::{CommandRecorder, DrawCommand, DrawSurface, SpriteImage};
pub use sprite::{SpriteError, SpriteSet};

#[cfg(feature = "web")]
pub use loader::web::HtmlImageLoader;
#[cfg(feature = "web")]
pub use render::web::context_2d;
