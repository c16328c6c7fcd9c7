//! Frame specifications and their resolution to sprite indices.
//!
//! Frames are numbered from 1 for callers and stored as 0-based indices
//! into the sprite list.

use crate::SpriteError;

/// Which frames of a sprite set take part in the animation.
///
/// A two-element list is always read as an inclusive range, in either order:
/// `[5, 2]` selects frames 2, 3, 4 and 5. Every other list length is used
/// verbatim. To animate exactly two frames that are not adjacent, list one
/// of them twice (e.g. `[1, 4, 4]`) or drive the cursor with
/// [`SpriteSet::set_current_frame_index`](crate::SpriteSet::set_current_frame_index).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FrameSpec {
    /// A single 1-based frame
    Single(i64),
    /// A range (two entries) or an explicit list of 1-based frames
    List(Vec<i64>),
}

impl Default for FrameSpec {
    fn default() -> Self {
        FrameSpec::Single(1)
    }
}

impl From<i64> for FrameSpec {
    fn from(frame: i64) -> Self {
        FrameSpec::Single(frame)
    }
}

impl From<Vec<i64>> for FrameSpec {
    fn from(frames: Vec<i64>) -> Self {
        FrameSpec::List(frames)
    }
}

impl<const N: usize> From<[i64; N]> for FrameSpec {
    fn from(frames: [i64; N]) -> Self {
        FrameSpec::List(frames.to_vec())
    }
}

impl From<&[i64]> for FrameSpec {
    fn from(frames: &[i64]) -> Self {
        FrameSpec::List(frames.to_vec())
    }
}

/// Convert a 1-based frame number into a 0-based sprite index.
pub fn resolve_frame(frame: i64, sprite_count: usize) -> Result<usize, SpriteError> {
    if frame < 1 {
        return Err(SpriteError::InvalidFrame(
            "Animation frame must be a positive integer value greater than zero.".to_string(),
        ));
    }
    if frame as u64 > sprite_count as u64 {
        return Err(SpriteError::InvalidFrame(format!("Frame {} is not available.", frame)));
    }
    Ok((frame - 1) as usize)
}

/// Resolve a frame specification into the ordered list of sprite indices it
/// selects.
///
/// ## Example
///
/// ```rust
/// use gamelib_sprites::{resolve_frames, FrameSpec};
///
/// assert_eq!(resolve_frames(&FrameSpec::from([5, 2]), 5).unwrap(), vec![1, 2, 3, 4]);
/// assert_eq!(resolve_frames(&FrameSpec::from([1, 3, 5]), 5).unwrap(), vec![0, 2, 4]);
/// assert_eq!(resolve_frames(&FrameSpec::Single(4), 5).unwrap(), vec![3]);
/// ```
pub fn resolve_frames(spec: &FrameSpec, sprite_count: usize) -> Result<Vec<usize>, SpriteError> {
    match spec {
        FrameSpec::Single(frame) => Ok(vec![resolve_frame(*frame, sprite_count)?]),
        FrameSpec::List(frames) => {
            if frames.is_empty() {
                return Err(SpriteError::InvalidFrameList);
            }
            let mut indices = frames
                .iter()
                .map(|&frame| resolve_frame(frame, sprite_count))
                .collect::<Result<Vec<_>, _>>()?;

            if indices.len() == 2 {
                indices.sort_unstable();
                indices = (indices[0]..=indices[1]).collect();
            }
            Ok(indices)
        }
    }
}
