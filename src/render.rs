//! Drawing coordination for sprite sets.
//!
//! A sprite set only decides which image to draw and where its anchor is.
//! Pixels are produced by a [`DrawSurface`], such as a browser canvas
//! context or the [`CommandRecorder`] used for headless backends.

use crate::{SpriteError, SpriteSet};

const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// An image with natural pixel dimensions.
pub trait SpriteImage {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

/// A 2D drawing target able to draw images of type `I` under an affine
/// transform.
pub trait DrawSurface<I> {
    /// Draw `image` scaled into the rectangle at (`x`, `y`).
    fn draw_image(
        &mut self,
        image: &I,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), String>;

    /// Push the current transform state.
    fn save(&mut self);

    /// Pop the transform state pushed by the matching `save`.
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64) -> Result<(), String>;

    /// Rotate clockwise by `radians`.
    fn rotate(&mut self, radians: f64) -> Result<(), String>;
}

/// A single call issued to a drawing surface.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    DrawImage {
        /// Index of the drawn image in the sprite list
        sprite: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
}

/// Platform-agnostic surface that records the calls made to it.
///
/// Images are identified through a lookup closure mapping an image to its
/// sprite index, so each consumer can replay the commands on its own
/// backend.
///
/// ## Example
///
/// ```rust
/// use gamelib_sprites::render::{CommandRecorder, DrawCommand, DrawSurface};
///
/// let sprites = vec!["a", "b"];
/// let mut recorder = CommandRecorder::new(|img: &&str| sprites.iter().position(|s| s == img));
///
/// recorder.draw_image(&"b", 1.0, 2.0, 8.0, 8.0).unwrap();
/// assert_eq!(
///     recorder.commands(),
///     &[DrawCommand::DrawImage { sprite: 1, x: 1.0, y: 2.0, width: 8.0, height: 8.0 }]
/// );
/// ```
pub struct CommandRecorder<F> {
    lookup: F,
    commands: Vec<DrawCommand>,
}

impl<F> CommandRecorder<F> {
    pub fn new(lookup: F) -> Self {
        Self {
            lookup,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl<I, F> DrawSurface<I> for CommandRecorder<F>
where
    F: FnMut(&I) -> Option<usize>,
{
    fn draw_image(
        &mut self,
        image: &I,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), String> {
        let sprite = (self.lookup)(image).ok_or("Image does not belong to this recorder")?;
        self.commands.push(DrawCommand::DrawImage { sprite, x, y, width, height });
        Ok(())
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), String> {
        self.commands.push(DrawCommand::Translate { x, y });
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), String> {
        self.commands.push(DrawCommand::Rotate { radians });
        Ok(())
    }
}

impl<I: SpriteImage> SpriteSet<I> {
    /// Draw the current frame at (`x`, `y`).
    ///
    /// A `width` or `height` of zero or less uses the image's natural size.
    /// Does nothing when there is no surface or no current image.
    pub fn draw<S>(
        &self,
        surface: Option<&mut S>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SpriteError>
    where
        S: DrawSurface<I> + ?Sized,
    {
        let (Some(surface), Some(image)) = (surface, self.current_frame_image()) else {
            return Ok(());
        };
        let (width, height) = natural_size(image, width, height);
        surface.draw_image(image, x, y, width, height).map_err(SpriteError::Surface)
    }

    /// Draw the current frame rotated by `degrees` around the anchor
    /// (`x` + origin.x, `y` - origin.y).
    ///
    /// With no rotation the image lands exactly where [`draw`](Self::draw)
    /// would put it. The surface transform is restored even if drawing fails.
    pub fn draw_rotated<S>(
        &self,
        surface: Option<&mut S>,
        x: f64,
        y: f64,
        degrees: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SpriteError>
    where
        S: DrawSurface<I> + ?Sized,
    {
        let (Some(surface), Some(image)) = (surface, self.current_frame_image()) else {
            return Ok(());
        };
        let (width, height) = natural_size(image, width, height);
        let (ox, oy) = self.origin();

        surface.save();
        let result = draw_transformed(
            &mut *surface,
            image,
            (x + ox, y - oy),
            degrees * DEG2RAD,
            (-ox, oy),
            (width, height),
        );
        surface.restore();
        result.map_err(SpriteError::Surface)
    }
}

fn natural_size<I: SpriteImage>(image: &I, width: f64, height: f64) -> (f64, f64) {
    let width = if width <= 0.0 { image.width() } else { width };
    let height = if height <= 0.0 { image.height() } else { height };
    (width, height)
}

fn draw_transformed<I, S>(
    surface: &mut S,
    image: &I,
    anchor: (f64, f64),
    radians: f64,
    offset: (f64, f64),
    size: (f64, f64),
) -> Result<(), String>
where
    S: DrawSurface<I> + ?Sized,
{
    surface.translate(anchor.0, anchor.1)?;
    surface.rotate(radians)?;
    surface.draw_image(image, offset.0, offset.1, size.0, size.1)
}

/// Web-specific drawing implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    impl SpriteImage for HtmlImageElement {
        fn width(&self) -> f64 {
            self.natural_width() as f64
        }

        fn height(&self) -> f64 {
            self.natural_height() as f64
        }
    }

    impl DrawSurface<HtmlImageElement> for CanvasRenderingContext2d {
        fn draw_image(
            &mut self,
            image: &HtmlImageElement,
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        ) -> Result<(), String> {
            self.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
                .map_err(|_| "Failed to draw image".to_string())
        }

        fn save(&mut self) {
            CanvasRenderingContext2d::save(self);
        }

        fn restore(&mut self) {
            CanvasRenderingContext2d::restore(self);
        }

        fn translate(&mut self, x: f64, y: f64) -> Result<(), String> {
            CanvasRenderingContext2d::translate(self, x, y)
                .map_err(|_| "Failed to translate".to_string())
        }

        fn rotate(&mut self, radians: f64) -> Result<(), String> {
            CanvasRenderingContext2d::rotate(self, radians)
                .map_err(|_| "Failed to rotate".to_string())
        }
    }

    /// Get the 2D drawing context of a canvas element.
    pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;
        Ok(ctx)
    }
}
