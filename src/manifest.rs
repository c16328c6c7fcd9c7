use crate::{AssetLoader, FrameSpec, SpriteError, SpriteSet};

/// Sprite set description, typically read from a `sprites.toml` file.
///
/// ```toml
/// sprites = ["walk_1.png", "walk_2.png", "walk_3.png"]
/// frames = [1, 3]
/// origin = [16.0, 16.0]
/// ```
///
/// `frames` accepts a single frame number or a list, with the same meaning
/// as [`FrameSpec`]. Without it every sprite is animated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteManifest {
    pub sprites: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frames: Option<FrameSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Option<Vec<f64>>,
}

impl SpriteManifest {
    /// Parse a sprite manifest from TOML.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load the described sprites and apply the frame range and origin.
    pub async fn load<L: AssetLoader>(
        &self,
        loader: &L,
    ) -> Result<SpriteSet<L::Image>, SpriteError> {
        let mut set = match &self.frames {
            Some(frames) => {
                SpriteSet::create(loader, self.sprites.as_slice(), frames.clone()).await?
            }
            None => SpriteSet::load_all(loader, self.sprites.as_slice()).await?,
        };
        if let Some(origin) = &self.origin {
            set.set_origin(origin)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::tests::PathLoader;
    use futures::executor::block_on;

    fn manifest(frames: Option<FrameSpec>, origin: Option<Vec<f64>>) -> SpriteManifest {
        SpriteManifest {
            sprites: vec!["a.png".into(), "b.png".into(), "c.png".into()],
            frames,
            origin,
        }
    }

    #[test]
    fn defaults_to_every_sprite() {
        let set = block_on(manifest(None, None).load(&PathLoader)).unwrap();
        assert_eq!(set.animation_frames(), &[0, 1, 2]);
        assert_eq!(set.origin(), (0.0, 0.0));
    }

    #[test]
    fn applies_frames_and_origin() {
        let manifest = manifest(Some(FrameSpec::from([3, 2])), Some(vec![4.0, 8.0]));
        let set = block_on(manifest.load(&PathLoader)).unwrap();
        assert_eq!(set.animation_frames(), &[1, 2]);
        assert_eq!(set.origin(), (4.0, 8.0));
    }

    #[test]
    fn invalid_origin_fails_load() {
        let result = block_on(manifest(None, Some(vec![1.0])).load(&PathLoader));
        assert!(matches!(result, Err(SpriteError::InvalidOrigin(_))));
    }

    #[test]
    fn empty_sprite_list_fails_load() {
        let result = block_on(SpriteManifest::default().load(&PathLoader));
        assert!(matches!(result, Err(SpriteError::InvalidInput(_))));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parse_toml() {
        let parsed = SpriteManifest::from_toml_str(
            r#"
            sprites = ["a.png", "b.png", "c.png"]
            frames = [1, 3]
            origin = [2.0, 3.5]
            "#,
        )
        .unwrap();
        assert_eq!(parsed, manifest(Some(FrameSpec::List(vec![1, 3])), Some(vec![2.0, 3.5])));

        let single = SpriteManifest::from_toml_str("sprites = [\"a.png\"]\nframes = 1").unwrap();
        assert_eq!(single.frames, Some(FrameSpec::Single(1)));
        assert_eq!(single.origin, None);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parse_toml_rejects_bad_frames() {
        assert!(SpriteManifest::from_toml_str("sprites = [\"a.png\"]\nframes = \"all\"").is_err());
    }
}
