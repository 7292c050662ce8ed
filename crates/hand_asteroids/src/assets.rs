//! Game asset definitions

use std::rc::Rc;

use frame_engine::assets::{load_frame, AssetError, Sprite};
use frame_engine::render::{Frame, TextRenderer};

use crate::config::AssetsConfig;

/// Images the game needs for a session. Missing or unreadable files are
/// fatal: a session cannot start without them.
pub struct GameAssets {
    /// Backdrop blended under the camera feed
    pub background: Frame,

    /// Sprite shared by every asteroid
    pub asteroid: Rc<Sprite>,

    /// Player ship sprite
    pub spaceship: Rc<Sprite>,

    /// Font for the game-over screen
    pub text: Rc<TextRenderer>,
}

impl GameAssets {
    /// Load every asset named in `config`
    pub fn load(config: &AssetsConfig) -> Result<Self, AssetError> {
        log::info!("Loading game assets...");
        let background = load_frame(&config.background)?;
        let asteroid = Rc::new(Sprite::from_file(&config.asteroid)?);
        let spaceship = Rc::new(Sprite::from_file(&config.spaceship)?);
        let text = Rc::new(match &config.font {
            Some(path) => TextRenderer::from_file(path)?,
            None => TextRenderer::bundled()?,
        });

        Ok(Self { background, asteroid, spaceship, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbImage, RgbaImage};

    #[test]
    fn test_load_all_assets() {
        let dir = tempfile::tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();

        RgbImage::from_pixel(8, 6, Rgb([1, 2, 3])).save(path("bg.png")).unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 0])).save(path("rock.png")).unwrap();
        RgbaImage::from_pixel(6, 10, Rgba([5, 5, 5, 255])).save(path("ship.png")).unwrap();

        let config = AssetsConfig {
            background: path("bg.png"),
            asteroid: path("rock.png"),
            spaceship: path("ship.png"),
            font: None,
        };
        let assets = GameAssets::load(&config).unwrap();

        assert_eq!(assets.background.dimensions(), (8, 6));
        assert_eq!(assets.asteroid.image().get_pixel(0, 0).0[3], 0);
        assert_eq!(assets.spaceship.height(), 10);
        assert!(assets.text.text_width("0", 16.0) > 0);
    }

    #[test]
    fn test_missing_font_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();

        RgbImage::from_pixel(8, 6, Rgb([1, 2, 3])).save(path("bg.png")).unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255])).save(path("rock.png")).unwrap();

        let config = AssetsConfig {
            background: path("bg.png"),
            asteroid: path("rock.png"),
            spaceship: path("rock.png"),
            font: Some(path("missing.ttf")),
        };
        assert!(matches!(GameAssets::load(&config), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_missing_asset_is_fatal() {
        let config = AssetsConfig {
            background: "nowhere/bg.png".to_string(),
            ..AssetsConfig::default()
        };
        assert!(matches!(GameAssets::load(&config), Err(AssetError::NotFound(_))));
    }
}
