use std::sync::Arc;

use image::RgbaImage;

use crate::assets::Assets;
use crate::error::CatError;

type Layer = Option<Arc<RgbaImage>>;

/// Asset directory for a body type.
pub fn body_prefix(body_type: &str) -> String {
    format!("images/cats/custom/{body_type}")
}

/// Grayscale templates for one body type. Everything but the idle frames
/// is optional; the compositor skips whatever is absent.
#[derive(Debug)]
pub struct LayerSet {
    pub body_type: String,
    pub idle: Vec<Arc<RgbaImage>>,
    pub eat: Vec<Arc<RgbaImage>>,
    pub pet: Vec<Arc<RgbaImage>>,
    pub sleep: Arc<RgbaImage>,
    pub shade: Layer,
    pub pattern: Layer,
    pub eye_color: Layer,
    pub eye_outline: Layer,
    pub eye_blink: Layer,
    pub mouth_color: Layer,
    pub mouth_outline: Layer,
    pub mouth_eat: Layer,
    /// Optional layer paths that were not found.
    pub missing: Vec<String>,
}

impl LayerSet {
    /// Load from the standard layout. Fails only when the idle frames are
    /// missing; there is no sensible body to fall back to.
    pub fn load(body_type: &str, assets: &mut Assets) -> Result<Self, CatError> {
        let prefix = body_prefix(body_type);

        let idle_dir = format!("{prefix}/base/idle");
        let idle = assets.frames(&idle_dir);
        let Some(first) = idle.first().cloned() else {
            return Err(CatError::NoBaseFrames {
                body_type: body_type.to_string(),
                dir: idle_dir,
            });
        };

        let mut missing = Vec::new();
        let mut optional = |path: String| {
            let layer = assets.load_optional(&path);
            if layer.is_none() {
                missing.push(path);
            }
            layer
        };

        let sleep_path = format!("{prefix}/base/sleep/001.png");
        let sleep = optional(sleep_path.clone()).unwrap_or_else(|| {
            log::warn!("no sleep pose at {sleep_path}, using first idle frame");
            first
        });
        let shade = optional(format!("{prefix}/base/shade.png"));
        let pattern = optional(format!("{prefix}/patterns/idle/01.png"));
        let eye_color = optional(format!("{prefix}/eyes/idle/01_color.png"));
        let eye_outline = optional(format!("{prefix}/eyes/idle/01.png"));
        let eye_blink = optional(format!("{prefix}/eyes/idle/01_blink.png"));
        let mouth_color = optional(format!("{prefix}/mouth/idle/01_color.png"));
        let mouth_outline = optional(format!("{prefix}/mouth/idle/01.png"));
        let mouth_eat = optional(format!("{prefix}/mouth/eat/01.png"));

        let set = Self {
            body_type: body_type.to_string(),
            eat: assets.frames(&format!("{prefix}/base/eat")),
            pet: assets.frames(&format!("{prefix}/base/pet")),
            sleep,
            shade,
            pattern,
            eye_color,
            eye_outline,
            eye_blink,
            mouth_color,
            mouth_outline,
            mouth_eat,
            missing,
            idle,
        };
        log::info!(
            "loaded '{body_type}' templates: {} idle, {} eat, {} pet frames, {} optional layers missing",
            set.idle.len(),
            set.eat.len(),
            set.pet.len(),
            set.missing.len()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{procedural, AssetSource, MemoryAssets};

    #[test]
    fn full_procedural_set_loads() {
        let mut assets = Assets::new(procedural::cat_assets("shorthair"));
        let set = assets.layer_set("shorthair").unwrap();
        assert!(set.idle.len() > 1);
        assert!(set.shade.is_some());
        assert!(set.eye_blink.is_some());
        assert!(!set.eat.is_empty());
        assert!(set.missing.is_empty());
    }

    #[test]
    fn unknown_body_is_fatal() {
        let mut assets = Assets::new(procedural::cat_assets("shorthair"));
        let err = assets.layer_set("sphynx").unwrap_err();
        assert!(matches!(err, CatError::NoBaseFrames { .. }));
    }

    #[test]
    fn optional_layers_may_be_absent() {
        let full = procedural::cat_assets("shorthair");
        let mut bare = MemoryAssets::new();
        for path in full.frames_in("images/cats/custom/shorthair/base/idle") {
            let img = full.read(&path).unwrap();
            bare.insert(path, img);
        }
        let set = LayerSet::load("shorthair", &mut Assets::new(bare)).unwrap();
        assert!(set.shade.is_none());
        assert!(set.pattern.is_none());
        assert!(set.eat.is_empty());
        assert_eq!(set.missing.len(), 9);
        assert!(set
            .missing
            .contains(&"images/cats/custom/shorthair/base/shade.png".to_string()));
        // sleep falls back to the first idle frame
        assert!(Arc::ptr_eq(&set.sleep, &set.idle[0]));
    }
}
