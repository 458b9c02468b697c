pub mod blend;
pub mod customization;
pub mod layers;

use std::sync::Arc;

use image::RgbaImage;

use customization::CustomizationProfile;
use layers::LayerSet;

/// Transient flags that pick which feature layers get drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoseFlags {
    pub blinking: bool,
    pub petted: bool,
    pub food_hover: bool,
    pub sleeping: bool,
}

/// A finished sprite. `scaled` is what goes on screen and into hit testing;
/// `full` is the unscaled intermediate. They share storage at scale 1.
#[derive(Debug, Clone)]
pub struct Composite {
    pub full: Arc<RgbaImage>,
    pub scaled: Arc<RgbaImage>,
}

/// Builds cat sprites from a template set and a colour profile.
#[derive(Debug)]
pub struct Compositor {
    layers: Arc<LayerSet>,
    profile: CustomizationProfile,
    scale: f32,
    sleep_cache: Option<Composite>,
}

impl Compositor {
    pub fn new(layers: Arc<LayerSet>, profile: CustomizationProfile, scale: f32) -> Self {
        Self {
            layers,
            profile,
            scale,
            sleep_cache: None,
        }
    }

    pub fn layers(&self) -> &Arc<LayerSet> {
        &self.layers
    }

    pub fn profile(&self) -> &CustomizationProfile {
        &self.profile
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_profile(&mut self, profile: CustomizationProfile) {
        self.profile = profile;
        self.sleep_cache = None;
    }

    pub fn set_layers(&mut self, layers: Arc<LayerSet>) {
        self.layers = layers;
        self.sleep_cache = None;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.sleep_cache = None;
    }

    /// Compose one frame. `base` is the current animation frame and is
    /// ignored while sleeping.
    pub fn compose(&mut self, base: &RgbaImage, flags: PoseFlags) -> Composite {
        if flags.sleeping {
            return self.sleep_composite();
        }
        let full = self.compose_awake(base, flags);
        self.finish(full)
    }

    /// Sleep pose: base colour only. Pattern, shade and face layers are
    /// drawn for the sitting pose and would not line up.
    fn sleep_composite(&mut self) -> Composite {
        if let Some(cached) = &self.sleep_cache {
            return cached.clone();
        }
        let full = blend::tint(&self.layers.sleep, self.profile.base_color);
        let composite = self.finish(full);
        self.sleep_cache = Some(composite.clone());
        composite
    }

    fn compose_awake(&self, base: &RgbaImage, flags: PoseFlags) -> RgbaImage {
        let layers = &*self.layers;
        let profile = &self.profile;

        let mut canvas = RgbaImage::new(base.width(), base.height());
        blend::over(&mut canvas, &blend::tint(base, profile.base_color));

        if let (Some(pattern), Some(color)) = (&layers.pattern, profile.pattern_color) {
            blend::over(&mut canvas, &blend::tint(pattern, color));
        }

        if let Some(shade) = &layers.shade {
            blend::shade(&mut canvas, shade);
        }

        // Mouth outline, then the tinted nose on top.
        let outline = if flags.food_hover && layers.mouth_eat.is_some() {
            &layers.mouth_eat
        } else {
            &layers.mouth_outline
        };
        if let Some(outline) = outline {
            blend::over(&mut canvas, outline);
        }
        if let Some(nose) = &layers.mouth_color {
            blend::over(&mut canvas, &blend::tint(nose, profile.nose_color));
        }

        match &layers.eye_blink {
            Some(blink) if flags.blinking || flags.petted => blend::over(&mut canvas, blink),
            _ => {
                if let Some(fill) = &layers.eye_color {
                    blend::over(&mut canvas, &blend::tint(fill, profile.eye_color));
                }
                if let Some(outline) = &layers.eye_outline {
                    blend::over(&mut canvas, outline);
                }
            }
        }

        canvas
    }

    fn finish(&self, full: RgbaImage) -> Composite {
        let full = Arc::new(full);
        let scaled = if self.scale != 1.0 {
            Arc::new(blend::scale(&full, self.scale))
        } else {
            Arc::clone(&full)
        };
        Composite { full, scaled }
    }
}
