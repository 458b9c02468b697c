use serde::{Deserialize, Serialize};

use crate::error::CatError;

pub type Rgb = [u8; 3];

pub const DEFAULT_BODY_TYPE: &str = "shorthair";
/// Beige.
pub const DEFAULT_BASE_COLOR: Rgb = [210, 180, 140];
/// Brown.
pub const DEFAULT_PATTERN_COLOR: Rgb = [139, 69, 19];
/// Blue.
pub const DEFAULT_EYE_COLOR: Rgb = [70, 150, 220];
/// Pink.
pub const DEFAULT_NOSE_COLOR: Rgb = [255, 182, 193];

fn default_body_type() -> String {
    DEFAULT_BODY_TYPE.to_string()
}

fn default_base() -> Rgb {
    DEFAULT_BASE_COLOR
}

fn default_pattern() -> Option<Rgb> {
    Some(DEFAULT_PATTERN_COLOR)
}

fn default_eye() -> Rgb {
    DEFAULT_EYE_COLOR
}

fn default_nose() -> Rgb {
    DEFAULT_NOSE_COLOR
}

/// Colour slots plus the body type that picks the template set.
///
/// Absent JSON fields take the default palette; an explicit
/// `"pattern_color": null` means "no pattern".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationProfile {
    #[serde(default = "default_body_type")]
    pub body_type: String,
    #[serde(default = "default_base")]
    pub base_color: Rgb,
    #[serde(default = "default_pattern")]
    pub pattern_color: Option<Rgb>,
    #[serde(default = "default_eye")]
    pub eye_color: Rgb,
    #[serde(default = "default_nose")]
    pub nose_color: Rgb,
}

impl Default for CustomizationProfile {
    fn default() -> Self {
        Self {
            body_type: default_body_type(),
            base_color: DEFAULT_BASE_COLOR,
            pattern_color: Some(DEFAULT_PATTERN_COLOR),
            eye_color: DEFAULT_EYE_COLOR,
            nose_color: DEFAULT_NOSE_COLOR,
        }
    }
}

impl CustomizationProfile {
    /// Body types become asset path segments, so only `[a-z0-9_-]` is allowed.
    pub fn validate(&self) -> Result<(), CatError> {
        let ok = !self.body_type.is_empty()
            && self
                .body_type
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if ok {
            Ok(())
        } else {
            Err(CatError::InvalidCustomization {
                reason: format!("body type '{}' is not a valid asset name", self.body_type),
            })
        }
    }
}
