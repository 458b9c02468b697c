use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::accessory::AccessorySlot;
use crate::error::CatError;
use crate::render::customization::CustomizationProfile;

pub const DEFAULT_CAT_ID: &str = "custom_cat";
const DEFAULT_HUNGER: f32 = 80.0;
const DEFAULT_HAPPINESS: f32 = 60.0;
const DEFAULT_ENERGY: f32 = 100.0;

/// What a cat is built from: defaults for a new cat, or a restored save.
/// Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    pub cat_id: Option<String>,
    pub hunger: Option<f32>,
    pub happiness: Option<f32>,
    pub energy: Option<f32>,
    pub customization: Option<CustomizationProfile>,
    pub accessories: Option<BTreeMap<AccessorySlot, String>>,
    pub is_sleeping: Option<bool>,
}

impl InitialState {
    pub fn from_json(text: &str) -> Result<Self, CatError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn cat_id(&self) -> String {
        self.cat_id.clone().unwrap_or_else(|| DEFAULT_CAT_ID.to_string())
    }

    pub fn hunger(&self) -> f32 {
        self.hunger.unwrap_or(DEFAULT_HUNGER)
    }

    pub fn happiness(&self) -> f32 {
        self.happiness.unwrap_or(DEFAULT_HAPPINESS)
    }

    pub fn energy(&self) -> f32 {
        self.energy.unwrap_or(DEFAULT_ENERGY)
    }

    pub fn customization(&self) -> CustomizationProfile {
        self.customization.clone().unwrap_or_default()
    }

    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping.unwrap_or(false)
    }
}

/// Everything needed to rebuild the cat later. Handed to whatever does the
/// saving; the format on disk is its business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub cat_id: String,
    pub hunger: f32,
    pub happiness: f32,
    pub energy: f32,
    pub accessories: BTreeMap<AccessorySlot, String>,
    pub customization: CustomizationProfile,
    pub is_sleeping: bool,
}

impl SaveRecord {
    pub fn to_json(&self) -> Result<String, CatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<SaveRecord> for InitialState {
    fn from(rec: SaveRecord) -> Self {
        Self {
            cat_id: Some(rec.cat_id),
            hunger: Some(rec.hunger),
            happiness: Some(rec.happiness),
            energy: Some(rec.energy),
            customization: Some(rec.customization),
            accessories: Some(rec.accessories),
            is_sleeping: Some(rec.is_sleeping),
        }
    }
}
