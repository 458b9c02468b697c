use std::collections::BTreeMap;
use std::sync::Arc;

use glam::{IVec2, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::assets::Assets;
use crate::spatial::Rect;

/// Where on the cat an accessory is worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorySlot {
    Head,
    Body,
    /// Small extras (bows, jewelry). Saved under `"accessories"`.
    #[serde(rename = "accessories")]
    Extra,
}

impl AccessorySlot {
    pub const ALL: [AccessorySlot; 3] = [Self::Head, Self::Body, Self::Extra];

    fn folder(self) -> &'static str {
        match self {
            Self::Head => "hats",
            Self::Body => "body",
            Self::Extra => "accessories",
        }
    }

    pub fn sprite_path(self, item: &str) -> String {
        format!("images/items/clothes/{}/{item}.png", self.folder())
    }

    /// Accessory sprite scale relative to the cat's sprite scale.
    fn scale_factor(self) -> f32 {
        match self {
            Self::Head => 0.2,
            Self::Body => 1.0,
            Self::Extra => 0.5,
        }
    }

    /// Top-left corner of a `size` sprite worn on a cat drawn in `rect`.
    fn anchor(self, rect: &Rect, size: (u32, u32), scale: f32) -> IVec2 {
        let c = rect.center().as_vec2();
        let (w, h) = (size.0 as f32, size.1 as f32);
        let p = match self {
            Self::Head => Vec2::new(c.x - (w + 10.0), rect.y as f32 - 25.0 * scale),
            Self::Body => Vec2::new(c.x - w / 2.0, c.y - h / 2.0),
            Self::Extra => Vec2::new(c.x - w / 2.0, rect.bottom() as f32 - 30.0 * scale),
        };
        p.round().as_ivec2()
    }
}

/// What a slot holds.
#[derive(Debug, Clone, Default)]
pub enum Equip {
    #[default]
    Empty,
    Item {
        id: String,
        sprite: Arc<RgbaImage>,
    },
}

impl Equip {
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Equip::Empty => None,
            Equip::Item { id, .. } => Some(id),
        }
    }
}

/// A worn accessory ready to draw.
#[derive(Debug, Clone)]
pub struct AccessoryPlacement<'a> {
    pub slot: AccessorySlot,
    pub item: &'a str,
    pub sprite: &'a RgbaImage,
    pub top_left: IVec2,
}

/// One `Equip` per slot.
#[derive(Debug, Clone, Default)]
pub struct Accessories {
    head: Equip,
    body: Equip,
    extra: Equip,
}

impl Accessories {
    pub fn get(&self, slot: AccessorySlot) -> &Equip {
        match slot {
            AccessorySlot::Head => &self.head,
            AccessorySlot::Body => &self.body,
            AccessorySlot::Extra => &self.extra,
        }
    }

    fn get_mut(&mut self, slot: AccessorySlot) -> &mut Equip {
        match slot {
            AccessorySlot::Head => &mut self.head,
            AccessorySlot::Body => &mut self.body,
            AccessorySlot::Extra => &mut self.extra,
        }
    }

    /// Resolve `item`'s sprite at `scale` and wear it. A missing sprite
    /// leaves the slot empty; returns whether the item was equipped.
    pub fn equip(&mut self, slot: AccessorySlot, item: &str, scale: f32, assets: &mut Assets) -> bool {
        let path = slot.sprite_path(item);
        match assets.load(&path, Some(slot.scale_factor() * scale)) {
            Ok(sprite) => {
                *self.get_mut(slot) = Equip::Item {
                    id: item.to_string(),
                    sprite,
                };
                true
            }
            Err(e) => {
                log::warn!("cannot equip '{item}' on {slot:?}: {e}");
                *self.get_mut(slot) = Equip::Empty;
                false
            }
        }
    }

    pub fn unequip(&mut self, slot: AccessorySlot) {
        *self.get_mut(slot) = Equip::Empty;
    }

    /// Re-resolve every worn item for a new sprite scale.
    pub fn rescale(&mut self, scale: f32, assets: &mut Assets) {
        for slot in AccessorySlot::ALL {
            if let Some(id) = self.get(slot).item_id().map(str::to_owned) {
                self.equip(slot, &id, scale, assets);
            }
        }
    }

    /// Build from saved `slot -> item` ids.
    pub fn from_ids(ids: &BTreeMap<AccessorySlot, String>, scale: f32, assets: &mut Assets) -> Self {
        let mut acc = Self::default();
        for (slot, item) in ids {
            acc.equip(*slot, item, scale, assets);
        }
        acc
    }

    /// Worn items as `slot -> item` ids; empty slots are omitted.
    pub fn ids(&self) -> BTreeMap<AccessorySlot, String> {
        AccessorySlot::ALL
            .iter()
            .filter_map(|slot| Some((*slot, self.get(*slot).item_id()?.to_string())))
            .collect()
    }

    /// Draw positions for every worn item on a cat occupying `rect`.
    pub fn placements(&self, rect: &Rect, scale: f32) -> Vec<AccessoryPlacement<'_>> {
        AccessorySlot::ALL
            .iter()
            .filter_map(|slot| match self.get(*slot) {
                Equip::Empty => None,
                Equip::Item { id, sprite } => Some(AccessoryPlacement {
                    slot: *slot,
                    item: id,
                    sprite,
                    top_left: slot.anchor(rect, sprite.dimensions(), scale),
                }),
            })
            .collect()
    }
}
