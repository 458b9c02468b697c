use std::sync::Arc;

use glam::{IVec2, Vec2};
use image::RgbaImage;

use crate::spatial::HitRegion;

/// A sprite the user can pick up and drop, such as the food bowl. Dragging it
/// onto a cat is how feeding and food hover are detected.
#[derive(Debug, Clone)]
pub struct DraggableItem {
    image: Arc<RgbaImage>,
    hit: HitRegion,
    home: IVec2,
    grab_offset: Option<Vec2>,
    visible: bool,
}

impl DraggableItem {
    /// Place `image` with its top-left at `home`.
    pub fn new(image: Arc<RgbaImage>, home: IVec2) -> Self {
        let hit = HitRegion::at(&image, home);
        Self {
            image,
            hit,
            home,
            grab_offset: None,
            visible: true,
        }
    }

    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    pub fn hit_region(&self) -> &HitRegion {
        &self.hit
    }

    pub fn top_left(&self) -> IVec2 {
        self.hit.rect.top_left()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pick the item up if `pos` is on one of its opaque pixels.
    pub fn start_drag(&mut self, pos: Vec2) -> bool {
        if !self.visible || !self.hit.contains(pos) {
            return false;
        }
        self.grab_offset = Some(pos - self.hit.rect.top_left().as_vec2());
        true
    }

    /// Follow the pointer, keeping the grab point under it.
    pub fn drag_to(&mut self, pos: Vec2) {
        if let Some(offset) = self.grab_offset {
            let tl = (pos - offset).round().as_ivec2();
            self.hit.rect.x = tl.x;
            self.hit.rect.y = tl.y;
        }
    }

    pub fn stop_drag(&mut self) {
        self.grab_offset = None;
    }

    /// Snap back to where the item started.
    pub fn reset_position(&mut self) {
        self.grab_offset = None;
        self.hit.rect.x = self.home.x;
        self.hit.rect.y = self.home.y;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.grab_offset = None;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Pixel-level overlap with another sprite. Hidden items touch nothing.
    pub fn overlaps(&self, other: &HitRegion) -> bool {
        self.visible && self.hit.collides(other)
    }
}
