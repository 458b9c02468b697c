use glam::{IVec2, Vec2};
use image::RgbaImage;

/// Alpha above this counts as solid for hit testing.
const ALPHA_THRESHOLD: u8 = 127;

/// Integer screen-space rectangle (top-left + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size whose center lands on `center`.
    pub fn centered(center: Vec2, w: u32, h: u32) -> Self {
        Self {
            x: (center.x - w as f32 / 2.0).round() as i32,
            y: (center.y - h as f32 / 2.0).round() as i32,
            w,
            h,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w as i32 / 2, self.y + self.h as i32 / 2)
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x as f32
            && p.y >= self.y as f32
            && p.x < self.right() as f32
            && p.y < self.bottom() as f32
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Per-pixel opacity bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_image(img: &RgbaImage) -> Self {
        let bits = img.pixels().map(|p| p[3] > ALPHA_THRESHOLD).collect();
        Self {
            width: img.width(),
            height: img.height(),
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-bounds reads are transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Does `other`, placed at `offset` relative to this mask's origin,
    /// share any solid pixel with this one?
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

/// Bounding rectangle plus pixel mask: two-stage hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub rect: Rect,
    pub mask: Mask,
}

impl HitRegion {
    /// Region for `img` drawn centered on `center`.
    pub fn centered(img: &RgbaImage, center: Vec2) -> Self {
        Self {
            rect: Rect::centered(center, img.width(), img.height()),
            mask: Mask::from_image(img),
        }
    }

    /// Region for `img` drawn with its top-left corner at `top_left`.
    pub fn at(img: &RgbaImage, top_left: IVec2) -> Self {
        Self {
            rect: Rect::new(top_left.x, top_left.y, img.width(), img.height()),
            mask: Mask::from_image(img),
        }
    }

    /// Move without regenerating the mask.
    pub fn recenter(&mut self, center: Vec2) {
        self.rect = Rect::centered(center, self.rect.w, self.rect.h);
    }

    /// Pixel-perfect point test; the rectangle alone is only a pre-filter.
    pub fn contains(&self, p: Vec2) -> bool {
        if !self.rect.contains(p) {
            return false;
        }
        let local = p.floor().as_ivec2() - self.rect.top_left();
        self.mask.get(local.x, local.y)
    }

    pub fn collides(&self, other: &HitRegion) -> bool {
        if !self.rect.intersects(&other.rect) {
            return false;
        }
        let offset = other.rect.top_left() - self.rect.top_left();
        self.mask.overlaps(&other.mask, offset)
    }
}
