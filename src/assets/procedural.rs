//! A complete, hand-painted template set generated in memory. The demo runs
//! on it when no asset directory is given, and tests use it as a fixture.

use image::{Rgba, RgbaImage};

use super::MemoryAssets;
use crate::render::layers::body_prefix;

pub const SPRITE_SIZE: u32 = 96;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LIGHT: Rgba<u8> = Rgba([235, 235, 235, 255]);
const SHADOW: Rgba<u8> = Rgba([170, 170, 170, 255]);
const INK: Rgba<u8> = Rgba([30, 30, 30, 255]);

fn canvas() -> RgbaImage {
    RgbaImage::from_pixel(SPRITE_SIZE, SPRITE_SIZE, CLEAR)
}

fn ellipse(img: &mut RgbaImage, cx: f32, cy: f32, rx: f32, ry: f32, px: Rgba<u8>) {
    for (x, y, p) in img.enumerate_pixels_mut() {
        let dx = (x as f32 + 0.5 - cx) / rx;
        let dy = (y as f32 + 0.5 - cy) / ry;
        if dx * dx + dy * dy <= 1.0 {
            *p = px;
        }
    }
}

fn ring(img: &mut RgbaImage, cx: f32, cy: f32, r: f32, width: f32, px: Rgba<u8>) {
    for (x, y, p) in img.enumerate_pixels_mut() {
        let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
        if d <= r && d >= r - width {
            *p = px;
        }
    }
}

fn bar(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, px: Rgba<u8>) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, px);
        }
    }
}

/// Triangle ear with its tip at (`tx`, `ty`) and base on row `by`.
fn ear(img: &mut RgbaImage, tx: f32, ty: f32, by: f32, half: f32, px: Rgba<u8>) {
    for (x, y, p) in img.enumerate_pixels_mut() {
        let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
        if fy < ty || fy > by {
            continue;
        }
        let t = (fy - ty) / (by - ty);
        if (fx - tx).abs() <= half * t {
            *p = px;
        }
    }
}

/// Sitting cat silhouette; `tail` shifts the tail tip for animation.
fn sitting_body(tail: f32, head_tilt: f32) -> RgbaImage {
    let mut img = canvas();
    ellipse(&mut img, 48.0, 64.0, 24.0, 22.0, LIGHT);
    ellipse(&mut img, 48.0 + head_tilt, 36.0, 18.0, 16.0, LIGHT);
    ear(&mut img, 36.0 + head_tilt, 14.0, 28.0, 7.0, LIGHT);
    ear(&mut img, 60.0 + head_tilt, 14.0, 28.0, 7.0, LIGHT);
    ellipse(&mut img, 74.0, 70.0 - tail, 6.0, 14.0, LIGHT);
    img
}

/// Curled-up sleeping silhouette; deliberately not aligned with the
/// sitting pose.
fn sleeping_body() -> RgbaImage {
    let mut img = canvas();
    ellipse(&mut img, 48.0, 70.0, 36.0, 16.0, LIGHT);
    ellipse(&mut img, 26.0, 64.0, 13.0, 11.0, LIGHT);
    ear(&mut img, 20.0, 48.0, 58.0, 5.0, LIGHT);
    ear(&mut img, 32.0, 48.0, 58.0, 5.0, LIGHT);
    img
}

fn shade_layer() -> RgbaImage {
    let mut img = canvas();
    ellipse(&mut img, 48.0, 76.0, 22.0, 10.0, SHADOW);
    img
}

fn stripes() -> RgbaImage {
    let mut img = canvas();
    for y in [50, 58, 66, 74] {
        bar(&mut img, 30, y, 36, 3, WHITE);
    }
    bar(&mut img, 46, 22, 4, 8, WHITE);
    img
}

fn eyes_fill() -> RgbaImage {
    let mut img = canvas();
    ellipse(&mut img, 41.0, 35.0, 4.0, 4.0, WHITE);
    ellipse(&mut img, 55.0, 35.0, 4.0, 4.0, WHITE);
    img
}

fn eyes_outline() -> RgbaImage {
    let mut img = canvas();
    ring(&mut img, 41.0, 35.0, 5.0, 1.5, INK);
    ring(&mut img, 55.0, 35.0, 5.0, 1.5, INK);
    ellipse(&mut img, 41.0, 35.0, 1.5, 2.5, INK);
    ellipse(&mut img, 55.0, 35.0, 1.5, 2.5, INK);
    img
}

fn eyes_closed() -> RgbaImage {
    let mut img = canvas();
    bar(&mut img, 37, 35, 9, 2, INK);
    bar(&mut img, 51, 35, 9, 2, INK);
    img
}

fn nose() -> RgbaImage {
    let mut img = canvas();
    ellipse(&mut img, 48.0, 42.0, 2.5, 2.0, WHITE);
    img
}

fn mouth_line() -> RgbaImage {
    let mut img = canvas();
    bar(&mut img, 47, 44, 2, 3, INK);
    bar(&mut img, 44, 47, 8, 1, INK);
    img
}

fn mouth_open() -> RgbaImage {
    let mut img = canvas();
    ellipse(&mut img, 48.0, 47.0, 4.0, 3.0, INK);
    img
}

fn hat() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(160, 120, CLEAR);
    ellipse(&mut img, 80.0, 100.0, 70.0, 14.0, Rgba([200, 40, 60, 255]));
    ear(&mut img, 80.0, 10.0, 96.0, 40.0, Rgba([200, 40, 60, 255]));
    img
}

fn collar() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(40, 12, CLEAR);
    bar(&mut img, 0, 3, 40, 6, Rgba([40, 90, 200, 255]));
    ellipse(&mut img, 20.0, 8.0, 4.0, 4.0, Rgba([240, 200, 40, 255]));
    img
}

fn bow() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(48, 24, CLEAR);
    ellipse(&mut img, 12.0, 12.0, 12.0, 9.0, Rgba([240, 120, 180, 255]));
    ellipse(&mut img, 36.0, 12.0, 12.0, 9.0, Rgba([240, 120, 180, 255]));
    ellipse(&mut img, 24.0, 12.0, 4.0, 4.0, Rgba([200, 60, 130, 255]));
    img
}

/// Fish-shaped food item.
pub fn food() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(48, 24, CLEAR);
    ellipse(&mut img, 20.0, 12.0, 16.0, 8.0, Rgba([250, 140, 80, 255]));
    ear(&mut img, 40.0, 4.0, 20.0, 8.0, Rgba([250, 140, 80, 255]));
    img
}

/// Every template layer for `body_type`, plus a few accessories and food.
pub fn cat_assets(body_type: &str) -> MemoryAssets {
    let mut mem = MemoryAssets::new();
    add_body(&mut mem, body_type);

    mem.insert("images/items/clothes/hats/hat1.png", hat());
    mem.insert("images/items/clothes/body/collar1.png", collar());
    mem.insert("images/items/clothes/accessories/bow1.png", bow());
    mem.insert("images/items/food/001.png", food());
    mem
}

/// Register one body type's templates into `mem`.
pub fn add_body(mem: &mut MemoryAssets, body_type: &str) {
    let prefix = body_prefix(body_type);

    for (i, tail) in [0.0, 4.0, 8.0, 12.0].iter().enumerate() {
        mem.insert(
            format!("{prefix}/base/idle/{:03}.png", i + 1),
            sitting_body(*tail, 0.0),
        );
    }
    for (i, tilt) in [0.0, -3.0, -5.0].iter().enumerate() {
        mem.insert(
            format!("{prefix}/base/pet/{:03}.png", i + 1),
            sitting_body(0.0, *tilt),
        );
    }
    for (i, tail) in [2.0, 6.0].iter().enumerate() {
        mem.insert(
            format!("{prefix}/base/eat/{:03}.png", i + 1),
            sitting_body(*tail, 2.0),
        );
    }
    mem.insert(format!("{prefix}/base/sleep/001.png"), sleeping_body());
    mem.insert(format!("{prefix}/base/shade.png"), shade_layer());
    mem.insert(format!("{prefix}/patterns/idle/01.png"), stripes());
    mem.insert(format!("{prefix}/eyes/idle/01_color.png"), eyes_fill());
    mem.insert(format!("{prefix}/eyes/idle/01.png"), eyes_outline());
    mem.insert(format!("{prefix}/eyes/idle/01_blink.png"), eyes_closed());
    mem.insert(format!("{prefix}/mouth/idle/01_color.png"), nose());
    mem.insert(format!("{prefix}/mouth/idle/01.png"), mouth_line());
    mem.insert(format!("{prefix}/mouth/eat/01.png"), mouth_open());
}
