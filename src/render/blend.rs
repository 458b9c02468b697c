//! Pixel operations used by the compositor. All of them are pure functions
//! of their inputs so composites are reproducible bit for bit.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::customization::Rgb;

#[inline]
fn mul8(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Multiply a grayscale template by a solid colour. The template's alpha is
/// kept, so the colour only lands where the template is painted.
pub fn tint(template: &RgbaImage, color: Rgb) -> RgbaImage {
    let mut out = template.clone();
    for p in out.pixels_mut() {
        p[0] = mul8(p[0], color[0]);
        p[1] = mul8(p[1], color[1]);
        p[2] = mul8(p[2], color[2]);
    }
    out
}

/// Source-over composite of `layer` onto `canvas`, both anchored at the top
/// left. Pixels of `layer` outside the canvas are dropped.
pub fn over(canvas: &mut RgbaImage, layer: &RgbaImage) {
    let w = canvas.width().min(layer.width());
    let h = canvas.height().min(layer.height());
    for y in 0..h {
        for x in 0..w {
            let src = *layer.get_pixel(x, y);
            if src[3] == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(x, y);
            *dst = blend_pixel(*dst, src);
        }
    }
}

fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 {
        return src;
    }
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

/// Darken `canvas` by the shade template's colour. The shade is first
/// flattened over white, so its transparent parts leave the canvas alone.
/// Canvas alpha is untouched.
pub fn shade(canvas: &mut RgbaImage, shade: &RgbaImage) {
    let w = canvas.width().min(shade.width());
    let h = canvas.height().min(shade.height());
    for y in 0..h {
        for x in 0..w {
            let s = shade.get_pixel(x, y);
            let a = s[3] as u32;
            let dst = canvas.get_pixel_mut(x, y);
            for c in 0..3 {
                let flat = ((s[c] as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
                dst[c] = mul8(dst[c], flat);
            }
        }
    }
}

/// Uniform rescale; sizes never collapse below one pixel.
pub fn scale(img: &RgbaImage, factor: f32) -> RgbaImage {
    let w = ((img.width() as f32 * factor) as u32).max(1);
    let h = ((img.height() as f32 * factor) as u32).max(1);
    imageops::resize(img, w, h, FilterType::Triangle)
}
