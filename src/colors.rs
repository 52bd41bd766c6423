//! Packed ARGB color helpers.
//!
//! Colors are `0xAARRGGBB` words, the layout of both texture buffers and the
//! rendered image.

/// Fully transparent black; the color of pixels nothing was drawn on.
pub const TRANSPARENT: u32 = 0x0000_0000;

#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[inline]
pub fn unpack_argb(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

#[inline]
pub fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// Scales the RGB channels by a light intensity, keeping alpha.
#[inline]
pub fn modulate(color: u32, intensity: f32) -> u32 {
    let (a, r, g, b) = unpack_argb(color);
    let scale = |c: u8| (c as f32 * intensity).clamp(0.0, 255.0) as u8;
    pack_argb(a, scale(r), scale(g), scale(b))
}

/// Composites `src` over `dst` using the source alpha.
///
/// `out = src * a + dst * (1 - a)` per color channel; the output alpha
/// accumulates as `a * 255 + (1 - a) * dst_alpha`; channels are rounded to
/// the nearest integer. Opaque sources replace
/// the destination outright.
#[inline]
pub fn blend(src: u32, dst: u32) -> u32 {
    let (sa, sr, sg, sb) = unpack_argb(src);
    if sa == u8::MAX {
        return src;
    }
    let (da, dr, dg, db) = unpack_argb(dst);
    let alpha = sa as f32 / 255.0;
    let inv = 1.0 - alpha;
    let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * inv).round() as u8;
    pack_argb(
        (alpha * 255.0 + inv * da as f32).round() as u8,
        mix(sr, dr),
        mix(sg, dg),
        mix(sb, db),
    )
}

/// Lights a texel and composites it over what is already in the image.
#[inline]
pub fn shade(texel: u32, intensity: f32, dst: u32) -> u32 {
    blend(modulate(texel, intensity), dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_round_trips() {
        let c = pack_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, 0x1234_5678);
        assert_eq!(unpack_argb(c), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn modulate_keeps_alpha_and_clamps() {
        assert_eq!(modulate(0x80FF_8040, 0.5), 0x807F_4020);
        assert_eq!(modulate(0xFF20_2020, 100.0), 0xFFFF_FFFF);
        assert_eq!(modulate(0xFF20_2020, -1.0), 0xFF00_0000);
    }

    #[test]
    fn opaque_source_replaces_destination() {
        assert_eq!(blend(0xFF11_2233, 0xFFAA_BBCC), 0xFF11_2233);
    }

    #[test]
    fn half_alpha_mixes_channels() {
        let out = blend(0x80FF_0000, 0xFF00_00FF);
        let (a, r, g, b) = unpack_argb(out);
        assert_eq!(a, 255);
        assert_eq!(r, 128);
        assert_eq!(g, 0);
        assert_eq!(b, 127);
    }

    #[test]
    fn zero_alpha_leaves_destination() {
        assert_eq!(blend(0x00FF_FFFF, 0xFF12_3456), 0xFF12_3456);
    }
}
