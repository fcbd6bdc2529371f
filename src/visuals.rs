//! Visual attributes and the descriptor handed to renderers.
//!
//! The engine never draws anything. Each live particle is exported as a
//! [`Drawable`]: a plain `#[repr(C)]` record that can be copied straight
//! into a vertex buffer with `bytemuck::cast_slice`.
//!
//! ```ignore
//! let drawables: Vec<Drawable> = sim.drawables();
//! queue.write_buffer(&instances, 0, bytemuck::cast_slice(&drawables));
//! ```

use glam::{DVec2, Vec4};
use serde::{Deserialize, Serialize};

/// Shape a renderer should use for a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ParticleShape {
    /// Filled square (debris, sparks).
    #[default]
    Square = 0,

    /// 5-pointed star, see [`star_outline`].
    Star = 1,

    /// Small fixed-size marker (emitter origins).
    Marker = 2,
}

/// Brightness range used by twinkling particles.
pub const TWINKLE_BRIGHTNESS: (u8, u8) = (63, 255);

/// Opaque white.
pub const WHITE: Vec4 = Vec4::ONE;

/// Colours firework sparks are drawn from, as `#rrggbbaa`.
pub const FIREWORK_PALETTE: [&str; 24] = [
    "#8e946eff", "#795e55ff", "#d8a57aff", "#b4d1d5ff",
    "#008fadff", "#354894ff", "#f5c4caff", "#df4f66ff",
    "#a04a6dff", "#db487eff", "#b35d68ff", "#dec8ecff",
    "#725782ff", "#cf734aff", "#fe8453ff", "#cf734aff",
    "#635c56ff", "#ae956cff", "#555a5dff", "#b5b6baff",
    "#ffe89eff", "#7ad3b7ff", "#79a1a9ff", "#f28e7fff",
];

/// Parse `#rrggbb` or `#rrggbbaa` into RGBA in `[0, 1]`.
pub fn color_from_hex(hex: &str) -> Option<Vec4> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 && digits.len() != 8 {
        return None;
    }

    let channel = |i: usize| -> Option<f32> {
        let byte = u8::from_str_radix(digits.get(i..i + 2)?, 16).ok()?;
        Some(byte as f32 / 255.0)
    };

    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some(Vec4::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// The firework palette, parsed.
pub fn firework_colors() -> Vec<Vec4> {
    FIREWORK_PALETTE
        .iter()
        .filter_map(|hex| color_from_hex(hex))
        .collect()
}

/// Outline of a star polygon with `points` tips inside a `size` square.
///
/// Vertices alternate between tips (on the outer circle) and notches
/// pulled in by `point_length` (0 = regular polygon, 1 = all spike).
/// Coordinates are relative to the square's top-left corner.
pub fn star_outline(points: u32, size: f64, point_length: f64) -> Vec<DVec2> {
    let radius = size / 2.0;
    let steps = points * 2;

    (0..steps)
        .map(|n| {
            let theta = std::f64::consts::TAU * n as f64 / steps as f64;
            let r = if n % 2 == 0 {
                radius
            } else {
                radius * (1.0 - point_length)
            };
            DVec2::new(theta.sin() * r + radius, theta.cos() * r + radius)
        })
        .collect()
}

/// Per-particle record consumed by renderers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Drawable {
    /// Centre in screen coordinates.
    pub position: [f32; 2],
    /// Side length of the particle's square, in pixels.
    pub size: f32,
    /// Brightness multiplier in `[0, 1]`.
    pub brightness: f32,
    /// RGBA colour.
    pub color: [f32; 4],
    /// [`ParticleShape`] discriminant.
    pub shape: u32,
    /// Bumped whenever the integer size changes; renderers may cache the
    /// rasterised sprite until it moves.
    pub revision: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = color_from_hex("#ff000080").unwrap();
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 0.0);
        assert!((c.w - 128.0 / 255.0).abs() < 1e-6);

        let opaque = color_from_hex("00ff00").unwrap();
        assert_eq!(opaque.w, 1.0);

        assert!(color_from_hex("#12345").is_none());
        assert!(color_from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn test_firework_palette_parses() {
        assert_eq!(firework_colors().len(), FIREWORK_PALETTE.len());
    }

    #[test]
    fn test_star_outline() {
        let outline = star_outline(5, 10.0, 0.5);
        assert_eq!(outline.len(), 10);

        let centre = DVec2::splat(5.0);
        assert!((outline[0].distance(centre) - 5.0).abs() < 1e-9);
        assert!((outline[1].distance(centre) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_drawable_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Drawable>(), 40);
        let d: Drawable = bytemuck::Zeroable::zeroed();
        assert_eq!(bytemuck::bytes_of(&d).len(), 40);
    }
}
