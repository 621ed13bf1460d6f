use crate::constants::{RAINBOW_HUE_RATE, RAINBOW_LIGHTNESS, RAINBOW_SATURATION};
use crate::error::ConfigError;

/// Parse `#rrggbb` (leading `#` optional) into linear 0..1 RGB.
pub fn parse_hex(s: &str) -> Result<[f32; 3], ConfigError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }
    let mut rgb = [0.0f32; 3];
    for (i, c) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        *c = byte as f32 / 255.0;
    }
    Ok(rgb)
}

/// HSL to RGB with all channels in 0..1. Hue wraps.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Continuously advancing hue for rainbow mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct RainbowClock {
    turns: f32,
}

impl RainbowClock {
    pub fn advance(&mut self, dt: f32) {
        self.turns = (self.turns + dt * RAINBOW_HUE_RATE).rem_euclid(1.0);
    }

    pub fn hue(&self) -> f32 {
        self.turns
    }

    pub fn rgb(&self) -> [f32; 3] {
        hsl_to_rgb(self.turns, RAINBOW_SATURATION, RAINBOW_LIGHTNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert!(close(parse_hex("#ff0000").unwrap(), [1.0, 0.0, 0.0]));
        assert!(close(parse_hex("00ff80").unwrap(), [0.0, 1.0, 128.0 / 255.0]));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["#fff", "#gg0000", "", "#ff00001", "#ffé000"] {
            assert!(matches!(parse_hex(bad), Err(ConfigError::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
        assert!(close(hsl_to_rgb(0.3, 0.0, 0.25), [0.25, 0.25, 0.25]));
    }

    #[test]
    fn rainbow_clock_wraps() {
        let mut clock = RainbowClock::default();
        for _ in 0..300 {
            clock.advance(0.016);
            assert!((0.0..1.0).contains(&clock.hue()));
        }
        assert!((clock.hue() - (300.0 * 0.016 * RAINBOW_HUE_RATE) % 1.0).abs() < 1e-3);
    }
}
