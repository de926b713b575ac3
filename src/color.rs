//! Palette interpolation for the theme-scale slider.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// degrees, [0, 360)
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Parses a 6-digit hex color, with or without a leading `#`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let h = hex.strip_prefix('#').unwrap_or(hex);
    if h.len() != 6 {
        return None;
    }
    let n = u32::from_str_radix(h, 16).ok()?;
    Some(Rgb {
        r: ((n >> 16) & 255) as f64,
        g: ((n >> 8) & 255) as f64,
        b: (n & 255) as f64,
    })
}

pub fn rgb_to_hex(c: Rgb) -> String {
    let ch = |v: f64| (v.round() as i64).clamp(0, 255) as u8;
    format!("#{:02x}{:02x}{:02x}", ch(c.r), ch(c.g), ch(c.b))
}

pub fn rgb_to_hsl(c: Rgb) -> Hsl {
    let (r, g, b) = (c.r / 255.0, c.g / 255.0, c.b / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Hsl { h: h * 60.0, s, l }
}

pub fn hsl_to_rgb(c: Hsl) -> Rgb {
    let chroma = (1.0 - (2.0 * c.l - 1.0).abs()) * c.s;
    let hp = c.h.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp {
        v if v < 1.0 => (chroma, x, 0.0),
        v if v < 2.0 => (x, chroma, 0.0),
        v if v < 3.0 => (0.0, chroma, x),
        v if v < 4.0 => (0.0, x, chroma),
        v if v < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = c.l - chroma / 2.0;
    Rgb {
        r: (r + m) * 255.0,
        g: (g + m) * 255.0,
        b: (b + m) * 255.0,
    }
}

/// Shortest-path hue interpolation; the wrap goes through 0°, never the long
/// way around.
pub fn lerp_hue(a: f64, b: f64, t: f64) -> f64 {
    let delta = (b - a + 540.0).rem_euclid(360.0) - 180.0;
    (a + delta * t).rem_euclid(360.0)
}

pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

const BLACK: Rgb = Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

/// Linear per-channel RGB interpolation between two hex colors. Unparseable
/// input degrades to black.
pub fn mix(hex_a: &str, hex_b: &str, t: f64) -> String {
    let a = hex_to_rgb(hex_a).unwrap_or(BLACK);
    let b = hex_to_rgb(hex_b).unwrap_or(BLACK);
    let t = t.clamp(0.0, 1.0);
    rgb_to_hex(Rgb {
        r: a.r + (b.r - a.r) * t,
        g: a.g + (b.g - a.g) * t,
        b: a.b + (b.b - a.b) * t,
    })
}

/// HSL-space interpolation with smoothstep easing, used by the appearance
/// page for gentler mid-scale colors.
pub fn mix_hsl(hex_a: &str, hex_b: &str, t: f64) -> String {
    let a = rgb_to_hsl(hex_to_rgb(hex_a).unwrap_or(BLACK));
    let b = rgb_to_hsl(hex_to_rgb(hex_b).unwrap_or(BLACK));
    let tt = smoothstep(t.clamp(0.0, 1.0));
    let mixed = Hsl {
        h: lerp_hue(a.h, b.h, tt),
        s: a.s + (b.s - a.s) * tt,
        l: a.l + (b.l - a.l) * tt,
    };
    rgb_to_hex(hsl_to_rgb(mixed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#80bfff", "#0a84ff", "#1c1812", "#b58900"] {
            let rgb = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb_to_hex(rgb), hex);
        }
    }

    #[test]
    fn hex_accepts_bare_digits() {
        assert_eq!(hex_to_rgb("112233"), hex_to_rgb("#112233"));
    }

    #[test]
    fn hex_rejects_junk() {
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn hsl_round_trip() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#123456", "#fafafa"] {
            let rgb = hex_to_rgb(hex).unwrap();
            let back = hsl_to_rgb(rgb_to_hsl(rgb));
            assert_eq!(rgb_to_hex(back), hex);
        }
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix("#111111", "#fafafa", 0.0), "#111111");
        assert_eq!(mix("#111111", "#fafafa", 1.0), "#fafafa");
        assert_eq!(mix_hsl("#002b36", "#fdf6e3", 0.0), "#002b36");
        assert_eq!(mix_hsl("#002b36", "#fdf6e3", 1.0), "#fdf6e3");
    }

    #[test]
    fn mix_clamps_t() {
        assert_eq!(mix("#111111", "#fafafa", -3.0), "#111111");
        assert_eq!(mix("#111111", "#fafafa", 7.5), "#fafafa");
    }

    #[test]
    fn mix_midpoint_is_average() {
        assert_eq!(mix("#000000", "#0000fe", 0.5), "#00007f");
    }

    #[test]
    fn hue_wraps_through_zero() {
        // 350° -> 10° is 20° through north, not 340° the long way.
        assert_eq!(lerp_hue(350.0, 10.0, 0.5), 0.0);
        assert_eq!(lerp_hue(10.0, 350.0, 0.5), 0.0);
        assert_eq!(lerp_hue(350.0, 10.0, 0.25), 355.0);
    }

    #[test]
    fn hue_path_never_exceeds_half_turn() {
        for (a, b) in [(0.0, 180.0), (90.0, 300.0), (359.0, 1.0), (20.0, 340.0)] {
            let mid = lerp_hue(a, b, 0.5);
            let step = ((mid - a + 540.0).rem_euclid(360.0) - 180.0).abs();
            assert!(step <= 90.0 + 1e-9, "hue {a} -> {b} stepped {step}");
        }
    }

    #[test]
    fn smoothstep_fixes_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn mix_invalid_hex_degrades_to_black() {
        assert_eq!(mix("nonsense", "also bad", 0.0), "#000000");
    }
}
