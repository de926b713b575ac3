//! Color schemes and applying them to the document root as CSS variables.

use wasm_bindgen::JsCast as _;

use crate::color;
use crate::prefs::{self, Font};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheme {
    pub name: &'static str,
    pub dark: Palette,
    pub light: Palette,
}

pub const SCHEMES: [Scheme; 5] = [
    Scheme {
        name: "Classic",
        dark: Palette {
            bg: "#111111",
            surface: "#181818",
            text: "#ffffff",
            accent: "#80bfff",
            border: "#333333",
        },
        light: Palette {
            bg: "#fafafa",
            surface: "#ffffff",
            text: "#111111",
            accent: "#0a84ff",
            border: "#e5e5e5",
        },
    },
    Scheme {
        name: "Midnight",
        dark: Palette {
            bg: "#0f1220",
            surface: "#171a2a",
            text: "#e7ecff",
            accent: "#7aa2ff",
            border: "#2a2f4a",
        },
        light: Palette {
            bg: "#edf1ff",
            surface: "#ffffff",
            text: "#0f1220",
            accent: "#3b6cff",
            border: "#d5dbff",
        },
    },
    Scheme {
        name: "Solarized",
        dark: Palette {
            bg: "#002b36",
            surface: "#073642",
            text: "#eee8d5",
            accent: "#b58900",
            border: "#0d3640",
        },
        light: Palette {
            bg: "#fdf6e3",
            surface: "#ffffff",
            text: "#073642",
            accent: "#268bd2",
            border: "#e6dfc8",
        },
    },
    Scheme {
        name: "Sepia",
        dark: Palette {
            bg: "#1c1812",
            surface: "#2a241b",
            text: "#f0e7db",
            accent: "#d4a657",
            border: "#3a3328",
        },
        light: Palette {
            bg: "#f7f2e7",
            surface: "#fffaf0",
            text: "#3b2f1a",
            accent: "#b8873a",
            border: "#e5dccb",
        },
    },
    Scheme {
        name: "Contrast",
        dark: Palette {
            bg: "#000000",
            surface: "#0e0e0e",
            text: "#ffffff",
            accent: "#00e5ff",
            border: "#444444",
        },
        light: Palette {
            bg: "#ffffff",
            surface: "#ffffff",
            text: "#000000",
            accent: "#0066ff",
            border: "#000000",
        },
    },
];

/// Unknown names fall back to the first scheme.
pub fn scheme_by_name(name: &str) -> &'static Scheme {
    SCHEMES.iter().find(|s| s.name == name).unwrap_or(&SCHEMES[0])
}

pub fn set_root_attr(name: &str, value: &str) {
    let Some(root) = leptos::document().document_element() else {
        return;
    };
    let _ = root.set_attribute(name, value);
}

pub fn set_root_var(name: &str, value: &str) {
    let Some(root) = leptos::document().document_element() else {
        return;
    };
    let Some(root) = root.dyn_ref::<web_sys::HtmlElement>() else {
        return;
    };
    let _ = root.style().set_property(name, value);
}

/// How a palette pair is interpolated: the nav-bar quick slider mixes RGB
/// channels linearly, the appearance page mixes in HSL with easing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixMode {
    Rgb,
    Hsl,
}

/// Writes the interpolated palette for `scale` (0..=100, dark to light) onto
/// the root element and keeps the coarse `data-theme` attribute in sync.
pub fn apply_scale(scheme: &Scheme, scale: u32, mode: MixMode) {
    let t = f64::from(scale.min(100)) / 100.0;
    let mix = match mode {
        MixMode::Rgb => color::mix,
        MixMode::Hsl => color::mix_hsl,
    };
    let (dark, light) = (&scheme.dark, &scheme.light);
    set_root_var("--pt-bg", &mix(dark.bg, light.bg, t));
    set_root_var("--pt-surface", &mix(dark.surface, light.surface, t));
    set_root_var("--pt-text", &mix(dark.text, light.text, t));
    set_root_var("--pt-accent", &mix(dark.accent, light.accent, t));
    set_root_var("--pt-border", &mix(dark.border, light.border, t));
    set_root_var("--pt-range-start", dark.bg);
    set_root_var("--pt-range-end", light.bg);
    let theme = if t >= 0.5 { "light" } else { "dark" };
    set_root_attr("data-theme", theme);
    prefs::store_theme(theme);
}

pub fn apply_font(font: Font) {
    set_root_attr("data-font", font.as_str());
}

pub fn apply_bold(bold: bool) {
    set_root_attr("data-bold", if bold { "true" } else { "false" });
}

/// Applies everything saved in local storage; used once at startup.
pub fn apply_saved() {
    apply_font(prefs::load_font());
    apply_bold(prefs::load_bold());
    let scheme = scheme_by_name(&prefs::load_scheme().unwrap_or_default());
    apply_scale(scheme, prefs::load_theme_scale(), MixMode::Hsl);
}
