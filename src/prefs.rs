//! Browser-local preferences. Every load is defensive: anything missing,
//! unparseable or out of range falls back to its default.

use serde::{Deserialize, Serialize};
use web_sys::Storage;

const THEME_KEY: &str = "pt-theme";
const FONT_KEY: &str = "pt-font";
const BOLD_KEY: &str = "pt-bold";
const SCHEME_KEY: &str = "pt-scheme";
const THEME_SCALE_KEY: &str = "pt-theme-scale";
const SELECTED_KEY: &str = "pt-selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Serif,
    Sans,
}

impl Font {
    pub fn as_str(self) -> &'static str {
        match self {
            Font::Serif => "serif",
            Font::Sans => "sans",
        }
    }

    pub fn parse(value: &str) -> Option<Font> {
        match value {
            "serif" => Some(Font::Serif),
            "sans" => Some(Font::Sans),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SavedSelection {
    year: Option<String>,
    #[serde(rename = "problemId")]
    problem_id: Option<String>,
}

fn storage() -> Option<Storage> {
    leptos::window().local_storage().ok().flatten()
}

fn get(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

fn set(key: &str, value: &str) {
    let Some(storage) = storage() else { return };
    let _ = storage.set_item(key, value);
}

pub fn load_font() -> Font {
    get(FONT_KEY).as_deref().and_then(Font::parse).unwrap_or_default()
}

pub fn store_font(font: Font) {
    set(FONT_KEY, font.as_str());
}

pub fn load_bold() -> bool {
    matches!(get(BOLD_KEY).as_deref(), Some("true"))
}

pub fn store_bold(bold: bool) {
    set(BOLD_KEY, if bold { "true" } else { "false" });
}

/// 0..=100, defaulting to fully dark.
pub fn load_theme_scale() -> u32 {
    get(THEME_SCALE_KEY)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n.clamp(0.0, 100.0) as u32)
        .unwrap_or(0)
}

pub fn store_theme_scale(scale: u32) {
    set(THEME_SCALE_KEY, &scale.min(100).to_string());
}

pub fn load_scheme() -> Option<String> {
    get(SCHEME_KEY)
}

pub fn store_scheme(name: &str) {
    set(SCHEME_KEY, name);
}

/// Coarse light/dark attribute, kept alongside the scale for compatibility.
pub fn store_theme(theme: &str) {
    set(THEME_KEY, theme);
}

pub fn load_selection() -> Option<(String, String)> {
    let raw = get(SELECTED_KEY)?;
    let saved: SavedSelection = serde_json::from_str(&raw).ok()?;
    Some((saved.year?, saved.problem_id.unwrap_or_default()))
}

pub fn store_selection(year: &str, problem_id: &str) {
    let saved = SavedSelection {
        year: Some(year.to_owned()),
        problem_id: Some(problem_id.to_owned()),
    };
    if let Ok(json) = serde_json::to_string(&saved) {
        set(SELECTED_KEY, &json);
    }
}
