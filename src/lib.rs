mod app;
pub use app::App;

pub mod color;

mod components;

pub mod macros;

pub mod mathjax;

pub mod prefs;

pub mod problems;

pub mod selection;

pub mod store;

pub mod theme;
