pub mod nav_bar;
pub use nav_bar::NavBar;

pub mod browser;
pub use browser::Browser;

pub mod notes;
pub use notes::NotesEditor;

pub mod history;
pub use history::History;

pub mod macros_editor;
pub use macros_editor::MacrosEditor;

pub mod appearance;
pub use appearance::Appearance;
