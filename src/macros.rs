//! User-defined `\newcommand` macros: parsing plus the process-wide cached
//! state the renderer consumes.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use leptos::*;
use regex::Regex;

use crate::store;

pub type MacroMap = BTreeMap<String, String>;

// One pattern per line; anything it does not match is ignored, matching the
// original editor's lenient contract. The body capture stops at the first
// closing brace.
fn newcommand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\\newcommand\{\\(\w+)\}\{([^}]*)\}").unwrap())
}

/// Extracts `name -> body` pairs from free-form macro text, one scan per line.
pub fn parse_newcommands(text: &str) -> MacroMap {
    let mut macros = MacroMap::new();
    for line in text.lines() {
        if let Some(captures) = newcommand_pattern().captures(line) {
            macros.insert(captures[1].to_owned(), captures[2].to_owned());
        }
    }
    macros
}

/// The cached macro state. Empty at startup, filled once the stored string
/// loads, refreshed exactly on successful save and emptied on clear or
/// validation failure. Injected through context so the renderer does not
/// reach for a global.
#[derive(Clone, Copy)]
pub struct MacroStore {
    raw: RwSignal<String>,
    parsed: RwSignal<MacroMap>,
}

impl MacroStore {
    pub fn init() -> Self {
        let state = Self {
            raw: create_rw_signal(String::new()),
            parsed: create_rw_signal(MacroMap::new()),
        };
        provide_context(state);

        let reload = move || {
            spawn_local(async move {
                let text = store::get_macro_string().await;
                state.refresh(text);
            });
        };
        reload();
        // pick up edits made in another tab
        let handle = window_event_listener(ev::focus, move |_| reload());
        on_cleanup(move || handle.remove());

        state
    }

    pub fn use_context() -> Self {
        expect_context::<Self>()
    }

    pub fn raw(&self) -> ReadSignal<String> {
        self.raw.read_only()
    }

    pub fn parsed(&self) -> ReadSignal<MacroMap> {
        self.parsed.read_only()
    }

    /// Replaces both the raw text and the parsed mapping.
    pub fn refresh(&self, raw: String) {
        self.parsed.set(parse_newcommands(&raw));
        self.raw.set(raw);
    }

    pub fn clear(&self) {
        self.refresh(String::new());
    }
}
