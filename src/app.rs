use leptos::*;
use leptos_router::*;

use crate::{
    components::{Appearance, Browser, History, MacrosEditor, NavBar},
    macros::MacroStore,
    problems::{self, ProblemsResource},
    theme,
};

// local storage usage (non-normative)
// "pt-font" => "serif" | "sans"
// "pt-bold" => "true" | "false"
// "pt-theme" => "dark" | "light" (coarse, derived from the scale)
// "pt-theme-scale" => "0".."100"
// "pt-scheme" => scheme name
// "pt-selected" => {"year":..,"problemId":..} (last selection)
// per-problem records and the macro string live in IndexedDB, not here

#[component]
pub fn App() -> impl IntoView {
    document().set_title("Putnam Trainer");
    theme::apply_saved();

    let macros = MacroStore::init();

    let problems: ProblemsResource =
        create_local_resource(|| (), |()| problems::fetch_problem_set());
    provide_context(problems);

    // hidden preamble: typesetting the raw macro text teaches the engine the
    // user's definitions before any visible math uses them
    let preamble = move || format!("\\({}\\)", macros.raw().get());

    view! {
        <Router>
            <NavBar />
            <main>
                <div class="pt-preamble" aria-hidden="true">{preamble}</div>
                <Routes>
                    <Route path="/" view=Browser />
                    <Route path="/history" view=History />
                    <Route path="/macros" view=MacrosEditor />
                    <Route path="/visual" view=Appearance />
                </Routes>
            </main>
        </Router>
    }
}
