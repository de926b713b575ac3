use leptos::*;

use crate::macros::MacroStore;
use crate::mathjax;
use crate::store;

#[component]
pub fn MacrosEditor() -> impl IntoView {
    let macros = MacroStore::use_context();

    let (text, set_text) = create_signal(macros.raw().get_untracked());
    let (status, set_status) = create_signal(String::new());
    let (dirty, set_dirty) = create_signal(false);

    // follow the stored string (it loads asynchronously) until the user has
    // typed something of their own
    create_effect(move |_| {
        let saved = macros.raw().get();
        if !dirty.get_untracked() {
            set_text.set(saved);
        }
    });

    let preview = create_memo(move |_| format!("\\({}\\)", text.get()));
    create_effect(move |_| {
        preview.track();
        mathjax::typeset();
    });

    let on_save = move |_| {
        spawn_local(async move {
            let current = text.get_untracked();
            set_dirty.set(false);
            if current.trim().is_empty() {
                store::save_macro_string("").await;
                macros.clear();
                set_status.set("Macros cleared.".to_owned());
                return;
            }
            if mathjax::validate_tex(&current).await {
                store::save_macro_string(&current).await;
                macros.refresh(current);
                set_status.set("Macros saved!".to_owned());
            } else {
                // invalid TeX is discarded wholesale, with a visible warning
                store::save_macro_string("").await;
                macros.clear();
                set_text.set(String::new());
                set_status.set("Invalid TeX. Macros cleared.".to_owned());
            }
        });
    };

    view! {
        <div class="putnam-container narrow">
            <h2 class="putnam-title">"Edit LaTeX Macros (MathJax)"</h2>
            <p class="macros-help">
                "Enter your custom LaTeX macros/preamble below. These are used in all math \
                 rendering. If your TeX is invalid, the macros will be cleared and a warning shown."
            </p>
            <textarea
                class="notes-input macros-input"
                rows=4
                placeholder="e.g. \\newcommand{\\R}{\\mathbb{R}}"
                prop:value=move || text.get()
                on:input=move |ev| {
                    set_dirty.set(true);
                    set_text.set(event_target_value(&ev));
                }
            ></textarea>
            <button class="putnam-button" on:click=on_save>"Save Macros"</button>
            <div class="macros-status">{status}</div>
            <div class="notes-preview">{move || preview.get()}</div>
        </div>
    }
}
