use leptos::*;
use leptos_router::A;

use crate::prefs::{self, Font};
use crate::theme::{self, MixMode};

#[component]
pub fn NavBar() -> impl IntoView {
    let (font, set_font) = create_signal(prefs::load_font());
    let (bold, set_bold) = create_signal(prefs::load_bold());
    let (scale, set_scale) = create_signal(prefs::load_theme_scale());

    create_effect(move |_| {
        let font = font.get();
        theme::apply_font(font);
        prefs::store_font(font);
    });
    create_effect(move |_| {
        let bold = bold.get();
        theme::apply_bold(bold);
        prefs::store_bold(bold);
    });
    // quick slider: linear RGB mix of the saved scheme
    create_effect(move |_| {
        let scale = scale.get();
        let scheme = theme::scheme_by_name(&prefs::load_scheme().unwrap_or_default());
        theme::apply_scale(scheme, scale, MixMode::Rgb);
        prefs::store_theme_scale(scale);
    });

    view! {
        <nav class="pt-navbar">
            <div class="pt-navbar-inner">
                <A href="/" class="pt-brand">"Putnam Trainer"</A>
                <div class="pt-controls">
                    <ul class="pt-links">
                        <li><A href="/history">"History"</A></li>
                        <li><A href="/visual">"Appearance"</A></li>
                    </ul>
                    <div class="pt-group" role="group" aria-label="Font family">
                        <button
                            class="pt-btn"
                            class:active=move || font.get() == Font::Serif
                            on:click=move |_| set_font.set(Font::Serif)
                        >
                            "Serif"
                        </button>
                        <button
                            class="pt-btn"
                            class:active=move || font.get() == Font::Sans
                            on:click=move |_| set_font.set(Font::Sans)
                        >
                            "Sans"
                        </button>
                    </div>
                    <label class="pt-checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || bold.get()
                            on:input=move |ev| set_bold.set(event_target_checked(&ev))
                        />
                        <span>"Bold"</span>
                    </label>
                    <span class="pt-range-label">"Dark"</span>
                    <input
                        class="pt-range"
                        type="range"
                        min="0"
                        max="100"
                        step="1"
                        prop:value=move || scale.get().to_string()
                        on:input=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<u32>() {
                                set_scale.set(v.min(100));
                            }
                        }
                        aria-label="Theme (Dark to Light)"
                    />
                    <span class="pt-range-label">"Light"</span>
                    <A href="/macros" class="putnam-button">"Edit LaTeX Macros"</A>
                </div>
            </div>
        </nav>
    }
}
