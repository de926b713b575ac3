use leptos::*;

use crate::prefs::{self, Font};
use crate::theme::{self, MixMode, SCHEMES};

#[component]
pub fn Appearance() -> impl IntoView {
    let (scheme, set_scheme) = create_signal(
        theme::scheme_by_name(&prefs::load_scheme().unwrap_or_default())
            .name
            .to_owned(),
    );
    let (scale, set_scale) = create_signal(prefs::load_theme_scale());
    let (font, set_font) = create_signal(prefs::load_font());
    let (bold, set_bold) = create_signal(prefs::load_bold());

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
    // the appearance page interpolates in HSL space
    create_effect(move |_| {
        let scheme = theme::scheme_by_name(&scheme.get());
        let scale = scale.get();
        theme::apply_scale(scheme, scale, MixMode::Hsl);
        prefs::store_scheme(scheme.name);
        prefs::store_theme_scale(scale);
    });

    // resync if the user changed appearance in another tab
    let resync = move || {
        set_scale.set(prefs::load_theme_scale());
        set_font.set(prefs::load_font());
        set_bold.set(prefs::load_bold());
        if let Some(saved) = prefs::load_scheme() {
            set_scheme.set(theme::scheme_by_name(&saved).name.to_owned());
        }
    };
    let handle = window_event_listener(ev::focus, move |_| resync());
    on_cleanup(move || handle.remove());

    view! {
        <div class="putnam-container">
            <h1 class="putnam-title">"Appearance"</h1>
            <div class="putnam-problem appearance-grid">
                <div class="appearance-row">
                    <span class="pt-range-label">"Font"</span>
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
                </div>
                <label class="appearance-row">
                    <span class="pt-range-label">"Scheme"</span>
                    <select
                        class="putnam-select"
                        aria-label="Color scheme"
                        on:change=move |ev| set_scheme.set(event_target_value(&ev))
                    >
                        {move || {
                            SCHEMES
                                .iter()
                                .map(|s| {
                                    let selected = s.name == scheme.get();
                                    view! { <option value=s.name selected=selected>{s.name}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <div class="appearance-row">
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
                </div>
            </div>
        </div>
    }
}
