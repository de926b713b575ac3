use leptos::*;

use crate::mathjax;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escaped, with newlines kept readable; the typesetter still finds `$..$`
/// inside the markup.
fn preview_markup(notes: &str) -> String {
    escape_html(notes).replace('\n', "<br/>")
}

#[component]
pub fn NotesEditor(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(default = "Notes")] label: &'static str,
) -> impl IntoView {
    let markup = create_memo(move |_| preview_markup(&value.get()));

    // typeset only after the preview markup has been swapped in
    create_effect(move |_| {
        markup.track();
        mathjax::typeset();
    });

    view! {
        <div class="notes-editor">
            <label class="notes-label">{label}</label>
            <textarea
                class="notes-input"
                rows=6
                placeholder="Write your thoughts, partial solutions, or links..."
                prop:value=move || value.get()
                on:input=move |ev| on_change.call(event_target_value(&ev))
            ></textarea>
            <div class="notes-preview" inner_html=move || markup.get()></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn newlines_become_breaks_after_escaping() {
        assert_eq!(preview_markup("x<y\nz"), "x&lt;y<br/>z");
    }

    #[test]
    fn dollar_spans_survive_untouched() {
        assert_eq!(preview_markup("$x^2$"), "$x^2$");
    }
}
