//! Splitting text into math segments and handing them to the script-loaded
//! MathJax engine. The engine is optional: before its script is up, or if it
//! never loads, everything renders as plain text.

use std::sync::OnceLock;

use leptos::*;
use regex::Regex;
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys;

use crate::macros::MacroStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Inline(String),
    Display(String),
}

fn display_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\$(.+?)\$\$").unwrap())
}

fn inline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(.+?)\$").unwrap())
}

/// Splits a blob into text, `$..$` and `$$..$$` segments, preserving order.
/// Display spans are carved out first; only the text after the last display
/// span is scanned for inline spans.
pub fn split_math(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for caps in display_pattern().captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > cursor {
            segments.push(Segment::Text(text[cursor..whole.start()].to_owned()));
        }
        segments.push(Segment::Display(caps[1].to_owned()));
        cursor = whole.end();
    }
    let tail = &text[cursor..];
    let mut cursor = 0;
    for caps in inline_pattern().captures_iter(tail) {
        let whole = caps.get(0).unwrap();
        if whole.start() > cursor {
            segments.push(Segment::Text(tail[cursor..whole.start()].to_owned()));
        }
        segments.push(Segment::Inline(caps[1].to_owned()));
        cursor = whole.end();
    }
    if cursor < tail.len() {
        segments.push(Segment::Text(tail[cursor..].to_owned()));
    }
    segments
}

fn typeset_entry() -> Option<(JsValue, js_sys::Function)> {
    let window = leptos::window();
    let mathjax = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("MathJax")).ok()?;
    if mathjax.is_undefined() || mathjax.is_null() {
        return None;
    }
    let entry = js_sys::Reflect::get(&mathjax, &JsValue::from_str("typesetPromise")).ok()?;
    let entry = entry.dyn_into::<js_sys::Function>().ok()?;
    Some((mathjax, entry))
}

/// Has the external script signalled readiness yet?
pub fn is_ready() -> bool {
    typeset_entry().is_some()
}

/// Asks the engine to typeset the document. A missing engine is fine; a
/// present engine that throws is an error the caller may care about.
pub async fn typeset_now() -> Result<(), JsValue> {
    let Some((mathjax, entry)) = typeset_entry() else {
        return Ok(());
    };
    let promise: js_sys::Promise = entry.call0(&mathjax)?.dyn_into()?;
    JsFuture::from(promise).await.map(|_| ())
}

/// Fire-and-forget typeset for effects that do not care about the outcome.
pub fn typeset() {
    spawn_local(async {
        let _ = typeset_now().await;
    });
}

/// Checks a TeX snippet by actually rendering it in a hidden element.
pub async fn validate_tex(tex: &str) -> bool {
    if tex.trim().is_empty() || !is_ready() {
        return true;
    }
    let document = leptos::document();
    let Some(body) = document.body() else {
        return false;
    };
    let Ok(probe) = document.create_element("div") else {
        return false;
    };
    let _ = probe.set_attribute("style", "display: none");
    probe.set_inner_html(&format!("\\({tex}\\)"));
    if body.append_child(&probe).is_err() {
        return false;
    }
    let ok = typeset_now().await.is_ok();
    let _ = body.remove_child(&probe);
    ok
}

#[component]
pub fn MathText(#[prop(into)] text: Signal<String>) -> impl IntoView {
    let macros = MacroStore::use_context();

    // re-typeset whenever the content or the macro set changes
    create_effect(move |_| {
        text.track();
        macros.parsed().track();
        typeset();
    });

    move || {
        if !is_ready() {
            return view! { <span>{text.get()}</span> }.into_view();
        }
        split_math(&text.get())
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(s) => view! { <span>{s}</span> }.into_view(),
                Segment::Inline(s) => {
                    view! { <span class="math-inline">{format!("${s}$")}</span> }.into_view()
                }
                Segment::Display(s) => {
                    view! { <div class="math-display">{format!("$${s}$$")}</div> }.into_view()
                }
            })
            .collect_view()
            .into_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Segment::*;

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(
            split_math("no math here"),
            vec![Text("no math here".into())]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(split_math(""), Vec::new());
    }

    #[test]
    fn inline_span_in_context() {
        assert_eq!(
            split_math("let $x^2$ vary"),
            vec![Text("let ".into()), Inline("x^2".into()), Text(" vary".into())]
        );
    }

    #[test]
    fn display_span_in_context() {
        assert_eq!(
            split_math("so $$\\int_0^1 f$$ holds"),
            vec![
                Text("so ".into()),
                Display("\\int_0^1 f".into()),
                Text(" holds".into()),
            ]
        );
    }

    #[test]
    fn order_is_preserved_across_kinds() {
        assert_eq!(
            split_math("a $$D$$ b $i$ c"),
            vec![
                Text("a ".into()),
                Display("D".into()),
                Text(" b ".into()),
                Inline("i".into()),
                Text(" c".into()),
            ]
        );
    }

    #[test]
    fn inline_is_only_scanned_after_the_last_display_span() {
        // text between display spans keeps its dollar signs verbatim
        assert_eq!(
            split_math("$a$ $$D$$ $b$"),
            vec![
                Text("$a$ ".into()),
                Display("D".into()),
                Text(" ".into()),
                Inline("b".into()),
            ]
        );
    }

    #[test]
    fn unterminated_dollar_stays_text() {
        assert_eq!(split_math("costs $5 today"), vec![Text("costs $5 today".into())]);
    }

    #[test]
    fn adjacent_display_spans() {
        assert_eq!(
            split_math("$$a$$$$b$$"),
            vec![Display("a".into()), Display("b".into())]
        );
    }
}
