use leptos::*;
use leptos_router::A;

use crate::problems::{ProblemSet, ProblemsResource};
use crate::store::{self, ProblemRecord};

const NOTES_PREVIEW_CHARS: usize = 40;

fn notes_preview(notes: &str) -> String {
    let mut preview: String = notes.chars().take(NOTES_PREVIEW_CHARS).collect();
    if notes.chars().count() > NOTES_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

async fn load_marked(set: Option<ProblemSet>) -> Vec<ProblemRecord> {
    let Some(set) = set else { return Vec::new() };
    let mut marked = Vec::new();
    // static list order, one read per problem
    for (year, list) in &set {
        for p in list {
            if let Some(record) = store::get_record(year, &p.question).await {
                if record.has_activity() {
                    marked.push(record);
                }
            }
        }
    }
    marked
}

#[component]
pub fn History() -> impl IntoView {
    let problems_res = expect_context::<ProblemsResource>();
    let marked = create_local_resource(move || problems_res.get().flatten(), load_marked);

    let rows = move || {
        marked
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|record| {
                let href = format!("/?year={}&problem={}", record.year, record.problem_id);
                let link = href.clone();
                view! {
                    <tr>
                        <td><A href=href>{record.year.clone()}</A></td>
                        <td><A href=link>{record.problem_id.clone()}</A></td>
                        <td class="center">{record.done.then(|| "✔️")}</td>
                        <td class="center">{record.working.then(|| "🛠️")}</td>
                        <td class="notes-cell">{notes_preview(&record.notes)}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let nothing_marked = move || matches!(marked.get(), Some(list) if list.is_empty());

    view! {
        <div class="putnam-container">
            <h1 class="putnam-title">"Problem History"</h1>
            <table class="history-table">
                <thead>
                    <tr>
                        <th>"Year"</th>
                        <th>"Problem"</th>
                        <th class="center">"Done"</th>
                        <th class="center">"Working"</th>
                        <th>"Notes"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Show when=nothing_marked>
                <p class="history-empty">
                    "No problems marked yet. Start solving problems and mark them as done or working!"
                </p>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_notes_pass_through() {
        assert_eq!(notes_preview("partial idea"), "partial idea");
    }

    #[test]
    fn long_notes_are_truncated_with_ellipsis() {
        let long = "x".repeat(60);
        let preview = notes_preview(&long);
        assert_eq!(preview.chars().count(), NOTES_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn truncation_is_char_safe() {
        let long = "é".repeat(50);
        assert_eq!(notes_preview(&long).chars().count(), NOTES_PREVIEW_CHARS + 3);
    }
}
