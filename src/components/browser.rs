use std::collections::BTreeSet;
use std::time::Duration;

use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;
use leptos_router::use_query_map;
use web_sys::js_sys;

use crate::mathjax::{self, MathText};
use crate::prefs;
use crate::problems::{self, ProblemSet, ProblemsResource, RandomFilter};
use crate::selection::{self, SyncPhase};
use crate::store::{self, RecordPatch};

use super::NotesEditor;

const NOTES_DEBOUNCE: Duration = Duration::from_millis(400);

/// The save a keystroke schedules. The target is fixed here, at typing time,
/// so a selection change during the quiet period cannot redirect the write to
/// another problem's record.
fn notes_save_target(
    year: &str,
    problem_id: &str,
    notes: String,
) -> Option<(String, String, RecordPatch)> {
    if year.is_empty() || problem_id.is_empty() {
        return None;
    }
    Some((
        year.to_owned(),
        problem_id.to_owned(),
        RecordPatch {
            notes: Some(notes),
            ..Default::default()
        },
    ))
}

fn query_selection(
    set: &ProblemSet,
    year: Option<String>,
    problem: Option<String>,
) -> Option<(String, String)> {
    if year.is_none() && problem.is_none() {
        return None;
    }
    let (default_year, default_problem) = problems::default_selection(set)?;
    Some((
        year.unwrap_or(default_year),
        problem.unwrap_or(default_problem),
    ))
}

#[component]
pub fn Browser() -> impl IntoView {
    let problems_res = expect_context::<ProblemsResource>();
    let query = use_query_map();

    let (year, set_year) = create_signal(String::new());
    let (problem_id, set_problem_id) = create_signal(String::new());
    let (phase, set_phase) = create_signal(SyncPhase::Uninitialized);

    let (done, set_done) = create_signal(false);
    let (working, set_working) = create_signal(false);
    let (notes, set_notes) = create_signal(String::new());

    // randomizer options
    let (options_open, set_options_open) = create_signal(false);
    let (year_min, set_year_min) = create_signal(0u16);
    let (year_max, set_year_max) = create_signal(0u16);
    let (questions, set_questions) = create_signal((1..=6u8).collect::<BTreeSet<u8>>());

    // an explicit user action: select, persist, go interactive
    let select = move |next_year: String, next_problem: String| {
        set_phase.set(SyncPhase::Interactive);
        prefs::store_selection(&next_year, &next_problem);
        set_year.set(next_year);
        set_problem_id.set(next_problem);
    };

    // one-time initialization once the problem list arrives: query parameters
    // win, then the stored selection, then defaults
    create_effect(move |_| {
        let Some(Some(set)) = problems_res.get() else {
            return;
        };
        if phase.get_untracked() != SyncPhase::Uninitialized || !year.get_untracked().is_empty() {
            return;
        }
        if let Some((min, max)) = problems::year_bounds(&set) {
            set_year_min.set(min);
            set_year_max.set(max);
        }
        let (query_year, query_problem) =
            query.with_untracked(|q| (q.get("year").cloned(), q.get("problem").cloned()));
        let from_query = query_selection(&set, query_year, query_problem);
        let stored = prefs::load_selection();
        let Some((init_year, init_problem, init_phase)) =
            selection::initial_selection(&set, from_query, stored)
        else {
            return;
        };
        if init_phase == SyncPhase::RestoringFromQuery {
            // arriving by link counts as choosing the problem
            select(init_year, init_problem);
        } else {
            set_year.set(init_year);
            set_problem_id.set(init_problem);
            set_phase.set(init_phase);
        }
    });

    // keep the problem id valid for the selected year
    create_effect(move |_| {
        let current_year = year.get();
        let Some(Some(set)) = problems_res.get() else {
            return;
        };
        if phase.get_untracked().is_restoring() {
            return;
        }
        let Some(list) = set.get(&current_year) else {
            return;
        };
        let current = problem_id.get_untracked();
        if list.iter().any(|p| p.question == current) {
            return;
        }
        let Some(first) = list.first() else { return };
        set_problem_id.set(first.question.clone());
        if phase.get_untracked().should_persist() {
            prefs::store_selection(&current_year, &first.question);
        }
    });

    // load the record for the selection; a stale response must not clobber a
    // newer selection's state
    create_effect(move |_| {
        let this_year = year.get();
        let this_problem = problem_id.get();
        if this_year.is_empty() || this_problem.is_empty() {
            return;
        }
        spawn_local(async move {
            let record = store::get_record(&this_year, &this_problem).await;
            if year.get_untracked() != this_year || problem_id.get_untracked() != this_problem {
                return;
            }
            match record {
                Some(r) => {
                    set_done.set(r.done);
                    set_working.set(r.working);
                    set_notes.set(r.notes);
                }
                None => {
                    set_done.set(false);
                    set_working.set(false);
                    set_notes.set(String::new());
                }
            }
        });
    });

    let save_patch = move |patch: RecordPatch| {
        let this_year = year.get_untracked();
        let this_problem = problem_id.get_untracked();
        if this_year.is_empty() || this_problem.is_empty() {
            return;
        }
        spawn_local(async move {
            // dropped on store failure, by contract
            let _ = store::save_record(&this_year, &this_problem, patch).await;
        });
    };

    let on_done = move |ev: ev::Event| {
        let checked = event_target_checked(&ev);
        set_done.set(checked);
        save_patch(RecordPatch {
            done: Some(checked),
            ..Default::default()
        });
    };
    let on_working = move |ev: ev::Event| {
        let checked = event_target_checked(&ev);
        set_working.set(checked);
        save_patch(RecordPatch {
            working: Some(checked),
            ..Default::default()
        });
    };

    // notes are debounced: every keystroke cancels the pending save and
    // schedules a fresh one under the selection the notes were typed for
    let pending_save = store_value(None::<TimeoutHandle>);
    let on_notes = move |next: String| {
        set_notes.set(next.clone());
        if let Some(handle) = pending_save.get_value() {
            handle.clear();
        }
        let Some((this_year, this_problem, patch)) =
            notes_save_target(&year.get_untracked(), &problem_id.get_untracked(), next)
        else {
            return;
        };
        let scheduled = set_timeout_with_handle(
            move || {
                spawn_local(async move {
                    let _ = store::save_record(&this_year, &this_problem, patch).await;
                });
            },
            NOTES_DEBOUNCE,
        );
        pending_save.set_value(scheduled.ok());
    };
    on_cleanup(move || {
        if let Some(handle) = pending_save.get_value() {
            handle.clear();
        }
    });

    let on_random = move |_| {
        let Some(Some(set)) = untrack(|| problems_res.get()) else {
            return;
        };
        let filter = RandomFilter {
            year_min: year_min.get_untracked(),
            year_max: year_max.get_untracked(),
            questions: questions.get_untracked(),
        };
        let matches = problems::matching(&set, &filter);
        if matches.is_empty() {
            return;
        }
        let idx = (js_sys::Math::random() * matches.len() as f64) as usize;
        let (pick_year, pick_problem) = matches[idx.min(matches.len() - 1)].clone();
        select(pick_year, pick_problem);
    };

    let years_list = create_memo(move |_| {
        problems_res
            .get()
            .flatten()
            .map(|set| problems::years(&set))
            .unwrap_or_default()
    });
    let problem_options = create_memo(move |_| {
        problems_res
            .get()
            .flatten()
            .and_then(|set| set.get(&year.get()).cloned())
            .map(|list| list.into_iter().map(|p| p.question).collect::<Vec<_>>())
            .unwrap_or_default()
    });
    let statement = create_memo(move |_| {
        let set = problems_res.get().flatten()?;
        let list = set.get(&year.get())?;
        list.iter()
            .find(|p| p.question == problem_id.get())
            .map(|p| p.problem.clone())
    });
    let bounds = create_memo(move |_| {
        problems_res
            .get()
            .flatten()
            .as_ref()
            .and_then(problems::year_bounds)
            .unwrap_or((2000, 2024))
    });

    // a throwing typesetter leaves the page half-rendered; a reload is the
    // last-resort recovery
    create_effect(move |_| {
        statement.track();
        spawn_local(async move {
            if mathjax::typeset_now().await.is_err() {
                logging::warn!("typesetting failed, reloading");
                let _ = leptos::window().location().reload();
            }
        });
    });

    let toggle_question = move |n: u8, on: bool| {
        set_questions.update(|qs| {
            if on {
                qs.insert(n);
            } else {
                qs.remove(&n);
            }
        });
    };

    let loaded = move || matches!(problems_res.get(), Some(Some(_)));
    let loader = move || view! { <div class="loader">"Loading problems..."</div> };

    view! {
        <Show when=loaded fallback=loader>
            <div class="putnam-container">
                <h1 class="putnam-title">"Putnam Trainer"</h1>
                <div class="putnam-controls">
                    <label>
                        "Year:"
                        <select
                            class="putnam-select"
                            on:change=move |ev| select(event_target_value(&ev), problem_id.get_untracked())
                        >
                            {move || {
                                years_list
                                    .get()
                                    .into_iter()
                                    .map(|y| {
                                        let selected = y == year.get();
                                        view! { <option value=y.clone() selected=selected>{y}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                    <label>
                        "Problem:"
                        <select
                            class="putnam-select"
                            on:change=move |ev| select(year.get_untracked(), event_target_value(&ev))
                        >
                            {move || {
                                problem_options
                                    .get()
                                    .into_iter()
                                    .map(|q| {
                                        let selected = q == problem_id.get();
                                        view! { <option value=q.clone() selected=selected>{q}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                    <span class="randomizer">
                        <button type="button" class="putnam-button" on:click=on_random>
                            "Random"
                        </button>
                        <button
                            type="button"
                            class="pt-btn randomizer-toggle"
                            aria-label="Randomizer options"
                            on:click=move |_| set_options_open.update(|open| *open = !*open)
                        >
                            "▼"
                        </button>
                        <Show when=move || options_open.get()>
                            <div class="randomizer-options">
                                <strong>"Question Number"</strong>
                                <div class="randomizer-questions">
                                    {(1..=6u8)
                                        .map(|n| {
                                            view! {
                                                <label class="pt-checkbox">
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || questions.get().contains(&n)
                                                        on:input=move |ev| toggle_question(n, event_target_checked(&ev))
                                                    />
                                                    {n.to_string()}
                                                </label>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                                <strong>"Year Range"</strong>
                                <div class="randomizer-range">
                                    <span class="pt-range-label">"Min"</span>
                                    <input
                                        type="range"
                                        class="pt-range"
                                        min=move || bounds.get().0.to_string()
                                        max=move || bounds.get().1.to_string()
                                        prop:value=move || year_min.get().to_string()
                                        on:input=move |ev| {
                                            if let Ok(v) = event_target_value(&ev).parse() {
                                                set_year_min.set(v);
                                            }
                                        }
                                    />
                                    <span class="pt-range-value">{move || year_min.get().to_string()}</span>
                                </div>
                                <div class="randomizer-range">
                                    <span class="pt-range-label">"Max"</span>
                                    <input
                                        type="range"
                                        class="pt-range"
                                        min=move || bounds.get().0.to_string()
                                        max=move || bounds.get().1.to_string()
                                        prop:value=move || year_max.get().to_string()
                                        on:input=move |ev| {
                                            if let Ok(v) = event_target_value(&ev).parse() {
                                                set_year_max.set(v);
                                            }
                                        }
                                    />
                                    <span class="pt-range-value">{move || year_max.get().to_string()}</span>
                                </div>
                                <button
                                    type="button"
                                    class="putnam-button"
                                    on:click=move |_| set_options_open.set(false)
                                >
                                    "Close"
                                </button>
                            </div>
                        </Show>
                    </span>
                </div>
                <div class="putnam-problem">
                    <h2 class="putnam-problem-title">
                        {move || format!("{} {}", year.get(), problem_id.get())}
                    </h2>
                    <div class="putnam-flags">
                        <label class="pt-checkbox">
                            <input type="checkbox" prop:checked=move || done.get() on:input=on_done />
                            <span>"Done"</span>
                        </label>
                        <label class="pt-checkbox">
                            <input type="checkbox" prop:checked=move || working.get() on:input=on_working />
                            <span>"Working"</span>
                        </label>
                    </div>
                    {move || match statement.get() {
                        Some(text) => view! { <MathText text=Signal::derive(move || text.clone()) /> }.into_view(),
                        None => view! { <p>"No problem found."</p> }.into_view(),
                    }}
                    <NotesEditor value=notes on_change=on_notes />
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_notes_save_keeps_the_selection_it_was_typed_under() {
        let (year, problem, patch) =
            notes_save_target("2023", "B2", "half an idea".into()).unwrap();
        // the eventual write is bound to these, not to whatever is selected
        // when the timer fires
        assert_eq!(year, "2023");
        assert_eq!(problem, "B2");
        assert_eq!(patch.notes.as_deref(), Some("half an idea"));
        assert_eq!(patch.done, None);
        assert_eq!(patch.working, None);
    }

    #[test]
    fn notes_save_needs_a_selection() {
        assert!(notes_save_target("", "A1", "x".into()).is_none());
        assert!(notes_save_target("2024", "", "x".into()).is_none());
    }

    #[test]
    fn query_selection_fills_missing_half_from_defaults() {
        let mut set = ProblemSet::new();
        set.insert(
            "2024".into(),
            vec![crate::problems::PutnamProblem {
                question: "A1".into(),
                problem: "p".into(),
            }],
        );
        assert_eq!(query_selection(&set, None, None), None);
        assert_eq!(
            query_selection(&set, Some("2023".into()), None),
            Some(("2023".into(), "A1".into()))
        );
        assert_eq!(
            query_selection(&set, None, Some("B3".into())),
            Some(("2024".into(), "B3".into()))
        );
    }
}
