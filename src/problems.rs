//! Static Putnam problem list and selection helpers.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PutnamProblem {
    pub problem: String,
    pub question: String,
}

/// Year label mapped to that year's problems, in contest order.
pub type ProblemSet = BTreeMap<String, Vec<PutnamProblem>>;

/// The fetched problem list, shared through context.
pub type ProblemsResource = leptos::Resource<(), Option<ProblemSet>>;

pub async fn fetch_problem_set() -> Option<ProblemSet> {
    let promise = leptos::window().fetch_with_str("putnam_problems.json");
    let response = JsFuture::from(promise).await.ok()?;
    let response: web_sys::Response = response.dyn_into().ok()?;
    let text = JsFuture::from(response.text().ok()?).await.ok()?;
    serde_json::from_str(&text.as_string()?).ok()
}

/// Years newest first, matching the dropdown order.
pub fn years(set: &ProblemSet) -> Vec<String> {
    set.keys().rev().cloned().collect()
}

/// Question number of an id like `A3` or `B6`, ignoring the section letter.
pub fn question_number(id: &str) -> Option<u8> {
    let mut chars = id.chars();
    if !matches!(chars.next(), Some('A' | 'B')) {
        return None;
    }
    match chars.next() {
        Some(d @ '1'..='6') if chars.next().is_none() => Some(d as u8 - b'0'),
        _ => None,
    }
}

/// Newest year and its first problem.
pub fn default_selection(set: &ProblemSet) -> Option<(String, String)> {
    let (year, list) = set.iter().next_back()?;
    Some((year.clone(), list.first()?.question.clone()))
}

/// Snaps a candidate selection onto the set: an unknown year falls back to the
/// defaults, an unknown problem id to the first problem of its year.
pub fn clamp_to_set(set: &ProblemSet, year: &str, problem_id: &str) -> Option<(String, String)> {
    let list = match set.get(year) {
        Some(list) => list,
        None => return default_selection(set),
    };
    if list.iter().any(|p| p.question == problem_id) {
        return Some((year.to_owned(), problem_id.to_owned()));
    }
    Some((year.to_owned(), list.first()?.question.clone()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomFilter {
    pub year_min: u16,
    pub year_max: u16,
    pub questions: BTreeSet<u8>,
}

/// All `(year, problem_id)` pairs within the inclusive year range whose
/// question number is selected. Non-numeric years and unrecognized ids are
/// skipped.
pub fn matching(set: &ProblemSet, filter: &RandomFilter) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (year, list) in set {
        let Ok(y) = year.parse::<u16>() else { continue };
        if y < filter.year_min || y > filter.year_max {
            continue;
        }
        for p in list {
            if question_number(&p.question).is_some_and(|n| filter.questions.contains(&n)) {
                out.push((year.clone(), p.question.clone()));
            }
        }
    }
    out
}

/// Numeric bounds of the year labels, for the randomizer's range sliders.
pub fn year_bounds(set: &ProblemSet) -> Option<(u16, u16)> {
    let nums: Vec<u16> = set.keys().filter_map(|y| y.parse().ok()).collect();
    Some((*nums.iter().min()?, *nums.iter().max()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(question: &str) -> PutnamProblem {
        PutnamProblem {
            problem: format!("statement of {question}"),
            question: question.to_owned(),
        }
    }

    fn sample() -> ProblemSet {
        let mut set = ProblemSet::new();
        set.insert("2023".into(), vec![problem("A1"), problem("B6")]);
        set.insert("2024".into(), vec![problem("A1"), problem("A2")]);
        set
    }

    #[test]
    fn years_newest_first() {
        assert_eq!(years(&sample()), vec!["2024", "2023"]);
    }

    #[test]
    fn question_number_ignores_section() {
        assert_eq!(question_number("A3"), Some(3));
        assert_eq!(question_number("B3"), Some(3));
        assert_eq!(question_number("B6"), Some(6));
        assert_eq!(question_number("C1"), None);
        assert_eq!(question_number("A7"), None);
        assert_eq!(question_number("A12"), None);
        assert_eq!(question_number(""), None);
    }

    #[test]
    fn defaults_use_newest_year() {
        assert_eq!(
            default_selection(&sample()),
            Some(("2024".into(), "A1".into()))
        );
    }

    #[test]
    fn clamp_keeps_valid_selection() {
        assert_eq!(
            clamp_to_set(&sample(), "2023", "B6"),
            Some(("2023".into(), "B6".into()))
        );
    }

    #[test]
    fn clamp_falls_back_to_first_problem_of_year() {
        // switching 2023/B6 -> 2024 where no B6 exists
        assert_eq!(
            clamp_to_set(&sample(), "2024", "B6"),
            Some(("2024".into(), "A1".into()))
        );
    }

    #[test]
    fn clamp_unknown_year_falls_back_to_defaults() {
        assert_eq!(
            clamp_to_set(&sample(), "1999", "A1"),
            Some(("2024".into(), "A1".into()))
        );
    }

    #[test]
    fn matching_respects_year_range_and_questions() {
        let filter = RandomFilter {
            year_min: 2024,
            year_max: 2024,
            questions: [1, 2].into(),
        };
        assert_eq!(
            matching(&sample(), &filter),
            vec![
                ("2024".to_owned(), "A1".to_owned()),
                ("2024".to_owned(), "A2".to_owned()),
            ]
        );
    }

    #[test]
    fn matching_filters_question_numbers() {
        let filter = RandomFilter {
            year_min: 2000,
            year_max: 2030,
            questions: [6].into(),
        };
        assert_eq!(matching(&sample(), &filter), vec![("2023".to_owned(), "B6".to_owned())]);
    }

    #[test]
    fn matching_can_be_empty() {
        let filter = RandomFilter {
            year_min: 2000,
            year_max: 2001,
            questions: (1..=6).collect(),
        };
        assert!(matching(&sample(), &filter).is_empty());
    }

    #[test]
    fn bounds_span_the_set() {
        assert_eq!(year_bounds(&sample()), Some((2023, 2024)));
        assert_eq!(year_bounds(&ProblemSet::new()), None);
    }
}
