//! Per-problem records and the saved macro string, kept in the origin's
//! IndexedDB. Every operation opens a connection, runs a single transaction
//! and closes again. Reads fail open (absence), writes drop silently.

use serde::{Deserialize, Serialize};
use wasm_bindgen::{closure::Closure, JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    js_sys, IdbDatabase, IdbObjectStoreParameters, IdbOpenDbRequest, IdbRequest,
    IdbTransactionMode,
};

const DB_NAME: &str = "putnam-trainer";
const DB_VERSION: u32 = 2;
const PROBLEMS_STORE: &str = "problems";
const MACROS_STORE: &str = "macros";
const MACROS_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub key: String,
    pub year: String,
    #[serde(rename = "problemId")]
    pub problem_id: String,
    pub done: bool,
    pub working: bool,
    pub notes: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: f64,
}

impl ProblemRecord {
    /// Whether this record carries anything worth showing in the history view.
    pub fn has_activity(&self) -> bool {
        self.done || self.working || !self.notes.trim().is_empty()
    }

    /// Patch merged over an existing record, or over defaults when none
    /// exists. The key is derived, never taken from the patch.
    fn merged(
        existing: Option<ProblemRecord>,
        year: &str,
        problem_id: &str,
        patch: RecordPatch,
        now: f64,
    ) -> ProblemRecord {
        let existing = existing.unwrap_or_else(|| ProblemRecord {
            key: record_key(year, problem_id),
            year: year.to_owned(),
            problem_id: problem_id.to_owned(),
            done: false,
            working: false,
            notes: String::new(),
            updated_at: now,
        });
        ProblemRecord {
            done: patch.done.unwrap_or(existing.done),
            working: patch.working.unwrap_or(existing.working),
            notes: patch.notes.unwrap_or(existing.notes),
            updated_at: now,
            ..existing
        }
    }
}

/// Fields a save may change; anything left `None` keeps its stored value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordPatch {
    pub done: Option<bool>,
    pub working: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct MacroRow {
    id: String,
    value: String,
}

fn record_key(year: &str, problem_id: &str) -> String {
    format!("{year}:{problem_id}")
}

/// Waits for the request to settle and yields its result, `None` on failure.
/// Both handlers live until the request is done and are dropped together, so
/// whichever never fired is freed too.
async fn settle(request: &IdbRequest) -> Option<JsValue> {
    let mut handlers = None;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let target = request.clone();
        let on_success = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let value = target.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::UNDEFINED, &value);
        });
        request.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let _ = reject.call1(&JsValue::UNDEFINED, &JsValue::from_str("request failed"));
        });
        request.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        handlers = Some((on_success, on_error));
    });
    let value = JsFuture::from(promise).await.ok();
    drop(handlers);
    value
}

fn ensure_stores(db: &IdbDatabase) {
    let names = db.object_store_names();
    if !names.contains(PROBLEMS_STORE) {
        let mut params = IdbObjectStoreParameters::new();
        params.key_path(Some(&JsValue::from_str("key")));
        let _ = db.create_object_store_with_optional_parameters(PROBLEMS_STORE, &params);
    }
    if !names.contains(MACROS_STORE) {
        let mut params = IdbObjectStoreParameters::new();
        params.key_path(Some(&JsValue::from_str("id")));
        let _ = db.create_object_store_with_optional_parameters(MACROS_STORE, &params);
    }
}

async fn open_db() -> Option<IdbDatabase> {
    let factory = leptos::window().indexed_db().ok().flatten()?;
    let request = factory.open_with_u32(DB_NAME, DB_VERSION).ok()?;
    let on_upgrade = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        let Some(target) = event.target() else { return };
        let Ok(request) = target.dyn_into::<IdbOpenDbRequest>() else {
            return;
        };
        let Ok(result) = request.result() else { return };
        let Ok(db) = result.dyn_into::<IdbDatabase>() else { return };
        ensure_stores(&db);
    });
    request.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));
    let db = settle(&request).await?;
    drop(on_upgrade);
    db.dyn_into().ok()
}

// serde <-> JS object bridge; IndexedDB wants structured-cloneable objects
// with the key path present as a property.
fn to_js<T: Serialize>(value: &T) -> Option<JsValue> {
    let text = serde_json::to_string(value).ok()?;
    js_sys::JSON::parse(&text).ok()
}

fn from_js<T: for<'de> Deserialize<'de>>(value: &JsValue) -> Option<T> {
    let text = js_sys::JSON::stringify(value).ok()?;
    serde_json::from_str(&String::from(text)).ok()
}

async fn read(db: &IdbDatabase, store: &str, key: &str) -> Option<JsValue> {
    let tx = db.transaction_with_str(store).ok()?;
    let store = tx.object_store(store).ok()?;
    let request = store.get(&JsValue::from_str(key)).ok()?;
    let value = settle(&request).await?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

async fn write(db: &IdbDatabase, store: &str, value: &JsValue) -> Option<()> {
    let tx = db
        .transaction_with_str_and_mode(store, IdbTransactionMode::Readwrite)
        .ok()?;
    let store = tx.object_store(store).ok()?;
    let request = store.put(value).ok()?;
    settle(&request).await?;
    Some(())
}

pub async fn get_record(year: &str, problem_id: &str) -> Option<ProblemRecord> {
    let db = open_db().await?;
    let found = read(&db, PROBLEMS_STORE, &record_key(year, problem_id)).await;
    db.close();
    found.as_ref().and_then(from_js)
}

/// Merges the patch over the stored record (or defaults) and writes it back,
/// returning what was written. `None` means the store was unavailable and the
/// write was dropped.
pub async fn save_record(
    year: &str,
    problem_id: &str,
    patch: RecordPatch,
) -> Option<ProblemRecord> {
    let db = open_db().await?;
    let existing = read(&db, PROBLEMS_STORE, &record_key(year, problem_id))
        .await
        .as_ref()
        .and_then(from_js);
    let next = ProblemRecord::merged(existing, year, problem_id, patch, js_sys::Date::now());
    let written = match to_js(&next) {
        Some(value) => write(&db, PROBLEMS_STORE, &value).await,
        None => None,
    };
    db.close();
    written.map(|()| next)
}

pub async fn get_macro_string() -> String {
    let Some(db) = open_db().await else {
        return String::new();
    };
    let found = read(&db, MACROS_STORE, MACROS_KEY).await;
    db.close();
    found
        .as_ref()
        .and_then(from_js::<MacroRow>)
        .map(|row| row.value)
        .unwrap_or_default()
}

pub async fn save_macro_string(value: &str) {
    let Some(db) = open_db().await else { return };
    let row = MacroRow {
        id: MACROS_KEY.to_owned(),
        value: value.to_owned(),
    };
    if let Some(js) = to_js(&row) {
        let _ = write(&db, MACROS_STORE, &js).await;
    }
    db.close();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(done: bool, working: bool, notes: &str) -> ProblemRecord {
        ProblemRecord {
            key: "2024:A1".into(),
            year: "2024".into(),
            problem_id: "A1".into(),
            done,
            working,
            notes: notes.to_owned(),
            updated_at: 1.0,
        }
    }

    #[test]
    fn merge_over_absent_uses_defaults() {
        let next = ProblemRecord::merged(
            None,
            "2024",
            "A1",
            RecordPatch {
                done: Some(true),
                ..Default::default()
            },
            42.0,
        );
        assert_eq!(next.key, "2024:A1");
        assert!(next.done);
        assert!(!next.working);
        assert_eq!(next.notes, "");
        assert_eq!(next.updated_at, 42.0);
    }

    #[test]
    fn merge_keeps_unpatched_fields() {
        let existing = record(false, true, "partial idea");
        let next = ProblemRecord::merged(
            Some(existing),
            "2024",
            "A1",
            RecordPatch {
                done: Some(true),
                ..Default::default()
            },
            99.0,
        );
        assert!(next.done);
        assert!(next.working);
        assert_eq!(next.notes, "partial idea");
        assert_eq!(next.updated_at, 99.0);
    }

    #[test]
    fn merge_overwrites_notes_when_patched() {
        let existing = record(true, false, "old");
        let next = ProblemRecord::merged(
            Some(existing),
            "2024",
            "A1",
            RecordPatch {
                notes: Some("new".into()),
                ..Default::default()
            },
            5.0,
        );
        assert!(next.done);
        assert_eq!(next.notes, "new");
    }

    #[test]
    fn activity_requires_a_flag_or_real_notes() {
        assert!(!record(false, false, "").has_activity());
        assert!(!record(false, false, "   \n").has_activity());
        assert!(record(true, false, "").has_activity());
        assert!(record(false, true, "").has_activity());
        assert!(record(false, false, "partial idea").has_activity());
    }

    #[test]
    fn record_field_names_match_the_stored_shape() {
        let json = serde_json::to_string(&record(true, false, "n")).unwrap();
        assert!(json.contains("\"problemId\""));
        assert!(json.contains("\"updatedAt\""));
        let back: ProblemRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record(true, false, "n"));
    }
}
