//! Extraction of the `{ headlines, articles }` output from stored payloads.
//!
//! The engine delivers results in several shapes across versions: as a JSON
//! object, as a JSON-encoded string, and with `message` and
//! `message.content` themselves JSON-encoded. [`normalize`] decodes at most
//! those three layers, each step falling back to the value as-is, and always
//! returns both sequences.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the day's headlines.
pub const HEADLINES_KEY: &str = "manchetes_do_dia";

/// Key holding the shortlisted articles.
pub const ARTICLES_KEY: &str = "artigos_finalistas";

/// Canonical result returned to pollers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub headlines: Vec<Value>,
    pub articles: Vec<Value>,
}

/// Normalize a stored callback payload. Never fails.
///
/// Values are looked up under `message.content` first, then at the top
/// level; an explicit `null` counts as absent. Anything that is not an
/// array becomes an empty sequence.
pub fn normalize(raw: &Value) -> NormalizedResult {
    let root = match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded) => Cow::Owned(decoded),
            Err(_) => return NormalizedResult::default(),
        },
        other => Cow::Borrowed(other),
    };

    let message = root.get("message").map(decode_embedded);
    let content = message
        .as_deref()
        .and_then(|message| message.get("content"))
        .map(decode_embedded);

    let content = content.as_deref();
    NormalizedResult {
        headlines: to_sequence(lookup(content, &root, HEADLINES_KEY)),
        articles: to_sequence(lookup(content, &root, ARTICLES_KEY)),
    }
}

/// First non-null value for `key`, nested content before top level.
fn lookup<'a>(content: Option<&'a Value>, root: &'a Value, key: &str) -> Option<&'a Value> {
    content
        .and_then(|content| content.get(key))
        .filter(|value| !value.is_null())
        .or_else(|| root.get(key).filter(|value| !value.is_null()))
}

/// Decode `value` if it is a string holding JSON, else return it unchanged.
fn decode_embedded(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::String(text) => serde_json::from_str::<Value>(text)
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(value)),
        other => Cow::Borrowed(other),
    }
}

fn to_sequence(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn result(headlines: Value, articles: Value) -> NormalizedResult {
        serde_json::from_value(json!({ "headlines": headlines, "articles": articles })).unwrap()
    }

    #[test]
    fn top_level_fields() {
        let raw = json!({ "manchetes_do_dia": ["a", "b"], "artigos_finalistas": ["c"] });
        assert_eq!(normalize(&raw), result(json!(["a", "b"]), json!(["c"])));
    }

    #[test]
    fn nested_content_fields() {
        let raw = json!({
            "message": {
                "content": {
                    "manchetes_do_dia": [{ "title": "X" }],
                    "artigos_finalistas": [{ "title": "Y" }]
                }
            }
        });
        assert_eq!(
            normalize(&raw),
            result(json!([{ "title": "X" }]), json!([{ "title": "Y" }]))
        );
    }

    #[test]
    fn nested_wins_over_top_level() {
        let raw = json!({
            "message": { "content": { "manchetes_do_dia": ["nested"] } },
            "manchetes_do_dia": ["top"],
            "artigos_finalistas": ["top-article"]
        });
        assert_eq!(
            normalize(&raw),
            result(json!(["nested"]), json!(["top-article"]))
        );
    }

    #[test]
    fn empty_nested_list_still_wins() {
        let raw = json!({
            "message": { "content": { "manchetes_do_dia": [] } },
            "manchetes_do_dia": ["top"]
        });
        assert_eq!(normalize(&raw).headlines, Vec::<Value>::new());
    }

    #[test]
    fn null_falls_through_to_top_level() {
        let raw = json!({
            "message": { "content": { "manchetes_do_dia": null } },
            "manchetes_do_dia": ["top"]
        });
        assert_eq!(normalize(&raw).headlines, vec![json!("top")]);
    }

    #[test]
    fn triple_encoded_payload() {
        let content = json!({ "manchetes_do_dia": ["X"], "artigos_finalistas": ["Y"] });
        let message = json!({ "content": content.to_string() });
        let raw = Value::String(json!({ "message": message.to_string() }).to_string());

        assert_eq!(normalize(&raw), result(json!(["X"]), json!(["Y"])));
    }

    #[test]
    fn unparsable_string_yields_empty() {
        let raw = json!("not json {");
        assert_eq!(normalize(&raw), NormalizedResult::default());
    }

    #[test]
    fn unparsable_message_is_left_alone() {
        let raw = json!({
            "message": "plain text reply",
            "manchetes_do_dia": ["a"]
        });
        assert_eq!(normalize(&raw), result(json!(["a"]), json!([])));
    }

    #[test]
    fn unparsable_content_is_left_alone() {
        let raw = json!({
            "message": { "content": "sorry, no JSON today" },
            "artigos_finalistas": ["c"]
        });
        assert_eq!(normalize(&raw), result(json!([]), json!(["c"])));
    }

    #[test]
    fn non_list_values_become_empty() {
        let raw = json!({
            "manchetes_do_dia": "one headline",
            "artigos_finalistas": { "title": "not a list" }
        });
        assert_eq!(normalize(&raw), NormalizedResult::default());
    }

    #[test]
    fn scalars_and_arrays_yield_empty() {
        for raw in [
            json!(null),
            json!(42),
            json!(true),
            json!([1, 2, 3]),
            json!("\"just a string\""),
            json!({}),
        ] {
            assert_eq!(normalize(&raw), NormalizedResult::default(), "raw = {raw}");
        }
    }

    #[test]
    fn decoding_stops_after_content() {
        // Content encoded twice is unwrapped only once.
        let inner = json!({ "manchetes_do_dia": ["deep"] }).to_string();
        let content = Value::String(inner).to_string();
        let raw = json!({ "message": { "content": content } });

        assert_eq!(normalize(&raw), NormalizedResult::default());
    }
}
