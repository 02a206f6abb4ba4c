use docuchat_logging::dc_warn;
use serde_json::Value;

/// Field of the question-answering payload that carries the answer.
pub const ANSWER_FIELD: &str = "output_text";

/// Extracts display text from a question-answering payload.
///
/// A non-empty string in [`ANSWER_FIELD`] is used verbatim. Anything else
/// falls back to the compact JSON serialization of the whole payload.
pub fn answer_text(payload: &Value) -> String {
    if let Some(text) = payload.get(ANSWER_FIELD).and_then(Value::as_str) {
        if !text.is_empty() {
            return text.to_owned();
        }
    }
    // Likely backend contract drift rather than a real answer shape.
    dc_warn!(
        "Answer payload has no usable '{}' field; showing raw payload",
        ANSWER_FIELD
    );
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_answer_field_verbatim() {
        let payload = json!({ "output_text": "  line one\nline two  " });
        assert_eq!(answer_text(&payload), "  line one\nline two  ");
    }

    #[test]
    fn falls_back_to_serialized_payload() {
        let payload = json!({ "answer": "elsewhere" });
        assert_eq!(answer_text(&payload), r#"{"answer":"elsewhere"}"#);
    }

    #[test]
    fn empty_or_non_string_field_falls_back() {
        let empty = json!({ "output_text": "" });
        assert_eq!(answer_text(&empty), r#"{"output_text":""}"#);

        let number = json!({ "output_text": 42 });
        assert_eq!(answer_text(&number), r#"{"output_text":42}"#);
    }

    #[test]
    fn non_object_payload_is_serialized() {
        assert_eq!(answer_text(&json!("plain")), r#""plain""#);
        assert_eq!(answer_text(&Value::Null), "null");
    }
}
