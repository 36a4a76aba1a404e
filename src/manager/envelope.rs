//! The uniform response envelope seen by HTTP clients.
//!
//! Single point of truth for the wire format: a JSON object with a `status`
//! field and, when there is something to report, an `error` field. Note the
//! wire key for [`Envelope::reason`] is `error`, a historical name kept for
//! compatibility with existing consumers.

use serde::Serialize;

/// Hardcoded body used when envelope serialization itself fails. This
/// literal predates the `reason` → `error` rename and existing consumers
/// match it as-is, so its `reason` key is kept verbatim.
const SERIALIZE_FAILURE_BODY: &str =
    r#"{"status": "internal_error", "reason": "cast_exception_failure"}"#;

/// The only artifact crossing the HTTP boundary on the way out (statistics
/// passthrough aside).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub status: String,

    /// Omitted from the wire entirely when there is nothing to report.
    #[serde(rename = "error", skip_serializing_if = "reason_is_empty")]
    pub reason: Option<String>,
}

fn reason_is_empty(reason: &Option<String>) -> bool {
    reason.as_deref().map_or(true, str::is_empty)
}

impl Envelope {
    /// Bare success confirmation: `{"status":"ok"}`.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            reason: None,
        }
    }

    /// Envelope with a status and a reason.
    pub fn with_reason(status: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            reason: Some(reason.into()),
        }
    }

    /// Serialize to the canonical JSON object.
    ///
    /// Serialization cannot fail for this fixed shape; if it ever does, the
    /// failure is logged and the hardcoded fallback body is returned so the
    /// HTTP caller still receives well-formed JSON.
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(error = %err, "Envelope serialization failed");
                SERIALIZE_FAILURE_BODY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_omits_error_key() {
        assert_eq!(Envelope::ok().to_json(), r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_empty_reason_also_omits_error_key() {
        // An empty upstream reply produces an empty reason; the wire shape
        // still drops the key rather than sending "error":"".
        let envelope = Envelope::with_reason("unexpected_answer", "");
        assert_eq!(envelope.to_json(), r#"{"status":"unexpected_answer"}"#);
    }

    #[test]
    fn test_reason_serializes_under_error_key() {
        let envelope = Envelope::with_reason("ok", "port_already_exists");
        assert_eq!(
            envelope.to_json(),
            r#"{"status":"ok","error":"port_already_exists"}"#
        );
    }

    #[test]
    fn test_verbatim_reply_is_preserved_in_reason() {
        let envelope = Envelope::with_reason("unexpected_answer", "port is not available");
        let value: serde_json::Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert_eq!(value["error"], "port is not available");
    }

    #[test]
    fn test_fallback_body_keeps_legacy_reason_key() {
        // The fallback is unreachable through to_json in practice, but its
        // shape is part of the wire contract.
        let value: serde_json::Value = serde_json::from_str(SERIALIZE_FAILURE_BODY).unwrap();
        assert_eq!(value["status"], "internal_error");
        assert_eq!(value["reason"], "cast_exception_failure");
        assert!(value.get("error").is_none());
    }
}
