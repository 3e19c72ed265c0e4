//! Uniform `{status, data}` response envelope.
//!
//! Every search outcome, success or failure, serializes to the same shape so
//! callers can branch on `status.code` alone.

use crate::model::postcode::PostcodeRecord;
use serde::{Deserialize, Serialize};

pub const CODE_OK: u16 = 200;
pub const CODE_BAD_REQUEST: u16 = 400;
pub const CODE_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// HTTP-compatible status code.
    pub code: u16,
    /// Empty on success, human-readable reason otherwise.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityData {
    pub localities: Vec<PostcodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEnvelope {
    pub status: Status,
    /// Omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LocalityData>,
}

impl StatusEnvelope {
    /// Builds a data-less envelope.
    pub fn status(code: u16, text: impl Into<String>) -> Self {
        Self {
            status: Status {
                code,
                text: text.into(),
            },
            data: None,
        }
    }

    /// Builds a 200 envelope carrying `localities`.
    pub fn localities(localities: Vec<PostcodeRecord>) -> Self {
        Self {
            status: Status {
                code: CODE_OK,
                text: String::new(),
            },
            data: Some(LocalityData { localities }),
        }
    }

    pub fn code(&self) -> u16 {
        self.status.code
    }

    pub fn is_ok(&self) -> bool {
        self.status.code == CODE_OK
    }

    /// Matched localities, empty for every non-200 envelope.
    pub fn localities_or_empty(&self) -> &[PostcodeRecord] {
        self.data
            .as_ref()
            .map(|data| data.localities.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::StatusEnvelope;
    use crate::model::postcode::PostcodeRecord;
    use serde_json::json;

    #[test]
    fn error_envelope_omits_data_key() {
        let envelope = StatusEnvelope::status(404, "No localities matched 'xyz'");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"status": {"code": 404, "text": "No localities matched 'xyz'"}})
        );
    }

    #[test]
    fn success_envelope_nests_localities_under_data() {
        let envelope =
            StatusEnvelope::localities(vec![PostcodeRecord::new("ALICE SPRINGS", "NT", "0870")]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "status": {"code": 200, "text": ""},
                "data": {"localities": [
                    {"locality": "ALICE SPRINGS", "state": "NT", "postcode": "0870"}
                ]}
            })
        );
    }
}
