//! Interpretation of exchange responses.
//!
//! A rejected or unparseable response is an [`Outcome`], not an error: it is
//! reported to the operator and the process still exits normally.

use serde_json::Value;

/// Result of one exchange call as seen by the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// HTTP 200 with `{"status": "ok"}`.
    Applied { using_big_blocks: bool },
    /// Any other status or body.
    Rejected { status: u16, body: String },
    /// Body is not JSON.
    Malformed { status: u16, text: String },
}

impl Outcome {
    /// Classify a response to a request that set `usingBigBlocks`.
    pub fn interpret(using_big_blocks: bool, status: u16, body: &str) -> Self {
        let json: Value = match serde_json::from_str(body) {
            Ok(json) => json,
            Err(_) => {
                return Outcome::Malformed {
                    status,
                    text: body.to_string(),
                }
            }
        };

        if status == 200 && json.get("status").and_then(Value::as_str) == Some("ok") {
            Outcome::Applied { using_big_blocks }
        } else {
            Outcome::Rejected {
                status,
                body: body.to_string(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    /// Operator-facing summary lines.
    pub fn report(&self) -> Vec<String> {
        match self {
            Outcome::Applied { using_big_blocks: true } => vec![
                "Big Blocks mode successfully ENABLED!".to_string(),
                "   You can now deploy large contracts.".to_string(),
            ],
            Outcome::Applied { using_big_blocks: false } => vec![
                "Big Blocks mode successfully DISABLED!".to_string(),
                "   Re-enable Big Blocks mode before deploying large contracts again.".to_string(),
            ],
            Outcome::Rejected { body, .. } => vec![
                "Failed to change Big Blocks mode!".to_string(),
                format!("   Error details: {}", body),
            ],
            Outcome::Malformed { text, .. } => vec![format!("API response is not JSON: {}", text)],
        }
    }
}
