use serde::{Deserialize, Serialize};

/// Body returned by the mutation endpoints.
/// `message` on 2xx, `detail` on error; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl Reply {
    pub fn parse(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

/// Styling of the `#message` banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// CSS class applied to the banner
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

// User-facing text
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const SIGNUP_REJECTED: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const REMOVE_REJECTED: &str = "Failed to remove participant";
pub const REMOVE_FAILED: &str = "Failed to remove participant. Please try again.";
pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const SELECT_PLACEHOLDER: &str = "Select an activity";
pub const REMOVE_TITLE: &str = "Remove participant";
