//! Activity records as served by `GET /activities`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Activity name -> details, in the order the server emitted the keys
pub type ActivityMap = IndexMap<String, Activity>;

/// One activity on the board. The name is the map key, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus current roster size. Negative when over-subscribed.
    pub fn spots_left(&self) -> i64 {
        let taken = i64::try_from(self.participants.len()).unwrap_or(i64::MAX);
        self.max_participants.saturating_sub(taken)
    }

    /// Text shown after the `Availability:` label
    pub fn availability_label(&self) -> String {
        format!("{} spots left", self.spots_left())
    }

    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }
}

/// Decode the body of `GET /activities`
pub fn parse_activities(body: &str) -> serde_json::Result<ActivityMap> {
    serde_json::from_str(body)
}
