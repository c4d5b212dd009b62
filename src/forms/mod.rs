pub mod clients;
pub mod users;

use serde::Deserialize;

/// Status-toggle form shared by the client and user rows.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    /// Desired status: `ACTIVE` activates, anything else deactivates.
    pub status: String,
}

impl StatusForm {
    pub fn is_active(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("ACTIVE")
    }
}
