//! To-do items that feed the task reward ratchet.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Build an incomplete task from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] when `text` is blank.
    pub fn new(id: EntityId, text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty { field: "task" });
        }
        Ok(Self {
            id,
            text: text.to_string(),
            completed: false,
        })
    }
}
