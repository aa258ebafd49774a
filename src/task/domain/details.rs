//! Title and description shared by tasks and projects.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Maximum title length, matching the `VARCHAR(255)` columns.
const MAX_TITLE_LENGTH: usize = 255;

/// Validated title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    title: String,
    description: String,
}

impl Details {
    /// Creates validated details. Both values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::TitleTooLong`], or
    /// [`TaskDomainError::EmptyDescription`].
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed_title = raw_title.trim();
        if trimmed_title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if trimmed_title.chars().count() > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
            });
        }

        let raw_description = description.into();
        let trimmed_description = raw_description.trim();
        if trimmed_description.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }

        Ok(Self {
            title: trimmed_title.to_owned(),
            description: trimmed_description.to_owned(),
        })
    }

    /// Reconstructs details from persisted storage without validation.
    #[must_use]
    pub const fn from_persisted(title: String, description: String) -> Self {
        Self { title, description }
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
