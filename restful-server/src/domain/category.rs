use crate::domain::validation::{require, sanitize};
use crate::domain::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
}

impl CategoryForm {
    pub fn prepare(self) -> Self {
        Self {
            name: sanitize(&self.name),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require(&self.name, "Required Name")
    }
}
