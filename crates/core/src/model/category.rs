use serde::{Deserialize, Serialize};

use crate::model::CategoryId;

/// Entry of the upstream category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
        }
    }
}
