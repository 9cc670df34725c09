//! Category type for product organization.

use crate::ids::CategoryId;
use kiosk_store::Entity;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

impl Category {
    /// Create a new category with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
        }
    }
}

impl Entity for Category {
    const KIND: &'static str = "Category";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_gets_fresh_id() {
        let a = Category::new("Teas");
        let b = Category::new("Teas");
        assert_ne!(a.id, b.id);
    }
}
