//! Product type.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use kiosk_store::Entity;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price. Non-negative.
    pub price: Money,
    /// Image reference for listings.
    pub image: String,
    /// Category this product belongs to. Soft reference: the category may
    /// be deleted independently, and nothing cascades.
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Create a new product with a fresh id.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category_id: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Assign the product to a category.
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}
