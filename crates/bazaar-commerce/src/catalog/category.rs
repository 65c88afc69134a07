//! Category types for product navigation.

use crate::ids::{CategoryId, SubCategoryId};
use serde::{Deserialize, Serialize};

/// A top-level product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category image URL, when the backend provides one.
    pub image_url: Option<String>,
    /// Subcategories shown under this category in navigation.
    pub subcategories: Vec<SubCategory>,
}

impl Category {
    /// Create a category without subcategories.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            subcategories: Vec::new(),
        }
    }

    /// Attach subcategories.
    pub fn with_subcategories(mut self, subcategories: Vec<SubCategory>) -> Self {
        self.subcategories = subcategories;
        self
    }

    /// Look up a subcategory by id.
    pub fn subcategory(&self, id: &SubCategoryId) -> Option<&SubCategory> {
        self.subcategories.iter().find(|s| &s.id == id)
    }

    /// Whether this category has anything to expand in navigation.
    pub fn has_subcategories(&self) -> bool {
        !self.subcategories.is_empty()
    }
}

/// A subcategory owned by a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    /// Unique subcategory identifier.
    pub id: SubCategoryId,
    /// Subcategory name.
    pub name: String,
}

impl SubCategory {
    /// Create a subcategory.
    pub fn new(id: impl Into<SubCategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
