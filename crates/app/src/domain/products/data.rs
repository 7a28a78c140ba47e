//! Products Data

use crate::{assets::ImageUpload, domain::products::records::ProductRecord};

/// Attribute values submitted for a product.
///
/// Only the permitted attributes exist here; a `None` leaves the attribute as
/// it was (blank for a new product).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub inventory_count: Option<String>,
    pub featured_image: Option<ImageUpload>,
}

/// Unvalidated product attributes, as shown in the product forms.
///
/// `inventory_count` stays textual so a rejected value can be shown back to
/// the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub inventory_count: String,
}

impl ProductDraft {
    /// Apply submitted changes on top of the current values.
    #[must_use]
    pub fn with_changes(mut self, changes: &ProductChanges) -> Self {
        if let Some(name) = &changes.name {
            name.clone_into(&mut self.name);
        }

        if let Some(description) = &changes.description {
            description.clone_into(&mut self.description);
        }

        if let Some(inventory_count) = &changes.inventory_count {
            inventory_count.clone_into(&mut self.inventory_count);
        }

        self
    }
}

impl From<&ProductRecord> for ProductDraft {
    fn from(product: &ProductRecord) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            inventory_count: product.inventory_count.to_string(),
        }
    }
}

/// Product attributes that passed validation and may be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    pub name: String,
    pub description: String,
    pub inventory_count: u32,
}
