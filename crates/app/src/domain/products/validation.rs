//! Product validation rules.

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;

use crate::{
    assets::{AssetStoreError, ImageUpload},
    domain::products::data::{ProductDraft, ValidProduct},
};

/// The product attributes a client may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Description,
    FeaturedImage,
    InventoryCount,
}

impl ProductField {
    /// Every assignable attribute. Anything else a client submits is dropped.
    pub const PERMITTED: [Self; 4] = [
        Self::Name,
        Self::Description,
        Self::FeaturedImage,
        Self::InventoryCount,
    ];

    /// Parameter name of the attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::FeaturedImage => "featured_image",
            Self::InventoryCount => "inventory_count",
        }
    }

    /// Human readable attribute name used in error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::FeaturedImage => "Featured image",
            Self::InventoryCount => "Inventory count",
        }
    }
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ProductField,
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.field.label(), self.message)
    }
}

/// Every rule a product failed, in attribute order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: SmallVec<[FieldError; 2]>,
}

impl ValidationErrors {
    fn add(&mut self, field: ProductField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Errors attached to one attribute.
    pub fn on(&self, field: ProductField) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |error| error.field == field)
    }

    /// Full sentences such as `Name can't be blank`.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl ProductDraft {
    /// Check the draft (and any new featured image) against the product rules.
    ///
    /// # Errors
    ///
    /// Returns every failed rule when at least one fails.
    pub fn validate(&self, image: Option<&ImageUpload>) -> Result<ValidProduct, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.add(ProductField::Name, "can't be blank");
        }

        let inventory_count = match parse_inventory_count(&self.inventory_count) {
            Ok(count) => Some(count),
            Err(message) => {
                errors.add(ProductField::InventoryCount, message);
                None
            }
        };

        if let Some(image) = image {
            match image.format() {
                Ok(_) => {}
                Err(AssetStoreError::MissingContentType | AssetStoreError::Io(_)) => {
                    errors.add(ProductField::FeaturedImage, "must be an image");
                }
                Err(AssetStoreError::UnsupportedContentType(_)) => {
                    errors.add(
                        ProductField::FeaturedImage,
                        "must be a PNG, JPEG, GIF, WebP or AVIF image",
                    );
                }
            }
        }

        match inventory_count {
            Some(inventory_count) if errors.is_empty() => Ok(ValidProduct {
                name: self.name.clone(),
                description: self.description.clone(),
                inventory_count,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_inventory_count(value: &str) -> Result<u32, &'static str> {
    let value = value.trim();

    if value.is_empty() {
        return Err("is not a number");
    }

    let count: i64 = value.parse().map_err(|_ignored| {
        if value.parse::<f64>().is_ok() {
            "must be an integer"
        } else {
            "is not a number"
        }
    })?;

    if count < 0 {
        return Err("must be greater than or equal to 0");
    }

    u32::try_from(count).map_err(|_ignored| "is too large")
}
