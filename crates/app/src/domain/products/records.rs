//! Product Records

use jiff::Timestamp;

use crate::{assets::AssetKey, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub featured_image: Option<AssetKey>,
    pub inventory_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
