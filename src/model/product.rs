use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    Sellable,
    Inbound,
    Unfulfillable,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Sellable,
        ProductStatus::Inbound,
        ProductStatus::Unfulfillable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Sellable => "Sellable",
            ProductStatus::Inbound => "Inbound",
            ProductStatus::Unfulfillable => "Unfulfillable",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive variant name.
impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown product status '{}'", s))
    }
}

/// A persisted product. `product_id` is assigned by the store and never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub status: Option<ProductStatus>,
    pub fulfillment_center: Option<String>,
    pub quantity: Option<i32>,
    pub value: Option<f64>,
}

/// Create/update payload: every product field except the id.
/// A `productId` key in the request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub status: Option<ProductStatus>,
    pub fulfillment_center: Option<String>,
    pub quantity: Option<i32>,
    pub value: Option<f64>,
}

impl ProductInput {
    /// Full replace: every field comes from the payload, nulls included; only the id is kept.
    pub fn into_product(self, product_id: String) -> Product {
        Product {
            product_id,
            status: self.status,
            fulfillment_center: self.fulfillment_center,
            quantity: self.quantity,
            value: self.value,
        }
    }
}
