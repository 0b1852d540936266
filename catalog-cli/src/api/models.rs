//! Request and response bodies of the catalog API

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Remote product identifier. The API returns it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(i) => ProductId(i.to_string()),
            RawId::Float(f) => ProductId(f.to_string()),
            RawId::Text(s) => ProductId(s),
        })
    }
}

/// Common response wrapper: application code, message and payload.
/// Absent fields deserialize to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub result: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub product_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    #[serde(default)]
    pub id: Option<ProductId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<RemoteProduct>,
}

/// Search hit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteProduct {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
}

/// Full product update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub basic_info: BasicInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    pub pricing: Pricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_info: Option<PhysicalInfo>,
    pub custom_fields: Vec<CustomFieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_requirements: Option<Vec<serde_json::Value>>,
    pub inventory_management: InventoryManagement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub price: Price,
    pub type_price: String,
}

impl Pricing {
    /// List and sale price set to the same amount
    pub fn fixed(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            price: Price {
                list_price: amount,
                sale_price: amount,
                currency: currency.into(),
            },
            type_price: "HAS_PRICE".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub list_price: f64,
    pub sale_price: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalInfo {
    pub sku: String,
    pub barcode: String,
    pub shipment_config: ShipmentDimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDimensions {
    pub width_cm: u32,
    pub height_cm: u32,
    pub length_cm: u32,
    pub weight_gram: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomFieldValue {
    pub id: u32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryManagement {
    pub quantity: i64,
}

/// Outcome of an update call; callers decide what counts as success
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResponse {
    pub status: u16,
    /// Application code from the body, if the body was JSON and carried one
    pub code: Option<i64>,
    pub body: String,
}
