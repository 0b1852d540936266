//! Request bodies built from catalog rows and diff entries

use chrono::{DateTime, Utc};

use crate::api::models::{
    BasicInfo, CreateProductRequest, CustomFieldValue, InventoryManagement, PhysicalInfo, Pricing,
    ProductId, ShipmentDimensions, UpdateProductRequest,
};
use crate::catalog::aliases;
use crate::catalog::diff::DiffEntry;
use crate::catalog::record::{CatalogRecord, parse_price, parse_quantity};
use crate::config::{Config, CustomFieldSlot, ProductConfig, SlotField};

/// Digits of the unix time kept in a generated barcode
const BARCODE_TIME_DIGITS: usize = 9;

/// Values of one workbook row after alias lookup and normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFields {
    pub name: String,
    pub price: f64,
    pub stock_hn: i64,
    pub stock_sg: i64,
    pub brand: String,
    pub category: String,
    pub warranty: String,
}

impl ImportFields {
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            name: record.name(),
            price: record.price(aliases::PRICE),
            stock_hn: record.quantity(aliases::STOCK_HN),
            stock_sg: record.quantity(aliases::STOCK_SG),
            brand: record.text(aliases::BRAND),
            category: record.text(aliases::CATEGORY),
            warranty: record.text(aliases::WARRANTY),
        }
    }

    pub fn total_quantity(&self) -> i64 {
        self.stock_hn + self.stock_sg
    }

    fn slot_value(&self, field: SlotField) -> String {
        match field {
            SlotField::Brand => self.brand.clone(),
            SlotField::Category => self.category.clone(),
            SlotField::StockHn => self.stock_hn.to_string(),
            SlotField::StockSg => self.stock_sg.to_string(),
            SlotField::Warranty => self.warranty.clone(),
        }
    }
}

/// Minimal create body: the sheet name doubles as description
pub fn create_request(name: &str, sheet: &str, product: &ProductConfig) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: sheet.to_string(),
        product_type: product.product_type.clone(),
    }
}

/// Full details for a freshly created product
pub fn import_update_request(
    id: &ProductId,
    fields: &ImportFields,
    sheet: &str,
    config: &Config,
    now: DateTime<Utc>,
) -> UpdateProductRequest {
    let product = &config.product;
    let shipment = &product.shipment;

    UpdateProductRequest {
        basic_info: BasicInfo {
            name: fields.name.clone(),
            description: sheet.to_string(),
            tags: vec![sheet.to_string()],
        },
        urls: None,
        pricing: Pricing::fixed(fields.price, product.currency.clone()),
        physical_info: Some(PhysicalInfo {
            sku: format!("{}{}", product.sku_prefix, id),
            barcode: barcode(&product.barcode_prefix, now),
            shipment_config: ShipmentDimensions {
                width_cm: shipment.width_cm,
                height_cm: shipment.height_cm,
                length_cm: shipment.length_cm,
                weight_gram: shipment.weight_gram,
            },
        }),
        custom_fields: config
            .custom_fields
            .iter()
            .map(|slot| CustomFieldValue {
                id: slot.id,
                value: fields.slot_value(slot.field),
            })
            .collect(),
        input_requirements: None,
        inventory_management: InventoryManagement {
            quantity: fields.total_quantity(),
        },
    }
}

/// Update body replayed for a changed diff entry.
///
/// Slots flagged `clear_on_sync` are sent empty; inventory is the new HN
/// count only.
pub fn sync_update_request(entry: &DiffEntry, config: &Config) -> UpdateProductRequest {
    UpdateProductRequest {
        basic_info: BasicInfo {
            name: entry.name.clone(),
            description: entry.name.clone(),
            tags: Vec::new(),
        },
        urls: Some(Vec::new()),
        pricing: Pricing::fixed(
            parse_price(Some(entry.price.new.as_str())),
            config.product.currency.clone(),
        ),
        physical_info: None,
        custom_fields: cleared_slots(&config.custom_fields),
        input_requirements: Some(Vec::new()),
        inventory_management: InventoryManagement {
            quantity: parse_quantity(Some(entry.stock_hn.new.as_str())),
        },
    }
}

fn cleared_slots(slots: &[CustomFieldSlot]) -> Vec<CustomFieldValue> {
    slots
        .iter()
        .filter(|slot| slot.clear_on_sync)
        .map(|slot| CustomFieldValue {
            id: slot.id,
            value: String::new(),
        })
        .collect()
}

/// Prefix followed by the last digits of the unix time
pub fn barcode(prefix: &str, now: DateTime<Utc>) -> String {
    let secs = now.timestamp().to_string();
    let tail = &secs[secs.len().saturating_sub(BARCODE_TIME_DIGITS)..];
    format!("{}{}", prefix, tail)
}
