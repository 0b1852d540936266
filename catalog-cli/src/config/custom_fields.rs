//! Custom-field slot table
//!
//! The remote schema exposes product attributes as numbered custom-field
//! slots. Which slot holds which attribute was worked out against one
//! deployment, so the table is configuration rather than literals.

use std::collections::HashSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Catalog attribute stored in a custom-field slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotField {
    Brand,
    Category,
    StockHn,
    StockSg,
    Warranty,
}

impl SlotField {
    pub fn label(&self) -> &'static str {
        match self {
            SlotField::Brand => "brand",
            SlotField::Category => "category",
            SlotField::StockHn => "stock_hn",
            SlotField::StockSg => "stock_sg",
            SlotField::Warranty => "warranty",
        }
    }
}

/// One slot id → attribute binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldSlot {
    pub id: u32,
    pub field: SlotField,
    /// Sent with an empty value when replaying a diff
    #[serde(default)]
    pub clear_on_sync: bool,
}

impl CustomFieldSlot {
    pub fn new(id: u32, field: SlotField, clear_on_sync: bool) -> Self {
        Self {
            id,
            field,
            clear_on_sync,
        }
    }
}

/// Slot table of the production deployment.
///
/// 220 and 136 were observed swapped at one point (brand showed the
/// warranty value), the order below is the corrected one.
pub fn default_custom_fields() -> Vec<CustomFieldSlot> {
    vec![
        CustomFieldSlot::new(220, SlotField::Warranty, false),
        CustomFieldSlot::new(216, SlotField::Category, true),
        CustomFieldSlot::new(215, SlotField::StockHn, true),
        CustomFieldSlot::new(212, SlotField::StockSg, true),
        CustomFieldSlot::new(136, SlotField::Brand, true),
    ]
}

/// Reject tables that bind the same slot id twice
pub fn validate_slots(slots: &[CustomFieldSlot]) -> Result<()> {
    let mut seen = HashSet::new();
    for slot in slots {
        if !seen.insert(slot.id) {
            anyhow::bail!(
                "custom field slot {} is mapped more than once ({})",
                slot.id,
                slot.field.label()
            );
        }
    }
    Ok(())
}
