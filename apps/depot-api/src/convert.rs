//! Conversions between wire messages and entities.
//!
//! Inbound conversion is where untrusted identifiers are parsed, so every
//! failure here is a [`ValidationError`]. Outbound conversion cannot fail.

use chrono::{DateTime, Utc};
use depot_core::error::ValidationResult;
use depot_core::validation::{parse_id, parse_optional_id, validate_price};
use depot_core::{
    Category, EntityId, InventoryItem, MovementType, Product, StockMovement, Supplier,
    ValidationError, Warehouse,
};

use crate::proto;

/// How the `id` field of an inbound entity payload is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadId {
    /// Create: the server assigns the id, whatever the client sent.
    Ignored,
    /// Update: the id must parse.
    Required,
}

impl PayloadId {
    fn resolve(self, raw: &str) -> ValidationResult<EntityId> {
        match self {
            PayloadId::Ignored => Ok(EntityId::nil()),
            PayloadId::Required => parse_id("id", raw),
        }
    }
}

// =============================================================================
// Wire -> Entity
// =============================================================================

pub fn category_from_proto(msg: proto::Category, id: PayloadId) -> ValidationResult<Category> {
    Ok(Category {
        id: id.resolve(&msg.id)?,
        name: msg.name,
        description: msg.description,
    })
}

pub fn product_from_proto(msg: proto::Product, id: PayloadId) -> ValidationResult<Product> {
    validate_price(msg.price)?;

    Ok(Product {
        id: id.resolve(&msg.id)?,
        category_id: parse_id("category_id", &msg.category_id)?,
        name: msg.name,
        description: msg.description,
        price: msg.price,
        sku: msg.sku,
    })
}

pub fn warehouse_from_proto(msg: proto::Warehouse, id: PayloadId) -> ValidationResult<Warehouse> {
    Ok(Warehouse {
        id: id.resolve(&msg.id)?,
        name: msg.name,
        location: msg.location,
    })
}

pub fn supplier_from_proto(msg: proto::Supplier, id: PayloadId) -> ValidationResult<Supplier> {
    Ok(Supplier {
        id: id.resolve(&msg.id)?,
        name: msg.name,
        contact_info: msg.contact_info,
    })
}

pub fn inventory_item_from_proto(
    msg: proto::InventoryItem,
    id: PayloadId,
) -> ValidationResult<InventoryItem> {
    Ok(InventoryItem {
        id: id.resolve(&msg.id)?,
        product_id: parse_id("product_id", &msg.product_id)?,
        warehouse_id: parse_id("warehouse_id", &msg.warehouse_id)?,
        quantity: msg.quantity,
        reorder_level: msg.reorder_level,
        reorder_quantity: msg.reorder_quantity,
    })
}

/// Empty warehouse ids mean "none".
pub fn stock_movement_from_proto(
    msg: proto::StockMovement,
    id: PayloadId,
) -> ValidationResult<StockMovement> {
    Ok(StockMovement {
        id: id.resolve(&msg.id)?,
        inventory_item_id: parse_id("inventory_item_id", &msg.inventory_item_id)?,
        movement_type: MovementType::try_from(msg.r#type)?,
        quantity: msg.quantity,
        timestamp: timestamp_from_proto(msg.date)?,
        source_warehouse_id: parse_optional_id("source_warehouse_id", &msg.source_warehouse_id)?,
        destination_warehouse_id: parse_optional_id(
            "destination_warehouse_id",
            &msg.destination_warehouse_id,
        )?,
    })
}

fn timestamp_from_proto(ts: Option<prost_types::Timestamp>) -> ValidationResult<DateTime<Utc>> {
    let ts = ts.ok_or_else(|| ValidationError::Required {
        field: "date".to_string(),
    })?;

    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| ValidationError::invalid_format("date", "negative nanos"))?;

    DateTime::from_timestamp(ts.seconds, nanos)
        .ok_or_else(|| ValidationError::invalid_format("date", "out of range"))
}

// =============================================================================
// Entity -> Wire
// =============================================================================

impl From<Category> for proto::Category {
    fn from(category: Category) -> Self {
        proto::Category {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
        }
    }
}

impl From<Product> for proto::Product {
    fn from(product: Product) -> Self {
        proto::Product {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            category_id: product.category_id.to_string(),
            price: product.price,
            sku: product.sku,
        }
    }
}

impl From<Warehouse> for proto::Warehouse {
    fn from(warehouse: Warehouse) -> Self {
        proto::Warehouse {
            id: warehouse.id.to_string(),
            name: warehouse.name,
            location: warehouse.location,
        }
    }
}

impl From<Supplier> for proto::Supplier {
    fn from(supplier: Supplier) -> Self {
        proto::Supplier {
            id: supplier.id.to_string(),
            name: supplier.name,
            contact_info: supplier.contact_info,
        }
    }
}

impl From<InventoryItem> for proto::InventoryItem {
    fn from(item: InventoryItem) -> Self {
        proto::InventoryItem {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            warehouse_id: item.warehouse_id.to_string(),
            quantity: item.quantity,
            reorder_level: item.reorder_level,
            reorder_quantity: item.reorder_quantity,
        }
    }
}

impl From<StockMovement> for proto::StockMovement {
    fn from(movement: StockMovement) -> Self {
        proto::StockMovement {
            id: movement.id.to_string(),
            inventory_item_id: movement.inventory_item_id.to_string(),
            r#type: movement.movement_type.as_i32(),
            quantity: movement.quantity,
            date: Some(prost_types::Timestamp {
                seconds: movement.timestamp.timestamp(),
                nanos: movement.timestamp.timestamp_subsec_nanos() as i32,
            }),
            source_warehouse_id: movement
                .source_warehouse_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            destination_warehouse_id: movement
                .destination_warehouse_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use depot_core::new_id;

    fn wire_movement() -> proto::StockMovement {
        proto::StockMovement {
            id: String::new(),
            inventory_item_id: new_id().to_string(),
            r#type: proto::StockMovementType::Addition as i32,
            quantity: 12,
            date: Some(prost_types::Timestamp {
                seconds: 1_700_000_000,
                nanos: 500,
            }),
            source_warehouse_id: String::new(),
            destination_warehouse_id: new_id().to_string(),
        }
    }

    #[test]
    fn test_wire_enum_matches_discriminants() {
        assert_eq!(
            proto::StockMovementType::Addition as i32,
            MovementType::Addition.as_i32()
        );
        assert_eq!(
            proto::StockMovementType::Removal as i32,
            MovementType::Removal.as_i32()
        );
        assert_eq!(
            proto::StockMovementType::Transfer as i32,
            MovementType::Transfer.as_i32()
        );
    }

    #[test]
    fn test_create_ignores_payload_id() {
        let msg = proto::Category {
            id: "whatever".to_string(),
            name: "Tools".to_string(),
            description: String::new(),
        };

        let category = category_from_proto(msg, PayloadId::Ignored).unwrap();

        assert!(category.id.is_nil());
    }

    #[test]
    fn test_update_requires_payload_id() {
        let msg = proto::Warehouse {
            id: String::new(),
            name: "North".to_string(),
            location: "Oslo".to_string(),
        };

        assert_eq!(
            warehouse_from_proto(msg, PayloadId::Required),
            Err(ValidationError::Required {
                field: "id".to_string()
            })
        );
    }

    #[test]
    fn test_bad_reference_names_field() {
        let msg = proto::InventoryItem {
            id: String::new(),
            product_id: new_id().to_string(),
            warehouse_id: "north".to_string(),
            quantity: 1,
            reorder_level: 0,
            reorder_quantity: 0,
        };

        match inventory_item_from_proto(msg, PayloadId::Ignored) {
            Err(ValidationError::InvalidFormat { field, .. }) => assert_eq!(field, "warehouse_id"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let msg = proto::Product {
            id: String::new(),
            name: "Widget".to_string(),
            description: String::new(),
            category_id: new_id().to_string(),
            price: f64::NAN,
            sku: "W-1".to_string(),
        };

        assert_eq!(
            product_from_proto(msg, PayloadId::Ignored),
            Err(ValidationError::invalid_format("price", "must be finite"))
        );
    }

    #[test]
    fn test_stock_movement_empty_source_is_none() {
        let movement = stock_movement_from_proto(wire_movement(), PayloadId::Ignored).unwrap();

        assert_eq!(movement.source_warehouse_id, None);
        assert!(movement.destination_warehouse_id.is_some());
        assert_eq!(
            movement.timestamp,
            Utc.timestamp_opt(1_700_000_000, 500).unwrap()
        );
    }

    #[test]
    fn test_stock_movement_rejects_unknown_type_and_missing_date() {
        let mut bad_type = wire_movement();
        bad_type.r#type = 9;
        assert!(matches!(
            stock_movement_from_proto(bad_type, PayloadId::Ignored),
            Err(ValidationError::NotAllowed { .. })
        ));

        let mut no_date = wire_movement();
        no_date.date = None;
        assert_eq!(
            stock_movement_from_proto(no_date, PayloadId::Ignored),
            Err(ValidationError::Required {
                field: "date".to_string()
            })
        );
    }

    #[test]
    fn test_outbound_stock_movement_leaves_absent_ids_empty() {
        let movement = StockMovement {
            id: new_id(),
            inventory_item_id: new_id(),
            movement_type: MovementType::Removal,
            quantity: 2,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            source_warehouse_id: Some(new_id()),
            destination_warehouse_id: None,
        };

        let wire = proto::StockMovement::from(movement.clone());

        assert_eq!(wire.destination_warehouse_id, "");
        assert_eq!(wire.r#type, proto::StockMovementType::Removal as i32);
        assert_eq!(
            stock_movement_from_proto(wire, PayloadId::Required).unwrap(),
            movement
        );
    }
}
