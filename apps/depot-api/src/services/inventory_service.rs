//! Inventory gRPC service implementation.
//!
//! Each RPC does the same three things:
//!
//! ```text
//! wire request ──► parse ids / unwrap payload ──► depot-service ──► wire reply
//!                  (InvalidArgument on failure)   (NotFound, AlreadyExists,
//!                                                  Internal)
//! ```

use depot_core::validation::parse_id;
use depot_core::EntityId;
use depot_service::InventoryServices;
use tonic::{Request, Response, Status};

use crate::convert::{
    category_from_proto, inventory_item_from_proto, product_from_proto,
    stock_movement_from_proto, supplier_from_proto, warehouse_from_proto, PayloadId,
};
use crate::error::ApiError;
use crate::proto::{
    inventory_service_server::InventoryService, Category, CreateCategoryRequest,
    CreateInventoryItemRequest, CreateProductRequest, CreateStockMovementRequest,
    CreateSupplierRequest, CreateWarehouseRequest, DeleteCategoryRequest,
    DeleteInventoryItemRequest, DeleteProductRequest, DeleteStockMovementRequest,
    DeleteSupplierRequest, DeleteWarehouseRequest, GetCategoryRequest, GetInventoryItemRequest,
    GetProductRequest, GetStockMovementRequest, GetSupplierRequest, GetWarehouseRequest,
    InventoryItem, ListCategoriesRequest, ListCategoriesResponse, ListInventoryItemsRequest,
    ListInventoryItemsResponse, ListProductsRequest, ListProductsResponse,
    ListStockMovementsRequest, ListStockMovementsResponse, ListSuppliersRequest,
    ListSuppliersResponse, ListWarehousesRequest, ListWarehousesResponse, Product,
    StockMovement, Supplier, UpdateCategoryRequest, UpdateInventoryItemRequest,
    UpdateProductRequest, UpdateStockMovementRequest, UpdateSupplierRequest,
    UpdateWarehouseRequest, Warehouse,
};

/// Inventory service implementation.
#[derive(Clone)]
pub struct InventoryServiceImpl {
    services: InventoryServices,
}

impl InventoryServiceImpl {
    pub fn new(services: InventoryServices) -> Self {
        InventoryServiceImpl { services }
    }
}

fn request_id(raw: &str) -> Result<EntityId, ApiError> {
    Ok(parse_id("id", raw)?)
}

fn payload<T>(msg: Option<T>, field: &str) -> Result<T, ApiError> {
    msg.ok_or_else(|| ApiError::missing(field))
}

#[tonic::async_trait]
impl InventoryService for InventoryServiceImpl {
    // =========================================================================
    // Products
    // =========================================================================

    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let msg = payload(request.into_inner().product, "product")?;
        let product = product_from_proto(msg, PayloadId::Ignored).map_err(ApiError::from)?;

        let created = self
            .services
            .products
            .create(product)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(created.into()))
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let id = request_id(&request.into_inner().id)?;

        let product = self.services.products.get(id).await.map_err(ApiError::from)?;

        Ok(Response::new(product.into()))
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let msg = payload(request.into_inner().product, "product")?;
        let product = product_from_proto(msg, PayloadId::Required).map_err(ApiError::from)?;

        let updated = self
            .services
            .products
            .update(product)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(updated.into()))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<()>, Status> {
        let id = request_id(&request.into_inner().id)?;

        self.services
            .products
            .delete(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(()))
    }

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let products = self.services.products.list().await.map_err(ApiError::from)?;

        Ok(Response::new(ListProductsResponse {
            products: products.into_iter().map(Into::into).collect(),
        }))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    async fn create_category(
        &self,
        request: Request<CreateCategoryRequest>,
    ) -> Result<Response<Category>, Status> {
        let msg = payload(request.into_inner().category, "category")?;
        let category = category_from_proto(msg, PayloadId::Ignored).map_err(ApiError::from)?;

        let created = self
            .services
            .categories
            .create(category)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(created.into()))
    }

    async fn get_category(
        &self,
        request: Request<GetCategoryRequest>,
    ) -> Result<Response<Category>, Status> {
        let id = request_id(&request.into_inner().id)?;

        let category = self
            .services
            .categories
            .get(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(category.into()))
    }

    async fn update_category(
        &self,
        request: Request<UpdateCategoryRequest>,
    ) -> Result<Response<Category>, Status> {
        let msg = payload(request.into_inner().category, "category")?;
        let category = category_from_proto(msg, PayloadId::Required).map_err(ApiError::from)?;

        let updated = self
            .services
            .categories
            .update(category)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(updated.into()))
    }

    async fn delete_category(
        &self,
        request: Request<DeleteCategoryRequest>,
    ) -> Result<Response<()>, Status> {
        let id = request_id(&request.into_inner().id)?;

        self.services
            .categories
            .delete(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(()))
    }

    async fn list_categories(
        &self,
        _request: Request<ListCategoriesRequest>,
    ) -> Result<Response<ListCategoriesResponse>, Status> {
        let categories = self
            .services
            .categories
            .list()
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(ListCategoriesResponse {
            categories: categories.into_iter().map(Into::into).collect(),
        }))
    }

    // =========================================================================
    // Warehouses
    // =========================================================================

    async fn create_warehouse(
        &self,
        request: Request<CreateWarehouseRequest>,
    ) -> Result<Response<Warehouse>, Status> {
        let msg = payload(request.into_inner().warehouse, "warehouse")?;
        let warehouse = warehouse_from_proto(msg, PayloadId::Ignored).map_err(ApiError::from)?;

        let created = self
            .services
            .warehouses
            .create(warehouse)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(created.into()))
    }

    async fn get_warehouse(
        &self,
        request: Request<GetWarehouseRequest>,
    ) -> Result<Response<Warehouse>, Status> {
        let id = request_id(&request.into_inner().id)?;

        let warehouse = self
            .services
            .warehouses
            .get(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(warehouse.into()))
    }

    async fn update_warehouse(
        &self,
        request: Request<UpdateWarehouseRequest>,
    ) -> Result<Response<Warehouse>, Status> {
        let msg = payload(request.into_inner().warehouse, "warehouse")?;
        let warehouse = warehouse_from_proto(msg, PayloadId::Required).map_err(ApiError::from)?;

        let updated = self
            .services
            .warehouses
            .update(warehouse)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(updated.into()))
    }

    async fn delete_warehouse(
        &self,
        request: Request<DeleteWarehouseRequest>,
    ) -> Result<Response<()>, Status> {
        let id = request_id(&request.into_inner().id)?;

        self.services
            .warehouses
            .delete(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(()))
    }

    async fn list_warehouses(
        &self,
        _request: Request<ListWarehousesRequest>,
    ) -> Result<Response<ListWarehousesResponse>, Status> {
        let warehouses = self
            .services
            .warehouses
            .list()
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(ListWarehousesResponse {
            warehouses: warehouses.into_iter().map(Into::into).collect(),
        }))
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    async fn create_supplier(
        &self,
        request: Request<CreateSupplierRequest>,
    ) -> Result<Response<Supplier>, Status> {
        let msg = payload(request.into_inner().supplier, "supplier")?;
        let supplier = supplier_from_proto(msg, PayloadId::Ignored).map_err(ApiError::from)?;

        let created = self
            .services
            .suppliers
            .create(supplier)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(created.into()))
    }

    async fn get_supplier(
        &self,
        request: Request<GetSupplierRequest>,
    ) -> Result<Response<Supplier>, Status> {
        let id = request_id(&request.into_inner().id)?;

        let supplier = self
            .services
            .suppliers
            .get(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(supplier.into()))
    }

    async fn update_supplier(
        &self,
        request: Request<UpdateSupplierRequest>,
    ) -> Result<Response<Supplier>, Status> {
        let msg = payload(request.into_inner().supplier, "supplier")?;
        let supplier = supplier_from_proto(msg, PayloadId::Required).map_err(ApiError::from)?;

        let updated = self
            .services
            .suppliers
            .update(supplier)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(updated.into()))
    }

    async fn delete_supplier(
        &self,
        request: Request<DeleteSupplierRequest>,
    ) -> Result<Response<()>, Status> {
        let id = request_id(&request.into_inner().id)?;

        self.services
            .suppliers
            .delete(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(()))
    }

    async fn list_suppliers(
        &self,
        _request: Request<ListSuppliersRequest>,
    ) -> Result<Response<ListSuppliersResponse>, Status> {
        let suppliers = self
            .services
            .suppliers
            .list()
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(ListSuppliersResponse {
            suppliers: suppliers.into_iter().map(Into::into).collect(),
        }))
    }

    // =========================================================================
    // Inventory items
    // =========================================================================

    async fn create_inventory_item(
        &self,
        request: Request<CreateInventoryItemRequest>,
    ) -> Result<Response<InventoryItem>, Status> {
        let msg = payload(request.into_inner().inventory_item, "inventory_item")?;
        let item = inventory_item_from_proto(msg, PayloadId::Ignored).map_err(ApiError::from)?;

        let created = self
            .services
            .inventory_items
            .create(item)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(created.into()))
    }

    async fn get_inventory_item(
        &self,
        request: Request<GetInventoryItemRequest>,
    ) -> Result<Response<InventoryItem>, Status> {
        let id = request_id(&request.into_inner().id)?;

        let item = self
            .services
            .inventory_items
            .get(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(item.into()))
    }

    async fn update_inventory_item(
        &self,
        request: Request<UpdateInventoryItemRequest>,
    ) -> Result<Response<InventoryItem>, Status> {
        let msg = payload(request.into_inner().inventory_item, "inventory_item")?;
        let item = inventory_item_from_proto(msg, PayloadId::Required).map_err(ApiError::from)?;

        let updated = self
            .services
            .inventory_items
            .update(item)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(updated.into()))
    }

    async fn delete_inventory_item(
        &self,
        request: Request<DeleteInventoryItemRequest>,
    ) -> Result<Response<()>, Status> {
        let id = request_id(&request.into_inner().id)?;

        self.services
            .inventory_items
            .delete(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(()))
    }

    async fn list_inventory_items(
        &self,
        _request: Request<ListInventoryItemsRequest>,
    ) -> Result<Response<ListInventoryItemsResponse>, Status> {
        let items = self
            .services
            .inventory_items
            .list()
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(ListInventoryItemsResponse {
            inventory_items: items.into_iter().map(Into::into).collect(),
        }))
    }

    // =========================================================================
    // Stock movements
    // =========================================================================

    async fn create_stock_movement(
        &self,
        request: Request<CreateStockMovementRequest>,
    ) -> Result<Response<StockMovement>, Status> {
        let msg = payload(request.into_inner().stock_movement, "stock_movement")?;
        let movement = stock_movement_from_proto(msg, PayloadId::Ignored).map_err(ApiError::from)?;

        let created = self
            .services
            .stock_movements
            .create(movement)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(created.into()))
    }

    async fn get_stock_movement(
        &self,
        request: Request<GetStockMovementRequest>,
    ) -> Result<Response<StockMovement>, Status> {
        let id = request_id(&request.into_inner().id)?;

        let movement = self
            .services
            .stock_movements
            .get(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(movement.into()))
    }

    async fn update_stock_movement(
        &self,
        request: Request<UpdateStockMovementRequest>,
    ) -> Result<Response<StockMovement>, Status> {
        let msg = payload(request.into_inner().stock_movement, "stock_movement")?;
        let movement =
            stock_movement_from_proto(msg, PayloadId::Required).map_err(ApiError::from)?;

        let updated = self
            .services
            .stock_movements
            .update(movement)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(updated.into()))
    }

    async fn delete_stock_movement(
        &self,
        request: Request<DeleteStockMovementRequest>,
    ) -> Result<Response<()>, Status> {
        let id = request_id(&request.into_inner().id)?;

        self.services
            .stock_movements
            .delete(id)
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(()))
    }

    async fn list_stock_movements(
        &self,
        _request: Request<ListStockMovementsRequest>,
    ) -> Result<Response<ListStockMovementsResponse>, Status> {
        let movements = self
            .services
            .stock_movements
            .list()
            .await
            .map_err(ApiError::from)?;

        Ok(Response::new(ListStockMovementsResponse {
            stock_movements: movements.into_iter().map(Into::into).collect(),
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::StockMovementType;
    use depot_db::{Database, DbConfig};
    use tonic::Code;

    async fn service() -> (Database, InventoryServiceImpl) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = InventoryServiceImpl::new(InventoryServices::from_database(&db));
        (db, service)
    }

    fn category(name: &str) -> Category {
        Category {
            id: String::new(),
            name: name.to_string(),
            description: "desc".to_string(),
        }
    }

    async fn create_category(service: &InventoryServiceImpl, name: &str) -> Category {
        service
            .create_category(Request::new(CreateCategoryRequest {
                category: Some(category(name)),
            }))
            .await
            .unwrap()
            .into_inner()
    }

    #[tokio::test]
    async fn test_catalogue_scenario_over_the_wire() {
        let (_db, service) = service().await;

        let electronics = create_category(&service, "Electronics").await;

        let widget = service
            .create_product(Request::new(CreateProductRequest {
                product: Some(Product {
                    id: String::new(),
                    name: "Widget".to_string(),
                    description: String::new(),
                    category_id: electronics.id.clone(),
                    price: 9.5,
                    sku: "W-1".to_string(),
                }),
            }))
            .await
            .unwrap()
            .into_inner();

        let duplicate = service
            .create_product(Request::new(CreateProductRequest {
                product: Some(Product {
                    id: String::new(),
                    name: "Widget".to_string(),
                    description: String::new(),
                    category_id: electronics.id.clone(),
                    price: 1.0,
                    sku: "W-2".to_string(),
                }),
            }))
            .await
            .unwrap_err();
        assert_eq!(duplicate.code(), Code::AlreadyExists);
        assert_eq!(
            duplicate.message(),
            "product with the same SKU or name already exists"
        );

        let missing_warehouse = service
            .create_inventory_item(Request::new(CreateInventoryItemRequest {
                inventory_item: Some(InventoryItem {
                    id: String::new(),
                    product_id: widget.id.clone(),
                    warehouse_id: depot_core::new_id().to_string(),
                    quantity: 3,
                    reorder_level: 1,
                    reorder_quantity: 5,
                }),
            }))
            .await
            .unwrap_err();
        assert_eq!(missing_warehouse.code(), Code::NotFound);

        let categories = service
            .list_categories(Request::new(ListCategoriesRequest {}))
            .await
            .unwrap()
            .into_inner()
            .categories;
        assert_eq!(categories, vec![electronics]);
    }

    #[tokio::test]
    async fn test_get_with_malformed_id_is_invalid_argument() {
        let (_db, service) = service().await;

        let status = service
            .get_product(Request::new(GetProductRequest {
                id: "not-a-uuid".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_non_finite_price_is_invalid_argument() {
        let (_db, service) = service().await;
        let tools = create_category(&service, "Tools").await;

        let status = service
            .create_product(Request::new(CreateProductRequest {
                product: Some(Product {
                    id: String::new(),
                    name: "Hammer".to_string(),
                    description: String::new(),
                    category_id: tools.id,
                    price: f64::NAN,
                    sku: "HAM-1".to_string(),
                }),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);

        let products = service
            .list_products(Request::new(ListProductsRequest {}))
            .await
            .unwrap()
            .into_inner()
            .products;
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_missing_payload_is_invalid_argument() {
        let (_db, service) = service().await;

        let status = service
            .create_warehouse(Request::new(CreateWarehouseRequest { warehouse: None }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_update_returns_written_entity() {
        let (_db, service) = service().await;
        let mut created = create_category(&service, "Tools").await;

        created.description = "Hand tools".to_string();
        let updated = service
            .update_category(Request::new(UpdateCategoryRequest {
                category: Some(created.clone()),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_delete_semantics_differ_by_entity() {
        let (_db, service) = service().await;
        let unknown = depot_core::new_id().to_string();

        service
            .delete_product(Request::new(DeleteProductRequest {
                id: unknown.clone(),
            }))
            .await
            .unwrap();

        let status = service
            .delete_category(Request::new(DeleteCategoryRequest { id: unknown }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_stock_movement_round_trip() {
        let (_db, service) = service().await;

        let created = service
            .create_stock_movement(Request::new(CreateStockMovementRequest {
                stock_movement: Some(StockMovement {
                    id: String::new(),
                    inventory_item_id: depot_core::new_id().to_string(),
                    r#type: StockMovementType::Transfer as i32,
                    quantity: 7,
                    date: Some(prost_types::Timestamp {
                        seconds: 1_700_000_000,
                        nanos: 0,
                    }),
                    source_warehouse_id: depot_core::new_id().to_string(),
                    destination_warehouse_id: String::new(),
                }),
            }))
            .await
            .unwrap()
            .into_inner();

        let fetched = service
            .get_stock_movement(Request::new(GetStockMovementRequest {
                id: created.id.clone(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(fetched, created);
        assert_eq!(fetched.destination_warehouse_id, "");
    }

    #[tokio::test]
    async fn test_storage_fault_is_internal() {
        let (db, service) = service().await;
        db.close().await;

        let status = service
            .list_suppliers(Request::new(ListSuppliersRequest {}))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
    }
}
