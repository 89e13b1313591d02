use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::inventory::handlers;
use crate::features::inventory::services::InventoryService;

pub fn routes(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/api/inventory", post(handlers::add_item))
        .with_state(service)
}

/// Inventory administration, nested under `/api/admin`
pub fn admin_routes(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/inventory", get(handlers::list_items))
        .route("/inventory/export", get(handlers::export_items))
        .route(
            "/inventory/{id}",
            patch(handlers::update_item).delete(handlers::delete_item),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::inventory::repositories::MemoryInventoryRepository;
    use crate::shared::test_helpers::{admin_user, inventory_user, manager_user, with_user};

    fn server(service: &Arc<InventoryService>, user: AuthenticatedUser) -> TestServer {
        let app = routes(service.clone()).nest("/api/admin", admin_routes(service.clone()));
        TestServer::new(with_user(app, user)).unwrap()
    }

    #[tokio::test]
    async fn test_worker_adds_admin_searches_and_patches() {
        let service = Arc::new(InventoryService::new(Arc::new(
            MemoryInventoryRepository::new(),
        )));
        let worker = server(&service, inventory_user());
        let admin = server(&service, admin_user());

        let response = worker
            .post("/api/inventory")
            .json(&json!({ "item_name": "Tube IRL 20", "quantity": 40, "location": "Dépôt" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let found: Value = admin
            .get("/api/admin/inventory")
            .add_query_param("search", "dépôt")
            .await
            .json();
        assert_eq!(found["meta"]["total"], 1);

        let patched: Value = admin
            .patch(&format!("/api/admin/inventory/{}", id))
            .json(&json!({ "quantity": 35, "location": null }))
            .await
            .json();
        assert_eq!(patched["data"]["quantity"], 35);
        assert_eq!(patched["data"]["location"], Value::Null);
        assert_eq!(patched["data"]["item_name"], "Tube IRL 20");
    }

    #[tokio::test]
    async fn test_roles_are_enforced() {
        let service = Arc::new(InventoryService::new(Arc::new(
            MemoryInventoryRepository::new(),
        )));
        let manager = server(&service, manager_user());
        let worker = server(&service, inventory_user());

        manager
            .post("/api/inventory")
            .json(&json!({ "item_name": "Vis", "quantity": 1 }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        worker
            .get("/api/admin/inventory")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        worker
            .post("/api/inventory")
            .json(&json!({ "item_name": "Vis", "quantity": -2 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_exports_inventory_sheet() {
        let service = Arc::new(InventoryService::new(Arc::new(
            MemoryInventoryRepository::new(),
        )));
        let worker = server(&service, inventory_user());
        let admin = server(&service, admin_user());

        worker
            .post("/api/inventory")
            .json(&json!({ "item_name": "Tube IRL 20", "quantity": 40, "location": "Dépôt" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = admin.get("/api/admin/inventory/export").await;
        response.assert_status_ok();
        assert_eq!(
            response.header(axum::http::header::CONTENT_TYPE),
            "text/csv; charset=utf-8"
        );
        let text = response.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Article;Quantité;Emplacement;Catégorie;Dernière mise à jour;Notes"
        );
        assert!(lines[1].starts_with("Tube IRL 20;40;Dépôt;;"));
        assert_eq!(lines.len(), 2);

        worker
            .get("/api/admin/inventory/export")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
