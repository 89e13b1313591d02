use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::features::materials::handlers;
use crate::features::materials::services::MaterialService;

pub fn routes(service: Arc<MaterialService>) -> Router {
    Router::new()
        .route(
            "/api/manager/materials",
            get(handlers::list_recent).post(handlers::create_request),
        )
        .with_state(service)
}

/// Material administration, nested under `/api/admin`
pub fn admin_routes(service: Arc<MaterialService>) -> Router {
    Router::new()
        .route("/materials", get(handlers::list_all))
        .route("/materials/{id}", delete(handlers::delete_request))
        .route("/materials/{id}/fulfilled", put(handlers::set_fulfilled))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::materials::repositories::MemoryMaterialRepository;
    use crate::shared::test_helpers::{admin_user, inventory_user, manager_user, with_user};

    fn server(service: &Arc<MaterialService>, user: AuthenticatedUser) -> TestServer {
        let app = routes(service.clone()).nest("/api/admin", admin_routes(service.clone()));
        TestServer::new(with_user(app, user)).unwrap()
    }

    #[tokio::test]
    async fn test_manager_requests_admin_fulfills() {
        let service = Arc::new(MaterialService::new(Arc::new(MemoryMaterialRepository::new())));
        let manager = server(&service, manager_user());
        let admin = server(&service, admin_user());

        let response = manager
            .post("/api/manager/materials")
            .json(&json!({ "material_name": "Sac de ciment", "quantity": 12 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let body: Value = admin
            .put(&format!("/api/admin/materials/{}/fulfilled", id))
            .json(&json!({ "fulfilled": true }))
            .await
            .json();
        assert_eq!(body["data"]["fulfilled"], true);

        let recent: Value = manager.get("/api/manager/materials").await.json();
        assert_eq!(recent["data"][0]["fulfilled"], true);
    }

    #[tokio::test]
    async fn test_quantity_and_roles() {
        let service = Arc::new(MaterialService::new(Arc::new(MemoryMaterialRepository::new())));
        let manager = server(&service, manager_user());
        let inventory = server(&service, inventory_user());

        manager
            .post("/api/manager/materials")
            .json(&json!({ "material_name": "Vis", "quantity": 0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        inventory
            .get("/api/manager/materials")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        manager
            .get("/api/admin/materials")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
