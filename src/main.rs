mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::attendance::{
    routes as attendance_routes, AttendanceService, PgAttendanceRepository,
};
use crate::features::auth::{routes as auth_routes, AuthService, JwtValidator, TokenService};
use crate::features::companies::{routes as companies_routes, CompanyService, PgCompanyRepository};
use crate::features::damage_reports::{
    routes as damage_reports_routes, DamageReportService, PgDamageReportRepository,
};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::inventory::{
    routes as inventory_routes, InventoryService, PgInventoryRepository,
};
use crate::features::materials::{
    routes as materials_routes, MaterialService, PgMaterialRepository,
};
use crate::features::tasks::{
    routes as tasks_routes, PgTaskRepository, RotationCalculator, TaskService,
};
use crate::features::tickets::{routes as tickets_routes, PgTicketRepository, TicketService};
use crate::features::users::{routes as users_routes, AccountService, PgUserRepository};
use crate::modules::realtime::ChangeFeed;
use crate::modules::storage::{MinIOClient, ObjectStore};
use crate::shared::constants::CHANGE_FEED_CAPACITY;
use crate::shared::security::PasswordHasher;
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Accounts, lots and authentication
    let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    let account_service = Arc::new(AccountService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        hasher,
    ));
    if let Some(password) = config.app.bootstrap_admin_password.as_deref() {
        let created = account_service.bootstrap_staff_accounts(password).await?;
        tracing::info!("Staff accounts bootstrapped: {} created", created);
    }

    let company_service = Arc::new(CompanyService::new(
        Arc::new(PgCompanyRepository::new(pool.clone())),
        hasher,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&account_service),
        Arc::clone(&company_service),
        TokenService::new(&config.auth),
    ));
    let jwt_validator = Arc::new(JwtValidator::new(
        &config.auth.jwt_secret,
        config.auth.issuer.clone(),
        config.auth.jwt_leeway,
    ));
    tracing::info!("Auth services initialized");

    // Photo storage
    let object_store: Arc<dyn ObjectStore> = Arc::new(
        MinIOClient::new(config.minio.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?,
    );

    // Daily work: damage reports, tasks, attendance
    let damage_report_service = Arc::new(DamageReportService::new(
        Arc::new(PgDamageReportRepository::new(pool.clone())),
        Arc::clone(&object_store),
    ));
    let task_service = Arc::new(TaskService::new(
        Arc::new(PgTaskRepository::new(pool.clone())),
        Arc::clone(&damage_report_service),
        RotationCalculator::new(config.rotation.reference_date),
    ));
    let attendance_service = Arc::new(AttendanceService::new(Arc::new(
        PgAttendanceRepository::new(pool.clone()),
    )));
    tracing::info!(
        "Task services initialized (rotation reference date: {})",
        config.rotation.reference_date
    );

    // Tickets with their realtime feed
    let ticket_service = Arc::new(TicketService::new(
        Arc::new(PgTicketRepository::new(pool.clone())),
        Arc::clone(&object_store),
        ChangeFeed::new(CHANGE_FEED_CAPACITY),
    ));
    tracing::info!("Ticket service initialized");

    let material_service = Arc::new(MaterialService::new(Arc::new(PgMaterialRepository::new(
        pool.clone(),
    ))));
    let inventory_service = Arc::new(InventoryService::new(Arc::new(
        PgInventoryRepository::new(pool.clone()),
    )));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&company_service),
        Arc::clone(&task_service),
        Arc::clone(&damage_report_service),
    ));
    tracing::info!("Material, inventory and dashboard services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let admin_routes = Router::new()
        .merge(users_routes::admin_routes(Arc::clone(&account_service)))
        .merge(companies_routes::admin_routes(Arc::clone(&company_service)))
        .merge(tickets_routes::admin_routes(Arc::clone(&ticket_service)))
        .merge(materials_routes::admin_routes(Arc::clone(&material_service)))
        .merge(inventory_routes::admin_routes(Arc::clone(&inventory_service)))
        .merge(attendance_routes::admin_routes(Arc::clone(
            &attendance_service,
        )))
        .merge(dashboard_routes::admin_routes(dashboard_service));

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(companies_routes::routes(company_service))
        .merge(tasks_routes::routes(task_service))
        .merge(damage_reports_routes::routes(damage_report_service))
        .merge(attendance_routes::routes(attendance_service))
        .merge(tickets_routes::routes(ticket_service))
        .merge(materials_routes::routes(material_service))
        .merge(inventory_routes::routes(inventory_service))
        .nest("/api/admin", admin_routes)
        .route_layer(from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new().merge(auth_routes::public_routes(auth_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        // Multipart photo uploads are bounded by the body limit below
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    // SSE connections stay open; keepalive detects dead peers
    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
