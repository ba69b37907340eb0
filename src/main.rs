mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::accounts::{routes as accounts_routes, AccountService};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::applications::{routes as applications_routes, ApplicationService};
use crate::features::auth;
use crate::features::auth::routes as auth_routes;
use crate::features::brand_profiles::{routes as brand_profiles_routes, BrandProfileService};
use crate::features::gigs::{routes as gigs_routes, GigService};
use crate::features::legacy_import::{routes as legacy_import_routes, ImportService};
use crate::features::model_profiles::{routes as model_profiles_routes, ModelProfileService};
use crate::features::password_resets::{routes as password_resets_routes, PasswordResetService};
use crate::features::saved_lists::{routes as saved_lists_routes, SavedListService};
use crate::features::uploads::{routes as uploads_routes, UploadService};
use crate::modules::storage::{MinIOClient, ObjectStorage};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Worker count comes from TOKIO_WORKER_THREADS, else available cores
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
    // RUST_LOG may live in .env
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Auth
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.jwks_url,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
        config.auth.claims_namespace.clone(),
    ));
    tracing::info!("Auth configuration initialized (issuer: {})", config.auth.issuer);

    let storage: Arc<dyn ObjectStorage> = Arc::new(
        MinIOClient::new(config.minio.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?,
    );
    tracing::info!("MinIO client initialized for bucket: {}", config.minio.bucket);

    // Domain services
    let account_service = Arc::new(AccountService::new(pool.clone()));
    let model_profile_service = Arc::new(ModelProfileService::new(pool.clone()));
    let brand_profile_service = Arc::new(BrandProfileService::new(pool.clone()));
    let gig_service = Arc::new(GigService::new(pool.clone()));
    let application_service = Arc::new(ApplicationService::new(pool.clone()));
    let saved_list_service = Arc::new(SavedListService::new(pool.clone()));
    let upload_service = Arc::new(UploadService::new(
        pool.clone(),
        Arc::clone(&storage),
        config.upload.clone(),
    ));
    let admin_service = Arc::new(AdminService::new(
        pool.clone(),
        Arc::clone(&gig_service),
        Arc::clone(&model_profile_service),
        Arc::clone(&brand_profile_service),
    ));
    let password_reset_service = Arc::new(PasswordResetService::new(pool.clone()));
    let import_service = Arc::new(ImportService::new(pool.clone()));
    tracing::info!("Services initialized");

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
                middleware::swagger_basic_auth,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let admin = admin_routes::routes(admin_service)
        .merge(password_resets_routes::admin_routes(Arc::clone(
            &password_reset_service,
        )))
        .merge(legacy_import_routes::routes(import_service));

    // Everything below requires a valid bearer token
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(accounts_routes::routes(account_service))
        .merge(model_profiles_routes::routes(model_profile_service))
        .merge(brand_profiles_routes::routes(brand_profile_service))
        .merge(gigs_routes::routes(gig_service))
        .merge(applications_routes::routes(application_service))
        .merge(saved_lists_routes::routes(saved_list_service))
        .merge(uploads_routes::routes(upload_service))
        .nest("/api/admin", admin)
        .route_layer(from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes =
        Router::new().merge(password_resets_routes::public_routes(password_reset_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Client-provided X-Request-Id wins, otherwise a UUID v7 is generated
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

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
