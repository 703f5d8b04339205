use crate::{
    analytics::AnalyticsService,
    config::Config,
    database::Database,
    error::AppError,
    health::HealthService,
    routes::{create_customer_routes, create_docs_routes, create_health_routes},
    shutdown::ShutdownCoordinator,
    utils::request_id::{RequestIdExt, request_id_middleware},
};
use axum::{Router, extract::Request, middleware, middleware::Next, response::Response};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<Database>,
    pub analytics: AnalyticsService,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Single long-lived database handle, shared by every request
        let database = Arc::new(Database::connect(&config.database).await?);

        let analytics = AnalyticsService::new(database.connection().clone());

        let health_service = Arc::new(HealthService::new());
        health_service.register(database.clone()).await;

        let shutdown_coordinator = Arc::new(ShutdownCoordinator::new());

        Ok(Self {
            config: Arc::new(config),
            database,
            analytics,
            health_service,
            shutdown_coordinator,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            self.database.migrate().await?;
        }

        let app = self.create_app();

        let host = self
            .config
            .server
            .host
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid server host: {}", e)))?;
        let addr = SocketAddr::new(host, self.config.server.port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        // Spawn shutdown signal handler
        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                info!("Graceful shutdown initiated");
            })
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Creates the application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            .merge(create_customer_routes())
            .merge(create_health_routes())
            .merge(create_docs_routes())
            .with_state(self.clone());

        if self.config.logging.request_logging {
            app = app.layer(middleware::from_fn(request_response_logger));
        }

        // Outermost layer, so the ID exists before anything logs
        app.layer(middleware::from_fn(request_id_middleware))
    }
}

/// Structured request/response logging middleware
async fn request_response_logger(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let request_id = req.extensions().request_id().as_str();

    let start = Instant::now();
    let response = next.run(req).await;

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %request_id,
        "API request"
    );

    response
}
