pub mod admin;
pub mod health;
pub mod orders;
pub mod quote;

use crate::config::Config;
use crate::notify::Notifier;
use crate::orders::OrderService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: Arc<OrderService>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, service: Arc<OrderService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            service,
            notifier,
        }
    }

    /// Fire a notification without blocking the request that triggered it.
    pub(crate) fn notify_detached(&self, text: String) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notifier.send(&text).await;
        });
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/v1/order", post(orders::create_order))
        .route("/v1/order/proof", post(orders::submit_proof))
        .route("/v1/quote", post(quote::get_quote))
        .route(
            "/v1/admin/orders",
            get(admin::list_orders).patch(admin::set_order_status),
        )
        .layer(cors)
        .with_state(state)
}
