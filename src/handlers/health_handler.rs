use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    store: StoreHealth,
    seeded_sampler: bool,
    serialized_executions: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
enum StoreHealth {
    Connected { ping_ms: u128 },
    Unreachable { error: String },
    InMemory,
}

/// Service liveness plus a store ping; 503 when the store does not answer.
#[get("/health")]
async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let store = match &state.db {
        Some(db) => match db.ping().await {
            Ok(elapsed) => StoreHealth::Connected { ping_ms: elapsed.as_millis() },
            Err(err) => {
                log::warn!("Health check ping failed: {}", err);
                StoreHealth::Unreachable { error: err.to_string() }
            }
        },
        None => StoreHealth::InMemory,
    };
    let healthy = !matches!(store, StoreHealth::Unreachable { .. });

    let report = HealthReport {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
        seeded_sampler: state.config.sampler_seed.is_some(),
        serialized_executions: state.config.serialize_recipe_executions,
    };

    if healthy {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}
