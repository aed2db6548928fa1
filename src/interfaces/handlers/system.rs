use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use std::{
    time::Duration,
    sync::{atomic::{AtomicI64, Ordering}, RwLock},
};
use serde::Serialize;
use crate::{constants::START_TIME, AppState};

const CACHE_TTL_SECS: i64 = 5;

#[derive(Serialize, Clone, Default)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: String,
    pub timestamp: String,
    pub database: String,
}

/// Last health report, reused for `CACHE_TTL_SECS`. One per server.
#[derive(Default)]
pub struct HealthCache {
    last_check: AtomicI64,
    cached: RwLock<HealthCheckResponse>,
}

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime_secs = now_utc.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let database = match state.image_handler.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            "Unavailable"
        }
    };

    HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        started_at: START_TIME.to_rfc3339(),
        timestamp: now_utc.to_rfc3339(),
        database: database.to_string(),
    }
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let cache = &state.health_cache;
    let now = Utc::now().timestamp();
    let last = cache.last_check.load(Ordering::Relaxed);

    if now - last > CACHE_TTL_SECS {
        let response = build_health_response(&state).await;

        if let Ok(mut cached) = cache.cached.write() {
            *cached = response.clone();
            cache.last_check.store(now, Ordering::Relaxed);
        }

        HttpResponse::Ok().json(response)
    } else {
        let cached = cache
            .cached
            .read()
            .map(|response| response.clone())
            .map_err(|e| e.to_string());

        match cached {
            Ok(response) => HttpResponse::Ok().json(response),
            Err(e) => {
                tracing::warn!("HealthCheck cache lock poisoned: {}", e);
                let response = build_health_response(&state).await;
                HttpResponse::Ok().json(response)
            }
        }
    }
}
