//! Link management handlers: shorten, list, analytics.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{debug, info};

use crate::analytics::ClickManager;
use crate::config::AppConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{Storage, UrlRecord};
use crate::structs::{AnalyticsResponse, ErrorResponse, ShortenRequest, UrlResponse};
use crate::utils::generate_random_code;
use crate::utils::url_validator::validate_url;

/// 分配短码时的最大重试次数
///
/// 62^6 个短码，碰撞重试基本不会发生；上限只是防止病态情况下死循环。
const CODE_RETRY_LIMIT: usize = 5;

pub struct LinkService;

impl LinkService {
    /// POST /api/shorten
    pub async fn shorten(
        payload: web::Json<ShortenRequest>,
        storage: web::Data<Arc<dyn Storage>>,
        config: web::Data<AppConfig>,
    ) -> HttpResponse {
        if let Err(e) = validate_url(&payload.url) {
            debug!("Rejected shorten request: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }

        let url = payload.into_inner().url;
        match Self::allocate(storage.get_ref(), url, config.code_length).await {
            Ok(record) => {
                info!("Created short link {} -> {}", record.short_code, record.original_url);
                HttpResponse::Ok().json(UrlResponse::from_record(
                    &record,
                    &config.base_url,
                    record.access_count,
                ))
            }
            Err(e) => HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string())),
        }
    }

    /// GET /api/urls — all links, most recently created first.
    pub async fn list_urls(
        storage: web::Data<Arc<dyn Storage>>,
        clicks: web::Data<ClickManager>,
        config: web::Data<AppConfig>,
    ) -> HttpResponse {
        let mut records = storage.load_all().await;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let urls: Vec<UrlResponse> = records
            .iter()
            .map(|record| Self::to_response(record, &clicks, &config.base_url))
            .collect();

        HttpResponse::Ok().json(urls)
    }

    /// GET /api/analytics — aggregate totals, links ordered by clicks.
    pub async fn analytics(
        storage: web::Data<Arc<dyn Storage>>,
        clicks: web::Data<ClickManager>,
        config: web::Data<AppConfig>,
    ) -> HttpResponse {
        let records = storage.load_all().await;

        let mut urls: Vec<UrlResponse> = records
            .iter()
            .map(|record| Self::to_response(record, &clicks, &config.base_url))
            .collect();
        urls.sort_by(|a, b| b.access_count.cmp(&a.access_count));

        let total_clicks = urls.iter().map(|u| u.access_count).sum();

        HttpResponse::Ok().json(AnalyticsResponse {
            total_urls: urls.len(),
            total_clicks,
            urls,
        })
    }

    /// Generates a code and inserts the record, regenerating on the
    /// (improbable) collision with a live code.
    async fn allocate(
        storage: &Arc<dyn Storage>,
        url: String,
        code_length: usize,
    ) -> Result<UrlRecord> {
        for attempt in 1..=CODE_RETRY_LIMIT {
            let record = UrlRecord::new(url.clone(), generate_random_code(code_length));
            if storage.try_insert(record.clone()).await {
                return Ok(record);
            }
            debug!("Short code collision on attempt {}, regenerating", attempt);
        }

        Err(SnaplinkError::code_allocation(format!(
            "Failed to allocate a unique short code after {} attempts",
            CODE_RETRY_LIMIT
        )))
    }

    /// Folds clicks still sitting in the flush buffer into the stored
    /// count, so counters never appear to lag behind a redirect.
    fn to_response(record: &UrlRecord, clicks: &ClickManager, base_url: &str) -> UrlResponse {
        let access_count = record.access_count + clicks.pending(&record.short_code) as u64;
        UrlResponse::from_record(record, base_url, access_count)
    }
}
