use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::analytics::ClickManager;
use crate::storage::Storage;

pub struct RedirectService;

impl RedirectService {
    /// GET /{code} — 301 to the original URL, 404 when unknown.
    ///
    /// The click is handed to the [`ClickManager`] before responding; the
    /// response never waits for the count to reach storage.
    pub async fn handle_redirect(
        path: web::Path<String>,
        storage: web::Data<Arc<dyn Storage>>,
        clicks: web::Data<ClickManager>,
    ) -> impl Responder {
        let code = path.into_inner();

        match storage.get(&code).await {
            Some(record) => {
                clicks.increment(&code);
                HttpResponse::build(StatusCode::MOVED_PERMANENTLY)
                    .insert_header(("Location", record.original_url))
                    .finish()
            }
            None => {
                debug!("Redirect link not found: {}", code);
                HttpResponse::build(StatusCode::NOT_FOUND)
                    .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                    .body("Not Found")
            }
        }
    }
}
