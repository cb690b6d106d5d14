pub mod link_service;
pub mod redirect;

pub use link_service::LinkService;
pub use redirect::RedirectService;

use actix_web::web;

/// Route table shared by the server binary and the integration tests.
pub fn app_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/shorten", web::post().to(LinkService::shorten))
        .route("/api/urls", web::get().to(LinkService::list_urls))
        .route("/api/analytics", web::get().to(LinkService::analytics))
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect));
}
