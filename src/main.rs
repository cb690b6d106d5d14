use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::info;

use snaplink::analytics::{ClickManager, ClickSink};
use snaplink::config::AppConfig;
use snaplink::services::app_routes;
use snaplink::storage::{MemoryStorage, Storage};
use snaplink::system::logging::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let _log_guard = init_logging(&config);

    // 存储和点击管理器在这里构造、通过 web::Data 注入，不使用全局单例
    let memory = Arc::new(MemoryStorage::new());
    let storage: Arc<dyn Storage> = memory.clone();
    let clicks = ClickManager::new(
        memory as Arc<dyn ClickSink>,
        config.click_flush_interval,
        config.click_flush_threshold,
    );
    info!("Using storage backend: {}", storage.get_backend_name().await);

    // 后台定时刷盘任务
    let flusher = {
        let clicks = clicks.clone();
        tokio::spawn(async move { clicks.start_background_task().await })
    };

    let bind_address = config.bind_address();
    info!("Starting server at http://{}", bind_address);

    let app_config = config.clone();
    let app_clicks = clicks.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(app_clicks.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .configure(app_routes)
    })
    .bind(bind_address)?
    .run()
    .await?;

    // 退出前把缓冲区里未落盘的点击刷掉
    info!("Server stopped, draining buffered clicks");
    flusher.abort();
    clicks.flush().await;

    Ok(())
}
