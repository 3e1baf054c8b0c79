use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use billability::config::Config;
use billability::docs::api_doc;
use billability::routes;
use billability::store::RecordStore;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Billability dashboard is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        workbook = %config.excel_file_path.display(),
        cache_timeout_secs = config.cache_timeout.as_secs(),
        tools = ?config.tools,
        "Server starting..."
    );

    let store = Data::new(RecordStore::open_xlsx(
        &config.excel_file_path,
        config.cache_timeout,
    ));

    // Warm the cache so the first request does not pay for the workbook read
    let store_for_warmup = store.clone();
    actix_web::rt::spawn(async move {
        match actix_web::web::block(move || store_for_warmup.get_snapshot(true)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(error = %e, "Initial workbook load failed"),
            Err(e) => warn!(error = %e, "Initial workbook load was cancelled"),
        }
    });

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();
    let openapi = api_doc(&config.api_prefix);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(store.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
