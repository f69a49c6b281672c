mod db;
mod grid;
mod routes;
mod services;
mod state;
mod widget;

use std::path::PathBuf;

use services::storage::Storage;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let upload_dir = std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"));
    let public_base = std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    tokio::fs::create_dir_all(&upload_dir)
        .await
        .expect("upload dir init failed");
    let storage = Storage::new(upload_dir, &public_base);

    let state = state::AppState::new(pool, storage);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, %public_base, "bentoboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
