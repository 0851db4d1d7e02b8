use std::net::{IpAddr, SocketAddr};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_calendar::{config::Config, controllers, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting event calendar");

    let state = AppState::new(config.clone())
        .await
        .expect("Failed to initialize application state");
    info!("Database connected");

    let app = controllers::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let host: IpAddr = config
        .app
        .host
        .parse()
        .expect("HOST must be a valid IP address");
    let addr = SocketAddr::from((host, config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
