use tracing_subscriber::prelude::*;
use webshop_backend_rs::{app::App, types::Config};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let app = App::new(Config::default()).await;

    app.serve().await;
}
