use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use billsplit::{config::Config, routes};
use clap::Parser;

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::parse();
    let state = web::Data::new(routes::AppState::new(
        config.initial_state(),
        config.clipboard(),
    ));
    tracing::info!(
        host = %config.host,
        port = config.port,
        clipboard = config.clipboard_command.as_deref().unwrap_or("host"),
        "starting bill splitter"
    );

    let allowed_origin = config.allowed_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(allowed_origin.as_deref()))
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
