use std::env;

use tokio::io::AsyncReadExt;

use vectura::api::RouteAPI;
use vectura::config::Config;
use vectura::engine::Engine;
use vectura::entities::{Coordinates, RouteDraft};

/// Usage: `vectura [coords.json] [name]`
///
/// Reads a JSON array of `{"lat", "lng"}` points from the given file (or
/// stdin), prices it against Google Maps and prints the resulting route.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let mut args = env::args().skip(1);

    let input = match args.next() {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };
    let coords: Vec<Coordinates> = serde_json::from_str(&input)?;

    tracing::info!(
        points = coords.len(),
        threshold = config.threshold,
        closure = ?config.closure,
        "pricing route"
    );

    let engine = Engine::from_config(&config)?;
    let route = engine
        .create_route(RouteDraft {
            name: args.next().unwrap_or_else(|| "untitled".into()),
            enabled: true,
            coords,
            ..Default::default()
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&route)?);

    Ok(())
}
