use mongodb::{Client, Database, options::ClientOptions};
use tracing::info;
use welfare_config::{DatabaseSettings, Settings};

/// Open the welfare database and prove it is reachable before the server
/// starts taking requests. The pool limits come straight from config; unset
/// values fall through to the driver defaults.
pub async fn connect(settings: &Settings) -> Result<Database, mongodb::error::Error> {
    let DatabaseSettings {
        url,
        name,
        max_pool_size,
        min_pool_size,
    } = &settings.database;

    let mut options = ClientOptions::parse(url).await?;
    options.app_name = Some("welfare-api".to_string());
    options.max_pool_size = *max_pool_size;
    options.min_pool_size = *min_pool_size;

    let db = Client::with_options(options)?.database(name);

    // Round trip against the target database, not just the server.
    db.run_command(bson::doc! { "ping": 1 }).await?;

    info!(
        db = %name,
        max_pool = ?max_pool_size,
        min_pool = ?min_pool_size,
        "Welfare database reachable"
    );

    Ok(db)
}
