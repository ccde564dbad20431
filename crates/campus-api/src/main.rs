use campus_core::ApiConfig;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize the application (telemetry, storage, routes)
    let (_state, router) = campus_api::setup::initialize_app(&config).await?;

    campus_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
