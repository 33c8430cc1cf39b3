use studyai_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, upstream client, routes)
    let (_state, router) = studyai_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    studyai_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
