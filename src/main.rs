use dotenvy::dotenv;
use pos_manager::{
    config::{database, settings},
    errors::Result,
    shell::Shell,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Resolve settings (config.toml + DATABASE_URL)
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Open the database and ensure the schema
    let db = database::init_database(&settings.database)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Run the terminal until quit or end of input
    let mut shell = Shell::new(db);
    let stdin = std::io::stdin();
    shell.run(stdin.lock(), std::io::stdout()).await?;

    info!("Session ended.");
    Ok(())
}
