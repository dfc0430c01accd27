use anyhow::Result;
use tracing::info;

use web::{
    build_config,
    env::{self, RuntimeEnv},
};

fn main() -> Result<()> {
    // Load dotenv files first so a `RUST_LOG` set there reaches the subscriber
    let loaded = env::load_dotenv_files(&env::DOTENV_FILES);

    // Initialize logging
    common::logging::init()?;

    info!("Starting web configuration check");
    for path in &loaded {
        info!("Loaded environment from {}", path.display());
    }

    let (env, config) = build_config::bootstrap(RuntimeEnv::from_process())?;

    info!(
        validated = env.is_validated(),
        node_env = %env.node_env().unwrap_or_default(),
        "Web configuration initialized successfully"
    );

    println!("{}", config.to_json()?);

    Ok(())
}
