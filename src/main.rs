use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commentary::{console::Console, AppState, Config};

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so menus on stdout stay readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "commentary=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, store capacity: {}, admin locked: {}",
        config.environment,
        config.store_capacity,
        config.admin_locked()
    );

    let state = AppState::new(config);
    let stdin = io::stdin();
    let mut console = Console::new(state, stdin.lock(), io::stdout());
    console.run()?;

    tracing::info!("Session ended");
    Ok(())
}
