use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

// HTTP-стек клиента content API слишком шумный на info
const QUIET_DEPENDENCIES: &[&str] = &["hyper_util=warn", "reqwest=warn"];

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn filter_directives(default_level: &str) -> String {
    std::iter::once(default_level)
        .chain(QUIET_DEPENDENCIES.iter().copied())
        .collect::<Vec<_>>()
        .join(",")
}
