use std::env;

use anyhow::{Context, Result};
use banner::web::{Config, Server};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = Config::from_env()?;
    if let Some(addr) = env::args().nth(1) {
        config.addr = addr;
    }
    let server =
        Server::bind(&config).with_context(|| format!("failed to bind {}", config.addr))?;
    log::info!(
        "serving fonts from {} on http://{}/",
        config.fonts.display(),
        server.local_addr()?
    );
    server.run()?;
    Ok(())
}
