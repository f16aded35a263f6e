use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PLOTS_DIR: &str = "plots";
pub const DEFAULT_PORT: u16 = 5006;
pub const DEFAULT_HOST: &str = "0.0.0.0";
const ENV_PREFIX: &str = "PLOT_SERVICE";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Directory holding one `<id>.png` per generated plot
    pub dir: PathBuf,
    pub port: u16,
    pub host: String,
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Defaults, then the optional `config/service` file, then `PLOT_SERVICE_*`
/// environment variables.
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    build_service_config(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
}

fn build_service_config(env: config::Environment) -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .set_default("dir", DEFAULT_PLOTS_DIR)?
        .set_default("port", DEFAULT_PORT)?
        .set_default("host", DEFAULT_HOST)?
        .add_source(config::File::with_name("config/service").required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}
