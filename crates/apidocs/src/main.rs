use apidocs::config::{AppConfig, parse_bind};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "apidocs", version, about = "Users API with a cached OpenAPI description")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "APIDOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config and APIDOCS_BIND)
    #[arg(short, long)]
    bind: Option<String>,

    /// Assemble the API description at startup
    #[arg(long)]
    eager: bool,
}

#[tokio::main]
async fn main() -> Result<(), apidocs::Error> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(bind) = &args.bind {
        config.bind = parse_bind(bind)?;
    }
    config.eager |= args.eager;

    apidocs::telemetry::init_tracing(&config.log)?;
    tracing::info!(
        title = %config.title,
        version = %config.version,
        config = ?args.config,
        "starting"
    );

    apidocs::serve(config).await
}
