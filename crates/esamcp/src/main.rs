use crate::prelude::{eprintln, *};
use clap::Parser;
use esamcp_core::prompt::Locale;

mod error;
mod esa;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Expose the esa.io API as MCP tools, resources and prompts"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// esa personal access token
    #[clap(long, env = "ESA_ACCESS_TOKEN", global = true, hide_env_values = true)]
    access_token: Option<String>,

    /// esa API base URL
    #[clap(
        long,
        env = "ESA_API_BASE_URL",
        global = true,
        default_value = "https://api.esa.io"
    )]
    api_base_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "ESAMCP_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Language of prompt titles and descriptions, detected from the environment.
    #[clap(skip)]
    locale: Locale,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let mut app = App::parse();
    app.global.locale = Locale::detect(|name| std::env::var(name).ok());

    if let Err(err) = esa::EsaConfig::from_global(&app.global) {
        eprintln!("Configuration error: {err}");
        std::process::exit(1);
    }

    match app.command {
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
