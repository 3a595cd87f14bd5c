use clap::Parser;
use console::style;
use std::path::PathBuf;
use vigil::{VIGIL_BANNER, VIGIL_VERSION};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Enable Debugging
    #[clap(long, env, default_value_t = false)]
    pub debug: bool,

    /// Disable Banner
    #[clap(long, default_value_t = false)]
    pub disable_banner: bool,

    /// Configuration file path
    #[clap(short, long, env, default_value = "./vigil.yml")]
    pub config: PathBuf,

    /// Credential profile to use
    #[clap(short, long, env = "VIGIL_PROFILE", default_value = "default")]
    pub profile: String,

    /// Account identifier to scope the machine lookup
    #[clap(short, long, env = "VIGIL_ACCOUNT")]
    pub account: Option<String>,

    /// Lookback window in hours (1 hour to 7 days)
    #[clap(short, long, env = "VIGIL_LOOKBACK")]
    pub lookback: Option<i64>,

    /// Platform API base URL, overrides the profile
    #[clap(long, env = "VIGIL_URL")]
    pub url: Option<String>,

    /// API token, overrides the profile
    #[clap(short, long, env = "VIGIL_TOKEN")]
    pub token: Option<String>,
}

pub fn init() -> Arguments {
    dotenvy::dotenv().ok();
    let arguments = Arguments::parse();

    let log_level = match &arguments.debug {
        false => log::LevelFilter::Info,
        true => log::LevelFilter::Debug,
    };

    env_logger::builder()
        .parse_default_env()
        .format_module_path(false)
        .filter_level(log_level)
        .init();

    // stdout is reserved for the CSV report
    if !arguments.disable_banner {
        eprintln!(
            "{}    by {} - v{}\n",
            style(VIGIL_BANNER).green(),
            style(AUTHOR).red(),
            style(VIGIL_VERSION).blue()
        );
    }

    arguments
}
