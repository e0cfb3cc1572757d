use std::env;
use std::io::Write as _;
use std::path;

use anyhow::Context as _;

use crate::error::Result;

/// Settings, routes and local preview for the Today I Learned blog
#[derive(Debug, clap::Parser)]
#[command(name = "til", about, version, propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    pub(crate) color: colorchoice_clap::Color,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// Print the loaded site settings
    Config(crate::config::ConfigCommand),

    /// Print where a post or page would be linked and written
    Route(crate::route::RouteArgs),

    /// Serve the generated site on the configured address
    #[cfg(feature = "serve")]
    Serve(crate::serve::ServeArgs),
}

impl Command {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config(cmd) => cmd.run(),
            Self::Route(cmd) => cmd.run(),
            #[cfg(feature = "serve")]
            Self::Serve(cmd) => cmd.run(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Settings file to use [default: _til.yml]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<til_config::SiteConfig> {
        let config = if let Some(config_path) = self.config.as_deref() {
            til_config::SiteConfig::from_file(config_path).with_context(|| {
                anyhow::format_err!("Error reading config file {:?}", config_path)
            })?
        } else {
            let cwd = env::current_dir().context("Failed to read the current directory")?;
            til_config::SiteConfig::from_cwd(cwd)?
        };

        Ok(config)
    }
}

pub(crate) fn init_logging(
    level: &clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
    colored: bool,
) {
    let filter = level.log_level_filter();

    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, filter);

    if filter == log::LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(|f, record| {
            writeln!(
                f,
                "[{}] {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        });
    }

    builder.init();
}
