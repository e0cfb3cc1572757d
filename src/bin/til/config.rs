use crate::args;
use crate::error::Result;

/// Print the loaded site settings
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigCommand {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl ConfigCommand {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        log::debug!("Settings loaded from `{}`", config.root.display());
        print!("{config}");

        Ok(())
    }
}
