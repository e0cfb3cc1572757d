use std::path;

use crate::args;
use crate::error::Result;

/// Serve the generated site on the configured address
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ServeArgs {
    /// Directory of generated files, relative to the site root
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub(crate) dir: path::PathBuf,

    /// Address to serve from [default: BIND setting]
    #[arg(long, value_name = "HOSTNAME_OR_IP")]
    pub(crate) bind: Option<String>,

    /// Port to serve from [default: PORT setting]
    #[arg(short = 'P', long, value_name = "NUM")]
    pub(crate) port: Option<u16>,

    /// Open a browser
    #[arg(long)]
    pub(crate) open: bool,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl ServeArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;

        let dir = config.root.join(&self.dir);
        if !dir.is_dir() {
            anyhow::bail!(
                "Output directory `{}` does not exist; build the site first",
                dir.display()
            );
        }

        let bind = self.bind.as_deref().unwrap_or(&config.bind);
        if self.bind.is_some() {
            log::debug!("Overriding `BIND` with `{bind}`");
        }
        let port = self.port.unwrap_or(config.port);
        if self.port.is_some() {
            log::debug!("Overriding `PORT` with `{port}`");
        }

        let server = file_serve::ServerBuilder::new(dir)
            .bind(bind)
            .port(port)
            .build();

        if self.open {
            let url = format!("http://{}", server.addr());
            open_browser(url);
        }

        serve(&server)
    }
}

fn serve(server: &file_serve::Server) -> Result<()> {
    log::info!(
        "Serving {} through static file server",
        server.source().display()
    );
    log::info!("Server Listening on http://{}", server.addr());
    log::info!("Ctrl-c to stop the server");

    Ok(server.serve()?)
}

fn open_browser(url: String) {
    match open::that(url) {
        Ok(()) => log::info!("Please check your browser!"),
        Err(why) => log::warn!("Failed to open a browser: {why}"),
    }
}
