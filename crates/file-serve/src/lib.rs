//! > Serve a generated site for local preview
//!
//! `file-serve` answers requests from a directory of already-rendered files.  It favors small
//! size and compile times over speed, scalability, or security.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = file_serve::ServerBuilder::new("output")
//!     .bind("127.0.0.1")
//!     .port(8080)
//!     .build();
//!
//! println!("See http://{}", server.addr());
//! server.serve().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
    sync::{RwLock, TryLockError},
};

const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Custom server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerBuilder {
    source: PathBuf,
    bind: Option<String>,
    port: Option<u16>,
}

impl ServerBuilder {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            bind: None,
            port: None,
        }
    }

    /// Address to listen on, a dotted quad or hostname
    pub fn bind(&mut self, bind: impl Into<String>) -> &mut Self {
        self.bind = Some(bind.into());
        self
    }

    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    pub fn build(&self) -> Server {
        let bind = self.bind.as_deref().unwrap_or(DEFAULT_BIND);
        let port = self.port.unwrap_or(DEFAULT_PORT);

        Server {
            source: self.source.clone(),
            addr: format!("{bind}:{port}"),
            server: RwLock::new(None),
        }
    }
}

pub struct Server {
    source: PathBuf,
    addr: String,
    server: RwLock<Option<tiny_http::Server>>,
}

impl Server {
    /// The directory being served
    pub fn source(&self) -> &Path {
        self.source.as_path()
    }

    /// The `host:port` the server listens on
    pub fn addr(&self) -> &str {
        self.addr.as_str()
    }

    /// Whether the server was running at the instant the call happened
    pub fn is_running(&self) -> bool {
        matches!(self.server.read().as_deref(), Ok(Some(_)))
    }

    /// Listen and answer requests until [`Server::close`] is called
    pub fn serve(&self) -> Result<(), Error> {
        match self.server.try_write().as_deref_mut() {
            Ok(server @ None) => {
                *server = Some(tiny_http::Server::http(self.addr()).map_err(|e| {
                    Error::new(format!("failed to listen on {}: {e}", self.addr()))
                })?);
            }
            Ok(Some(_)) | Err(TryLockError::WouldBlock) => {
                return Err(Error::new("the server is running"));
            }
            Err(error @ TryLockError::Poisoned(_)) => return Err(Error::new(error)),
        }

        {
            let server = self.server.read().map_err(Error::new)?;
            if let Some(server) = server.as_ref() {
                for request in server.incoming_requests() {
                    if let Err(e) = static_file_handler(self.source(), request) {
                        log::error!("{e}");
                    }
                }
            }
        }

        *self.server.write().map_err(Error::new)? = None;

        Ok(())
    }

    /// Closes the server gracefully
    pub fn close(&self) {
        if let Ok(Some(server)) = self.server.read().as_deref() {
            server.unblock();
        }
    }
}

/// Serve Error
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Map a request URL onto a file under `root`.
///
/// Query strings are dropped, the path is percent-decoded, and directories resolve to their
/// `index.html`.  Returns `None` when the URL escapes `root` or names nothing on disk.
pub fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let req_path = url.split(['?', '#']).next().unwrap_or_default();
    let req_path = percent_encoding::percent_decode_str(req_path)
        .decode_utf8()
        .ok()?;
    let req_path = Path::new(req_path.trim_start_matches('/'));

    let mut path = root.to_path_buf();
    for component in req_path.components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if !path.is_file() {
        path.push("index.html");
    }
    path.is_file().then_some(path)
}

fn static_file_handler(root: &Path, req: tiny_http::Request) -> Result<(), Error> {
    log::debug!("{} {}", req.method(), req.url());

    match resolve(root, req.url()) {
        Some(serve_path) => {
            let file = std::fs::File::open(&serve_path).map_err(Error::new)?;
            let mut response = tiny_http::Response::from_file(file);
            if let Some(mime) = mime_guess::MimeGuess::from_path(&serve_path).first_raw() {
                let content_type = format!("Content-Type:{mime}");
                let content_type =
                    tiny_http::Header::from_str(&content_type).expect("formatted correctly");
                response.add_header(content_type);
            }
            req.respond(response).map_err(Error::new)?;
        }
        None => {
            log::debug!("Not found: {}", req.url());
            req.respond(
                tiny_http::Response::from_string(
                    "<h1> <center> 404: Page not found </center> </h1>",
                )
                .with_status_code(404)
                .with_header(
                    tiny_http::Header::from_str("Content-Type: text/html")
                        .expect("formatted correctly"),
                ),
            )
            .map_err(Error::new)?;
        }
    }

    Ok(())
}
