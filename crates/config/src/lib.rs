mod config;
mod feed;
mod route;
mod social;

pub mod path;

pub use self::config::*;
pub use self::feed::*;
pub use self::route::*;
pub use self::social::*;

pub type RelPath = relative_path::RelativePathBuf;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
