/// A feed setting.
///
/// An absent or `null` setting disables the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Feed {
    Toggle(bool),
    /// Output path of the feed document
    Path(String),
}

impl Feed {
    pub fn is_enabled(&self) -> bool {
        match self {
            Feed::Toggle(enabled) => *enabled,
            Feed::Path(path) => !path.is_empty(),
        }
    }
}
