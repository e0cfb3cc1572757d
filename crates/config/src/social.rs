/// A `(platform, url)` pair shown in the social section
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SocialLink(pub String, pub String);

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self(platform.into(), url.into())
    }

    pub fn platform(&self) -> &str {
        &self.0
    }

    pub fn url(&self) -> &str {
        &self.1
    }
}
