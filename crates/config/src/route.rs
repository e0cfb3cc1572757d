use std::fmt;

const SLUG_PLACEHOLDER: &str = "{slug}";

/// URL or save-path template for a kind of content, e.g. `posts/{slug}/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn has_slug(&self) -> bool {
        self.0.contains(SLUG_PLACEHOLDER)
    }

    /// Substitute `slug` for every `{slug}`.
    ///
    /// A template without the placeholder is returned as-is.
    pub fn render(&self, slug: &str) -> String {
        self.0.replace(SLUG_PLACEHOLDER, slug)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UrlTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

/// Where a piece of content is linked from and written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub url: String,
    pub save_as: String,
}

impl Route {
    pub fn new(url: &UrlTemplate, save_as: &UrlTemplate, slug: &str) -> Self {
        Self {
            url: url.render(slug),
            save_as: save_as.render(slug),
        }
    }
}
