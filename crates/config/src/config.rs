use std::collections::BTreeMap;
use std::fmt;
use std::path;

use super::*;

pub const CONFIG_FILE_NAME: &str = "_til.yml";

/// Settings for building and previewing the site.
///
/// Values are carried as declared; whatever consumes them owns their validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct SiteConfig {
    /// Directory the settings were loaded from
    #[serde(skip)]
    pub root: path::PathBuf,

    pub author: String,
    pub sitename: String,
    pub siteurl: String,

    pub path: RelPath,
    pub timezone: String,

    pub feed_all_atom: Option<Feed>,
    pub category_feed_atom: Option<Feed>,
    pub translation_feed_atom: Option<Feed>,
    pub author_feed_atom: Option<Feed>,
    pub author_feed_rss: Option<Feed>,

    pub default_pagination: u32,
    pub theme: String,

    pub article_url: UrlTemplate,
    pub article_save_as: UrlTemplate,
    pub page_url: UrlTemplate,
    pub page_save_as: UrlTemplate,

    pub sitesubtitle: String,
    pub site_license: String,

    pub display_categories_on_menu: bool,

    pub social: Vec<SocialLink>,

    pub landing_page_title: String,
    pub projects_title: String,
    pub display_tags_on_sidebar: bool,

    pub sitedescription: String,
    pub use_shortcut_icons: bool,
    pub social_profile_label: String,
    pub recent_articles_count: u32,

    /// Directories under `path` copied verbatim into the output
    pub static_paths: Vec<RelPath>,

    pub use_folder_as_category: bool,
    /// Regex matched against content paths; named groups become metadata
    pub path_metadata: String,

    pub port: u16,
    pub bind: String,
}

impl Default for SiteConfig {
    fn default() -> SiteConfig {
        SiteConfig {
            root: Default::default(),
            author: "Ben Cliff".to_owned(),
            sitename: "Today I Learned".to_owned(),
            siteurl: "https://ben-cliff.github.io".to_owned(),
            path: RelPath::from("content"),
            timezone: "Europe/London".to_owned(),
            feed_all_atom: None,
            category_feed_atom: None,
            translation_feed_atom: None,
            author_feed_atom: None,
            author_feed_rss: None,
            default_pagination: 10,
            theme: "themes/elegant".to_owned(),
            article_url: UrlTemplate::new("posts/{slug}/"),
            article_save_as: UrlTemplate::new("posts/{slug}/index.html"),
            page_url: UrlTemplate::new("pages/{slug}/"),
            page_save_as: UrlTemplate::new("pages/{slug}/index.html"),
            sitesubtitle: "Daily Learning Journal".to_owned(),
            site_license: "CC-BY-4.0".to_owned(),
            display_categories_on_menu: true,
            social: vec![SocialLink::new("github", "https://github.com/Ben-Cliff")],
            landing_page_title: "Today I Learned".to_owned(),
            projects_title: "TIL Entries".to_owned(),
            display_tags_on_sidebar: true,
            sitedescription: "Daily Learning Journal".to_owned(),
            use_shortcut_icons: true,
            social_profile_label: "Stay in Touch".to_owned(),
            recent_articles_count: 10,
            static_paths: vec![RelPath::from("images"), RelPath::from("extra")],
            use_folder_as_category: false,
            path_metadata: "(?P<path_no_ext>[^.]+)".to_owned(),
            port: 8080,
            bind: "127.0.0.1".to_owned(),
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<SiteConfig> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<SiteConfig> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = if content.trim().is_empty() {
            SiteConfig::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                Status::new("Failed to parse config")
                    .with_source(e)
                    .context_with(|c| c.insert("Path", path.display().to_string()))
            })?
        };

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<SiteConfig> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<SiteConfig> {
        let file_path = find_project_file(&cwd, CONFIG_FILE_NAME);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!(
                    "No {CONFIG_FILE_NAME} file found in current directory, using default config."
                );
                let config = SiteConfig {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }

    /// Where the preview server listens, as `BIND:PORT`
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn content_dir(&self) -> path::PathBuf {
        self.path.to_path(&self.root)
    }

    /// Static directories, resolved against the content directory.
    ///
    /// Existence is not checked.
    pub fn static_dirs(&self) -> Vec<path::PathBuf> {
        let content = self.content_dir();
        self.static_paths
            .iter()
            .map(|p| p.to_path(&content))
            .collect()
    }

    pub fn article_route(&self, slug: &str) -> Route {
        Route::new(&self.article_url, &self.article_save_as, slug)
    }

    pub fn page_route(&self, slug: &str) -> Route {
        Route::new(&self.page_url, &self.page_save_as, slug)
    }

    /// Setting names of the feeds that will be generated
    pub fn enabled_feeds(&self) -> Vec<&'static str> {
        [
            ("FEED_ALL_ATOM", &self.feed_all_atom),
            ("CATEGORY_FEED_ATOM", &self.category_feed_atom),
            ("TRANSLATION_FEED_ATOM", &self.translation_feed_atom),
            ("AUTHOR_FEED_ATOM", &self.author_feed_atom),
            ("AUTHOR_FEED_RSS", &self.author_feed_rss),
        ]
        .into_iter()
        .filter(|(_, feed)| feed.as_ref().is_some_and(Feed::is_enabled))
        .map(|(name, _)| name)
        .collect()
    }

    /// Metadata captured by `path_metadata` from a content-relative path
    pub fn path_metadata(&self, rel_path: &str) -> Result<BTreeMap<String, String>> {
        crate::path::extract_metadata(&self.path_metadata, rel_path)
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_server() {
        let config = SiteConfig::default();
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_default_static_paths() {
        let config = SiteConfig::default();
        assert_eq!(
            config.static_paths,
            vec![RelPath::from("images"), RelPath::from("extra")]
        );
    }

    #[test]
    fn test_default_feeds_disabled() {
        let config = SiteConfig::default();
        assert_eq!(config.feed_all_atom, None);
        assert_eq!(config.category_feed_atom, None);
        assert_eq!(config.translation_feed_atom, None);
        assert_eq!(config.author_feed_atom, None);
        assert_eq!(config.author_feed_rss, None);
        assert!(config.enabled_feeds().is_empty());
    }

    #[test]
    fn test_default_social() {
        let config = SiteConfig::default();
        assert_eq!(
            config.social,
            vec![SocialLink::new("github", "https://github.com/Ben-Cliff")]
        );
    }

    #[test]
    fn test_default_url_templates() {
        let config = SiteConfig::default();
        assert!(config.article_url.has_slug());
        assert!(config.page_url.has_slug());
        assert_eq!(
            config.article_save_as.render("my-post"),
            "posts/my-post/index.html"
        );
        assert_eq!(
            config.page_save_as.render("my-post"),
            "pages/my-post/index.html"
        );
    }

    #[test]
    fn test_article_route() {
        let route = SiteConfig::default().article_route("my-post");
        assert_eq!(route.url, "posts/my-post/");
        assert_eq!(route.save_as, "posts/my-post/index.html");
    }

    #[test]
    fn test_page_route() {
        let route = SiteConfig::default().page_route("about");
        assert_eq!(route.url, "pages/about/");
        assert_eq!(route.save_as, "pages/about/index.html");
    }

    #[test]
    fn test_enabled_feeds() {
        let config = SiteConfig {
            feed_all_atom: Some(Feed::Path("feeds/all.atom.xml".to_owned())),
            author_feed_rss: Some(Feed::Toggle(true)),
            category_feed_atom: Some(Feed::Toggle(false)),
            ..Default::default()
        };
        assert_eq!(
            config.enabled_feeds(),
            vec!["FEED_ALL_ATOM", "AUTHOR_FEED_RSS"]
        );
    }

    #[test]
    fn test_static_dirs() {
        let config = SiteConfig {
            root: path::Path::new("site").to_owned(),
            ..Default::default()
        };
        assert_eq!(config.content_dir(), path::Path::new("site/content"));
        assert_eq!(
            config.static_dirs(),
            vec![
                path::Path::new("site/content/images").to_owned(),
                path::Path::new("site/content/extra").to_owned(),
            ]
        );
    }

    #[test]
    fn test_path_metadata_default() {
        let config = SiteConfig::default();
        let metadata = config.path_metadata("2024/rust-lifetimes.md").unwrap();
        assert_eq!(
            metadata.get("path_no_ext").map(String::as_str),
            Some("2024/rust-lifetimes")
        );
    }

    #[test]
    fn test_display_is_yaml() {
        let display = SiteConfig::default().to_string();
        assert!(display.contains("PORT: 8080\n"));
        assert!(display.contains("BIND: 127.0.0.1\n"));
        assert!(display.contains("FEED_ALL_ATOM: null\n"));
        let reparsed: SiteConfig = serde_yaml::from_str(&display).unwrap();
        assert_eq!(reparsed, SiteConfig::default());
    }

    #[test]
    fn test_from_file_ok() {
        let result = SiteConfig::from_file("tests/fixtures/config/_til.yml").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(result.sitename, "Scratchpad");
        assert_eq!(result.port, 8000);
        assert_eq!(result.bind, "0.0.0.0");
        // Keys the file leaves out keep their defaults
        assert_eq!(result.author, "Ben Cliff");
        assert_eq!(result.static_paths, SiteConfig::default().static_paths);
    }

    #[test]
    fn test_from_file_repeatable() {
        let first = SiteConfig::from_file("tests/fixtures/config/_til.yml").unwrap();
        let second = SiteConfig::from_file("tests/fixtures/config/_til.yml").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_file_shipped() {
        let result = SiteConfig::from_file("../../_til.yml").unwrap();
        let expected = SiteConfig {
            root: path::Path::new("../..").to_path_buf(),
            ..Default::default()
        };
        assert_eq!(result, expected);
    }

    #[test]
    fn test_from_file_feeds() {
        let result = SiteConfig::from_file("tests/fixtures/config/feeds.yml").unwrap();
        assert_eq!(
            result.feed_all_atom,
            Some(Feed::Path("feeds/all.atom.xml".to_owned()))
        );
        assert_eq!(result.category_feed_atom, Some(Feed::Toggle(true)));
        assert_eq!(result.author_feed_rss, None);
        assert_eq!(
            result.enabled_feeds(),
            vec!["FEED_ALL_ATOM", "CATEGORY_FEED_ATOM"]
        );
    }

    #[test]
    fn test_from_file_social() {
        let result = SiteConfig::from_file("tests/fixtures/config/feeds.yml").unwrap();
        assert_eq!(
            result.social,
            vec![
                SocialLink::new("github", "https://github.com/Ben-Cliff"),
                SocialLink::new("mastodon", "https://hachyderm.io/@ben"),
            ]
        );
    }

    #[test]
    fn test_from_file_passes_through_templates() {
        let result = SiteConfig::from_file("tests/fixtures/config/feeds.yml").unwrap();
        assert!(!result.page_url.has_slug());
        assert_eq!(result.page_url.render("ignored"), "pages/");
    }

    #[test]
    fn test_from_file_empty() {
        let result = SiteConfig::from_file("tests/fixtures/config/empty.yml").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(result.port, 8080);
    }

    #[test]
    fn test_from_file_invalid_syntax() {
        let result = SiteConfig::from_file("tests/fixtures/config/invalid_syntax.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_port() {
        let result = SiteConfig::from_file("tests/fixtures/config/invalid_port.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_not_found() {
        let result = SiteConfig::from_file("tests/fixtures/config/config_does_not_exist.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_cwd_ok() {
        let result = SiteConfig::from_cwd("tests/fixtures/config/child").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(result.sitename, "Scratchpad");
    }

    #[test]
    fn test_from_cwd_not_found() {
        let result = SiteConfig::from_cwd("tests/fixtures").unwrap();
        assert_eq!(result.root, path::Path::new("tests/fixtures").to_path_buf());
        assert_eq!(result.sitename, "Today I Learned");
    }

    #[test]
    fn find_project_file_same_dir() {
        let actual = find_project_file("tests/fixtures/config", CONFIG_FILE_NAME).unwrap();
        let expected = path::Path::new("tests/fixtures/config/_til.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_parent_dir() {
        let actual = find_project_file("tests/fixtures/config/child", CONFIG_FILE_NAME).unwrap();
        let expected = path::Path::new("tests/fixtures/config/_til.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_doesnt_exist() {
        let expected = path::Path::new("<NOT FOUND>");
        let actual = find_project_file("tests/fixtures/", "_missing.yml")
            .unwrap_or_else(|| expected.into());
        assert_eq!(actual, expected);
    }
}
