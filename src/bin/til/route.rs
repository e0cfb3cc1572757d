use crate::args;
use crate::error::Result;

/// Print where a post or page would be linked and written
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct RouteArgs {
    /// Kind of content
    #[arg(value_enum)]
    pub(crate) kind: ContentKind,

    /// Title or slug of the content
    pub(crate) title: String,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ContentKind {
    Article,
    Page,
}

impl RouteArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;

        let slug = til_config::path::slugify(&self.title);
        if slug.is_empty() {
            anyhow::bail!("`{}` has no characters usable in a slug", self.title);
        }
        log::debug!("Slug for `{}` is `{}`", self.title, slug);

        let route = match self.kind {
            ContentKind::Article => config.article_route(&slug),
            ContentKind::Page => config.page_route(&slug),
        };
        println!("url: {}", route.url);
        println!("save_as: {}", route.save_as);

        Ok(())
    }
}
