use std::collections::BTreeMap;

use crate::{Result, Status};

static SLUG_INVALID_CHARS: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a slug for a title, suitable for `{slug}` in URL templates
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-").replace('\'', "");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}

/// Match `pattern` against the start of a content-relative path and collect its named groups.
///
/// Backslashes in `rel_path` are normalized to `/` first.  A path the pattern doesn't match
/// yields no metadata.
pub fn extract_metadata(pattern: &str, rel_path: &str) -> Result<BTreeMap<String, String>> {
    let re = regex::Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
        Status::new("Invalid PATH_METADATA pattern")
            .with_source(e)
            .context_with(|c| c.insert("Pattern", pattern.to_owned()))
    })?;

    let rel_path = rel_path.replace('\\', "/");
    let mut metadata = BTreeMap::new();
    if let Some(caps) = re.captures(&rel_path) {
        for name in re.capture_names().flatten() {
            if let Some(value) = caps.name(name) {
                metadata.insert(name.to_owned(), value.as_str().to_owned());
            }
        }
    }
    Ok(metadata)
}
