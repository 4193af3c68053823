use url::form_urlencoded;

use crate::config::CardDefaults;

/// Fully resolved inputs for one card render. Every field the layout needs is
/// present; optional query parameters have already been replaced with their
/// configured defaults.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderRequest {
    pub title: String,
    pub description: String,
    pub avatar: String,
    pub author: String,
    pub logo: Option<String>,
    pub theme: String,
}

impl RenderRequest {
    /// Resolve a raw query string against the configured defaults.
    ///
    /// The query is decoded as form-urlencoded (`+` as space, `%XX` escapes
    /// decoded lossily), so resolution never fails: unknown keys are ignored,
    /// the first occurrence of a repeated key wins, and a missing or empty
    /// value falls back to the default for that field.
    pub fn resolve(query: Option<&str>, defaults: &CardDefaults) -> Self {
        let mut title = None;
        let mut description = None;
        let mut avatar = None;
        let mut author = None;
        let mut logo = None;
        let mut theme = None;
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "title" => &mut title,
                "description" => &mut description,
                "avatar" => &mut avatar,
                "author" => &mut author,
                "logo" => &mut logo,
                "theme" => &mut theme,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Self {
            title: title.unwrap_or_else(|| defaults.title.clone()),
            description: description.unwrap_or_else(|| defaults.description.clone()),
            avatar: avatar.unwrap_or_else(|| defaults.avatar.clone()),
            author: author.unwrap_or_else(|| defaults.author.clone()),
            logo: logo.or_else(|| defaults.logo.clone()),
            theme: theme.unwrap_or_else(|| defaults.theme.clone()),
        }
    }
}

/// How an avatar or logo value should be rendered.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MediaSource<'a> {
    /// Fetch the resource and embed it as an image.
    Url(&'a str),
    /// Draw the value itself, e.g. an emoji or initials.
    Text(&'a str),
}

/// Classify an avatar or logo value: anything starting with `http` is treated
/// as a URL to embed, everything else is drawn as text.
pub fn classify(value: &str) -> MediaSource<'_> {
    if value.starts_with("http") { MediaSource::Url(value) } else { MediaSource::Text(value) }
}
