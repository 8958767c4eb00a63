use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DEFAULT_TAG: &str = "Airdrop";
pub const DEFAULT_MAX_TABS: u32 = 10;
pub const DEFAULT_BACKUP_FREQUENCY_DAYS: u32 = 7;

/// One saved URL.
///
/// Field order and names match the persisted JSON (`id`, `url`, `title`,
/// `tags`, `createdAt`) so exported files stay readable by the extension.
///
/// Reading is lenient: older arrays carry numeric ids, `null` or missing tags
/// and no `createdAt`. Those load as a stringified id, no tags and an empty
/// timestamp instead of failing the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Link {
    /// Builds a fresh link: new id, current timestamp, normalized url and tags.
    pub fn new(url: &str, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: new_link_id(),
            url: normalize_url(url),
            title: title.into(),
            tags: normalize_tags(tags),
            created_at: timestamp(Utc::now()),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Appends `tag` unless already present. Returns true if the link changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes `tag` if present. Returns true if the link changed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() < before
    }

    /// Parsed `createdAt`, if it is valid RFC 3339.
    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A url/title pair that has not been stored yet (UI add path, single-link import).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkDraft {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LinkDraft {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// User preferences, persisted as one JSON object under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub max_tabs_to_open: u32,
    pub default_tag: String,
    pub auto_backup: bool,
    /// Days between automatic backups.
    pub backup_frequency: u32,
    pub notifications_enabled: bool,
    pub confirm_before_opening: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_tabs_to_open: DEFAULT_MAX_TABS,
            default_tag: DEFAULT_TAG.to_string(),
            auto_backup: false,
            backup_frequency: DEFAULT_BACKUP_FREQUENCY_DAYS,
            notifications_enabled: true,
            confirm_before_opening: true,
        }
    }
}

impl Settings {
    /// Tags applied to a link added without explicit tags.
    pub fn default_tags(&self) -> Vec<String> {
        let tag = self.default_tag.trim();
        if tag.is_empty() {
            vec![DEFAULT_TAG.to_string()]
        } else {
            vec![tag.to_string()]
        }
    }
}

pub fn new_link_id() -> String {
    Uuid::new_v4().to_string()
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Ensures the url carries an `http://` or `https://` scheme, prefixing
/// `https://` when none is present.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url
        .get(..8)
        .map(|p| p.to_ascii_lowercase())
        .unwrap_or_else(|| url.to_ascii_lowercase());
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Trims tags, drops empty ones and removes duplicates keeping first occurrence.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
