//! URL record model: one `<url>` entry of a sitemap chunk.

use serde::{Deserialize, Serialize};

/// Change frequencies listed by the sitemaps.org protocol.
pub const CHANGE_FREQUENCIES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// One sitemap entry. The builder only ever borrows records; `change_frequency`,
/// `priority` and `last_modified` are written out as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Absolute URL of the page.
    #[serde(alias = "loc")]
    pub location: String,
    /// Emits `<mobile:mobile/>` after `<loc>` when set.
    #[serde(default, alias = "isMobile")]
    pub mobile: bool,
    #[serde(default, alias = "changefreq", alias = "changeFrequency")]
    pub change_frequency: String,
    #[serde(default)]
    pub priority: f32,
    #[serde(default, alias = "lastmod", alias = "lastModified")]
    pub last_modified: String,
}

impl UrlRecord {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            mobile: false,
            change_frequency: String::new(),
            priority: 0.0,
            last_modified: String::new(),
        }
    }

    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = mobile;
        self
    }

    pub fn change_frequency(mut self, freq: impl Into<String>) -> Self {
        self.change_frequency = freq.into();
        self
    }

    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn last_modified(mut self, lastmod: impl Into<String>) -> Self {
        self.last_modified = lastmod.into();
        self
    }

    /// Advisory protocol checks. The builder never rejects a record for these;
    /// callers decide whether to surface them.
    pub fn protocol_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !CHANGE_FREQUENCIES.contains(&self.change_frequency.as_str()) {
            warnings.push(format!(
                "{}: changefreq {:?} is not a sitemap protocol value",
                self.location, self.change_frequency
            ));
        }
        if !(0.0..=1.0).contains(&self.priority) {
            warnings.push(format!(
                "{}: priority {} is outside 0.0..=1.0",
                self.location, self.priority
            ));
        }
        warnings
    }
}
