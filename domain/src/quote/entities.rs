//! Quote entities

use super::text::{normalize_tags, validate_text};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque quote identifier (assigned by the store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(pub i64);

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QuoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Owner of a quote collection (e.g. a chat id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A stored quotation (Entity)
///
/// Only `tags` and `is_favorite` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub owner_id: OwnerId,
    pub text: String,
    pub source_url: Option<String>,
    pub source_title: Option<String>,
    pub source_domain: Option<String>,
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
}

impl Quote {
    /// Build a quote from its stored parts (used by adapters and tests).
    pub fn new(
        id: impl Into<QuoteId>,
        owner_id: OwnerId,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id,
            text: text.into(),
            source_url: None,
            source_title: None,
            source_domain: None,
            tags: BTreeSet::new(),
            created_at,
            is_favorite: false,
        }
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    pub fn with_source(
        mut self,
        url: Option<String>,
        title: Option<String>,
        domain: Option<String>,
    ) -> Self {
        self.source_url = url;
        self.source_title = title;
        self.source_domain = domain;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.trim_start_matches('#').to_lowercase())
    }
}

/// A quote that has not been persisted yet (no id)
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub owner_id: OwnerId,
    pub text: String,
    pub source_url: Option<String>,
    pub source_title: Option<String>,
    pub source_domain: Option<String>,
    pub tags: BTreeSet<String>,
}

impl NewQuote {
    /// Validate and normalise the quote text.
    pub fn new(owner_id: OwnerId, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = validate_text(&text.into())?;
        Ok(Self {
            owner_id,
            text,
            source_url: None,
            source_title: None,
            source_domain: None,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    /// Attach a source URL, deriving the domain from it when possible.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.source_domain = domain_of(&url);
        self.source_url = Some(url);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.source_title = Some(title.into());
        self
    }
}

/// Extract the host part of an http(s) URL, without a leading `www.`.
fn domain_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.rsplit('@').next()?.split(':').next()?;
    if host.is_empty() {
        return None;
    }
    Some(host.trim_start_matches("www.").to_lowercase())
}
