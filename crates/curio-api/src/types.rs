//! Domain records returned by API operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A string that may be keyed by locale.
///
/// The API returns user-authored fields as locale maps; once a record has
/// been localized for display the field collapses to a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedString {
  Plain(String),
  ByLocale(BTreeMap<String, String>),
}

impl LocalizedString {
  /// Build a single-locale value, the shape produced when a client authors
  /// a field in its active language.
  pub fn in_locale(lang: impl Into<String>, value: impl Into<String>) -> Self {
    Self::ByLocale(BTreeMap::from([(lang.into(), value.into())]))
  }

  /// Collapse to the translation for `lang`.
  ///
  /// Falls back to the first available translation when `lang` is absent.
  pub fn localize(self, lang: &str) -> Self {
    match self {
      Self::Plain(_) => self,
      Self::ByLocale(by_locale) => {
        let value = by_locale
          .get(lang)
          .cloned()
          .or_else(|| by_locale.into_values().next())
          .unwrap_or_default();
        Self::Plain(value)
      }
    }
  }
}

impl From<&str> for LocalizedString {
  fn from(value: &str) -> Self {
    Self::Plain(value.to_string())
  }
}

/// A collection as returned by the detail and listing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
  pub id: u64,
  pub slug: String,
  pub author_username: String,
  pub name: LocalizedString,
  pub description: LocalizedString,
  pub default_locale: String,
  pub addon_count: u64,
  pub modified: DateTime<Utc>,
}

impl CollectionDetail {
  /// The same record with its authored fields collapsed to `lang`.
  pub fn localized(mut self, lang: &str) -> Self {
    self.name = self.name.localize(lang);
    self.description = self.description.localize(lang);
    self
  }
}

/// One add-on entry inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAddon {
  pub addon_id: u64,
  pub name: String,
  pub notes: Option<String>,
}

/// One page of a collection's add-on listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAddonsPage {
  pub addons: Vec<CollectionAddon>,
  /// Total number of add-ons in the collection, across all pages.
  pub count: u64,
}

/// A user account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
  pub id: u64,
  pub username: String,
  pub display_name: Option<String>,
  pub biography: Option<String>,
  pub homepage: Option<String>,
  pub location: Option<String>,
  pub occupation: Option<String>,
  pub picture_url: Option<String>,
}

/// A per-user notification preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub name: String,
  pub enabled: bool,
  /// Mandatory notifications cannot be disabled by the user.
  pub mandatory: bool,
}
