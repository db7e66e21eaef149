//! Active filter and sort criteria for the job listing.

use crate::checkbox::CheckboxSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries offered as checkboxes by the interactive browser.
pub const COUNTRY_CHOICES: [&str; 5] = ["USA", "UK", "India", "Canada", "Germany"];

/// Tags offered as checkboxes by the interactive browser.
pub const TAG_CHOICES: [&str; 5] = ["Remote", "Hybrid", "On-site", "Graduate", "Senior"];

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort order understood by the collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest posting first.
    #[default]
    PostingDateDesc,
    /// Oldest posting first.
    PostingDateAsc,
    CompanyAsc,
    CompanyDesc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    /// Every sort order, in the order a selector should list them.
    pub const ALL: [Self; 6] = [
        Self::PostingDateDesc,
        Self::PostingDateAsc,
        Self::CompanyAsc,
        Self::CompanyDesc,
        Self::TitleAsc,
        Self::TitleDesc,
    ];

    /// Wire value sent as the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostingDateDesc => "posting_date_desc",
            Self::PostingDateAsc => "posting_date_asc",
            Self::CompanyAsc => "company_asc",
            Self::CompanyDesc => "company_desc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }

    /// Human label for selectors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PostingDateDesc => "Newest First",
            Self::PostingDateAsc => "Oldest First",
            Self::CompanyAsc => "Company A–Z",
            Self::CompanyDesc => "Company Z–A",
            Self::TitleAsc => "Title A–Z",
            Self::TitleDesc => "Title Z–A",
        }
    }

    /// The next entry in [`SortOrder::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous entry in [`SortOrder::ALL`], wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a sort string is not one of [`SortOrder::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown sort order '{0}': expected one of posting_date_desc, posting_date_asc, company_asc, company_desc, title_asc, title_desc"
)]
pub struct ParseSortError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "posting_date_desc" | "newest" => Ok(Self::PostingDateDesc),
            "posting_date_asc" | "oldest" => Ok(Self::PostingDateAsc),
            "company_asc" => Ok(Self::CompanyAsc),
            "company_desc" => Ok(Self::CompanyDesc),
            "title_asc" => Ok(Self::TitleAsc),
            "title_desc" => Ok(Self::TitleDesc),
            _ => Err(ParseSortError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Names of the individual filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Keyword,
    Country,
    Tag,
    JobType,
    Sort,
}

impl FilterField {
    /// Whether the field holds a set of checkbox tokens.
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::Country | Self::Tag)
    }
}

/// One user edit to the filter criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Replace the free-text keyword.
    Keyword(String),
    /// Flip one country checkbox.
    ToggleCountry(String),
    /// Flip one tag checkbox.
    ToggleTag(String),
    /// Replace the job type.
    JobType(String),
    /// Replace the sort order.
    Sort(SortOrder),
    /// Restore every field to its default.
    Reset,
}

/// Filter criteria applied to the job listing.
///
/// All fields default to "no constraint"; `sort` defaults to
/// [`SortOrder::PostingDateDesc`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text search (title or company, interpreted by the server).
    pub keyword: String,
    /// Selected countries. Sent as the `location` query parameter.
    pub country: CheckboxSet,
    /// Selected tags.
    pub tag: CheckboxSet,
    /// Job type (free text).
    pub job_type: String,
    /// Sort order.
    pub sort: SortOrder,
}

impl FilterState {
    /// Returns true if every field holds its default value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Restore all fields to their defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one edit.
    ///
    /// Returns `true` if the criteria changed as a result.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let before = self.clone();
        match update {
            FilterUpdate::Keyword(keyword) => self.keyword = keyword,
            FilterUpdate::ToggleCountry(token) => {
                self.country.toggle(&token);
            }
            FilterUpdate::ToggleTag(token) => {
                self.tag.toggle(&token);
            }
            FilterUpdate::JobType(job_type) => self.job_type = job_type,
            FilterUpdate::Sort(sort) => self.sort = sort,
            FilterUpdate::Reset => self.reset(),
        }
        *self != before
    }

    /// String-keyed edit: scalar fields are replaced, multi-valued fields
    /// toggle `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSortError`] when `field` is [`FilterField::Sort`] and
    /// `value` is not a known sort order. The state is left untouched.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<bool, ParseSortError> {
        let update = match field {
            FilterField::Keyword => FilterUpdate::Keyword(value.to_string()),
            FilterField::Country => FilterUpdate::ToggleCountry(value.to_string()),
            FilterField::Tag => FilterUpdate::ToggleTag(value.to_string()),
            FilterField::JobType => FilterUpdate::JobType(value.to_string()),
            FilterField::Sort => FilterUpdate::Sort(value.parse()?),
        };
        Ok(self.apply(update))
    }

    /// Short one-line description of the active criteria, for status lines.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.keyword.is_empty() {
            parts.push(format!("keyword={}", self.keyword));
        }
        if !self.country.is_empty() {
            parts.push(format!("country={}", self.country));
        }
        if !self.tag.is_empty() {
            parts.push(format!("tag={}", self.tag));
        }
        if !self.job_type.is_empty() {
            parts.push(format!("type={}", self.job_type));
        }
        parts.push(format!("sort={}", self.sort));
        parts.join(" ")
    }
}
