//! Job records as exchanged with the API, and the editable form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier used to address one job on the resource endpoint.
///
/// The server may send numbers or strings; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(i64),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        value
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(value.trim().to_string()), Self::Number)
    }
}

/// A job as returned by the collection endpoint.
///
/// Apart from `id`, fields are passed through unvalidated. Scalars of any
/// JSON type are accepted and kept as text; fields this client does not know
/// about survive a round trip in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub locations: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub salary: Option<String>,
    /// Comma-joined tag list; see [`JobRecord::tag_list`].
    #[serde(default, deserialize_with = "lenient_text")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_type: Option<String>,
    /// Posting date as reported by the source (e.g. "2d ago").
    #[serde(default, deserialize_with = "lenient_text")]
    pub posted: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRecord {
    /// A record carrying only an identifier.
    #[must_use]
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            title: None,
            company: None,
            country: None,
            locations: None,
            salary: None,
            tags: None,
            job_url: None,
            job_type: None,
            posted: None,
            extra: Map::new(),
        }
    }

    /// Tags split on commas, trimmed, with empty segments dropped.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        split_tags(self.tags.as_deref().unwrap_or_default())
    }

    /// Title or a placeholder for display.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or("(untitled)")
    }

    /// `company | country | locations | job_type`, skipping blanks.
    #[must_use]
    pub fn subtitle(&self) -> String {
        [
            self.company.as_deref(),
            self.country.as_deref(),
            self.locations.as_deref(),
            self.job_type.as_deref(),
        ]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

/// Split a comma-joined tag string for display.
#[must_use]
pub fn split_tags(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Editable fields of the add/edit form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Company,
    Country,
    Locations,
    Salary,
    Tags,
    JobUrl,
    Posted,
}

impl FormField {
    pub const ALL: [Self; 8] = [
        Self::Title,
        Self::Company,
        Self::Country,
        Self::Locations,
        Self::Salary,
        Self::Tags,
        Self::JobUrl,
        Self::Posted,
    ];

    /// Fields that must be non-blank before a submit reaches the network.
    pub const REQUIRED: [Self; 3] = [Self::Title, Self::Company, Self::JobUrl];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Job Title",
            Self::Company => "Company",
            Self::Country => "Country",
            Self::Locations => "Locations",
            Self::Salary => "Salary",
            Self::Tags => "Tags (comma-separated)",
            Self::JobUrl => "Job URL",
            Self::Posted => "Posted (e.g., 2d ago)",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Request body for create and update.
///
/// `None` fields are left out of the JSON body, so an update only touches
/// the fields that were supplied. The interactive editor fills every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<String>,
    /// Not an editable field; carried over from the record being edited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
}

impl JobForm {
    /// A form with every field present and empty, as the create dialog
    /// starts out.
    #[must_use]
    pub fn blank() -> Self {
        let mut form = Self::default();
        for field in FormField::ALL {
            *form.slot_mut(field) = Some(String::new());
        }
        form
    }

    /// A fully populated form for editing `record`.
    ///
    /// `job_type` is sent back unchanged. Unknown `extra` fields are not.
    #[must_use]
    pub fn from_record(record: &JobRecord) -> Self {
        let text = |v: &Option<String>| Some(v.clone().unwrap_or_default());
        Self {
            title: text(&record.title),
            company: text(&record.company),
            country: text(&record.country),
            locations: text(&record.locations),
            salary: text(&record.salary),
            tags: text(&record.tags),
            job_url: text(&record.job_url),
            posted: text(&record.posted),
            job_type: record.job_type.clone(),
        }
    }

    /// Current value of `field`, empty when absent.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        self.slot(field).as_deref().unwrap_or_default()
    }

    /// Set `field` to `value`.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Mutable text of `field`, creating it empty if absent.
    pub fn text_mut(&mut self, field: FormField) -> &mut String {
        self.slot_mut(field).get_or_insert_with(String::new)
    }

    /// Required fields that would block a submit.
    ///
    /// A present-but-blank value always blocks. An absent value blocks only
    /// when `partial` is false (create); an update leaves it unchanged.
    #[must_use]
    pub fn missing_required(&self, partial: bool) -> Vec<FormField> {
        FormField::REQUIRED
            .into_iter()
            .filter(|field| match self.slot(*field) {
                Some(value) => value.trim().is_empty(),
                None => !partial,
            })
            .collect()
    }

    const fn slot(&self, field: FormField) -> &Option<String> {
        match field {
            FormField::Title => &self.title,
            FormField::Company => &self.company,
            FormField::Country => &self.country,
            FormField::Locations => &self.locations,
            FormField::Salary => &self.salary,
            FormField::Tags => &self.tags,
            FormField::JobUrl => &self.job_url,
            FormField::Posted => &self.posted,
        }
    }

    const fn slot_mut(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Title => &mut self.title,
            FormField::Company => &mut self.company,
            FormField::Country => &mut self.country,
            FormField::Locations => &mut self.locations,
            FormField::Salary => &mut self.salary,
            FormField::Tags => &mut self.tags,
            FormField::JobUrl => &mut self.job_url,
            FormField::Posted => &mut self.posted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> JobRecord {
        serde_json::from_value(value).expect("valid job record")
    }

    #[test]
    fn record_accepts_numeric_and_string_ids() {
        assert_eq!(record(json!({"id": 7})).id, JobId::Number(7));
        assert_eq!(
            record(json!({"id": "abc-1"})).id,
            JobId::Text("abc-1".into())
        );
    }

    #[test]
    fn record_tolerates_nulls_and_non_string_scalars() {
        let job = record(json!({
            "id": 1,
            "title": "Pricing Actuary",
            "salary": 85000,
            "country": null,
        }));
        assert_eq!(job.salary.as_deref(), Some("85000"));
        assert_eq!(job.country, None);
        assert_eq!(job.company, None);
    }

    #[test]
    fn record_keeps_unknown_fields() {
        let job = record(json!({"id": 1, "source": "linkedin"}));
        assert_eq!(job.extra.get("source"), Some(&json!("linkedin")));
        let back = serde_json::to_value(&job).expect("serialize");
        assert_eq!(back["source"], json!("linkedin"));
    }

    #[test]
    fn tag_list_trims_and_drops_empties() {
        let job = record(json!({"id": 1, "tags": " Remote, ,Senior ,, Graduate"}));
        assert_eq!(job.tag_list(), ["Remote", "Senior", "Graduate"]);
        assert!(record(json!({"id": 2})).tag_list().is_empty());
    }

    #[test]
    fn subtitle_skips_blank_parts() {
        let job = record(json!({
            "id": 1,
            "company": "Acme Re",
            "country": "",
            "locations": "London",
            "job_type": "Full-time",
        }));
        assert_eq!(job.subtitle(), "Acme Re | London | Full-time");
    }

    #[test]
    fn job_id_from_str_prefers_numbers() {
        assert_eq!(JobId::from("42"), JobId::Number(42));
        assert_eq!(JobId::from(" x9 "), JobId::Text("x9".into()));
        assert_eq!(JobId::Number(42).to_string(), "42");
    }

    #[test]
    fn form_from_record_fills_every_field() {
        let job = record(json!({"id": 3, "title": "Actuary", "company": "Acme"}));
        let form = JobForm::from_record(&job);
        assert_eq!(form.get(FormField::Title), "Actuary");
        assert_eq!(form.salary.as_deref(), Some(""));
        let body = serde_json::to_value(&form).expect("serialize");
        assert_eq!(body.as_object().map(Map::len), Some(8));
    }

    #[test]
    fn form_from_record_keeps_job_type() {
        let job = record(json!({
            "id": 3,
            "title": "Actuary",
            "job_type": "Contract",
            "source": "linkedin",
        }));
        let body = serde_json::to_value(JobForm::from_record(&job)).expect("serialize");
        assert_eq!(body["job_type"], json!("Contract"));
        assert_eq!(body.get("source"), None);
        assert_eq!(body.as_object().map(Map::len), Some(9));
    }

    #[test]
    fn partial_form_serializes_only_supplied_fields() {
        let mut form = JobForm::default();
        form.set(FormField::Salary, "90k");
        let body = serde_json::to_value(&form).expect("serialize");
        assert_eq!(body, json!({"salary": "90k"}));
    }

    #[test]
    fn missing_required_depends_on_mode() {
        let mut form = JobForm::blank();
        form.set(FormField::Company, "Acme");
        form.set(FormField::JobUrl, "http://x");
        assert_eq!(form.missing_required(false), [FormField::Title]);

        let partial = JobForm::default();
        assert!(partial.missing_required(true).is_empty());
        assert_eq!(partial.missing_required(false).len(), 3);

        let mut whitespace = JobForm::default();
        whitespace.set(FormField::Title, "   ");
        assert_eq!(whitespace.missing_required(true), [FormField::Title]);
    }

    #[test]
    fn form_field_navigation_wraps() {
        assert_eq!(FormField::Posted.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Posted);
    }
}
