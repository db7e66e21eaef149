//! Canonical collection query built from filters and the page cursor.
//!
//! The server treats an empty string as "no constraint", so every key is
//! always present. Key order is fixed so two builds from equal inputs
//! produce byte-identical query strings.

use crate::filter::{FilterState, SortOrder};
use crate::pagination::PaginationState;
use serde::Serialize;

/// Query keys in the order they are sent.
pub const QUERY_KEYS: [&str; 7] = [
    "keyword", "location", "tag", "job_type", "sort", "page", "limit",
];

/// A fully resolved request against `GET /api/jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobQuery {
    pub keyword: String,
    /// Encoded country selection; the transport names it `location`.
    pub location: String,
    pub tag: String,
    pub job_type: String,
    pub sort: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl JobQuery {
    /// Compose the query for the given criteria and cursor.
    ///
    /// Total and deterministic: equal inputs always give equal queries.
    #[must_use]
    pub fn build(filters: &FilterState, pagination: &PaginationState) -> Self {
        Self {
            keyword: filters.keyword.clone(),
            location: filters.country.encode(),
            tag: filters.tag.encode(),
            job_type: filters.job_type.clone(),
            sort: filters.sort,
            page: pagination.page(),
            limit: pagination.page_size(),
        }
    }

    /// `(key, value)` pairs in [`QUERY_KEYS`] order.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, String); 7] {
        [
            ("keyword", self.keyword.clone()),
            ("location", self.location.clone()),
            ("tag", self.tag.clone()),
            ("job_type", self.job_type.clone()),
            ("sort", self.sort.as_str().to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }

    /// Form-urlencoded query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterField, FilterUpdate};
    use proptest::prelude::*;

    #[test]
    fn defaults_produce_every_key() {
        let query = JobQuery::build(&FilterState::default(), &PaginationState::default());
        let keys: Vec<&str> = query.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, QUERY_KEYS);
        assert_eq!(
            query.to_query_string(),
            "keyword=&location=&tag=&job_type=&sort=posting_date_desc&page=1&limit=15"
        );
    }

    #[test]
    fn actuary_scenario_matches_expected_query() {
        let mut filters = FilterState::default();
        filters.set(FilterField::Keyword, "actuary").expect("keyword");
        filters.set(FilterField::Country, "USA").expect("country");
        filters.set(FilterField::Country, "UK").expect("country");
        filters.set(FilterField::Sort, "title_asc").expect("sort");
        let mut pagination = PaginationState::new(15);
        pagination.go_to(2);

        let query = JobQuery::build(&filters, &pagination);
        assert_eq!(
            query,
            JobQuery {
                keyword: "actuary".into(),
                location: "USA,UK".into(),
                tag: String::new(),
                job_type: String::new(),
                sort: SortOrder::TitleAsc,
                page: 2,
                limit: 15,
            }
        );
    }

    #[test]
    fn query_string_is_url_encoded() {
        let mut filters = FilterState::default();
        filters.apply(FilterUpdate::Keyword("risk & pricing".into()));
        filters.apply(FilterUpdate::ToggleTag("On-site".into()));
        filters.apply(FilterUpdate::ToggleTag("Remote".into()));
        let query = JobQuery::build(&filters, &PaginationState::default());
        assert_eq!(
            query.to_query_string(),
            "keyword=risk+%26+pricing&location=&tag=On-site%2CRemote&job_type=&sort=posting_date_desc&page=1&limit=15"
        );
    }

    fn arb_filters() -> impl Strategy<Value = FilterState> {
        (
            ".{0,12}",
            prop::collection::vec("[A-Za-z]{1,6}", 0..4),
            prop::collection::vec("[A-Za-z]{1,6}", 0..4),
            "[A-Za-z-]{0,10}",
            prop::sample::select(SortOrder::ALL.to_vec()),
        )
            .prop_map(|(keyword, countries, tags, job_type, sort)| FilterState {
                keyword,
                country: countries.iter().collect(),
                tag: tags.iter().collect(),
                job_type,
                sort,
            })
    }

    proptest! {
        #[test]
        fn build_is_deterministic(filters in arb_filters(), page in 1u32..50, total in 0u64..2000) {
            let mut pagination = PaginationState::new(15);
            pagination.set_total(total);
            pagination.go_to(page);
            let a = JobQuery::build(&filters, &pagination);
            let b = JobQuery::build(&filters.clone(), &pagination);
            prop_assert_eq!(a.to_query_string(), b.to_query_string());
            prop_assert_eq!(a, b);
        }
    }
}
