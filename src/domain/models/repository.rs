use serde::{Deserialize, Serialize};

/// A GitHub repository as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Surrogate key assigned by the store on insert.
    pub id: i64,
    /// Natural key in `owner/name` form. Never changes after creation.
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stars: i64,
    pub open_issues_count: i64,
    pub contributors_count: i64,
}

impl Repository {
    /// Overwrite every mutable field from a freshly fetched record.
    ///
    /// `contributors_count` is only touched when the record carries one.
    pub fn apply(&mut self, raw: &RawRepository) {
        apply_fetched(
            raw,
            MutableFields {
                description: &mut self.description,
                html_url: &mut self.html_url,
                stars: &mut self.stars,
                open_issues_count: &mut self.open_issues_count,
                contributors_count: &mut self.contributors_count,
            },
        );
    }
}

/// A repository staged for insertion; it has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepository {
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stars: i64,
    pub open_issues_count: i64,
    pub contributors_count: i64,
}

impl NewRepository {
    pub fn apply(&mut self, raw: &RawRepository) {
        apply_fetched(
            raw,
            MutableFields {
                description: &mut self.description,
                html_url: &mut self.html_url,
                stars: &mut self.stars,
                open_issues_count: &mut self.open_issues_count,
                contributors_count: &mut self.contributors_count,
            },
        );
    }
}

impl From<&RawRepository> for NewRepository {
    fn from(raw: &RawRepository) -> Self {
        Self {
            full_name: raw.full_name.clone(),
            description: raw.description.clone(),
            html_url: raw.html_url.clone(),
            stars: raw.stars,
            open_issues_count: raw.open_issues_count,
            contributors_count: raw.contributors_count.unwrap_or(0),
        }
    }
}

/// A repository record as produced by a data source, before reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRepository {
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stars: i64,
    pub open_issues_count: i64,
    /// Only set by sources that know the count up front (the CSV file).
    pub contributors_count: Option<i64>,
}

/// The fields a sync may overwrite, borrowed from either repository shape.
struct MutableFields<'a> {
    description: &'a mut Option<String>,
    html_url: &'a mut String,
    stars: &'a mut i64,
    open_issues_count: &'a mut i64,
    contributors_count: &'a mut i64,
}

fn apply_fetched(raw: &RawRepository, fields: MutableFields<'_>) {
    fields.description.clone_from(&raw.description);
    fields.html_url.clone_from(&raw.html_url);
    *fields.stars = raw.stars;
    *fields.open_issues_count = raw.open_issues_count;
    if let Some(count) = raw.contributors_count {
        *fields.contributors_count = count;
    }
}

/// Split an `owner/name` pair.
///
/// Returns `None` unless the name has exactly two non-empty components.
pub fn split_full_name(full_name: &str) -> Option<(&str, &str)> {
    let mut parts = full_name.split('/');
    let owner = parts.next()?;
    let name = parts.next()?;
    if parts.next().is_some() || owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}
