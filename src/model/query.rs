use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion filter applied by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn next(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!(
                "unknown status filter: {other} (expected all, active or completed)"
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "dueDate")]
    DueDate,
    #[serde(rename = "priority")]
    Priority,
    #[serde(rename = "title")]
    Title,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::DueDate => "dueDate",
            SortField::Priority => "priority",
            SortField::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Sort key and direction, written as `<field>-<asc|desc>` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Sort { field, order }
    }

    /// The sort options offered by the UI, in menu order
    pub const OPTIONS: [Sort; 6] = [
        Sort::new(SortField::DueDate, SortOrder::Asc),
        Sort::new(SortField::DueDate, SortOrder::Desc),
        Sort::new(SortField::Priority, SortOrder::Desc),
        Sort::new(SortField::Priority, SortOrder::Asc),
        Sort::new(SortField::Title, SortOrder::Asc),
        Sort::new(SortField::Title, SortOrder::Desc),
    ];

    pub fn label(self) -> &'static str {
        match (self.field, self.order) {
            (SortField::DueDate, SortOrder::Asc) => "Due Date (Earliest)",
            (SortField::DueDate, SortOrder::Desc) => "Due Date (Latest)",
            (SortField::Priority, SortOrder::Desc) => "Priority (Highest)",
            (SortField::Priority, SortOrder::Asc) => "Priority (Lowest)",
            (SortField::Title, SortOrder::Asc) => "Title (A-Z)",
            (SortField::Title, SortOrder::Desc) => "Title (Z-A)",
        }
    }

    /// Next entry in `OPTIONS`, wrapping around
    pub fn next(self) -> Sort {
        let idx = Sort::OPTIONS.iter().position(|s| *s == self).unwrap_or(0);
        Sort::OPTIONS[(idx + 1) % Sort::OPTIONS.len()]
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort::new(SortField::DueDate, SortOrder::Asc)
    }
}

impl FromStr for Sort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("invalid sort: {s} (expected <field>-<asc|desc>)"))?;
        let field = match field {
            "dueDate" => SortField::DueDate,
            "priority" => SortField::Priority,
            "title" => SortField::Title,
            other => return Err(format!("unknown sort field: {other}")),
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => return Err(format!("unknown sort direction: {other}")),
        };
        Ok(Sort { field, order })
    }
}

impl TryFrom<String> for Sort {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Sort> for String {
    fn from(s: Sort) -> String {
        s.to_string()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.as_str(), self.order.as_str())
    }
}

/// Parameters of a list call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub sort: Sort,
    pub status: StatusFilter,
    pub search: String,
}

impl ListQuery {
    /// Query-string pairs as sent to the store.
    ///
    /// `status` is omitted for `all` and `search` when blank.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("sort", self.sort.to_string())];
        if self.status != StatusFilter::All {
            params.push(("status", self.status.as_str().to_string()));
        }
        let term = self.search.trim();
        if !term.is_empty() {
            params.push(("search", term.to_string()));
        }
        params
    }
}
