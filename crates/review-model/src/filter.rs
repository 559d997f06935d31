//! Client-side filtering, search and pagination over a fetched collection.

use crate::registration::Registration;
use crate::status::ReviewStatus;
use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Status tab selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Every registration.
    #[default]
    All,
    /// A single derived status.
    Only(ReviewStatus),
}

impl StatusFilter {
    /// Whether a registration passes this filter.
    pub fn accepts(&self, registration: &Registration) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => registration.status() == *status,
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<ReviewStatus>().map(StatusFilter::Only)
    }
}

/// Per-status counts for filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Total rows.
    pub all: usize,
    /// Pending rows.
    pub pending: usize,
    /// Approved rows.
    pub approved: usize,
    /// Rejected rows.
    pub rejected: usize,
}

impl StatusCounts {
    /// Count a collection.
    pub fn tally<'a>(registrations: impl IntoIterator<Item = &'a Registration>) -> Self {
        registrations
            .into_iter()
            .fold(Self::default(), |mut counts, registration| {
                counts.all += 1;
                match registration.status() {
                    ReviewStatus::Pending => counts.pending += 1,
                    ReviewStatus::Approved => counts.approved += 1,
                    ReviewStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    /// Count for a given filter tab.
    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(ReviewStatus::Pending) => self.pending,
            StatusFilter::Only(ReviewStatus::Approved) => self.approved,
            StatusFilter::Only(ReviewStatus::Rejected) => self.rejected,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// 1-based page number actually served (clamped).
    pub page: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Rows matching the query across all pages.
    pub total_items: usize,
}

/// Status filter + free-text search + pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationQuery {
    /// Status tab.
    pub status: StatusFilter,
    /// Case-insensitive substring matched against name, email and ids.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for RegistrationQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RegistrationQuery {
    /// Set the status filter.
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Set the search term; blank terms clear the search.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    /// Set the page number (1-based).
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Whether a registration matches status and search.
    pub fn matches(&self, registration: &Registration) -> bool {
        if !self.status.accepts(registration) {
            return false;
        }
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let haystacks = [
            Some(registration.name.as_str()),
            registration.email.as_deref(),
            Some(registration.registration_id.as_str()),
            Some(registration.id.as_str()),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(term))
    }

    /// Apply the query, returning the requested page.
    ///
    /// The page number is clamped into range so a shrinking collection
    /// (e.g. after a re-fetch) never yields an empty page past the end.
    pub fn apply<'a>(&self, registrations: &'a [Registration]) -> Page<&'a Registration> {
        let matching: Vec<&Registration> =
            registrations.iter().filter(|r| self.matches(r)).collect();
        let page_size = self.page_size.max(1);
        let total_items = matching.len();
        let total_pages = total_items.div_ceil(page_size).max(1);
        let page = self.page.clamp(1, total_pages);
        let items = matching
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Page {
            items,
            page,
            total_pages,
            total_items,
        }
    }
}
