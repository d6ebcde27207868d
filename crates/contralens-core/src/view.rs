//! Caller-side list state: the table's "back to page 1 on filter change" policy.

use crate::filter::{ContractPage, FilterCriteria, ListEngine, clamp_page};
use crate::types::ContractSummary;

const EMPTY_FILTERED: &str = "Try adjusting your search or filters";
const EMPTY_UNFILTERED: &str = "No contracts have been uploaded yet";

/// Filter state for one loaded contract list.
///
/// Changing the search text or either filter returns to page 1. Page moves are
/// bounded by the page count of the current filtered view.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    criteria: FilterCriteria,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.criteria.page = 1;
    }

    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        self.criteria.status_filter = status.into();
        self.criteria.page = 1;
    }

    pub fn set_risk_filter(&mut self, risk: impl Into<String>) {
        self.criteria.risk_filter = risk.into();
        self.criteria.page = 1;
    }

    /// Jump to `page`, clamped to the pages available for `contracts`.
    pub fn go_to(&mut self, engine: &ListEngine, contracts: &[ContractSummary], page: usize) {
        let total_pages = engine.apply(contracts, &self.criteria).total_pages;
        self.criteria.page = clamp_page(page, total_pages);
    }

    pub fn next_page(&mut self, engine: &ListEngine, contracts: &[ContractSummary]) {
        let next = self.criteria.page.saturating_add(1);
        self.go_to(engine, contracts, next);
    }

    pub fn previous_page(&mut self, engine: &ListEngine, contracts: &[ContractSummary]) {
        let previous = self.criteria.page.saturating_sub(1);
        self.go_to(engine, contracts, previous);
    }

    pub fn page<'a>(&self, engine: &ListEngine, contracts: &'a [ContractSummary]) -> ContractPage<'a> {
        engine.apply(contracts, &self.criteria)
    }

    /// Message for an empty filtered view.
    pub fn empty_message(&self) -> &'static str {
        if self.criteria.has_active_filters() {
            EMPTY_FILTERED
        } else {
            EMPTY_UNFILTERED
        }
    }
}
