//! Search, status/risk filtering, and pagination over the contract list.
//!
//! The engine is a pure function of its inputs: it never re-sorts, never
//! clamps the requested page, and never fails on filter values it does not
//! recognise. A filter value outside the known vocabulary simply matches
//! nothing.

use thiserror::Error;
use tracing::debug;

use crate::types::ContractSummary;

/// Filter value that disables the status or risk predicate.
pub const ALL: &str = "all";

/// Rows per page in the dashboard table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Current search text, filters, and 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub status_filter: String,
    pub risk_filter: String,
    pub page: usize,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: ALL.to_string(),
            risk_filter: ALL.to_string(),
            page: 1,
        }
    }
}

impl FilterCriteria {
    /// True when any predicate narrows the list.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty() || self.status_filter != ALL || self.risk_filter != ALL
    }
}

/// One page of the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractPage<'a> {
    pub visible_rows: Vec<&'a ContractSummary>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    page_size: usize,
}

impl ContractPage<'_> {
    /// 1-based first and last row numbers on this page, for a
    /// "Showing X to Y of N" label. `None` when the page is empty.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.visible_rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some((first, first + self.visible_rows.len() - 1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Filter/paginate engine with a fixed page size.
#[derive(Debug, Clone, Copy)]
pub struct ListEngine {
    page_size: usize,
}

impl Default for ListEngine {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListEngine {
    pub fn new(page_size: usize) -> Result<Self, FilterError> {
        if page_size == 0 {
            return Err(FilterError::ZeroPageSize);
        }
        Ok(Self { page_size })
    }

    /// Whether a single contract passes the search, status, and risk predicates.
    pub fn matches(&self, contract: &ContractSummary, criteria: &FilterCriteria) -> bool {
        let needle = criteria.search_term.to_lowercase();
        matches_with_needle(contract, criteria, &needle)
    }

    /// The filtered view, in input order, before pagination.
    pub fn filter<'a>(
        &self,
        contracts: &'a [ContractSummary],
        criteria: &FilterCriteria,
    ) -> Vec<&'a ContractSummary> {
        let needle = criteria.search_term.to_lowercase();
        contracts
            .iter()
            .filter(|c| matches_with_needle(c, criteria, &needle))
            .collect()
    }

    /// Filter `contracts` and cut out the page named by `criteria.page`.
    ///
    /// A page of 0 or past the last page yields an empty `visible_rows`.
    pub fn apply<'a>(
        &self,
        contracts: &'a [ContractSummary],
        criteria: &FilterCriteria,
    ) -> ContractPage<'a> {
        let filtered = self.filter(contracts, criteria);
        let total_filtered = filtered.len();
        let total_pages = total_filtered.div_ceil(self.page_size);

        let visible_rows = match criteria.page.checked_sub(1) {
            Some(index) => {
                let start = index.saturating_mul(self.page_size);
                filtered
                    .into_iter()
                    .skip(start)
                    .take(self.page_size)
                    .collect()
            }
            None => Vec::new(),
        };

        debug!(
            input = contracts.len(),
            total_filtered,
            total_pages,
            page = criteria.page,
            visible = visible_rows.len(),
            "applied contract filters"
        );

        ContractPage {
            visible_rows,
            total_filtered,
            total_pages,
            current_page: criteria.page,
            page_size: self.page_size,
        }
    }
}

fn matches_with_needle(contract: &ContractSummary, criteria: &FilterCriteria, needle: &str) -> bool {
    let matches_search = needle.is_empty()
        || contract.name.to_lowercase().contains(needle)
        || contract.parties.to_lowercase().contains(needle);
    let matches_status = criteria.status_filter == ALL || contract.status == criteria.status_filter;
    let matches_risk = criteria.risk_filter == ALL || contract.risk == criteria.risk_filter;
    matches_search && matches_status && matches_risk
}

/// Clamp a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(id: &str, name: &str, parties: &str, status: &str, risk: &str) -> ContractSummary {
        ContractSummary {
            id: id.into(),
            name: name.into(),
            parties: parties.into(),
            expiry: "2025-12-31".into(),
            status: status.into(),
            risk: risk.into(),
        }
    }

    fn numbered(n: usize) -> Vec<ContractSummary> {
        (1..=n)
            .map(|i| contract(&format!("c-{i:03}"), &format!("Contract {i}"), "Acme", "Active", "Low"))
            .collect()
    }

    fn ids(page: &ContractPage<'_>) -> Vec<String> {
        page.visible_rows.iter().map(|c| c.id.clone()).collect()
    }

    fn search(term: &str) -> FilterCriteria {
        FilterCriteria {
            search_term: term.into(),
            ..Default::default()
        }
    }

    #[test]
    fn search_is_case_insensitive_on_name_or_parties() {
        let contracts = vec![contract("1", "Acme MSA", "Acme Corp, Globex", "Active", "High")];
        let engine = ListEngine::default();

        assert_eq!(engine.apply(&contracts, &search("acme")).total_filtered, 1);
        assert_eq!(engine.apply(&contracts, &search("Globex")).total_filtered, 1);
        assert_eq!(engine.apply(&contracts, &search("GLOBEX")).total_filtered, 1);
        assert_eq!(engine.apply(&contracts, &search("initech")).total_filtered, 0);
    }

    #[test]
    fn empty_search_matches_everything() {
        let contracts = numbered(3);
        let page = ListEngine::default().apply(&contracts, &FilterCriteria::default());
        assert_eq!(page.total_filtered, 3);
    }

    #[test]
    fn status_and_risk_are_exact_and_combined() {
        let contracts = vec![
            contract("1", "A", "P", "Active", "High"),
            contract("2", "B", "P", "Expired", "High"),
            contract("3", "C", "P", "Active", "Low"),
        ];
        let criteria = FilterCriteria {
            status_filter: "Active".into(),
            risk_filter: "High".into(),
            ..Default::default()
        };
        let page = ListEngine::default().apply(&contracts, &criteria);
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn status_filter_is_case_sensitive() {
        let contracts = vec![contract("1", "A", "P", "Active", "High")];
        let criteria = FilterCriteria {
            status_filter: "active".into(),
            ..Default::default()
        };
        assert_eq!(ListEngine::default().apply(&contracts, &criteria).total_filtered, 0);
    }

    #[test]
    fn search_composes_with_filters() {
        let contracts = vec![
            contract("1", "Acme MSA", "Acme", "Active", "High"),
            contract("2", "Acme NDA", "Acme", "Expired", "High"),
            contract("3", "Globex SOW", "Globex", "Active", "High"),
        ];
        let criteria = FilterCriteria {
            search_term: "acme".into(),
            status_filter: "Active".into(),
            ..Default::default()
        };
        assert_eq!(ids(&ListEngine::default().apply(&contracts, &criteria)), vec!["1"]);
    }

    #[test]
    fn unknown_filter_values_match_nothing_without_panicking() {
        let contracts = vec![
            contract("1", "A", "P", "Suspended", "Critical"),
            contract("2", "B", "P", "Active", "High"),
        ];
        let engine = ListEngine::default();

        let unknown = FilterCriteria {
            status_filter: "Terminated".into(),
            ..Default::default()
        };
        assert_eq!(engine.apply(&contracts, &unknown).total_filtered, 0);

        // Rows with novel values are still visible under "all".
        let page = engine.apply(&contracts, &FilterCriteria::default());
        assert_eq!(ids(&page), vec!["1", "2"]);
    }

    #[test]
    fn filtering_preserves_input_order() {
        let contracts = vec![
            contract("B", "Beta", "P", "Active", "Low"),
            contract("A", "Alpha", "P", "Active", "Low"),
            contract("C", "Gamma", "P", "Active", "Low"),
        ];
        let page = ListEngine::default().apply(&contracts, &FilterCriteria::default());
        assert_eq!(ids(&page), vec!["B", "A", "C"]);
    }

    #[test]
    fn pagination_math() {
        let contracts = numbered(25);
        let engine = ListEngine::new(10).unwrap();

        let first = engine.apply(&contracts, &FilterCriteria::default());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.visible_rows.len(), 10);
        assert_eq!(first.range(), Some((1, 10)));

        let third = engine.apply(&contracts, &FilterCriteria { page: 3, ..Default::default() });
        assert_eq!(third.visible_rows.len(), 5);
        assert_eq!(third.visible_rows[0].id, "c-021");
        assert_eq!(third.range(), Some((21, 25)));
        assert!(third.has_previous());
        assert!(!third.has_next());

        let fourth = engine.apply(&contracts, &FilterCriteria { page: 4, ..Default::default() });
        assert!(fourth.visible_rows.is_empty());
        assert_eq!(fourth.total_filtered, 25);
        assert_eq!(fourth.current_page, 4);
        assert_eq!(fourth.range(), None);
    }

    #[test]
    fn page_zero_and_huge_pages_are_empty() {
        let contracts = numbered(5);
        let engine = ListEngine::default();
        let zero = engine.apply(&contracts, &FilterCriteria { page: 0, ..Default::default() });
        assert!(zero.visible_rows.is_empty());
        let huge = engine.apply(&contracts, &FilterCriteria { page: usize::MAX, ..Default::default() });
        assert!(huge.visible_rows.is_empty());
    }

    #[test]
    fn empty_filtered_list_has_zero_pages() {
        let page = ListEngine::default().apply(&[], &FilterCriteria::default());
        assert_eq!(page.total_filtered, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(ListEngine::new(0).unwrap_err(), FilterError::ZeroPageSize);
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn active_filters_detection() {
        assert!(!FilterCriteria::default().has_active_filters());
        assert!(search("x").has_active_filters());
        let risk = FilterCriteria {
            risk_filter: "Low".into(),
            ..Default::default()
        };
        assert!(risk.has_active_filters());
    }
}
