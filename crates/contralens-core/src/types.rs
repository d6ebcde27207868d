//! Contract records as served by the list and detail fixtures.

use serde::{Deserialize, Serialize};

/// A row of the contract list.
///
/// `status` and `risk` are kept as the raw fixture strings so that values
/// outside the known vocabulary still load; use [`StatusKind::classify`] and
/// [`RiskLevel::classify`] when a category is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub id: String,
    pub name: String,
    pub parties: String,
    /// ISO 8601 date string.
    pub expiry: String,
    pub status: String,
    pub risk: String,
}

/// A clause extracted from a contract, with a model confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub summary: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub risk: String,
    pub message: String,
}

/// A retrieved snippet backing the insights, with relevance in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub snippet: String,
    pub relevance: f64,
}

/// The detail view of a contract, keyed by `id` in the detail fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDetail {
    pub id: String,
    pub name: String,
    pub parties: String,
    /// ISO 8601 date string.
    pub start: String,
    /// ISO 8601 date string.
    pub expiry: String,
    pub status: String,
    pub risk: String,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl ContractDetail {
    /// The list-view projection of this record.
    pub fn summary(&self) -> ContractSummary {
        ContractSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            parties: self.parties.clone(),
            expiry: self.expiry.clone(),
            status: self.status.clone(),
            risk: self.risk.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Active,
    Expired,
    RenewalDue,
    Other,
}

impl StatusKind {
    pub fn classify(status: &str) -> Self {
        match status {
            "Active" => Self::Active,
            "Expired" => Self::Expired,
            "Renewal Due" => Self::RenewalDue,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Other,
}

impl RiskLevel {
    pub fn classify(risk: &str) -> Self {
        match risk {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Other,
        }
    }
}

/// Round a `[0, 1]` score to a whole percentage.
pub fn percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
