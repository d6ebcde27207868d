//! Headline counts shown above the contract table.

use crate::types::ContractSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub high_risk: usize,
    pub renewal_due: usize,
    pub active: usize,
}

impl DashboardStats {
    pub fn from_contracts(contracts: &[ContractSummary]) -> Self {
        contracts.iter().fold(Self::default(), |mut stats, c| {
            stats.total += 1;
            if c.risk == "High" {
                stats.high_risk += 1;
            }
            match c.status.as_str() {
                "Renewal Due" => stats.renewal_due += 1,
                "Active" => stats.active += 1,
                _ => {}
            }
            stats
        })
    }
}
