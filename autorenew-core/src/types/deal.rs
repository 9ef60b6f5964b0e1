//! Qualifying deals

use serde::{Deserialize, Serialize};

use super::{DealEntry, DealStatus, FetchOutcome};

/// Purchase-channel value meaning "purchased through us"
pub const PURCHASED_BY_US_CODE: i64 = 1_936_195;

/// Rules a deal must satisfy to be considered for auto-renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationRules {
    /// Required purchase-channel value.
    pub purchased_by_us_code: i64,
}

impl Default for QualificationRules {
    fn default() -> Self {
        Self {
            purchased_by_us_code: PURCHASED_BY_US_CODE,
        }
    }
}

/// Why a deal was left out of the qualifying set.
///
/// When several apply, the first in declaration order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Disqualification {
    /// Deal status is red.
    RedStatus,
    /// No domain linked to the deal.
    MissingDomain,
    /// Purchase channel absent or not "purchased through us".
    PurchaseChannelMismatch,
    /// Purchase never confirmed.
    MissingPurchaseDate,
}

impl std::fmt::Display for Disqualification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedStatus => write!(f, "red status"),
            Self::MissingDomain => write!(f, "no linked domain"),
            Self::PurchaseChannelMismatch => write!(f, "not purchased through us"),
            Self::MissingPurchaseDate => write!(f, "purchase not confirmed"),
        }
    }
}

/// A deal that passed every qualification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub deal_id: u64,
    /// Linked domain; matched case-sensitively against registrar names.
    pub domain_name: String,
    pub company_id: Option<u64>,
    pub company_name: Option<String>,
    pub purchase_channel_code: i64,
    pub purchase_confirmed_date: String,
    /// Never [`DealStatus::Red`].
    pub status: DealStatus,
}

impl DealRecord {
    /// Apply the qualification rules to a translated CRM entry.
    pub fn qualify(entry: DealEntry, rules: &QualificationRules) -> Result<Self, Disqualification> {
        if entry.status == DealStatus::Red {
            return Err(Disqualification::RedStatus);
        }
        let domain_name = entry.domain_name.ok_or(Disqualification::MissingDomain)?;
        let purchase_channel_code = entry
            .purchase_channel_code
            .filter(|code| *code == rules.purchased_by_us_code)
            .ok_or(Disqualification::PurchaseChannelMismatch)?;
        let purchase_confirmed_date = entry
            .purchase_confirmed_date
            .ok_or(Disqualification::MissingPurchaseDate)?;

        let (company_id, company_name) = entry
            .company
            .map_or((None, None), |company| (company.id, company.name));

        Ok(Self {
            deal_id: entry.id,
            domain_name,
            company_id,
            company_name,
            purchase_channel_code,
            purchase_confirmed_date,
            status: entry.status,
        })
    }
}

/// Count of rejected deals per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionTally {
    pub red_status: u32,
    pub missing_domain: u32,
    pub purchase_channel_mismatch: u32,
    pub missing_purchase_date: u32,
}

impl RejectionTally {
    pub fn record(&mut self, reason: Disqualification) {
        let counter = match reason {
            Disqualification::RedStatus => &mut self.red_status,
            Disqualification::MissingDomain => &mut self.missing_domain,
            Disqualification::PurchaseChannelMismatch => &mut self.purchase_channel_mismatch,
            Disqualification::MissingPurchaseDate => &mut self.missing_purchase_date,
        };
        *counter += 1;
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.red_status
            + self.missing_domain
            + self.purchase_channel_mismatch
            + self.missing_purchase_date
    }
}

/// Result of the deal directory fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedDeals {
    /// Qualifying deals, in CRM order.
    pub deals: FetchOutcome<DealRecord>,
    /// Deals seen on fetched pages but filtered out.
    pub rejections: RejectionTally,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DealCompany;

    fn entry() -> DealEntry {
        DealEntry {
            id: 42,
            name: Some("Acme hosting".to_string()),
            status: DealStatus::Green,
            company: Some(DealCompany {
                id: Some(7),
                name: Some("Acme".to_string()),
            }),
            domain_name: Some("acme.com".to_string()),
            purchase_channel_code: Some(PURCHASED_BY_US_CODE),
            purchase_confirmed_date: Some("2019-03-01".to_string()),
        }
    }

    #[test]
    fn complete_deal_qualifies() {
        let record = DealRecord::qualify(entry(), &QualificationRules::default()).unwrap();
        assert_eq!(record.deal_id, 42);
        assert_eq!(record.domain_name, "acme.com");
        assert_eq!(record.company_name.as_deref(), Some("Acme"));
        assert_eq!(record.company_id, Some(7));
        assert_eq!(record.status, DealStatus::Green);
    }

    #[test]
    fn red_is_excluded_regardless_of_other_fields() {
        let mut red = entry();
        red.status = DealStatus::Red;
        assert_eq!(
            DealRecord::qualify(red.clone(), &QualificationRules::default()),
            Err(Disqualification::RedStatus)
        );

        red.domain_name = None;
        red.purchase_confirmed_date = None;
        assert_eq!(
            DealRecord::qualify(red, &QualificationRules::default()),
            Err(Disqualification::RedStatus)
        );
    }

    #[test]
    fn each_missing_field_excludes() {
        let rules = QualificationRules::default();

        let mut no_domain = entry();
        no_domain.domain_name = None;
        assert_eq!(
            DealRecord::qualify(no_domain, &rules),
            Err(Disqualification::MissingDomain)
        );

        let mut no_channel = entry();
        no_channel.purchase_channel_code = None;
        assert_eq!(
            DealRecord::qualify(no_channel, &rules),
            Err(Disqualification::PurchaseChannelMismatch)
        );

        let mut other_channel = entry();
        other_channel.purchase_channel_code = Some(1_936_196);
        assert_eq!(
            DealRecord::qualify(other_channel, &rules),
            Err(Disqualification::PurchaseChannelMismatch)
        );

        let mut unconfirmed = entry();
        unconfirmed.purchase_confirmed_date = None;
        assert_eq!(
            DealRecord::qualify(unconfirmed, &rules),
            Err(Disqualification::MissingPurchaseDate)
        );
    }

    #[test]
    fn unknown_status_is_not_red() {
        let mut unknown = entry();
        unknown.status = DealStatus::Unknown;
        assert!(DealRecord::qualify(unknown, &QualificationRules::default()).is_ok());
    }

    #[test]
    fn custom_channel_code() {
        let rules = QualificationRules {
            purchased_by_us_code: 5,
        };
        let mut deal = entry();
        deal.purchase_channel_code = Some(5);
        assert!(DealRecord::qualify(deal, &rules).is_ok());
        assert_eq!(
            DealRecord::qualify(entry(), &rules),
            Err(Disqualification::PurchaseChannelMismatch)
        );
    }

    #[test]
    fn tally_counts_per_reason() {
        let mut tally = RejectionTally::default();
        tally.record(Disqualification::RedStatus);
        tally.record(Disqualification::RedStatus);
        tally.record(Disqualification::MissingPurchaseDate);
        assert_eq!(tally.red_status, 2);
        assert_eq!(tally.missing_purchase_date, 1);
        assert_eq!(tally.total(), 3);
    }
}
