// Transaction terms - the purchase/rental side of a listing
//
// Prices, taxes, rent and utilities are free-form strings kept exactly as
// entered; only the furnished flag is a constrained field.

use serde::{Deserialize, Serialize};

use super::property::Fenced;

// ============================================================================
// TRANSACTION KIND
// ============================================================================

/// The two transaction categories a listing can be offered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Purchase,
    Rental,
}

impl TransactionKind {
    /// Canonical option strings, as shown in prompts.
    pub const OPTIONS: &'static [&'static str] = &["purchase", "rental"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "purchase",
            TransactionKind::Rental => "rental",
        }
    }

    /// Case-insensitive parse from a canonical option string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "purchase" => Some(TransactionKind::Purchase),
            "rental" => Some(TransactionKind::Rental),
            _ => None,
        }
    }
}

/// Whether a rental is offered furnished. Same yes/no shape as the fenced
/// yard flag, kept as its own alias for readability at use sites.
pub type Furnished = Fenced;

// ============================================================================
// TERMS RECORDS
// ============================================================================

/// Terms of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTerms {
    pub price: String,
    pub taxes: String,
}

impl PurchaseTerms {
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            "PURCHASE DETAILS".to_string(),
            format!("selling price: {}", self.price),
            format!("estimated taxes: {}", self.taxes),
        ]
    }
}

/// Terms of a rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalTerms {
    pub rent: String,
    pub utilities: String,
    pub furnished: Furnished,
}

impl RentalTerms {
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            "RENTAL DETAILS".to_string(),
            format!("rent: {}", self.rent),
            format!("estimated utilities: {}", self.utilities),
            format!("furnished: {}", self.furnished.as_str()),
        ]
    }
}

/// Transaction terms, tagged by transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transaction", rename_all = "lowercase")]
pub enum TransactionTerms {
    Purchase(PurchaseTerms),
    Rental(RentalTerms),
}

impl TransactionTerms {
    /// The transaction kind this record belongs to.
    pub fn kind(&self) -> TransactionKind {
        match self {
            TransactionTerms::Purchase(_) => TransactionKind::Purchase,
            TransactionTerms::Rental(_) => TransactionKind::Rental,
        }
    }

    pub fn display_lines(&self) -> Vec<String> {
        match self {
            TransactionTerms::Purchase(terms) => terms.display_lines(),
            TransactionTerms::Rental(terms) => terms.display_lines(),
        }
    }

    /// Headline figure for summaries: the selling price or the monthly rent.
    pub fn headline_amount(&self) -> &str {
        match self {
            TransactionTerms::Purchase(terms) => &terms.price,
            TransactionTerms::Rental(terms) => &terms.rent,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_kind_parse() {
        assert_eq!(TransactionKind::parse("purchase"), Some(TransactionKind::Purchase));
        assert_eq!(TransactionKind::parse("Rental"), Some(TransactionKind::Rental));
        assert_eq!(TransactionKind::parse("lease"), None);
    }

    #[test]
    fn test_transaction_kind_round_trip() {
        for option in TransactionKind::OPTIONS {
            let kind = TransactionKind::parse(option).unwrap();
            assert_eq!(kind.as_str(), *option);
        }
    }

    #[test]
    fn test_purchase_terms_display() {
        let terms = PurchaseTerms {
            price: "350000".to_string(),
            taxes: "4200".to_string(),
        };

        let lines = terms.display_lines();
        assert_eq!(lines[0], "PURCHASE DETAILS");
        assert_eq!(lines[1], "selling price: 350000");
        assert_eq!(lines[2], "estimated taxes: 4200");
    }

    #[test]
    fn test_rental_terms_display() {
        let terms = RentalTerms {
            rent: "1500".to_string(),
            utilities: "120".to_string(),
            furnished: Furnished::Yes,
        };

        let lines = terms.display_lines();
        assert_eq!(lines[0], "RENTAL DETAILS");
        assert_eq!(lines[1], "rent: 1500");
        assert_eq!(lines[2], "estimated utilities: 120");
        assert_eq!(lines[3], "furnished: yes");
    }

    #[test]
    fn test_terms_report_kind_and_headline() {
        let purchase = TransactionTerms::Purchase(PurchaseTerms {
            price: "200000".to_string(),
            taxes: "2500".to_string(),
        });
        assert_eq!(purchase.kind(), TransactionKind::Purchase);
        assert_eq!(purchase.headline_amount(), "200000");

        let rental = TransactionTerms::Rental(RentalTerms {
            rent: "900".to_string(),
            utilities: "80".to_string(),
            furnished: Furnished::No,
        });
        assert_eq!(rental.kind(), TransactionKind::Rental);
        assert_eq!(rental.headline_amount(), "900");
    }

    #[test]
    fn test_terms_serde_round_trip() {
        let rental = TransactionTerms::Rental(RentalTerms {
            rent: "1100".to_string(),
            utilities: "unknown".to_string(),
            furnished: Furnished::No,
        });

        let json = serde_json::to_string(&rental).unwrap();
        let back: TransactionTerms = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rental);
    }
}
