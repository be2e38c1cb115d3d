// Listing - the combined record an operator works with
//
// Identity is the UUID; everything else is a value. A listing never stores
// its kind pair separately: it is always derived from the embedded records,
// so the two can never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::property::{KindDetails, PropertyDetails, PropertyKind};
use super::terms::{TransactionKind, TransactionTerms};

/// A recorded property listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Stable identity (UUID) - never changes.
    pub id: String,

    /// Base property details shared by every listing.
    pub property: PropertyDetails,

    /// House- or apartment-specific details.
    pub details: KindDetails,

    /// Purchase or rental terms.
    pub terms: TransactionTerms,

    /// When the listing was recorded.
    pub listed_at: DateTime<Utc>,

    /// Extensible metadata (notes, provenance) that can grow without
    /// schema changes.
    #[serde(default)]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Listing {
    /// Create a new listing with a fresh UUID, stamped now.
    pub fn new(property: PropertyDetails, details: KindDetails, terms: TransactionTerms) -> Self {
        Listing {
            id: uuid::Uuid::new_v4().to_string(),
            property,
            details,
            terms,
            listed_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        self.details.kind()
    }

    pub fn transaction(&self) -> TransactionKind {
        self.terms.kind()
    }

    /// Human label for the combination, e.g. "house rental".
    pub fn label(&self) -> String {
        format!("{} {}", self.kind().as_str(), self.transaction().as_str())
    }

    /// Render the full listing, section by section: base property details
    /// first, then the kind-specific section, then the transaction terms.
    /// The order is fixed regardless of how the listing was built.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = self.property.display_lines();
        lines.push(String::new());
        lines.extend(self.details.display_lines());
        lines.push(String::new());
        lines.extend(self.terms.display_lines());
        lines
    }

    /// Render as a single printable block.
    pub fn display(&self) -> String {
        self.display_lines().join("\n")
    }

    /// Set a metadata value by key.
    pub fn set_metadata(&mut self, key: &str, value: serde_json::Value) {
        self.metadata.insert(key.to_string(), value);
    }

    /// Get a metadata value by key.
    pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}

// ============================================================================
// TESTS
// ============================================================================
