// Portfolio - the ordered in-memory listing collection
//
// Insertion order is display order. Removal is by the 1-based index the
// operator sees in the numbered list; out-of-range indexes return None and
// never panic.

use crate::model::{Listing, PropertyKind, TransactionKind};

/// Counts by kind, for the console summary and the TUI header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioStats {
    pub houses: usize,
    pub apartments: usize,
    pub purchases: usize,
    pub rentals: usize,
}

/// Ordered collection of listings.
#[derive(Debug, Default)]
pub struct Portfolio {
    listings: Vec<Listing>,
}

impl Portfolio {
    pub fn new() -> Self {
        Portfolio {
            listings: Vec::new(),
        }
    }

    /// Seed the portfolio from already-recorded listings (e.g. a saved
    /// database), preserving their order.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Portfolio { listings }
    }

    /// Append a listing at the end of the display order.
    pub fn add(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    /// Remove the listing at the given 1-based index.
    ///
    /// Returns the removed listing, or None if the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Listing> {
        if index == 0 || index > self.listings.len() {
            return None;
        }
        Some(self.listings.remove(index - 1))
    }

    /// Drop every listing. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let dropped = self.listings.len();
        self.listings.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listing at the given 0-based position.
    pub fn get(&self, position: usize) -> Option<&Listing> {
        self.listings.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Listings matching the given kind filters; None means "any".
    pub fn filter(
        &self,
        kind: Option<PropertyKind>,
        transaction: Option<TransactionKind>,
    ) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|listing| kind.map_or(true, |k| listing.kind() == k))
            .filter(|listing| transaction.map_or(true, |t| listing.transaction() == t))
            .collect()
    }

    /// Counts by property kind and transaction kind.
    pub fn stats(&self) -> PortfolioStats {
        let mut stats = PortfolioStats::default();

        for listing in &self.listings {
            match listing.kind() {
                PropertyKind::House => stats.houses += 1,
                PropertyKind::Apartment => stats.apartments += 1,
            }
            match listing.transaction() {
                TransactionKind::Purchase => stats.purchases += 1,
                TransactionKind::Rental => stats.rentals += 1,
            }
        }

        stats
    }

    /// Render the whole portfolio as numbered display blocks, the way the
    /// list and remove prompts show it.
    pub fn numbered_display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (position, listing) in self.listings.iter().enumerate() {
            lines.push(format!("Property number {}.", position + 1));
            lines.extend(listing.display_lines());
            lines.push(String::new());
        }

        lines
    }
}

// ============================================================================
// TESTS
// ============================================================================
