// Listing registry - (property kind, transaction kind) -> blueprint
//
// A blueprint carries the human label, the ordered field plan that drives
// the interactive form, and the factory that assembles a Listing from the
// validated answers. All four combinations are registered up front.

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::fields::ids;
use crate::model::{
    ApartmentDetails, Balcony, Fenced, Furnished, Garage, HouseDetails, KindDetails, Laundry,
    Listing, PropertyDetails, PropertyKind, PurchaseTerms, RentalTerms, TransactionKind,
    TransactionTerms,
};
use crate::validation::{validate_choice, InvalidInputError};

/// Validated field answers collected by the console form, keyed by field id.
pub type FieldAnswers = HashMap<String, String>;

// ============================================================================
// BLUEPRINT
// ============================================================================

/// Recipe for one listing combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingBlueprint {
    pub kind: PropertyKind,
    pub transaction: TransactionKind,
}

impl ListingBlueprint {
    /// Human label, e.g. "house rental".
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.as_str(), self.transaction.as_str())
    }

    /// Ordered field ids for the interactive form: base property fields,
    /// then the kind-specific fields, then the transaction fields.
    pub fn field_plan(&self) -> Vec<&'static str> {
        let mut plan = vec![ids::SQUARE_FEET, ids::BEDROOMS, ids::BATHROOMS];

        match self.kind {
            PropertyKind::House => plan.extend([ids::FENCED, ids::GARAGE, ids::STORIES]),
            PropertyKind::Apartment => plan.extend([ids::LAUNDRY, ids::BALCONY]),
        }

        match self.transaction {
            TransactionKind::Purchase => plan.extend([ids::PRICE, ids::TAXES]),
            TransactionKind::Rental => plan.extend([ids::RENT, ids::UTILITIES, ids::FURNISHED]),
        }

        plan
    }

    /// Assemble a listing from validated answers.
    ///
    /// Choice answers are expected in canonical lowercase form, as returned
    /// by the field catalog's validation.
    pub fn build(&self, answers: &FieldAnswers) -> Result<Listing> {
        let answer = |id: &str| -> Result<&str> {
            answers
                .get(id)
                .map(String::as_str)
                .ok_or_else(|| anyhow!("missing answer for {}", id))
        };

        let property = PropertyDetails::new(
            answer(ids::SQUARE_FEET)?,
            answer(ids::BEDROOMS)?,
            answer(ids::BATHROOMS)?,
        );

        let details = match self.kind {
            PropertyKind::House => KindDetails::House(HouseDetails {
                stories: answer(ids::STORIES)?.to_string(),
                garage: Garage::parse(answer(ids::GARAGE)?)
                    .ok_or_else(|| anyhow!("invalid garage answer"))?,
                fenced: Fenced::parse(answer(ids::FENCED)?)
                    .ok_or_else(|| anyhow!("invalid fenced answer"))?,
            }),
            PropertyKind::Apartment => KindDetails::Apartment(ApartmentDetails {
                laundry: Laundry::parse(answer(ids::LAUNDRY)?)
                    .ok_or_else(|| anyhow!("invalid laundry answer"))?,
                balcony: Balcony::parse(answer(ids::BALCONY)?)
                    .ok_or_else(|| anyhow!("invalid balcony answer"))?,
            }),
        };

        let terms = match self.transaction {
            TransactionKind::Purchase => TransactionTerms::Purchase(PurchaseTerms {
                price: answer(ids::PRICE)?.to_string(),
                taxes: answer(ids::TAXES)?.to_string(),
            }),
            TransactionKind::Rental => TransactionTerms::Rental(RentalTerms {
                rent: answer(ids::RENT)?.to_string(),
                utilities: answer(ids::UTILITIES)?.to_string(),
                furnished: Furnished::parse(answer(ids::FURNISHED)?)
                    .ok_or_else(|| anyhow!("invalid furnished answer"))?,
            }),
        };

        Ok(Listing::new(property, details, terms))
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Registry of all listing blueprints.
pub struct ListingRegistry {
    blueprints: HashMap<(PropertyKind, TransactionKind), ListingBlueprint>,
}

impl ListingRegistry {
    /// Create the registry with all four combinations registered.
    pub fn new() -> Self {
        let mut blueprints = HashMap::new();

        for kind in [PropertyKind::House, PropertyKind::Apartment] {
            for transaction in [TransactionKind::Purchase, TransactionKind::Rental] {
                blueprints.insert((kind, transaction), ListingBlueprint { kind, transaction });
            }
        }

        ListingRegistry { blueprints }
    }

    /// Look up a blueprint by kind pair.
    pub fn get(&self, kind: PropertyKind, transaction: TransactionKind) -> Option<&ListingBlueprint> {
        self.blueprints.get(&(kind, transaction))
    }

    /// Resolve a blueprint from the two user-supplied category strings.
    ///
    /// Matching is case-insensitive; an unknown category is an error, never
    /// a panic.
    pub fn resolve(
        &self,
        category: &str,
        transaction: &str,
    ) -> Result<&ListingBlueprint, InvalidInputError> {
        let kind_str = validate_choice(category, PropertyKind::OPTIONS)?;
        let tx_str = validate_choice(transaction, TransactionKind::OPTIONS)?;

        let unknown = || InvalidInputError::NotAnOption {
            given: format!("{} {}", kind_str, tx_str),
            allowed: self.all().iter().map(|b| b.label()).collect(),
        };

        // Both strings are canonical at this point, so the parses and the
        // lookup cannot miss.
        let kind = PropertyKind::parse(&kind_str).ok_or_else(unknown)?;
        let transaction = TransactionKind::parse(&tx_str).ok_or_else(unknown)?;

        self.get(kind, transaction).ok_or_else(unknown)
    }

    /// All blueprints, ordered by label for stable display.
    pub fn all(&self) -> Vec<&ListingBlueprint> {
        let mut all: Vec<&ListingBlueprint> = self.blueprints.values().collect();
        all.sort_by_key(|b| b.label());
        all
    }

    /// Count registered blueprints.
    pub fn count(&self) -> usize {
        self.blueprints.len()
    }
}

impl Default for ListingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> FieldAnswers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_registry_has_all_four_combinations() {
        let registry = ListingRegistry::new();
        assert_eq!(registry.count(), 4);

        for kind in [PropertyKind::House, PropertyKind::Apartment] {
            for transaction in [TransactionKind::Purchase, TransactionKind::Rental] {
                assert!(registry.get(kind, transaction).is_some());
            }
        }
    }

    #[test]
    fn test_resolve_from_category_strings() {
        let registry = ListingRegistry::new();

        let blueprint = registry.resolve("house", "rental").unwrap();
        assert_eq!(blueprint.kind, PropertyKind::House);
        assert_eq!(blueprint.transaction, TransactionKind::Rental);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = ListingRegistry::new();

        let blueprint = registry.resolve("Apartment", "PURCHASE").unwrap();
        assert_eq!(blueprint.label(), "apartment purchase");
    }

    #[test]
    fn test_resolve_rejects_unknown_category() {
        let registry = ListingRegistry::new();

        assert!(registry.resolve("condo", "rental").is_err());
        assert!(registry.resolve("house", "lease").is_err());
    }

    #[test]
    fn test_field_plan_order_house_rental() {
        let registry = ListingRegistry::new();
        let blueprint = registry.resolve("house", "rental").unwrap();

        assert_eq!(
            blueprint.field_plan(),
            vec![
                ids::SQUARE_FEET,
                ids::BEDROOMS,
                ids::BATHROOMS,
                ids::FENCED,
                ids::GARAGE,
                ids::STORIES,
                ids::RENT,
                ids::UTILITIES,
                ids::FURNISHED,
            ]
        );
    }

    #[test]
    fn test_field_plan_order_apartment_purchase() {
        let registry = ListingRegistry::new();
        let blueprint = registry.resolve("apartment", "purchase").unwrap();

        assert_eq!(
            blueprint.field_plan(),
            vec![
                ids::SQUARE_FEET,
                ids::BEDROOMS,
                ids::BATHROOMS,
                ids::LAUNDRY,
                ids::BALCONY,
                ids::PRICE,
                ids::TAXES,
            ]
        );
    }

    #[test]
    fn test_build_house_rental() {
        let registry = ListingRegistry::new();
        let blueprint = registry.resolve("house", "rental").unwrap();

        let listing = blueprint
            .build(&answers(&[
                (ids::SQUARE_FEET, "1800"),
                (ids::BEDROOMS, "3"),
                (ids::BATHROOMS, "2"),
                (ids::FENCED, "yes"),
                (ids::GARAGE, "attached"),
                (ids::STORIES, "2"),
                (ids::RENT, "2400"),
                (ids::UTILITIES, "150"),
                (ids::FURNISHED, "no"),
            ]))
            .unwrap();

        assert_eq!(listing.label(), "house rental");
        assert_eq!(listing.property.square_feet, "1800");
        match &listing.details {
            KindDetails::House(house) => {
                assert_eq!(house.garage, Garage::Attached);
                assert_eq!(house.fenced, Fenced::Yes);
            }
            other => panic!("expected house details, got {:?}", other),
        }
    }

    #[test]
    fn test_build_apartment_purchase() {
        let registry = ListingRegistry::new();
        let blueprint = registry.resolve("apartment", "purchase").unwrap();

        let listing = blueprint
            .build(&answers(&[
                (ids::SQUARE_FEET, "950"),
                (ids::BEDROOMS, "2"),
                (ids::BATHROOMS, "1"),
                (ids::LAUNDRY, "coin"),
                (ids::BALCONY, "solarium"),
                (ids::PRICE, "410000"),
                (ids::TAXES, "5100"),
            ]))
            .unwrap();

        assert_eq!(listing.label(), "apartment purchase");
        match &listing.terms {
            TransactionTerms::Purchase(terms) => assert_eq!(terms.price, "410000"),
            other => panic!("expected purchase terms, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_missing_answer() {
        let registry = ListingRegistry::new();
        let blueprint = registry.resolve("house", "purchase").unwrap();

        let result = blueprint.build(&answers(&[
            (ids::SQUARE_FEET, "1200"),
            (ids::BEDROOMS, "3"),
            // bathrooms and everything after are missing
        ]));

        assert!(result.is_err());
    }
}
