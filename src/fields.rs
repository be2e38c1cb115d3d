// Field catalog - every prompt field described in one place
//
// The console forms and the validation layer both consult the catalog, so
// a field's prompt text and its allowed options cannot drift apart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Balcony, Fenced, Furnished, Garage, Laundry, PropertyKind, TransactionKind};
use crate::validation::{validate_choice, InvalidInputError};

// ============================================================================
// FIELD IDS
// ============================================================================

/// Stable ids for the core fields.
pub mod ids {
    pub const PROPERTY_KIND: &str = "field:property_kind";
    pub const TRANSACTION_KIND: &str = "field:transaction_kind";

    pub const SQUARE_FEET: &str = "field:square_feet";
    pub const BEDROOMS: &str = "field:bedrooms";
    pub const BATHROOMS: &str = "field:bathrooms";

    pub const STORIES: &str = "field:stories";
    pub const GARAGE: &str = "field:garage";
    pub const FENCED: &str = "field:fenced";

    pub const LAUNDRY: &str = "field:laundry";
    pub const BALCONY: &str = "field:balcony";

    pub const PRICE: &str = "field:price";
    pub const TAXES: &str = "field:taxes";

    pub const RENT: &str = "field:rent";
    pub const UTILITIES: &str = "field:utilities";
    pub const FURNISHED: &str = "field:furnished";
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// What kind of answer a field takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Any line of text, kept as entered.
    FreeText,

    /// One of a fixed option set (canonical lowercase strings).
    Choice { options: Vec<String> },
}

/// Description of a single prompt field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique id (e.g. "field:garage").
    pub id: String,

    /// Prompt label shown to the operator, without trailing punctuation.
    pub label: String,

    /// Free text or constrained choice.
    pub kind: FieldKind,

    /// Optional example values.
    pub examples: Vec<String>,
}

impl FieldSpec {
    pub fn free_text(id: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::FreeText,
            examples: Vec::new(),
        }
    }

    pub fn choice(id: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        FieldSpec {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::Choice {
                options: options.iter().map(|s| s.to_string()).collect(),
            },
            examples: Vec::new(),
        }
    }

    /// Builder: add an example value.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// The full prompt line, options included for choice fields.
    ///
    /// Free text renders as "Enter the square feet: ", choices as
    /// "Is there a garage? (attached, detached, none) ".
    pub fn prompt_line(&self) -> String {
        match &self.kind {
            FieldKind::FreeText => format!("{}: ", self.label),
            FieldKind::Choice { options } => {
                format!("{} ({}) ", self.label, options.join(", "))
            }
        }
    }

    /// Validate a raw answer for this field.
    ///
    /// Free-text fields accept anything (trimmed, may be empty); choice
    /// fields return the canonical lowercase option or an error.
    pub fn validate(&self, raw: &str) -> Result<String, InvalidInputError> {
        match &self.kind {
            FieldKind::FreeText => Ok(raw.trim().to_string()),
            FieldKind::Choice { options } => {
                let allowed: Vec<&str> = options.iter().map(String::as_str).collect();
                validate_choice(raw, &allowed)
            }
        }
    }
}

// ============================================================================
// FIELD CATALOG
// ============================================================================

/// Registry of all prompt fields, keyed by id.
pub struct FieldCatalog {
    fields: HashMap<String, FieldSpec>,
}

impl FieldCatalog {
    /// Create the catalog with every core field registered.
    pub fn new() -> Self {
        let mut catalog = FieldCatalog {
            fields: HashMap::new(),
        };
        catalog.register_core_fields();
        catalog
    }

    fn register_core_fields(&mut self) {
        // ====================================================================
        // CATEGORY FIELDS
        // ====================================================================

        self.register(FieldSpec::choice(
            ids::PROPERTY_KIND,
            "What type of property?",
            PropertyKind::OPTIONS,
        ));

        self.register(FieldSpec::choice(
            ids::TRANSACTION_KIND,
            "What payment type?",
            TransactionKind::OPTIONS,
        ));

        // ====================================================================
        // BASE PROPERTY FIELDS
        // ====================================================================

        self.register(
            FieldSpec::free_text(ids::SQUARE_FEET, "Enter the square feet").with_example("1200"),
        );
        self.register(
            FieldSpec::free_text(ids::BEDROOMS, "Enter number of bedrooms").with_example("3"),
        );
        self.register(
            FieldSpec::free_text(ids::BATHROOMS, "Enter number of baths").with_example("2"),
        );

        // ====================================================================
        // HOUSE FIELDS
        // ====================================================================

        self.register(FieldSpec::free_text(ids::STORIES, "How many stories?").with_example("2"));
        self.register(FieldSpec::choice(
            ids::GARAGE,
            "Is there a garage?",
            Garage::OPTIONS,
        ));
        self.register(FieldSpec::choice(
            ids::FENCED,
            "Is the yard fenced?",
            Fenced::OPTIONS,
        ));

        // ====================================================================
        // APARTMENT FIELDS
        // ====================================================================

        self.register(FieldSpec::choice(
            ids::LAUNDRY,
            "What laundry facilities does the property have?",
            Laundry::OPTIONS,
        ));
        self.register(FieldSpec::choice(
            ids::BALCONY,
            "Does the property have a balcony?",
            Balcony::OPTIONS,
        ));

        // ====================================================================
        // PURCHASE FIELDS
        // ====================================================================

        self.register(
            FieldSpec::free_text(ids::PRICE, "What is the selling price?").with_example("350000"),
        );
        self.register(
            FieldSpec::free_text(ids::TAXES, "What are the estimated taxes?").with_example("4200"),
        );

        // ====================================================================
        // RENTAL FIELDS
        // ====================================================================

        self.register(
            FieldSpec::free_text(ids::RENT, "What is the monthly rent?").with_example("1500"),
        );
        self.register(
            FieldSpec::free_text(ids::UTILITIES, "What are the estimated utilities?")
                .with_example("120"),
        );
        self.register(FieldSpec::choice(
            ids::FURNISHED,
            "Is the property furnished?",
            Furnished::OPTIONS,
        ));
    }

    /// Register a field spec.
    pub fn register(&mut self, spec: FieldSpec) {
        self.fields.insert(spec.id.clone(), spec);
    }

    /// Get a field spec by id.
    ///
    /// Every id in [`ids`] is registered at construction, so lookups with
    /// those constants cannot miss.
    pub fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.get(id)
    }

    /// Count registered fields.
    pub fn count(&self) -> usize {
        self.fields.len()
    }
}

impl Default for FieldCatalog {
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

    #[test]
    fn test_catalog_has_core_fields() {
        let catalog = FieldCatalog::new();
        assert_eq!(catalog.count(), 15);

        for id in [
            ids::PROPERTY_KIND,
            ids::TRANSACTION_KIND,
            ids::SQUARE_FEET,
            ids::BEDROOMS,
            ids::BATHROOMS,
            ids::STORIES,
            ids::GARAGE,
            ids::FENCED,
            ids::LAUNDRY,
            ids::BALCONY,
            ids::PRICE,
            ids::TAXES,
            ids::RENT,
            ids::UTILITIES,
            ids::FURNISHED,
        ] {
            assert!(catalog.get(id).is_some(), "missing field: {}", id);
        }
    }

    #[test]
    fn test_free_text_prompt_line() {
        let catalog = FieldCatalog::new();
        let spec = catalog.get(ids::SQUARE_FEET).unwrap();
        assert_eq!(spec.prompt_line(), "Enter the square feet: ");
    }

    #[test]
    fn test_choice_prompt_line_lists_options() {
        let catalog = FieldCatalog::new();
        let spec = catalog.get(ids::GARAGE).unwrap();
        assert_eq!(
            spec.prompt_line(),
            "Is there a garage? (attached, detached, none) "
        );
    }

    #[test]
    fn test_choice_validation_goes_through_catalog() {
        let catalog = FieldCatalog::new();
        let spec = catalog.get(ids::LAUNDRY).unwrap();

        assert_eq!(spec.validate("Coin").unwrap(), "coin");
        assert!(spec.validate("washer").is_err());
    }

    #[test]
    fn test_free_text_validation_keeps_answer() {
        let catalog = FieldCatalog::new();
        let spec = catalog.get(ids::RENT).unwrap();

        assert_eq!(spec.validate(" 1500 ").unwrap(), "1500");
        // Free-form fields may be left blank.
        assert_eq!(spec.validate("").unwrap(), "");
    }

    #[test]
    fn test_register_custom_field() {
        let mut catalog = FieldCatalog::new();
        let before = catalog.count();

        catalog.register(
            FieldSpec::free_text("field:parking_spots", "How many parking spots?")
                .with_example("1"),
        );

        assert_eq!(catalog.count(), before + 1);
        assert!(catalog.get("field:parking_spots").is_some());
    }
}
