// Property records - base details plus the house/apartment split
//
// A concrete listing is built by composition: the base PropertyDetails
// record plus one KindDetails variant. Constrained fields are real enums
// so an invalid value cannot be represented once input has been validated.

use serde::{Deserialize, Serialize};

// ============================================================================
// PROPERTY KIND
// ============================================================================

/// The two property categories an operator can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    House,
    Apartment,
}

impl PropertyKind {
    /// Canonical option strings, as shown in prompts.
    pub const OPTIONS: &'static [&'static str] = &["house", "apartment"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::House => "house",
            PropertyKind::Apartment => "apartment",
        }
    }

    /// Case-insensitive parse from a canonical option string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "house" => Some(PropertyKind::House),
            "apartment" => Some(PropertyKind::Apartment),
            _ => None,
        }
    }
}

// ============================================================================
// CONSTRAINED HOUSE / APARTMENT FIELDS
// ============================================================================

/// Garage situation of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Garage {
    Attached,
    Detached,
    None,
}

impl Garage {
    pub const OPTIONS: &'static [&'static str] = &["attached", "detached", "none"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Garage::Attached => "attached",
            Garage::Detached => "detached",
            Garage::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "attached" => Some(Garage::Attached),
            "detached" => Some(Garage::Detached),
            "none" => Some(Garage::None),
            _ => None,
        }
    }
}

/// Whether the yard of a house is fenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fenced {
    Yes,
    No,
}

impl Fenced {
    pub const OPTIONS: &'static [&'static str] = &["yes", "no"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fenced::Yes => "yes",
            Fenced::No => "no",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yes" => Some(Fenced::Yes),
            "no" => Some(Fenced::No),
            _ => None,
        }
    }
}

/// Laundry facilities available in an apartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Laundry {
    Coin,
    Ensuite,
    None,
}

impl Laundry {
    pub const OPTIONS: &'static [&'static str] = &["coin", "ensuite", "none"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Laundry::Coin => "coin",
            Laundry::Ensuite => "ensuite",
            Laundry::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coin" => Some(Laundry::Coin),
            "ensuite" => Some(Laundry::Ensuite),
            "none" => Some(Laundry::None),
            _ => None,
        }
    }
}

/// Balcony situation of an apartment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Balcony {
    Yes,
    No,
    Solarium,
}

impl Balcony {
    pub const OPTIONS: &'static [&'static str] = &["yes", "no", "solarium"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Balcony::Yes => "yes",
            Balcony::No => "no",
            Balcony::Solarium => "solarium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yes" => Some(Balcony::Yes),
            "no" => Some(Balcony::No),
            "solarium" => Some(Balcony::Solarium),
            _ => None,
        }
    }
}

// ============================================================================
// PROPERTY RECORDS
// ============================================================================

/// Base details shared by every property.
///
/// Square footage, bedroom and bathroom counts are kept exactly as the
/// operator entered them; these fields are free-form by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub square_feet: String,
    pub bedrooms: String,
    pub bathrooms: String,
}

impl PropertyDetails {
    pub fn new(
        square_feet: impl Into<String>,
        bedrooms: impl Into<String>,
        bathrooms: impl Into<String>,
    ) -> Self {
        PropertyDetails {
            square_feet: square_feet.into(),
            bedrooms: bedrooms.into(),
            bathrooms: bathrooms.into(),
        }
    }

    /// Render the PROPERTY DETAILS section.
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            "PROPERTY DETAILS".to_string(),
            "================".to_string(),
            format!("square footage: {}", self.square_feet),
            format!("bedrooms: {}", self.bedrooms),
            format!("bathrooms: {}", self.bathrooms),
        ]
    }
}

/// Details specific to a house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseDetails {
    pub stories: String,
    pub garage: Garage,
    pub fenced: Fenced,
}

impl HouseDetails {
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            "HOUSE DETAILS".to_string(),
            format!("# of stories: {}", self.stories),
            format!("garage: {}", self.garage.as_str()),
            format!("fenced yard: {}", self.fenced.as_str()),
        ]
    }
}

/// Details specific to an apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentDetails {
    pub laundry: Laundry,
    pub balcony: Balcony,
}

impl ApartmentDetails {
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            "APARTMENT DETAILS".to_string(),
            format!("laundry: {}", self.laundry.as_str()),
            format!("has balcony: {}", self.balcony.as_str()),
        ]
    }
}

/// Kind-specific details, tagged by property kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindDetails {
    House(HouseDetails),
    Apartment(ApartmentDetails),
}

impl KindDetails {
    /// The property kind this record belongs to.
    pub fn kind(&self) -> PropertyKind {
        match self {
            KindDetails::House(_) => PropertyKind::House,
            KindDetails::Apartment(_) => PropertyKind::Apartment,
        }
    }

    pub fn display_lines(&self) -> Vec<String> {
        match self {
            KindDetails::House(details) => details.display_lines(),
            KindDetails::Apartment(details) => details.display_lines(),
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
    fn test_property_kind_parse() {
        assert_eq!(PropertyKind::parse("house"), Some(PropertyKind::House));
        assert_eq!(PropertyKind::parse("APARTMENT"), Some(PropertyKind::Apartment));
        assert_eq!(PropertyKind::parse("condo"), None);
    }

    #[test]
    fn test_property_kind_round_trip() {
        for option in PropertyKind::OPTIONS {
            let kind = PropertyKind::parse(option).unwrap();
            assert_eq!(kind.as_str(), *option);
        }
    }

    #[test]
    fn test_constrained_field_options_round_trip() {
        for option in Garage::OPTIONS {
            assert_eq!(Garage::parse(option).unwrap().as_str(), *option);
        }
        for option in Fenced::OPTIONS {
            assert_eq!(Fenced::parse(option).unwrap().as_str(), *option);
        }
        for option in Laundry::OPTIONS {
            assert_eq!(Laundry::parse(option).unwrap().as_str(), *option);
        }
        for option in Balcony::OPTIONS {
            assert_eq!(Balcony::parse(option).unwrap().as_str(), *option);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Garage::parse("Attached"), Some(Garage::Attached));
        assert_eq!(Laundry::parse("ENSUITE"), Some(Laundry::Ensuite));
        assert_eq!(Balcony::parse("Solarium"), Some(Balcony::Solarium));
    }

    #[test]
    fn test_property_details_display() {
        let details = PropertyDetails::new("1200", "3", "2");
        let lines = details.display_lines();

        assert_eq!(lines[0], "PROPERTY DETAILS");
        assert_eq!(lines[1], "================");
        assert_eq!(lines[2], "square footage: 1200");
        assert_eq!(lines[3], "bedrooms: 3");
        assert_eq!(lines[4], "bathrooms: 2");
    }

    #[test]
    fn test_house_details_display() {
        let house = HouseDetails {
            stories: "2".to_string(),
            garage: Garage::Attached,
            fenced: Fenced::Yes,
        };

        let lines = house.display_lines();
        assert_eq!(lines[0], "HOUSE DETAILS");
        assert_eq!(lines[1], "# of stories: 2");
        assert_eq!(lines[2], "garage: attached");
        assert_eq!(lines[3], "fenced yard: yes");
    }

    #[test]
    fn test_apartment_details_display() {
        let apartment = ApartmentDetails {
            laundry: Laundry::Ensuite,
            balcony: Balcony::Solarium,
        };

        let lines = apartment.display_lines();
        assert_eq!(lines[0], "APARTMENT DETAILS");
        assert_eq!(lines[1], "laundry: ensuite");
        assert_eq!(lines[2], "has balcony: solarium");
    }

    #[test]
    fn test_kind_details_reports_kind() {
        let house = KindDetails::House(HouseDetails {
            stories: "1".to_string(),
            garage: Garage::None,
            fenced: Fenced::No,
        });
        assert_eq!(house.kind(), PropertyKind::House);

        let apartment = KindDetails::Apartment(ApartmentDetails {
            laundry: Laundry::Coin,
            balcony: Balcony::No,
        });
        assert_eq!(apartment.kind(), PropertyKind::Apartment);
    }

    #[test]
    fn test_kind_details_serde_round_trip() {
        let apartment = KindDetails::Apartment(ApartmentDetails {
            laundry: Laundry::Coin,
            balcony: Balcony::Yes,
        });

        let json = serde_json::to_string(&apartment).unwrap();
        let back: KindDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, apartment);
    }
}
