// Listing records
//
// A listing is a composition of three plain records:
// - PropertyDetails: the base attributes every property shares
// - KindDetails: house- or apartment-specific attributes
// - TransactionTerms: purchase or rental terms

pub mod listing;
pub mod property;
pub mod terms;

pub use listing::Listing;
pub use property::{
    ApartmentDetails, Balcony, Fenced, Garage, HouseDetails, KindDetails, Laundry,
    PropertyDetails, PropertyKind,
};
pub use terms::{Furnished, PurchaseTerms, RentalTerms, TransactionKind, TransactionTerms};
