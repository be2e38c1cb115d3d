// Listing Desk - Core Library
// Exposes all modules for use in the CLI, the TUI browse mode, and tests

pub mod console;
pub mod db;
pub mod fields;
pub mod model;
pub mod portfolio;
pub mod registry;
pub mod validation;

// Only compile the browse UI when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use console::{ConsoleSession, Prompter, MENU_OPTIONS};
pub use db::{
    export_csv, get_all_listings, get_events_for_entity, insert_event, save_portfolio,
    setup_database, verify_count, Event, ExportRow, SaveSummary,
};
pub use fields::{FieldCatalog, FieldKind, FieldSpec};
pub use model::{
    ApartmentDetails, Balcony, Fenced, Furnished, Garage, HouseDetails, KindDetails, Laundry,
    Listing, PropertyDetails, PropertyKind, PurchaseTerms, RentalTerms, TransactionKind,
    TransactionTerms,
};
pub use portfolio::{Portfolio, PortfolioStats};
pub use registry::{FieldAnswers, ListingBlueprint, ListingRegistry};
pub use validation::{
    validate_choice, validate_index, InvalidInputError, MAX_INPUT_ATTEMPTS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
