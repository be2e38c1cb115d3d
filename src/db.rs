// Persistence - SQLite portfolio storage, audit events, CSV export
//
// The portfolio lives in memory during a session; this module syncs it to
// disk. Listing identity is the UUID: re-saving an unchanged listing is a
// position update, not a duplicate row.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::model::{KindDetails, Listing, PropertyDetails, TransactionTerms};
use crate::portfolio::Portfolio;

// ============================================================================
// AUDIT EVENTS
// ============================================================================

/// Audit-trail event; every portfolio change that reaches disk is recorded.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            data,
            actor: actor.to_string(),
        }
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Listings table
    // Kind-specific details and transaction terms are JSON columns so the
    // records can grow without schema changes.
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            listing_uuid TEXT UNIQUE NOT NULL,
            property_kind TEXT NOT NULL,
            transaction_kind TEXT NOT NULL,
            square_feet TEXT NOT NULL,
            bedrooms TEXT NOT NULL,
            bathrooms TEXT NOT NULL,
            details TEXT NOT NULL,
            terms TEXT NOT NULL,
            listed_at TEXT NOT NULL,
            position INTEGER NOT NULL,
            metadata TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Events table (audit trail)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_listings_kind ON listings(property_kind, transaction_kind)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_listings_position ON listings(position)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// SAVE / LOAD
// ============================================================================

/// What a portfolio save changed on disk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaveSummary {
    pub added: usize,
    pub removed: usize,
    pub kept: usize,
}

/// Sync the in-memory portfolio to disk.
///
/// Listings no longer in the portfolio are deleted (with a
/// `listing_removed` event), new ones inserted (with a `listing_added`
/// event), and surviving ones keep their row with an updated position.
pub fn save_portfolio(conn: &Connection, portfolio: &Portfolio, actor: &str) -> Result<SaveSummary> {
    let mut summary = SaveSummary::default();

    let kept_ids: HashSet<String> =
        portfolio.iter().map(|listing| listing.id.clone()).collect();

    // Delete listings that were removed from the portfolio.
    let stored_ids: Vec<String> = {
        let mut stmt = conn.prepare("SELECT listing_uuid FROM listings")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids
    };

    for stored_id in stored_ids {
        if !kept_ids.contains(&stored_id) {
            conn.execute(
                "DELETE FROM listings WHERE listing_uuid = ?1",
                params![stored_id],
            )?;
            summary.removed += 1;

            let event = Event::new(
                "listing_removed",
                "listing",
                &stored_id,
                serde_json::json!({}),
                actor,
            );
            insert_event(conn, &event)?;
        }
    }

    // Insert new listings; an existing UUID only gets its position updated.
    for (position, listing) in portfolio.iter().enumerate() {
        let details_json = serde_json::to_string(&listing.details)?;
        let terms_json = serde_json::to_string(&listing.terms)?;
        let metadata_json = serde_json::to_string(&listing.metadata)?;

        let result = conn.execute(
            "INSERT INTO listings (
                listing_uuid, property_kind, transaction_kind,
                square_feet, bedrooms, bathrooms,
                details, terms, listed_at, position, metadata
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                listing.id,
                listing.kind().as_str(),
                listing.transaction().as_str(),
                listing.property.square_feet,
                listing.property.bedrooms,
                listing.property.bathrooms,
                details_json,
                terms_json,
                listing.listed_at.to_rfc3339(),
                position as i64,
                metadata_json,
            ],
        );

        match result {
            Ok(_) => {
                summary.added += 1;

                let event = Event::new(
                    "listing_added",
                    "listing",
                    &listing.id,
                    serde_json::json!({
                        "label": listing.label(),
                        "square_feet": listing.property.square_feet,
                    }),
                    actor,
                );
                insert_event(conn, &event)?;
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                conn.execute(
                    "UPDATE listings SET position = ?1 WHERE listing_uuid = ?2",
                    params![position as i64, listing.id],
                )?;
                summary.kept += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}

/// Load the saved portfolio in display order.
pub fn get_all_listings(conn: &Connection) -> Result<Vec<Listing>> {
    let mut stmt = conn.prepare(
        "SELECT listing_uuid, square_feet, bedrooms, bathrooms,
                details, terms, listed_at, metadata
         FROM listings
         ORDER BY position ASC",
    )?;

    let listings = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let square_feet: String = row.get(1)?;
            let bedrooms: String = row.get(2)?;
            let bathrooms: String = row.get(3)?;
            let details_json: String = row.get(4)?;
            let terms_json: String = row.get(5)?;
            let listed_at_str: String = row.get(6)?;
            let metadata_json: Option<String> = row.get(7)?;

            let details: KindDetails = serde_json::from_str(&details_json)
                .map_err(|_| rusqlite::Error::InvalidQuery)?;
            let terms: TransactionTerms = serde_json::from_str(&terms_json)
                .map_err(|_| rusqlite::Error::InvalidQuery)?;
            let listed_at = DateTime::parse_from_rfc3339(&listed_at_str)
                .map_err(|_| rusqlite::Error::InvalidQuery)?
                .with_timezone(&Utc);
            let metadata: HashMap<String, serde_json::Value> = metadata_json
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_default();

            Ok(Listing {
                id,
                property: PropertyDetails {
                    square_feet,
                    bedrooms,
                    bathrooms,
                },
                details,
                terms,
                listed_at,
                metadata,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(listings)
}

/// Count stored listings.
pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))?;
    Ok(count)
}

// ============================================================================
// EVENTS
// ============================================================================

/// Insert event into audit trail.
pub fn insert_event(conn: &Connection, event: &Event) -> Result<()> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

/// Get events for a specific entity, newest first.
pub fn get_events_for_entity(
    conn: &Connection,
    entity_type: &str,
    entity_id: &str,
) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT event_id, timestamp, event_type, entity_type, entity_id, data, actor
         FROM events
         WHERE entity_type = ?1 AND entity_id = ?2
         ORDER BY timestamp DESC",
    )?;

    let events = stmt
        .query_map(params![entity_type, entity_id], |row| {
            let timestamp_str: String = row.get(1)?;
            let data_json: String = row.get(5)?;

            Ok(Event {
                event_id: row.get(0)?,
                timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                    .map_err(|_| rusqlite::Error::InvalidQuery)?
                    .with_timezone(&Utc),
                event_type: row.get(2)?,
                entity_type: row.get(3)?,
                entity_id: row.get(4)?,
                data: serde_json::from_str(&data_json)
                    .map_err(|_| rusqlite::Error::InvalidQuery)?,
                actor: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

// ============================================================================
// CSV EXPORT
// ============================================================================

/// One flat export row per listing; fields that do not apply to the
/// listing's kind are left empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Listing_Id")]
    pub id: String,
    #[serde(rename = "Property_Kind")]
    pub property_kind: String,
    #[serde(rename = "Transaction_Kind")]
    pub transaction_kind: String,
    #[serde(rename = "Square_Feet")]
    pub square_feet: String,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: String,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: String,
    #[serde(rename = "Stories")]
    pub stories: String,
    #[serde(rename = "Garage")]
    pub garage: String,
    #[serde(rename = "Fenced")]
    pub fenced: String,
    #[serde(rename = "Laundry")]
    pub laundry: String,
    #[serde(rename = "Balcony")]
    pub balcony: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Taxes")]
    pub taxes: String,
    #[serde(rename = "Rent")]
    pub rent: String,
    #[serde(rename = "Utilities")]
    pub utilities: String,
    #[serde(rename = "Furnished")]
    pub furnished: String,
    #[serde(rename = "Listed_At")]
    pub listed_at: String,
}

impl ExportRow {
    pub fn from_listing(listing: &Listing) -> Self {
        let mut row = ExportRow {
            id: listing.id.clone(),
            property_kind: listing.kind().as_str().to_string(),
            transaction_kind: listing.transaction().as_str().to_string(),
            square_feet: listing.property.square_feet.clone(),
            bedrooms: listing.property.bedrooms.clone(),
            bathrooms: listing.property.bathrooms.clone(),
            stories: String::new(),
            garage: String::new(),
            fenced: String::new(),
            laundry: String::new(),
            balcony: String::new(),
            price: String::new(),
            taxes: String::new(),
            rent: String::new(),
            utilities: String::new(),
            furnished: String::new(),
            listed_at: listing.listed_at.to_rfc3339(),
        };

        match &listing.details {
            KindDetails::House(house) => {
                row.stories = house.stories.clone();
                row.garage = house.garage.as_str().to_string();
                row.fenced = house.fenced.as_str().to_string();
            }
            KindDetails::Apartment(apartment) => {
                row.laundry = apartment.laundry.as_str().to_string();
                row.balcony = apartment.balcony.as_str().to_string();
            }
        }

        match &listing.terms {
            TransactionTerms::Purchase(terms) => {
                row.price = terms.price.clone();
                row.taxes = terms.taxes.clone();
            }
            TransactionTerms::Rental(terms) => {
                row.rent = terms.rent.clone();
                row.utilities = terms.utilities.clone();
                row.furnished = terms.furnished.as_str().to_string();
            }
        }

        row
    }
}

/// Write the listings to a CSV file, one flat row per listing.
pub fn export_csv(listings: &[Listing], csv_path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(csv_path).context("Failed to create CSV file")?;

    for listing in listings {
        wtr.serialize(ExportRow::from_listing(listing))
            .context("Failed to write CSV row")?;
    }

    wtr.flush().context("Failed to flush CSV file")?;
    Ok(listings.len())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ApartmentDetails, Balcony, Fenced, Furnished, Garage, HouseDetails, Laundry,
        PurchaseTerms, RentalTerms,
    };

    fn house_purchase() -> Listing {
        Listing::new(
            PropertyDetails::new("1400", "3", "2"),
            KindDetails::House(HouseDetails {
                stories: "2".to_string(),
                garage: Garage::Attached,
                fenced: Fenced::Yes,
            }),
            TransactionTerms::Purchase(PurchaseTerms {
                price: "320000".to_string(),
                taxes: "3900".to_string(),
            }),
        )
    }

    fn apartment_rental() -> Listing {
        Listing::new(
            PropertyDetails::new("700", "1", "1"),
            KindDetails::Apartment(ApartmentDetails {
                laundry: Laundry::Ensuite,
                balcony: Balcony::Yes,
            }),
            TransactionTerms::Rental(RentalTerms {
                rent: "1100".to_string(),
                utilities: "90".to_string(),
                furnished: Furnished::No,
            }),
        )
    }

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let conn = test_conn();

        let mut portfolio = Portfolio::new();
        portfolio.add(house_purchase());
        portfolio.add(apartment_rental());

        let summary = save_portfolio(&conn, &portfolio, "test").unwrap();
        assert_eq!(summary.added, 2);
        assert_eq!(summary.removed, 0);

        let loaded = get_all_listings(&conn).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, portfolio.get(0).unwrap().id);
        assert_eq!(loaded[0].label(), "house purchase");
        assert_eq!(loaded[1].label(), "apartment rental");
        assert_eq!(loaded[1].details, portfolio.get(1).unwrap().details);
        assert_eq!(loaded[1].terms, portfolio.get(1).unwrap().terms);
    }

    #[test]
    fn test_resave_is_not_a_duplicate() {
        let conn = test_conn();

        let mut portfolio = Portfolio::new();
        portfolio.add(house_purchase());

        save_portfolio(&conn, &portfolio, "test").unwrap();
        let summary = save_portfolio(&conn, &portfolio, "test").unwrap();

        assert_eq!(summary.added, 0);
        assert_eq!(summary.kept, 1);
        assert_eq!(verify_count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_save_deletes_removed_listings() {
        let conn = test_conn();

        let mut portfolio = Portfolio::new();
        portfolio.add(house_purchase());
        portfolio.add(apartment_rental());
        save_portfolio(&conn, &portfolio, "test").unwrap();

        let removed = portfolio.remove(1).unwrap();
        let summary = save_portfolio(&conn, &portfolio, "test").unwrap();

        assert_eq!(summary.removed, 1);
        assert_eq!(verify_count(&conn).unwrap(), 1);

        let events = get_events_for_entity(&conn, "listing", &removed.id).unwrap();
        assert!(events.iter().any(|e| e.event_type == "listing_removed"));
    }

    #[test]
    fn test_save_preserves_portfolio_order() {
        let conn = test_conn();

        let mut portfolio = Portfolio::new();
        portfolio.add(house_purchase());
        portfolio.add(apartment_rental());
        save_portfolio(&conn, &portfolio, "test").unwrap();

        // Removing the first listing shifts the second to position 0.
        portfolio.remove(1).unwrap();
        save_portfolio(&conn, &portfolio, "test").unwrap();

        let loaded = get_all_listings(&conn).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].label(), "apartment rental");
    }

    #[test]
    fn test_added_listing_gets_audit_event() {
        let conn = test_conn();

        let mut portfolio = Portfolio::new();
        let listing = house_purchase();
        let listing_id = listing.id.clone();
        portfolio.add(listing);
        save_portfolio(&conn, &portfolio, "operator").unwrap();

        let events = get_events_for_entity(&conn, "listing", &listing_id).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "listing_added");
        assert_eq!(events[0].actor, "operator");
        assert_eq!(events[0].data["label"], serde_json::json!("house purchase"));
    }

    #[test]
    fn test_export_row_flattens_by_kind() {
        let house = house_purchase();
        let row = ExportRow::from_listing(&house);

        assert_eq!(row.property_kind, "house");
        assert_eq!(row.garage, "attached");
        assert_eq!(row.price, "320000");
        assert_eq!(row.laundry, "");
        assert_eq!(row.rent, "");

        let apartment = apartment_rental();
        let row = ExportRow::from_listing(&apartment);

        assert_eq!(row.property_kind, "apartment");
        assert_eq!(row.laundry, "ensuite");
        assert_eq!(row.rent, "1100");
        assert_eq!(row.stories, "");
        assert_eq!(row.price, "");
    }

    #[test]
    fn test_export_csv_writes_all_rows() {
        let listings = vec![house_purchase(), apartment_rental()];

        let path = std::env::temp_dir().join(format!(
            "listing-desk-export-{}.csv",
            uuid::Uuid::new_v4()
        ));
        let written = export_csv(&listings, &path).unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(content.contains("Property_Kind"));
        assert!(content.contains("house,purchase"));
        assert!(content.contains("apartment,rental"));
    }
}
