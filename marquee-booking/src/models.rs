use chrono::{DateTime, NaiveDate, Utc};
use marquee_catalog::{SeatNumber, Showtime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// One confirmed purchase of seats for a screening. Append-only: never
/// mutated or deleted after creation. The movie title is denormalized so
/// the bookings list renders without a catalog lookup, and `total_price`
/// is frozen at booking time even if the catalog price later changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub movie_id: String,
    pub movie_title: String,
    pub seats: BTreeSet<SeatNumber>,
    pub date: NaiveDate,
    pub time: Showtime,
    pub total_price: u32,
    pub created_at: DateTime<Utc>,
}

/// Identifies one concrete screening: the occupancy-map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreeningKey {
    pub movie_id: String,
    pub date: NaiveDate,
    pub time: Showtime,
}

impl ScreeningKey {
    pub fn new(movie_id: &str, date: NaiveDate, time: Showtime) -> Self {
        Self {
            movie_id: movie_id.to_string(),
            date,
            time,
        }
    }

    /// Underscore-joined encoding used as the persisted map key.
    pub fn encode(&self) -> String {
        format!("{}_{}_{}", self.movie_id, self.date, self.time)
    }
}

impl fmt::Display for ScreeningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screening_key_encoding_is_stable() {
        let key = ScreeningKey::new(
            "3",
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            Showtime::new("7:00 PM").unwrap(),
        );
        assert_eq!(key.encode(), "3_2026-08-07_7:00 PM");
        assert_eq!(key.to_string(), key.encode());
    }
}
