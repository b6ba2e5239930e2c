use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use marquee_catalog::{SeatNumber, Showtime};
use marquee_core::storage::{keys, StateStore, StorageError};
use marquee_shared::events::BookingConfirmedEvent;
use uuid::Uuid;

use crate::models::{Booking, ScreeningKey};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Booking snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Owns the booking list and the derived seat-occupancy index.
///
/// Both collections persist after every mutation; the occupancy update is
/// applied immediately after its booking append so the two never diverge.
/// Single writer: there is exactly one interactive flow.
pub struct BookingStore {
    bookings: Vec<Booking>,
    occupancy: HashMap<String, BTreeSet<SeatNumber>>,
    storage: Arc<dyn StateStore>,
}

impl BookingStore {
    /// Restores both snapshots from storage. Corrupt entries are discarded
    /// rather than propagated, matching a fresh profile.
    pub async fn restore(storage: Arc<dyn StateStore>) -> Result<Self, BookingError> {
        let bookings = match storage.get(keys::BOOKINGS).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(err) => {
                    tracing::warn!("Discarding corrupt booking list: {}", err);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let occupancy = match storage.get(keys::BOOKED_SEATS).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!("Discarding corrupt occupancy index: {}", err);
                    HashMap::new()
                }
            },
            None => HashMap::new(),
        };

        Ok(Self {
            bookings,
            occupancy,
            storage,
        })
    }

    /// The only mutator. Appends the booking, persists the list, then
    /// unions the seats into the occupancy entry for the screening and
    /// persists the index.
    pub async fn add_booking(
        &mut self,
        movie_id: &str,
        movie_title: &str,
        seats: BTreeSet<SeatNumber>,
        date: NaiveDate,
        time: Showtime,
        total_price: u32,
    ) -> Result<Booking, BookingError> {
        let booking = Booking {
            id: Uuid::new_v4(),
            movie_id: movie_id.to_string(),
            movie_title: movie_title.to_string(),
            seats,
            date,
            time,
            total_price,
            created_at: Utc::now(),
        };

        self.bookings.push(booking.clone());
        self.storage
            .put(keys::BOOKINGS, &serde_json::to_string(&self.bookings)?)
            .await?;

        let key = ScreeningKey::new(movie_id, date, booking.time.clone());
        let entry = self.occupancy.entry(key.encode()).or_default();
        entry.extend(booking.seats.iter().copied());
        self.storage
            .put(keys::BOOKED_SEATS, &serde_json::to_string(&self.occupancy)?)
            .await?;

        let event = BookingConfirmedEvent {
            booking_id: booking.id,
            movie_id: booking.movie_id.clone(),
            screening: key.encode(),
            seat_count: booking.seats.len() as u32,
            total_price: booking.total_price,
            confirmed_at: booking.created_at.timestamp_millis(),
        };
        tracing::info!("Booking confirmed: {:?}", event);

        Ok(booking)
    }

    /// Every booking in this profile, oldest first. Deliberately not
    /// filtered by user; see DESIGN.md.
    pub fn list_bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Seats already taken for the given screening; empty when none.
    pub fn occupied_seats(
        &self,
        movie_id: &str,
        date: NaiveDate,
        time: &Showtime,
    ) -> BTreeSet<SeatNumber> {
        let key = ScreeningKey::new(movie_id, date, time.clone());
        self.occupancy.get(&key.encode()).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::storage::MemoryStore;

    fn seats(numbers: &[u8]) -> BTreeSet<SeatNumber> {
        numbers
            .iter()
            .map(|&n| SeatNumber::new(n).unwrap())
            .collect()
    }

    fn showtime(label: &str) -> Showtime {
        Showtime::new(label).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[tokio::test]
    async fn booked_seats_appear_in_the_occupancy_set() {
        let mut store = BookingStore::restore(Arc::new(MemoryStore::new()))
            .await
            .unwrap();

        store
            .add_booking("1", "Dune: Part Two", seats(&[5, 6]), date(), showtime("7:00 PM"), 30)
            .await
            .unwrap();

        let occupied = store.occupied_seats("1", date(), &showtime("7:00 PM"));
        assert!(occupied.contains(&SeatNumber::new(5).unwrap()));
        assert!(occupied.contains(&SeatNumber::new(6).unwrap()));

        // A different screening of the same movie is untouched
        assert!(store.occupied_seats("1", date(), &showtime("4:00 PM")).is_empty());
    }

    #[tokio::test]
    async fn occupancy_accumulates_across_bookings_for_one_screening() {
        let mut store = BookingStore::restore(Arc::new(MemoryStore::new()))
            .await
            .unwrap();

        store
            .add_booking("2", "Oppenheimer", seats(&[1]), date(), showtime("10:00 AM"), 14)
            .await
            .unwrap();
        store
            .add_booking("2", "Oppenheimer", seats(&[2, 3]), date(), showtime("10:00 AM"), 28)
            .await
            .unwrap();

        let occupied = store.occupied_seats("2", date(), &showtime("10:00 AM"));
        assert_eq!(occupied.len(), 3);
    }

    #[tokio::test]
    async fn listing_preserves_creation_order_across_a_reload() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = BookingStore::restore(storage.clone()).await.unwrap();

        let first = store
            .add_booking("1", "Dune: Part Two", seats(&[10]), date(), showtime("1:30 PM"), 15)
            .await
            .unwrap();
        let second = store
            .add_booking("3", "The Batman", seats(&[11, 12]), date(), showtime("1:30 PM"), 26)
            .await
            .unwrap();

        let listed: Vec<Uuid> = store.list_bookings().iter().map(|b| b.id).collect();
        assert_eq!(listed, vec![first.id, second.id]);

        // Serialize-then-reload keeps order and field values
        let revived = BookingStore::restore(storage).await.unwrap();
        let reloaded = revived.list_bookings();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].id, first.id);
        assert_eq!(reloaded[0].movie_title, "Dune: Part Two");
        assert_eq!(reloaded[1].id, second.id);
        assert_eq!(reloaded[1].total_price, 26);
        assert_eq!(
            revived.occupied_seats("3", date(), &showtime("1:30 PM")),
            seats(&[11, 12])
        );
    }

    #[tokio::test]
    async fn a_fresh_profile_is_empty() {
        let store = BookingStore::restore(Arc::new(MemoryStore::new()))
            .await
            .unwrap();
        assert!(store.list_bookings().is_empty());
        assert!(store.occupied_seats("1", date(), &showtime("7:00 PM")).is_empty());
    }

    #[tokio::test]
    async fn corrupt_snapshots_degrade_to_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.put(keys::BOOKINGS, "not json").await.unwrap();
        storage.put(keys::BOOKED_SEATS, "[broken").await.unwrap();

        let store = BookingStore::restore(storage).await.unwrap();
        assert!(store.list_bookings().is_empty());
    }
}
