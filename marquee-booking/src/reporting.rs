use marquee_catalog::Catalog;
use serde::Serialize;

use crate::store::BookingStore;

/// Aggregate dashboard figures, computed from the live stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CinemaStats {
    pub total_movies: usize,
    pub total_bookings: usize,
    pub tickets_sold: usize,
    pub revenue: u32,
}

pub fn cinema_stats(catalog: &Catalog, store: &BookingStore) -> CinemaStats {
    let bookings = store.list_bookings();
    CinemaStats {
        total_movies: catalog.len(),
        total_bookings: bookings.len(),
        tickets_sold: bookings.iter().map(|b| b.seats.len()).sum(),
        revenue: bookings.iter().map(|b| b.total_price).sum(),
    }
}
