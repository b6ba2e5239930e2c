pub mod models;
pub mod reporting;
pub mod schedule;
pub mod store;
pub mod wizard;

pub use models::{Booking, ScreeningKey};
pub use reporting::{cinema_stats, CinemaStats};
pub use schedule::{BookingSchedule, ShowDate};
pub use store::{BookingError, BookingStore};
pub use wizard::{BookingSummary, BookingWizard, SeatStatus, WizardError};
