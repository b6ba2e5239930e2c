pub mod movie;
pub mod seating;
pub mod showtime;

pub use movie::{Catalog, Movie};
pub use seating::{SeatError, SeatNumber, SeatPlan};
pub use showtime::{Showtime, ShowtimeError};
