use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use marquee_catalog::{Movie, SeatNumber, SeatPlan, Showtime};
use marquee_core::identity::{Role, User};
use marquee_core::payment::{CardDetails, PaymentAdapter, PaymentError};
use serde::Serialize;

use crate::models::Booking;
use crate::schedule::{BookingSchedule, ShowDate};
use crate::store::{BookingError, BookingStore};

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Login required to book tickets")]
    NotAuthenticated,

    #[error("Admins cannot book tickets")]
    AdminCannotBook,

    #[error("Invalid step transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Select a date and a time first")]
    ScheduleIncomplete,

    #[error("Date {0} is outside the booking window")]
    DateOutsideWindow(NaiveDate),

    #[error("Seat {0} is already booked for this screening")]
    SeatTaken(String),

    #[error("Select at least one seat")]
    NoSeatsSelected,

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Store(#[from] BookingError),
}

/// How one seat renders in the seat picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Selected,
    Booked,
}

/// What the confirmation screen shows, echoed from the created booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub movie_title: String,
    pub date: NaiveDate,
    pub time: Showtime,
    pub seat_count: usize,
    pub amount_paid: u32,
}

enum WizardStep {
    Schedule {
        date: Option<NaiveDate>,
        time: Option<Showtime>,
        seats: BTreeSet<SeatNumber>,
    },
    Seats {
        date: NaiveDate,
        time: Showtime,
        seats: BTreeSet<SeatNumber>,
    },
    Payment {
        date: NaiveDate,
        time: Showtime,
        seats: BTreeSet<SeatNumber>,
    },
    Confirmed {
        booking: Booking,
    },
}

impl WizardStep {
    fn name(&self) -> &'static str {
        match self {
            WizardStep::Schedule { .. } => "schedule-selection",
            WizardStep::Seats { .. } => "seat-selection",
            WizardStep::Payment { .. } => "payment",
            WizardStep::Confirmed { .. } => "confirmed",
        }
    }
}

/// One booking attempt for a single movie: schedule pick, seat pick,
/// payment, confirmation. Forward transitions are guarded; the two
/// user-triggered backward transitions preserve everything chosen so far.
/// `Confirmed` is terminal.
pub struct BookingWizard {
    movie: Movie,
    schedule: BookingSchedule,
    step: WizardStep,
}

impl BookingWizard {
    /// Entry guard: booking requires an authenticated, non-admin user.
    pub fn begin(user: Option<&User>, movie: Movie) -> Result<Self, WizardError> {
        Self::begin_at(user, movie, Local::now().date_naive())
    }

    /// As `begin`, with the window anchored to an explicit day.
    pub fn begin_at(
        user: Option<&User>,
        movie: Movie,
        today: NaiveDate,
    ) -> Result<Self, WizardError> {
        let user = user.ok_or(WizardError::NotAuthenticated)?;
        if user.role == Role::Admin {
            return Err(WizardError::AdminCannotBook);
        }

        Ok(Self {
            movie,
            schedule: BookingSchedule::upcoming(today),
            step: WizardStep::Schedule {
                date: None,
                time: None,
                seats: BTreeSet::new(),
            },
        })
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn step_name(&self) -> &'static str {
        self.step.name()
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.step, WizardStep::Confirmed { .. })
    }

    /// The seven selectable days.
    pub fn selectable_dates(&self) -> &[ShowDate] {
        self.schedule.dates()
    }

    /// The fixed showtime set.
    pub fn showtimes(&self) -> Vec<Showtime> {
        Showtime::all()
    }

    pub fn selected_seats(&self) -> Option<&BTreeSet<SeatNumber>> {
        match &self.step {
            WizardStep::Schedule { seats, .. }
            | WizardStep::Seats { seats, .. }
            | WizardStep::Payment { seats, .. } => Some(seats),
            WizardStep::Confirmed { .. } => None,
        }
    }

    /// Selected-seat count times the ticket price; the paid amount once
    /// confirmed.
    pub fn running_total(&self) -> u32 {
        match &self.step {
            WizardStep::Schedule { seats, .. }
            | WizardStep::Seats { seats, .. }
            | WizardStep::Payment { seats, .. } => seats.len() as u32 * self.movie.price,
            WizardStep::Confirmed { booking } => booking.total_price,
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        match &mut self.step {
            WizardStep::Schedule { date: slot, .. } => {
                if !self.schedule.contains(date) {
                    return Err(WizardError::DateOutsideWindow(date));
                }
                *slot = Some(date);
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "schedule-selection",
            }),
        }
    }

    pub fn select_time(&mut self, time: Showtime) -> Result<(), WizardError> {
        match &mut self.step {
            WizardStep::Schedule { time: slot, .. } => {
                *slot = Some(time);
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "schedule-selection",
            }),
        }
    }

    /// Schedule -> Seats. Requires both a date and a time.
    pub fn proceed_to_seats(&mut self) -> Result<(), WizardError> {
        match &self.step {
            WizardStep::Schedule {
                date: Some(date),
                time: Some(time),
                seats,
            } => {
                self.step = WizardStep::Seats {
                    date: *date,
                    time: time.clone(),
                    seats: seats.clone(),
                };
                Ok(())
            }
            WizardStep::Schedule { .. } => Err(WizardError::ScheduleIncomplete),
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "seat-selection",
            }),
        }
    }

    /// Selects an unselected seat, deselects a selected one. A seat in the
    /// store's occupancy set for the active screening can never be taken.
    pub fn toggle_seat(&mut self, seat: SeatNumber, store: &BookingStore) -> Result<(), WizardError> {
        match &mut self.step {
            WizardStep::Seats { date, time, seats } => {
                let occupied = store.occupied_seats(&self.movie.id, *date, time);
                if occupied.contains(&seat) {
                    return Err(WizardError::SeatTaken(seat.label()));
                }
                if !seats.remove(&seat) {
                    seats.insert(seat);
                }
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "seat-selection",
            }),
        }
    }

    /// Every seat with its picker state, in plan order.
    pub fn seat_states(&self, store: &BookingStore) -> Result<Vec<(SeatNumber, SeatStatus)>, WizardError> {
        match &self.step {
            WizardStep::Seats { date, time, seats } => {
                let occupied = store.occupied_seats(&self.movie.id, *date, time);
                Ok(SeatPlan::seats()
                    .map(|seat| {
                        let status = if occupied.contains(&seat) {
                            SeatStatus::Booked
                        } else if seats.contains(&seat) {
                            SeatStatus::Selected
                        } else {
                            SeatStatus::Available
                        };
                        (seat, status)
                    })
                    .collect())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "seat-selection",
            }),
        }
    }

    /// Seats -> Payment. Requires at least one selected seat.
    pub fn proceed_to_payment(&mut self) -> Result<(), WizardError> {
        match &self.step {
            WizardStep::Seats { date, time, seats } => {
                if seats.is_empty() {
                    return Err(WizardError::NoSeatsSelected);
                }
                self.step = WizardStep::Payment {
                    date: *date,
                    time: time.clone(),
                    seats: seats.clone(),
                };
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "payment",
            }),
        }
    }

    /// Seats -> Schedule, keeping the date, time, and seats chosen so far.
    pub fn back_to_schedule(&mut self) -> Result<(), WizardError> {
        match &self.step {
            WizardStep::Seats { date, time, seats } => {
                self.step = WizardStep::Schedule {
                    date: Some(*date),
                    time: Some(time.clone()),
                    seats: seats.clone(),
                };
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "schedule-selection",
            }),
        }
    }

    /// Payment -> Seats, keeping the seat selection.
    pub fn back_to_seats(&mut self) -> Result<(), WizardError> {
        match &self.step {
            WizardStep::Payment { date, time, seats } => {
                self.step = WizardStep::Seats {
                    date: *date,
                    time: time.clone(),
                    seats: seats.clone(),
                };
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.name(),
                to: "seat-selection",
            }),
        }
    }

    /// Validates the card, charges the gateway, and on success writes the
    /// booking and moves to `Confirmed`. A failed validation or a declined
    /// charge leaves the wizard in `Payment` with the selection intact.
    pub async fn pay(
        &mut self,
        card: &CardDetails,
        gateway: &dyn PaymentAdapter,
        store: &mut BookingStore,
    ) -> Result<Booking, WizardError> {
        let (date, time, seats) = match &self.step {
            WizardStep::Payment { date, time, seats } => (*date, time.clone(), seats.clone()),
            other => {
                return Err(WizardError::InvalidTransition {
                    from: other.name(),
                    to: "payment",
                })
            }
        };

        card.validate()?;

        let total = seats.len() as u32 * self.movie.price;
        let receipt = gateway.charge(total).await?;
        tracing::debug!("Charge {} captured, writing booking", receipt.reference);

        let booking = store
            .add_booking(&self.movie.id, &self.movie.title, seats, date, time, total)
            .await?;

        self.step = WizardStep::Confirmed {
            booking: booking.clone(),
        };
        Ok(booking)
    }

    /// The confirmation summary; present only once confirmed.
    pub fn summary(&self) -> Option<BookingSummary> {
        match &self.step {
            WizardStep::Confirmed { booking } => Some(BookingSummary {
                movie_title: booking.movie_title.clone(),
                date: booking.date,
                time: booking.time.clone(),
                seat_count: booking.seats.len(),
                amount_paid: booking.total_price,
            }),
            _ => None,
        }
    }
}
