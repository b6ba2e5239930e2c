use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Seat {0} is outside the auditorium plan (1-48)")]
pub struct SeatError(pub u8);

/// A seat in the auditorium, numbered 1..=48 across 6 rows of 8.
/// Out-of-range numbers are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeatNumber(u8);

impl SeatNumber {
    pub fn new(number: u8) -> Result<Self, SeatError> {
        if (1..=SeatPlan::TOTAL_SEATS).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SeatError(number))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn row_label(self) -> char {
        SeatPlan::ROW_LABELS[((self.0 - 1) / SeatPlan::SEATS_PER_ROW) as usize]
    }

    pub fn column(self) -> u8 {
        (self.0 - 1) % SeatPlan::SEATS_PER_ROW + 1
    }

    /// Display label like "C7".
    pub fn label(self) -> String {
        format!("{}{}", self.row_label(), self.column())
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for SeatNumber {
    type Error = SeatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SeatNumber::new(value)
    }
}

impl From<SeatNumber> for u8 {
    fn from(value: SeatNumber) -> Self {
        value.0
    }
}

/// The fixed auditorium layout.
pub struct SeatPlan;

impl SeatPlan {
    pub const ROWS: u8 = 6;
    pub const SEATS_PER_ROW: u8 = 8;
    pub const TOTAL_SEATS: u8 = Self::ROWS * Self::SEATS_PER_ROW;
    pub const ROW_LABELS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

    /// Every seat, in number order.
    pub fn seats() -> impl Iterator<Item = SeatNumber> {
        (1..=Self::TOTAL_SEATS).map(SeatNumber)
    }

    /// Rows in screen order, each with its label and seats.
    pub fn rows() -> impl Iterator<Item = (char, Vec<SeatNumber>)> {
        Self::ROW_LABELS.iter().enumerate().map(|(index, &label)| {
            let first = index as u8 * Self::SEATS_PER_ROW + 1;
            let seats = (first..first + Self::SEATS_PER_ROW).map(SeatNumber).collect();
            (label, seats)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_outside_the_plan_are_rejected() {
        assert_eq!(SeatNumber::new(0), Err(SeatError(0)));
        assert_eq!(SeatNumber::new(49), Err(SeatError(49)));
        assert!(SeatNumber::new(1).is_ok());
        assert!(SeatNumber::new(48).is_ok());
    }

    #[test]
    fn labels_follow_the_six_by_eight_plan() {
        assert_eq!(SeatNumber::new(1).unwrap().label(), "A1");
        assert_eq!(SeatNumber::new(8).unwrap().label(), "A8");
        assert_eq!(SeatNumber::new(9).unwrap().label(), "B1");
        assert_eq!(SeatNumber::new(23).unwrap().label(), "C7");
        assert_eq!(SeatNumber::new(48).unwrap().label(), "F8");
    }

    #[test]
    fn the_plan_enumerates_48_seats_in_6_rows() {
        assert_eq!(SeatPlan::seats().count(), 48);

        let rows: Vec<_> = SeatPlan::rows().collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].0, 'A');
        assert_eq!(rows[5].0, 'F');
        assert_eq!(rows[2].1.len(), 8);
        assert_eq!(rows[2].1[0].get(), 17);
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let seat: SeatNumber = serde_json::from_str("17").unwrap();
        assert_eq!(seat.label(), "C1");

        let bad: Result<SeatNumber, _> = serde_json::from_str("49");
        assert!(bad.is_err());
    }
}
