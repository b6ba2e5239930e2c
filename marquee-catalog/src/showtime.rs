use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed screening slots, offered for every movie/date combination.
pub const SHOWTIMES: [&str; 5] = ["10:00 AM", "1:30 PM", "4:00 PM", "7:00 PM", "10:30 PM"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown showtime: {0}")]
pub struct ShowtimeError(pub String);

/// A screening slot label, validated against the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Showtime(String);

impl Showtime {
    pub fn new(label: &str) -> Result<Self, ShowtimeError> {
        if SHOWTIMES.contains(&label) {
            Ok(Self(label.to_string()))
        } else {
            Err(ShowtimeError(label.to_string()))
        }
    }

    pub fn all() -> Vec<Showtime> {
        SHOWTIMES.iter().map(|s| Showtime(s.to_string())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Showtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Showtime {
    type Error = ShowtimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Showtime::new(&value)
    }
}

impl From<Showtime> for String {
    fn from(value: Showtime) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_programme_slots_are_accepted() {
        assert!(Showtime::new("7:00 PM").is_ok());
        assert_eq!(
            Showtime::new("8:15 PM"),
            Err(ShowtimeError("8:15 PM".to_string()))
        );
        assert_eq!(Showtime::all().len(), 5);
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let slot: Showtime = serde_json::from_str("\"10:30 PM\"").unwrap();
        assert_eq!(slot.as_str(), "10:30 PM");

        let bad: Result<Showtime, _> = serde_json::from_str("\"midnight\"");
        assert!(bad.is_err());
    }
}
