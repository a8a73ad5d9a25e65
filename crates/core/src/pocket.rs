use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::Rejection;

/// A single number on the wheel, always within `0..=36`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Pocket(u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    Green,
    Red,
    Black,
}

const RED: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

impl Pocket {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 36;

    /// Range-checked constructor. Everything that builds a pocket goes through here.
    pub fn new(value: i64) -> Result<Self, Rejection> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Pocket(value as u8))
        } else {
            Err(Rejection::OutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn colour(self) -> Colour {
        if self.0 == 0 {
            Colour::Green
        } else if RED.contains(&self.0) {
            Colour::Red
        } else {
            Colour::Black
        }
    }

    /// Every pocket in ascending order.
    pub fn all() -> impl Iterator<Item = Pocket> {
        (Self::MIN..=Self::MAX).map(Pocket)
    }
}

impl TryFrom<i64> for Pocket {
    type Error = Rejection;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Pocket::new(value)
    }
}

impl From<Pocket> for u8 {
    fn from(p: Pocket) -> u8 {
        p.0
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Pocket::new(0).map(Pocket::value), Ok(0));
        assert_eq!(Pocket::new(36).map(Pocket::value), Ok(36));
        assert_eq!(Pocket::new(37), Err(Rejection::OutOfRange(37)));
        assert_eq!(Pocket::new(-1), Err(Rejection::OutOfRange(-1)));
    }

    #[test]
    fn colours_follow_the_wheel() {
        let p = |v| Pocket::new(v).unwrap().colour();
        assert_eq!(p(0), Colour::Green);
        assert_eq!(p(1), Colour::Red);
        assert_eq!(p(2), Colour::Black);
        assert_eq!(p(10), Colour::Black);
        assert_eq!(p(19), Colour::Red);
        assert_eq!(p(36), Colour::Red);
        let reds = Pocket::all().filter(|p| p.colour() == Colour::Red).count();
        assert_eq!(reds, 18);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let ok: Pocket = serde_json::from_str("17").unwrap();
        assert_eq!(ok.value(), 17);
        assert!(serde_json::from_str::<Pocket>("40").is_err());
        assert!(serde_json::from_str::<Pocket>("-3").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "17");
    }
}
