//! The (hours, minutes, seconds) remaining-time triple.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A non-negative duration split into hours, minutes, and seconds.
///
/// Minutes and seconds stay within 0..=59; only construction through
/// [`Hms::new`] (or deserialization, which routes through it) is possible,
/// so the invariant holds everywhere inside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawHms", into = "RawHms")]
pub struct Hms {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

/// Unvalidated wire form of [`Hms`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawHms {
    #[serde(default)]
    hours: u32,
    #[serde(default)]
    minutes: u32,
    #[serde(default)]
    seconds: u32,
}

impl From<Hms> for RawHms {
    fn from(hms: Hms) -> Self {
        Self {
            hours: hms.hours,
            minutes: hms.minutes,
            seconds: hms.seconds,
        }
    }
}

impl TryFrom<RawHms> for Hms {
    type Error = ValidationError;

    fn try_from(raw: RawHms) -> Result<Self, Self::Error> {
        Self::new(raw.hours, raw.minutes, raw.seconds)
    }
}

impl Hms {
    pub const ZERO: Hms = Hms {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Create a duration, rejecting out-of-range minutes or seconds.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, ValidationError> {
        if minutes > 59 {
            return Err(ValidationError::OutOfRange {
                field: "minutes",
                value: minutes,
                max: 59,
            });
        }
        if seconds > 59 {
            return Err(ValidationError::OutOfRange {
                field: "seconds",
                value: seconds,
                max: 59,
            });
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Build from a total number of seconds. Hours saturate at `u32::MAX`.
    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: (total / 3600).min(u64::from(u32::MAX)) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Subtract one second via the borrow chain. No-op at zero.
    pub fn decrement(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.seconds = 59;
            self.minutes -= 1;
        } else if self.hours > 0 {
            self.seconds = 59;
            self.minutes = 59;
            self.hours -= 1;
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl FromStr for Hms {
    type Err = ValidationError;

    /// Accepts `SS` (total seconds), `MM:SS`, or `HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(':')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map_err(|e| ValidationError::Parse {
                        input: s.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        match parts.as_slice() {
            [secs] => Ok(Self::from_total_seconds(u64::from(*secs))),
            [minutes, seconds] => Self::new(0, *minutes, *seconds),
            [hours, minutes, seconds] => Self::new(*hours, *minutes, *seconds),
            _ => Err(ValidationError::Parse {
                input: s.to_string(),
                reason: "expected SS, MM:SS, or HH:MM:SS".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn borrow_chain_from_minutes() {
        let mut hms = Hms::new(0, 1, 0).unwrap();
        hms.decrement();
        assert_eq!(hms, Hms::new(0, 0, 59).unwrap());
    }

    #[test]
    fn borrow_chain_from_hours() {
        let mut hms = Hms::new(1, 0, 0).unwrap();
        hms.decrement();
        assert_eq!(hms, Hms::new(0, 59, 59).unwrap());
    }

    #[test]
    fn decrement_at_zero_is_noop() {
        let mut hms = Hms::ZERO;
        hms.decrement();
        assert_eq!(hms, Hms::ZERO);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(Hms::new(0, 60, 0).is_err());
        assert!(Hms::new(0, 0, 60).is_err());
        assert!(Hms::new(100, 59, 59).is_ok());
    }

    #[test]
    fn parses_all_three_forms() {
        assert_eq!("90".parse::<Hms>().unwrap(), Hms::new(0, 1, 30).unwrap());
        assert_eq!("25:00".parse::<Hms>().unwrap(), Hms::new(0, 25, 0).unwrap());
        assert_eq!(
            "1:30:05".parse::<Hms>().unwrap(),
            Hms::new(1, 30, 5).unwrap()
        );
        assert!("1:2:3:4".parse::<Hms>().is_err());
        assert!("90:00".parse::<Hms>().is_err());
        assert!("abc".parse::<Hms>().is_err());
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(Hms::new(1, 2, 3).unwrap().to_string(), "01:02:03");
        assert_eq!(Hms::ZERO.to_string(), "00:00:00");
    }

    #[test]
    fn deserialization_validates_ranges() {
        let ok: Hms = serde_json::from_str(r#"{"hours":0,"minutes":25,"seconds":0}"#).unwrap();
        assert_eq!(ok, Hms::new(0, 25, 0).unwrap());
        assert!(serde_json::from_str::<Hms>(r#"{"minutes":75}"#).is_err());
    }

    proptest! {
        #[test]
        fn decrement_removes_exactly_one_second(h in 0u32..3, m in 0u32..60, s in 0u32..60) {
            prop_assume!(h + m + s > 0);
            let mut hms = Hms::new(h, m, s).unwrap();
            let before = hms.total_seconds();
            hms.decrement();
            prop_assert_eq!(hms.total_seconds(), before - 1);
            prop_assert!(hms.minutes() <= 59 && hms.seconds() <= 59);
        }
    }
}
