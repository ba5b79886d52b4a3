//! Named preset durations.

use serde::{Deserialize, Serialize};

use crate::duration::Hms;

/// A named duration the user can start by name instead of typing digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub duration: Hms,
}

impl Preset {
    fn named(name: &str, total_secs: u64) -> Self {
        Self {
            name: name.to_string(),
            duration: Hms::from_total_seconds(total_secs),
        }
    }

    /// The built-in presets. User presets from the config come on top.
    pub fn builtin() -> Vec<Preset> {
        vec![
            Preset::named("Pomodoro", 25 * 60),
            Preset::named("Short Break", 5 * 60),
            Preset::named("Coffee", 3 * 60),
            Preset::named("Meeting", 60 * 60),
        ]
    }
}

/// Case-insensitive lookup by name.
pub fn find<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    presets
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
