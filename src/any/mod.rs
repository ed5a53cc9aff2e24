use std::{error, fmt};

/// Configuration for a difficulty calculation, shared by all rulesets.
///
/// All settings are optional; [`Difficulty::new`] describes an unmodified
/// play of the full chart.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Difficulty {
    clock_rate: f64,
    hidden: bool,
    flashlight: bool,
    passed_objects: Option<u32>,
}

impl Difficulty {
    pub const DEFAULT_CLOCK_RATE: f64 = 1.0;

    pub const fn new() -> Self {
        Self {
            clock_rate: Self::DEFAULT_CLOCK_RATE,
            hidden: false,
            flashlight: false,
            passed_objects: None,
        }
    }

    /// Adjust the clock rate used in the calculation, e.g. `1.5` for a
    /// 50% speed-up modifier.
    ///
    /// The value is validated when the calculation runs; anything
    /// non-finite or non-positive results in [`InvalidConfig::ClockRate`].
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = clock_rate;

        self
    }

    /// Whether a hidden-visibility modifier is active.
    ///
    /// Only influences the flashlight skill.
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;

        self
    }

    /// Whether the flashlight modifier is active, i.e. whether the
    /// flashlight rating contributes to the star rating.
    pub const fn flashlight(mut self, flashlight: bool) -> Self {
        self.flashlight = flashlight;

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    pub(crate) fn checked_clock_rate(&self) -> Result<f64, InvalidConfig> {
        if self.clock_rate.is_finite() && self.clock_rate > 0.0 {
            Ok(self.clock_rate)
        } else {
            Err(InvalidConfig::ClockRate(self.clock_rate))
        }
    }

    pub(crate) const fn get_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) const fn get_flashlight(&self) -> bool {
        self.flashlight
    }

    pub(crate) fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

/// A calculation was started with parameters outside their valid domain.
///
/// These indicate a programming defect in the calling code, never bad chart
/// data; degenerate charts produce a zero rating instead of an error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InvalidConfig {
    /// The clock rate must be finite and positive.
    ClockRate(f64),
    /// The reduced-strain baseline must be within `[0, 1]`.
    ReducedStrainBaseline(f64),
    /// The section decay weight must be within `(0, 1]`.
    DecayWeight(f64),
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockRate(rate) => {
                write!(f, "clock rate must be finite and positive, got {rate}")
            }
            Self::ReducedStrainBaseline(baseline) => {
                write!(f, "reduced-strain baseline must be in [0, 1], got {baseline}")
            }
            Self::DecayWeight(weight) => {
                write!(f, "section decay weight must be in (0, 1], got {weight}")
            }
        }
    }
}

impl error::Error for InvalidConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_clock_rates() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let difficulty = Difficulty::new().clock_rate(rate);
            assert!(difficulty.checked_clock_rate().is_err());
        }
    }

    #[test]
    fn accepts_regular_clock_rates() {
        for rate in [0.5, 1.0, 1.5, 2.0] {
            let difficulty = Difficulty::new().clock_rate(rate);
            assert_eq!(difficulty.checked_clock_rate(), Ok(rate));
        }
    }
}
