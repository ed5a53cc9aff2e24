use crate::util::difficulty::difficulty_range;

use super::hit_object::HitObject;

const OD_MIN: f64 = 80.0;
const OD_AVG: f64 = 50.0;
const OD_MAX: f64 = 20.0;

const AR_MIN: f64 = 1800.0;
const AR_AVG: f64 = 1200.0;
const AR_MAX: f64 = 450.0;

/// A rhythm-game chart: difficulty settings plus a time-ordered hit object
/// sequence.
///
/// The sequence must be sorted by start time; the calculations assume it is
/// well-formed and neither re-sort nor repair it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Chart {
    /// Circle size setting in `0..=10`.
    pub cs: f32,
    /// Approach rate setting in `0..=10`.
    pub ar: f32,
    /// Overall difficulty setting in `0..=10`.
    pub od: f32,
    pub hit_objects: Vec<HitObject>,
}

impl Chart {
    /// The hit window for a top-accuracy judgement in milliseconds, adjusted
    /// for the clock rate.
    pub fn hit_window_great(&self, clock_rate: f64) -> f64 {
        difficulty_range(f64::from(self.od), OD_MIN, OD_AVG, OD_MAX) / clock_rate
    }

    /// Milliseconds an object is visible before its hit time, adjusted for
    /// the clock rate.
    pub fn preempt(&self, clock_rate: f64) -> f64 {
        difficulty_range(f64::from(self.ar), AR_MIN, AR_AVG, AR_MAX) / clock_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_window_scales_with_clock_rate() {
        let chart = Chart {
            od: 5.0,
            ..Default::default()
        };

        assert_eq!(chart.hit_window_great(1.0), 50.0);
        assert_eq!(chart.hit_window_great(2.0), 25.0);
    }

    #[test]
    fn preempt_follows_approach_rate() {
        let chart = Chart {
            ar: 10.0,
            ..Default::default()
        };

        assert_eq!(chart.preempt(1.0), 450.0);
    }
}
