use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::{AlternatingMonoPattern, MonoStreak};

/// A group of [`AlternatingMonoPattern`]s that couple into a repeated
/// structure.
#[derive(Clone, Default)]
pub(crate) struct RepeatingHitPatterns {
    /// Indices into the encoding's pattern vector.
    pub(crate) alternating_mono_patterns: Vec<usize>,
    /// Index of the preceding group in the encoding.
    pub(crate) prev: Option<usize>,
    /// Distance to the closest earlier identical group, capped at
    /// [`Self::MAX_REPETITION_INTERVAL`]; one past the cap if there is none.
    pub(crate) repetition_interval: usize,
}

impl Debug for RepeatingHitPatterns {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "(interval={}, alt_len={}, has_prev={})",
            self.repetition_interval,
            self.alternating_mono_patterns.len(),
            self.prev.is_some()
        )
    }
}

impl RepeatingHitPatterns {
    pub(crate) const MAX_REPETITION_INTERVAL: usize = 16;

    pub(crate) fn new(prev: Option<usize>) -> Self {
        Self {
            alternating_mono_patterns: Vec::new(),
            prev,
            repetition_interval: 0,
        }
    }

    pub(crate) fn first_object(
        &self,
        patterns: &[AlternatingMonoPattern],
        streaks: &[MonoStreak],
    ) -> Option<usize> {
        self.alternating_mono_patterns
            .first()
            .and_then(|&i| patterns.get(i))
            .and_then(|pattern| pattern.first_object(streaks))
    }

    pub(crate) fn is_repetition_of(
        &self,
        other: &Self,
        patterns: &[AlternatingMonoPattern],
        streaks: &[MonoStreak],
    ) -> bool {
        if self.alternating_mono_patterns.len() != other.alternating_mono_patterns.len() {
            return false;
        }

        self.alternating_mono_patterns
            .iter()
            .zip(other.alternating_mono_patterns.iter())
            .take(2)
            .all(|(&self_pat, &other_pat)| {
                match (patterns.get(self_pat), patterns.get(other_pat)) {
                    (Some(self_pat), Some(other_pat)) => {
                        self_pat.has_identical_mono_len(other_pat, streaks)
                    }
                    _ => false,
                }
            })
    }
}
