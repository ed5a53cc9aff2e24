use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::drum::difficulty_object::DrumDifficultyObject;

use super::MonoStreak;

/// A sequence of [`MonoStreak`]s with identical run length.
#[derive(Clone, Default)]
pub(crate) struct AlternatingMonoPattern {
    /// Indices into the encoding's streak vector.
    pub(crate) mono_streaks: Vec<usize>,
    /// Index of the parent [`RepeatingHitPatterns`] in the encoding.
    ///
    /// [`RepeatingHitPatterns`]: super::RepeatingHitPatterns
    pub(crate) parent: Option<usize>,
    /// Position within the parent group.
    pub(crate) idx: usize,
}

impl Debug for AlternatingMonoPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "(idx={}, mono_len={}, has_parent={})",
            self.idx,
            self.mono_streaks.len(),
            self.parent.is_some()
        )
    }
}

impl AlternatingMonoPattern {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn first_object(&self, streaks: &[MonoStreak]) -> Option<usize> {
        self.mono_streaks
            .first()
            .and_then(|&i| streaks.get(i))
            .and_then(MonoStreak::first_object)
    }

    pub(crate) fn is_repetition_of(
        &self,
        other: &Self,
        streaks: &[MonoStreak],
        objects: &[DrumDifficultyObject],
    ) -> bool {
        self.has_identical_mono_len(other, streaks)
            && other.mono_streaks.len() == self.mono_streaks.len()
            && self.first_hit_kind(streaks, objects) == other.first_hit_kind(streaks, objects)
    }

    pub(crate) fn has_identical_mono_len(&self, other: &Self, streaks: &[MonoStreak]) -> bool {
        self.first_run_len(streaks) == other.first_run_len(streaks)
    }

    fn first_run_len(&self, streaks: &[MonoStreak]) -> Option<usize> {
        self.mono_streaks
            .first()
            .and_then(|&i| streaks.get(i))
            .map(MonoStreak::run_len)
    }

    fn first_hit_kind(
        &self,
        streaks: &[MonoStreak],
        objects: &[DrumDifficultyObject],
    ) -> Option<super::HitKind> {
        self.mono_streaks
            .first()
            .and_then(|&i| streaks.get(i))
            .and_then(|streak| streak.hit_kind(objects))
    }
}
