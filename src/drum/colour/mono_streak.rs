use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::drum::difficulty_object::{DrumDifficultyObject, MonoIndex};

use super::HitKind;

/// A run of consecutive same-coloured notes. Non-note objects interrupt
/// runs and occupy streaks of their own.
#[derive(Clone, Default)]
pub(crate) struct MonoStreak {
    /// Indices into the object arena.
    pub(crate) hit_objects: Vec<usize>,
    /// Index of the parent [`AlternatingMonoPattern`] in the encoding.
    ///
    /// [`AlternatingMonoPattern`]: super::AlternatingMonoPattern
    pub(crate) parent: Option<usize>,
    /// Position within the parent pattern.
    pub(crate) idx: usize,
}

impl Debug for MonoStreak {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "(idx={}, obj_len={}, has_parent={})",
            self.idx,
            self.hit_objects.len(),
            self.parent.is_some()
        )
    }
}

impl MonoStreak {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn first_object(&self) -> Option<usize> {
        self.hit_objects.first().copied()
    }

    pub(crate) fn hit_kind(&self, objects: &[DrumDifficultyObject]) -> Option<HitKind> {
        self.first_object()
            .and_then(|i| objects.get(i))
            .and_then(|obj| match obj.mono_idx {
                MonoIndex::Center(_) => Some(HitKind::Center),
                MonoIndex::Rim(_) => Some(HitKind::Rim),
                MonoIndex::None => None,
            })
    }

    pub(crate) fn run_len(&self) -> usize {
        self.hit_objects.len()
    }
}
