pub(crate) use self::{
    alternating_mono_pattern::AlternatingMonoPattern, mono_streak::MonoStreak,
    preprocessor::ColourPreprocessor, repeating_hit_patterns::RepeatingHitPatterns,
};

mod alternating_mono_pattern;
mod mono_streak;
mod preprocessor;
mod repeating_hit_patterns;

/// The three-level pattern encoding of a chart. Entities reference each
/// other through indices into these vectors.
#[derive(Clone, Debug, Default)]
pub(crate) struct ColourEncoding {
    pub(crate) streaks: Vec<MonoStreak>,
    pub(crate) patterns: Vec<AlternatingMonoPattern>,
    pub(crate) groups: Vec<RepeatingHitPatterns>,
}

/// Per-object encoding annotations. Only the first object of each entity
/// carries the entity's index.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ColourData {
    pub(crate) mono_streak: Option<usize>,
    pub(crate) alternating_mono_pattern: Option<usize>,
    pub(crate) repeating_hit_patterns: Option<usize>,
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) enum HitKind {
    Center,
    Rim,
}
