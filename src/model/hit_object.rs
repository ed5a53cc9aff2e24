use std::cmp::Ordering;

use crate::util::pos::Pos;

/// All hitobject related data required for a difficulty calculation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Whether the hitobject is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Circle)
    }

    /// Whether the hitobject is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Slider(_))
    }

    /// Whether the hitobject is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Spinner(_))
    }

    /// Whether the hitobject is a drum note.
    pub const fn is_note(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Note(_))
    }

    /// Whether the hitobject is a rim note. `false` for everything that is
    /// not a note.
    pub const fn is_rim(&self) -> bool {
        matches!(&self.kind, HitObjectKind::Note(Note { is_rim: true }))
    }
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Additional data for a [`HitObject`].
///
/// Note that each ruleset handles hit objects differently.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
    Note(Note),
}

/// A slider.
///
/// The checkpoint list is expected to contain all nested ticks, repeats, and
/// the tail in chronological order; approximating the slider's curve is the
/// caller's business.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Slider {
    pub end_time: f64,
    pub repeats: usize,
    pub checkpoints: Vec<Checkpoint>,
}

impl Slider {
    /// The last checkpoint i.e. the slider's tail.
    pub fn tail(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }
}

/// A nested slider checkpoint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Checkpoint {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: CheckpointKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CheckpointKind {
    Tick,
    Repeat,
    Tail,
}

/// A spinner.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Spinner {
    pub duration: f64,
}

/// A two-tone drum note.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Note {
    pub is_rim: bool,
}
