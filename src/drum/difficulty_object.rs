use std::cmp::Ordering;

use crate::model::{HitObject, HitObjectKind};

use super::colour::ColourData;

/// Ratios of the most common rhythm changes, each with a predefined
/// difficulty. A delta time ratio between consecutive notes snaps to the
/// closest entry.
#[rustfmt::skip]
pub(crate) static NOTE_RHYTHMS: [NoteRhythm; 9] = [
    NoteRhythm { id: 0, ratio: 1.0, difficulty: 0.0 },
    NoteRhythm { id: 1, ratio: 2.0 / 1.0, difficulty: 0.3 },
    NoteRhythm { id: 2, ratio: 1.0 / 2.0, difficulty: 0.5 },
    NoteRhythm { id: 3, ratio: 3.0 / 1.0, difficulty: 0.3 },
    NoteRhythm { id: 4, ratio: 1.0 / 3.0, difficulty: 0.35 },
    // Purposefully higher, requires a hand switch in full alternating play
    NoteRhythm { id: 5, ratio: 3.0 / 2.0, difficulty: 0.6 },
    NoteRhythm { id: 6, ratio: 2.0 / 3.0, difficulty: 0.4 },
    NoteRhythm { id: 7, ratio: 5.0 / 4.0, difficulty: 0.5 },
    NoteRhythm { id: 8, ratio: 4.0 / 5.0, difficulty: 0.7 },
];

#[derive(Copy, Clone, Debug)]
pub(crate) struct NoteRhythm {
    id: u8,
    pub(crate) ratio: f32,
    pub(crate) difficulty: f32,
}

impl PartialEq for NoteRhythm {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NoteRhythm {}

impl Default for &'static NoteRhythm {
    #[inline]
    fn default() -> Self {
        &NOTE_RHYTHMS[0]
    }
}

pub(crate) fn closest_rhythm(delta_time: f32, prev_delta_time: f32) -> &'static NoteRhythm {
    let ratio = delta_time / prev_delta_time;

    NOTE_RHYTHMS
        .iter()
        .min_by(|r1, r2| {
            (r1.ratio - ratio)
                .abs()
                .partial_cmp(&(r2.ratio - ratio).abs())
                .unwrap_or(Ordering::Equal)
        })
        .unwrap_or(&NOTE_RHYTHMS[0])
}

/// Position of a note within the same-coloured note sequence, if any.
#[derive(Copy, Clone, Debug)]
pub(crate) enum MonoIndex {
    Center(usize),
    Rim(usize),
    None,
}

#[derive(Clone, Debug)]
pub(crate) struct DrumDifficultyObject {
    pub(crate) idx: usize,
    pub(crate) start_time: f32,
    pub(crate) delta: f32,
    pub(crate) is_note: bool,
    pub(crate) is_rim: bool,
    pub(crate) rhythm: &'static NoteRhythm,
    pub(crate) mono_idx: MonoIndex,
    pub(crate) note_idx: Option<usize>,
    pub(crate) colour: ColourData,
    pub(crate) cheese: bool,
}

/// All difficulty objects of a chart plus index vectors into the note,
/// rim, and center subsequences. Previous-object lookups within a
/// subsequence are plain index arithmetic on these vectors.
#[derive(Clone, Debug, Default)]
pub(crate) struct DrumDifficultyObjects {
    pub(crate) objects: Vec<DrumDifficultyObject>,
    pub(crate) notes: Vec<usize>,
    pub(crate) rims: Vec<usize>,
    pub(crate) centers: Vec<usize>,
}

impl DrumDifficultyObjects {
    pub(crate) fn new(hit_objects: &[HitObject], clock_rate: f64, cheese: &[bool]) -> Self {
        let mut this = Self {
            objects: Vec::with_capacity(hit_objects.len()),
            notes: Vec::with_capacity(hit_objects.len()),
            rims: Vec::new(),
            centers: Vec::new(),
        };

        let mut last: Option<&HitObject> = None;
        let mut last_delta = 0.0;

        for (idx, h) in hit_objects.iter().enumerate() {
            let start_time = (h.start_time / clock_rate) as f32;

            let delta = last.map_or(0.0, |last| {
                ((h.start_time - last.start_time) / clock_rate) as f32
            });

            // The first two objects have no two preceding intervals to
            // compare, their rhythm stays neutral.
            let rhythm = if idx < 2 {
                &NOTE_RHYTHMS[0]
            } else {
                closest_rhythm(delta, last_delta)
            };

            let (mono_idx, note_idx, is_rim) = match &h.kind {
                HitObjectKind::Note(note) => {
                    let note_idx = this.notes.len();

                    let mono_idx = if note.is_rim {
                        MonoIndex::Rim(this.rims.len())
                    } else {
                        MonoIndex::Center(this.centers.len())
                    };

                    this.notes.push(idx);

                    if note.is_rim {
                        this.rims.push(idx);
                    } else {
                        this.centers.push(idx);
                    }

                    (mono_idx, Some(note_idx), note.is_rim)
                }
                _ => (MonoIndex::None, None, false),
            };

            this.objects.push(DrumDifficultyObject {
                idx,
                start_time,
                delta,
                is_note: h.is_note(),
                is_rim,
                rhythm,
                mono_idx,
                note_idx,
                colour: ColourData::default(),
                cheese: cheese.get(idx).copied().unwrap_or(false),
            });

            last_delta = delta;
            last = Some(h);
        }

        this
    }

    pub(crate) fn prev_note(
        &self,
        curr: usize,
        backwards_idx: usize,
    ) -> Option<&DrumDifficultyObject> {
        let note_idx = self.objects.get(curr)?.note_idx?;
        let idx = note_idx.checked_sub(backwards_idx + 1)?;

        self.objects.get(*self.notes.get(idx)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{model::Note, util::pos::Pos};

    use super::*;

    fn note(start_time: f64, is_rim: bool) -> HitObject {
        HitObject {
            pos: Pos::default(),
            start_time,
            kind: HitObjectKind::Note(Note { is_rim }),
        }
    }

    #[test]
    fn rhythm_snaps_to_closest_ratio() {
        assert_eq!(closest_rhythm(100.0, 100.0), &NOTE_RHYTHMS[0]);
        assert_eq!(closest_rhythm(205.0, 100.0), &NOTE_RHYTHMS[1]);
        assert_eq!(closest_rhythm(50.0, 100.0), &NOTE_RHYTHMS[2]);
        assert_eq!(closest_rhythm(145.0, 100.0), &NOTE_RHYTHMS[5]);
    }

    #[test]
    fn arena_indices_are_consistent() {
        let hit_objects: Vec<_> = [false, true, true, false, true]
            .iter()
            .enumerate()
            .map(|(i, &is_rim)| note(i as f64 * 100.0, is_rim))
            .collect();

        let objects = DrumDifficultyObjects::new(&hit_objects, 1.0, &[]);

        assert_eq!(objects.objects.len(), 5);
        assert_eq!(objects.notes.len(), 5);
        assert_eq!(objects.rims, vec![1, 2, 4]);
        assert_eq!(objects.centers, vec![0, 3]);

        for (i, obj) in objects.objects.iter().enumerate() {
            assert_eq!(obj.idx, i);
            assert_eq!(obj.note_idx, Some(i));
        }

        let prev = objects.prev_note(3, 0).unwrap();
        assert_eq!(prev.idx, 2);
        assert!(objects.prev_note(0, 0).is_none());
    }

    #[test]
    fn clock_rate_scales_deltas() {
        let hit_objects: Vec<_> = (0..4).map(|i| note(f64::from(i) * 150.0, false)).collect();

        let objects = DrumDifficultyObjects::new(&hit_objects, 1.5, &[]);

        for obj in objects.objects.iter().skip(1) {
            assert!((obj.delta - 100.0).abs() < 1e-3);
        }
    }
}
