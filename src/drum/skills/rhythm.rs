use crate::{
    drum::difficulty_object::{DrumDifficultyObject, NoteRhythm},
    util::{float_ext::FloatExt, limited_queue::LimitedQueue},
};

const RHYTHM_STRAIN_DECAY: f32 = 0.96;

const HISTORY_MAX_LEN: usize = 8;

/// Evaluates the difficulty of rhythm changes by matching the recent
/// history of delta time ratios against itself.
#[derive(Clone, Debug)]
pub(crate) struct Rhythm {
    /// Arena index and rhythm ratio of the recent objects.
    history: LimitedQueue<(usize, &'static NoteRhythm), HISTORY_MAX_LEN>,
    notes_since_rhythm_change: usize,
    current_strain: f32,
}

impl Rhythm {
    pub(crate) fn new() -> Self {
        Self {
            history: LimitedQueue::default(),
            notes_since_rhythm_change: 0,
            current_strain: 0.0,
        }
    }

    pub(crate) fn strain_value_of(&mut self, curr: &DrumDifficultyObject) -> f32 {
        if !curr.is_note {
            self.current_strain = 0.0;
            self.notes_since_rhythm_change = 0;

            return 0.0;
        }

        self.current_strain *= RHYTHM_STRAIN_DECAY;
        self.notes_since_rhythm_change += 1;

        if curr.rhythm.difficulty.eq(0.0) {
            return 0.0;
        }

        let mut strain = curr.rhythm.difficulty;

        self.history.push((curr.idx, curr.rhythm));

        let mut reps_penalty = 1.0;

        for most_recent_patterns_to_compare in 2..=HISTORY_MAX_LEN / 2 {
            let iter = (0..self
                .history
                .len()
                .saturating_sub(most_recent_patterns_to_compare))
                .rev();

            for start in iter {
                let different_pattern = (0..most_recent_patterns_to_compare).any(|i| {
                    self.history[start + i].1
                        != self.history
                            [self.history.len() + i - most_recent_patterns_to_compare]
                            .1
                });

                if different_pattern {
                    continue;
                }

                reps_penalty *= repetition_penalty(curr.idx - self.history[start].0);

                break;
            }
        }

        let speed_penalty = if curr.delta < 80.0 {
            1.0
        } else if curr.delta < 210.0 {
            (1.4 - 0.005 * curr.delta).max(0.0)
        } else {
            self.current_strain = 0.0;
            self.notes_since_rhythm_change = 0;

            0.0
        };

        strain *= reps_penalty;
        strain *= pattern_len_penalty(self.notes_since_rhythm_change);
        strain *= speed_penalty;

        self.notes_since_rhythm_change = 0;
        self.current_strain += strain;

        self.current_strain
    }
}

#[inline]
fn pattern_len_penalty(pattern_len: usize) -> f32 {
    let short_pattern_penalty = (0.15 * pattern_len as f32).min(1.0);
    let long_pattern_penalty = (2.5 - 0.15 * pattern_len as f32).clamp(0.0, 1.0);

    short_pattern_penalty.min(long_pattern_penalty)
}

#[inline]
fn repetition_penalty(notes_since: usize) -> f32 {
    (0.032 * notes_since as f32).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_len_penalty_peaks_in_the_middle() {
        assert_eq!(pattern_len_penalty(0), 0.0);
        assert!((pattern_len_penalty(7) - 1.0).abs() < 1e-6);
        assert_eq!(pattern_len_penalty(17), 0.0);
    }

    #[test]
    fn repetition_penalty_saturates() {
        assert!(repetition_penalty(4) < repetition_penalty(8));
        assert_eq!(repetition_penalty(100), 1.0);
    }
}
