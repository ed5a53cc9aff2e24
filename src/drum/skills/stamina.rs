use crate::{drum::difficulty_object::DrumDifficultyObject, util::limited_queue::LimitedQueue};

const HISTORY_MAX_LEN: usize = 2;

/// Evaluates single-hand endurance. Two instances run in parallel, one per
/// hand, assuming notes alternate between hands.
#[derive(Clone, Debug)]
pub(crate) struct Stamina {
    hand: usize,
    note_pair_duration_history: LimitedQueue<f32, HISTORY_MAX_LEN>,
    off_hand_object_duration: f32,
}

impl Stamina {
    pub(crate) fn new(right_hand: bool) -> Self {
        Self {
            hand: usize::from(right_hand),
            note_pair_duration_history: LimitedQueue::default(),
            off_hand_object_duration: f32::MAX,
        }
    }

    pub(crate) fn strain_value_of(&mut self, curr: &DrumDifficultyObject) -> f32 {
        let Some(note_idx) = curr.note_idx else {
            return 0.0;
        };

        if note_idx % 2 != self.hand {
            self.off_hand_object_duration = curr.delta;

            return 0.0;
        }

        let mut strain = 1.0;

        self.note_pair_duration_history
            .push(curr.delta + self.off_hand_object_duration);

        if let Some(&shortest_recent_pair) = self.note_pair_duration_history.min() {
            strain += speed_bonus(shortest_recent_pair);
        }

        if curr.cheese {
            strain *= cheese_penalty(curr.delta + self.off_hand_object_duration);
        }

        strain
    }
}

#[inline]
fn cheese_penalty(note_pair_duration: f32) -> f32 {
    if note_pair_duration > 125.0 {
        1.0
    } else if note_pair_duration < 100.0 {
        0.6
    } else {
        0.6 + (note_pair_duration - 100.0) * 0.016
    }
}

#[inline]
fn speed_bonus(note_pair_duration: f32) -> f32 {
    if note_pair_duration > 200.0 {
        return 0.0;
    }

    let mut bonus = 200.0 - note_pair_duration;
    bonus *= bonus;

    bonus / 100_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cheese_penalty_is_graduated() {
        assert_eq!(cheese_penalty(150.0), 1.0);
        assert_eq!(cheese_penalty(50.0), 0.6);

        let mid = cheese_penalty(112.5);
        assert!(mid > 0.6 && mid < 1.0);
    }

    #[inline]
    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn speed_bonus_rewards_short_pairs() {
        assert_eq!(speed_bonus(250.0), 0.0);
        assert!(close(speed_bonus(200.0), 0.0));
        assert!(close(speed_bonus(100.0), 0.1));
        assert!(speed_bonus(50.0) > speed_bonus(100.0));
    }
}
