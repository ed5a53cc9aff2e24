use crate::{model::HitObject, util::limited_queue::LimitedQueue};

const ROLL_MIN_REPETITIONS: usize = 12;
const TL_MIN_REPETITIONS: isize = 16;

/// Flags objects that are part of a cheesable pattern, either a repeated
/// short colour roll or a two-handed alternation on a single colour.
pub(crate) fn find_cheese(hit_objects: &[HitObject]) -> Vec<bool> {
    let mut cheese = vec![false; hit_objects.len()];

    find_rolls::<3, 6>(hit_objects, &mut cheese);
    find_rolls::<4, 8>(hit_objects, &mut cheese);

    find_tl_tap::<0, true>(hit_objects, &mut cheese);
    find_tl_tap::<1, true>(hit_objects, &mut cheese);
    find_tl_tap::<0, false>(hit_objects, &mut cheese);
    find_tl_tap::<1, false>(hit_objects, &mut cheese);

    cheese
}

fn find_rolls<const PATTERN_LEN: usize, const DOUBLE_PATTERN_LEN: usize>(
    hit_objects: &[HitObject],
    cheese: &mut [bool],
) {
    let mut history: LimitedQueue<bool, DOUBLE_PATTERN_LEN> = LimitedQueue::default();

    // Once the first repeat is found, the cursor is marked as being in a
    // repeat until a mismatching pair breaks it.
    let mut index_before_last_repeat = -1;
    let mut last_mark_end = 0;

    for (i, h) in hit_objects.iter().enumerate() {
        history.push(h.is_rim());

        if !history.is_full() {
            continue;
        }

        if !contains_pattern_repeat::<PATTERN_LEN, DOUBLE_PATTERN_LEN>(&history) {
            index_before_last_repeat = (i + 1 - history.len()) as isize;

            continue;
        }

        let repeated_len = (i as isize - index_before_last_repeat) as usize;

        if repeated_len < ROLL_MIN_REPETITIONS {
            continue;
        }

        mark_as_cheese(last_mark_end.max(i + 1 - repeated_len), i, cheese);

        last_mark_end = i;
    }
}

fn find_tl_tap<const PARITY: usize, const IS_RIM: bool>(
    hit_objects: &[HitObject],
    cheese: &mut [bool],
) {
    let mut tl_len = -2_isize;
    let mut last_mark_end = 0;

    for (i, h) in hit_objects.iter().enumerate().skip(PARITY).step_by(2) {
        if h.is_rim() == IS_RIM {
            tl_len += 2;
        } else {
            tl_len = -2;
        }

        if tl_len < TL_MIN_REPETITIONS {
            continue;
        }

        let start = (i as isize + 1 - tl_len).max(last_mark_end as isize);
        mark_as_cheese(start as usize, i, cheese);

        last_mark_end = i;
    }
}

#[inline]
fn mark_as_cheese(start: usize, end: usize, cheese: &mut [bool]) {
    cheese
        .iter_mut()
        .take(end + 1)
        .skip(start)
        .for_each(|b| *b = true);
}

#[inline]
fn contains_pattern_repeat<const PATTERN_LEN: usize, const DOUBLE_PATTERN_LEN: usize>(
    history: &LimitedQueue<bool, DOUBLE_PATTERN_LEN>,
) -> bool {
    history
        .iter()
        .zip(history.iter().skip(PATTERN_LEN))
        .all(|(curr, to_compare)| curr == to_compare)
}
