use std::collections::VecDeque;

use crate::drum::difficulty_object::DrumDifficultyObjects;

use super::{
    AlternatingMonoPattern, ColourEncoding, MonoStreak, RepeatingHitPatterns,
};

pub(crate) struct ColourPreprocessor;

impl ColourPreprocessor {
    /// Encodes the chart into the three-level pattern hierarchy and
    /// annotates the first object of each entity with the entity's index.
    pub(crate) fn process_and_assign(objects: &mut DrumDifficultyObjects) -> ColourEncoding {
        let mut encoding = Self::encode(objects);

        let ColourEncoding {
            streaks,
            patterns,
            groups,
        } = &mut encoding;

        for (group_idx, group) in groups.iter().enumerate() {
            for (i, &pattern_idx) in group.alternating_mono_patterns.iter().enumerate() {
                if let Some(pattern) = patterns.get_mut(pattern_idx) {
                    pattern.parent = Some(group_idx);
                    pattern.idx = i;
                }
            }
        }

        for (pattern_idx, pattern) in patterns.iter().enumerate() {
            for (j, &streak_idx) in pattern.mono_streaks.iter().enumerate() {
                if let Some(streak) = streaks.get_mut(streak_idx) {
                    streak.parent = Some(pattern_idx);
                    streak.idx = j;
                }
            }
        }

        for (group_idx, group) in groups.iter().enumerate() {
            if let Some(obj) = group
                .first_object(patterns, streaks)
                .and_then(|i| objects.objects.get_mut(i))
            {
                obj.colour.repeating_hit_patterns = Some(group_idx);
            }
        }

        for (pattern_idx, pattern) in patterns.iter().enumerate() {
            if let Some(obj) = pattern
                .first_object(streaks)
                .and_then(|i| objects.objects.get_mut(i))
            {
                obj.colour.alternating_mono_pattern = Some(pattern_idx);
            }
        }

        for (streak_idx, streak) in streaks.iter().enumerate() {
            if let Some(obj) = streak
                .first_object()
                .and_then(|i| objects.objects.get_mut(i))
            {
                obj.colour.mono_streak = Some(streak_idx);
            }
        }

        encoding
    }

    fn encode(data: &DrumDifficultyObjects) -> ColourEncoding {
        let streaks = Self::encode_mono_streaks(data);
        let patterns = Self::encode_alternating_mono_patterns(&streaks);
        let groups = Self::encode_repeating_hit_patterns(&patterns, &streaks, data);

        ColourEncoding {
            streaks,
            patterns,
            groups,
        }
    }

    /// A new streak starts whenever there is no previous note or the colour
    /// changed between two notes. Non-note objects have no note index, so
    /// each of them opens a streak of its own.
    fn encode_mono_streaks(data: &DrumDifficultyObjects) -> Vec<MonoStreak> {
        let mut streaks = Vec::new();
        let mut data_iter = data.objects.iter();

        let Some(first) = data_iter.next() else {
            return streaks;
        };

        streaks.push(MonoStreak::new());
        let mut curr_streak = streaks.last_mut();

        if let Some(ref mut curr) = curr_streak {
            curr.hit_objects.push(first.idx);
        }

        for obj in data_iter {
            let same_colour = data
                .prev_note(obj.idx, 0)
                .filter(|prev| !(obj.is_note && prev.is_note && obj.is_rim != prev.is_rim));

            if same_colour.is_none() {
                streaks.push(MonoStreak::new());
                curr_streak = streaks.last_mut();
            }

            if let Some(ref mut curr) = curr_streak {
                curr.hit_objects.push(obj.idx);
            }
        }

        streaks
    }

    /// A new pattern starts whenever the run length changes between two
    /// consecutive streaks.
    fn encode_alternating_mono_patterns(data: &[MonoStreak]) -> Vec<AlternatingMonoPattern> {
        let mut patterns = Vec::new();

        if data.is_empty() {
            return patterns;
        }

        patterns.push(AlternatingMonoPattern::new());
        let mut curr_pattern = patterns.last_mut();

        if let Some(ref mut curr) = curr_pattern {
            curr.mono_streaks.push(0);
        }

        for i in 1..data.len() {
            if data[i].run_len() != data[i - 1].run_len() {
                patterns.push(AlternatingMonoPattern::new());
                curr_pattern = patterns.last_mut();
            }

            if let Some(ref mut curr) = curr_pattern {
                curr.mono_streaks.push(i);
            }
        }

        patterns
    }

    fn encode_repeating_hit_patterns(
        patterns: &[AlternatingMonoPattern],
        streaks: &[MonoStreak],
        objects: &DrumDifficultyObjects,
    ) -> Vec<RepeatingHitPatterns> {
        let mut groups: Vec<RepeatingHitPatterns> = Vec::new();
        let mut data: VecDeque<usize> = (0..patterns.len()).collect();

        let coupled = |data: &VecDeque<usize>| {
            data.get(2).is_some_and(|&other| {
                patterns[data[0]].is_repetition_of(&patterns[other], streaks, &objects.objects)
            })
        };

        while !data.is_empty() {
            let mut curr = RepeatingHitPatterns::new(groups.len().checked_sub(1));

            if coupled(&data) {
                // Absorb patterns while the one at the front keeps repeating
                // two patterns later, then drain the viewed pair as well.
                while coupled(&data) {
                    if let Some(front) = data.pop_front() {
                        curr.alternating_mono_patterns.push(front);
                    }
                }

                for front in data.drain(..2) {
                    curr.alternating_mono_patterns.push(front);
                }
            } else if let Some(front) = data.pop_front() {
                curr.alternating_mono_patterns.push(front);
            }

            groups.push(curr);
        }

        let intervals: Vec<_> = groups
            .iter()
            .map(|group| Self::find_repetition_interval(group, &groups, patterns, streaks))
            .collect();

        for (group, interval) in groups.iter_mut().zip(intervals) {
            group.repetition_interval = interval;
        }

        groups
    }

    fn find_repetition_interval(
        group: &RepeatingHitPatterns,
        groups: &[RepeatingHitPatterns],
        patterns: &[AlternatingMonoPattern],
        streaks: &[MonoStreak],
    ) -> usize {
        const MAX: usize = RepeatingHitPatterns::MAX_REPETITION_INTERVAL;

        let Some(mut other_idx) = group.prev else {
            return MAX + 1;
        };

        let mut interval = 1;

        while interval < MAX {
            let Some(other) = groups.get(other_idx) else {
                break;
            };

            if group.is_repetition_of(other, patterns, streaks) {
                return interval.min(MAX);
            }

            match other.prev {
                Some(prev) => other_idx = prev,
                None => break,
            }

            interval += 1;
        }

        MAX + 1
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{HitObject, HitObjectKind, Note},
        util::pos::Pos,
    };

    use super::*;

    fn notes(colours: &[bool]) -> DrumDifficultyObjects {
        let hit_objects: Vec<_> = colours
            .iter()
            .enumerate()
            .map(|(i, &is_rim)| HitObject {
                pos: Pos::default(),
                start_time: i as f64 * 100.0,
                kind: HitObjectKind::Note(Note { is_rim }),
            })
            .collect();

        DrumDifficultyObjects::new(&hit_objects, 1.0, &[])
    }

    #[test]
    fn equal_runs_encode_into_one_pattern() {
        let mut objects = notes(&[false, false, true, true, false, false]);
        let encoding = ColourPreprocessor::process_and_assign(&mut objects);

        assert_eq!(encoding.streaks.len(), 3);

        for streak in encoding.streaks.iter() {
            assert_eq!(streak.run_len(), 2);
            assert_eq!(streak.parent, Some(0));
        }

        assert_eq!(encoding.streaks[0].hit_objects, vec![0, 1]);
        assert_eq!(encoding.streaks[1].hit_objects, vec![2, 3]);
        assert_eq!(encoding.streaks[2].hit_objects, vec![4, 5]);

        assert_eq!(encoding.patterns.len(), 1);
        assert_eq!(encoding.patterns[0].mono_streaks, vec![0, 1, 2]);
        assert_eq!(encoding.groups.len(), 1);
    }

    #[test]
    fn run_len_change_starts_new_pattern() {
        // Runs of 2, 2, then 3.
        let mut objects = notes(&[false, false, true, true, false, false, false]);
        let encoding = ColourPreprocessor::process_and_assign(&mut objects);

        assert_eq!(encoding.streaks.len(), 3);
        assert_eq!(encoding.patterns.len(), 2);
        assert_eq!(encoding.patterns[0].mono_streaks, vec![0, 1]);
        assert_eq!(encoding.patterns[1].mono_streaks, vec![2]);
    }

    #[test]
    fn first_objects_carry_entity_indices() {
        let mut objects = notes(&[false, false, true, true, false, false]);
        let _ = ColourPreprocessor::process_and_assign(&mut objects);

        let first = &objects.objects[0].colour;
        assert_eq!(first.mono_streak, Some(0));
        assert_eq!(first.alternating_mono_pattern, Some(0));
        assert_eq!(first.repeating_hit_patterns, Some(0));

        let second = &objects.objects[1].colour;
        assert_eq!(second.mono_streak, None);

        let third = &objects.objects[2].colour;
        assert_eq!(third.mono_streak, Some(1));
        assert_eq!(third.alternating_mono_pattern, None);
    }

    #[test]
    fn lone_group_has_max_repetition_interval() {
        let mut objects = notes(&[false, false, true, true, false, false]);
        let encoding = ColourPreprocessor::process_and_assign(&mut objects);

        assert_eq!(
            encoding.groups[0].repetition_interval,
            RepeatingHitPatterns::MAX_REPETITION_INTERVAL + 1
        );
    }
}
