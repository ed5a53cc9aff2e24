use crate::drum::{colour::ColourEncoding, difficulty_object::DrumDifficultyObject};

/// Evaluates how hard a colour change is to read based on the pattern
/// encoding. Only the first object of each entity carries a bonus.
#[derive(Clone, Debug, Default)]
pub(crate) struct Colour;

impl Colour {
    pub(crate) fn strain_value_of(
        &mut self,
        curr: &DrumDifficultyObject,
        encoding: &ColourEncoding,
    ) -> f32 {
        let colour = &curr.colour;
        let mut difficulty = 0.0;

        if let Some(streak) = colour.mono_streak.and_then(|i| encoding.streaks.get(i)) {
            let parent_eval = streak
                .parent
                .map_or(1.0, |i| Self::evaluate_pattern(i, encoding));

            difficulty += sigmoid(streak.idx as f32) * parent_eval * 0.5;
        }

        if let Some(i) = colour.alternating_mono_pattern {
            difficulty += Self::evaluate_pattern(i, encoding);
        }

        if let Some(i) = colour.repeating_hit_patterns {
            difficulty += Self::evaluate_group(i, encoding);
        }

        difficulty
    }

    fn evaluate_pattern(pattern_idx: usize, encoding: &ColourEncoding) -> f32 {
        let Some(pattern) = encoding.patterns.get(pattern_idx) else {
            return 0.0;
        };

        let parent_eval = pattern
            .parent
            .map_or(1.0, |i| Self::evaluate_group(i, encoding));

        sigmoid(pattern.idx as f32) * parent_eval
    }

    fn evaluate_group(group_idx: usize, encoding: &ColourEncoding) -> f32 {
        encoding.groups.get(group_idx).map_or(0.0, |group| {
            2.0 * (1.0 - sigmoid(group.repetition_interval as f32))
        })
    }
}

/// Sigmoid with center 2, width 2, middle 0.5, and height 1: close to 1 for
/// small inputs, close to 0 past the center.
fn sigmoid(val: f32) -> f32 {
    let sigmoid = (std::f32::consts::E * -(val - 2.0) / 2.0).tanh();

    sigmoid * 0.5 + 0.5
}
