mod aim;
mod flashlight;
mod speed;

use std::{cmp::Ordering, mem};

pub(crate) use self::{aim::Aim, flashlight::Flashlight, speed::Speed};

use crate::{any::InvalidConfig, util::difficulty::lerp};

use super::{difficulty_object::CursorDifficultyObject, SECTION_LEN};

pub(crate) trait Skill {
    fn process(
        &mut self,
        curr: &CursorDifficultyObject<'_>,
        diff_objects: &[CursorDifficultyObject<'_>],
    );
    fn difficulty_value(&mut self) -> Result<f64, InvalidConfig>;
}

pub(crate) trait StrainSkill: Skill + Sized {
    const DECAY_WEIGHT: f64 = 0.9;

    fn strain_peaks_mut(&mut self) -> &mut Vec<f64>;
    fn curr_section_peak(&mut self) -> &mut f64;
    fn curr_section_end(&mut self) -> &mut f64;

    fn strain_value_at(
        &mut self,
        curr: &CursorDifficultyObject<'_>,
        diff_objects: &[CursorDifficultyObject<'_>],
    ) -> f64;

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &CursorDifficultyObject<'_>,
        diff_objects: &[CursorDifficultyObject<'_>],
    ) -> f64;

    fn process(
        &mut self,
        curr: &CursorDifficultyObject<'_>,
        diff_objects: &[CursorDifficultyObject<'_>],
    ) {
        // The first object doesn't generate a strain, so we begin with an
        // incremented section end
        if curr.idx == 0 {
            *self.curr_section_end() = (curr.start_time / SECTION_LEN).ceil() * SECTION_LEN;
        }

        while curr.start_time > *self.curr_section_end() {
            self.save_curr_peak();

            {
                let section_end = *self.curr_section_end();
                self.start_new_section_from(section_end, curr, diff_objects);
            }

            *self.curr_section_end() += SECTION_LEN;
        }

        *self.curr_section_peak() = self
            .strain_value_at(curr, diff_objects)
            .max(*self.curr_section_peak());
    }

    fn save_curr_peak(&mut self) {
        let peak = *self.curr_section_peak();
        self.strain_peaks_mut().push(peak);
    }

    /// A section with no activity still carries the decayed strain from the
    /// previous section, so the new section's peak starts from that
    /// carry-over instead of zero.
    fn start_new_section_from(
        &mut self,
        time: f64,
        curr: &CursorDifficultyObject<'_>,
        diff_objects: &[CursorDifficultyObject<'_>],
    ) {
        *self.curr_section_peak() = self.calculate_initial_strain(time, curr, diff_objects);
    }

    fn difficulty_value(&mut self) -> Result<f64, InvalidConfig>;

    fn get_curr_strain_peaks(&mut self) -> Vec<f64> {
        let curr_peak = *self.curr_section_peak();
        let mut strain_peaks = mem::take(self.strain_peaks_mut());
        strain_peaks.push(curr_peak);

        strain_peaks
    }
}

pub(crate) trait CursorStrainSkill: StrainSkill + Sized {
    const REDUCED_SECTION_COUNT: usize = 10;
    const REDUCED_STRAIN_BASELINE: f64 = 0.75;
    const DIFFICULTY_MULTIPLIER: f64 = 1.06;

    fn difficulty_value(&mut self) -> Result<f64, InvalidConfig> {
        let peaks = self.get_curr_strain_peaks();

        weighted_difficulty_value(
            peaks,
            Self::REDUCED_SECTION_COUNT,
            Self::REDUCED_STRAIN_BASELINE,
            Self::DECAY_WEIGHT,
            Self::DIFFICULTY_MULTIPLIER,
        )
    }
}

/// Folds a skill's section peaks into one scalar: the highest few peaks are
/// pulled towards a baseline to soften isolated spikes, then everything is
/// summed with geometrically decreasing weights.
pub(crate) fn weighted_difficulty_value(
    mut peaks: Vec<f64>,
    reduced_section_count: usize,
    reduced_strain_baseline: f64,
    decay_weight: f64,
    multiplier: f64,
) -> Result<f64, InvalidConfig> {
    if !(0.0..=1.0).contains(&reduced_strain_baseline) {
        return Err(InvalidConfig::ReducedStrainBaseline(reduced_strain_baseline));
    }

    if !(decay_weight > 0.0 && decay_weight <= 1.0) {
        return Err(InvalidConfig::DecayWeight(decay_weight));
    }

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    // Sections with 0 strain are excluded to avoid worst-case time
    // complexity of the following sort. They cannot contribute to the
    // difficulty anyway.
    peaks.retain(|&peak| peak > 0.0);
    peaks.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    // We are reducing the highest strains first to account for extreme
    // difficulty spikes
    for (i, strain) in peaks.iter_mut().take(reduced_section_count).enumerate() {
        let clamped = f64::from((i as f32 / reduced_section_count as f32).clamp(0.0, 1.0));
        let scale = lerp(1.0, 10.0, clamped).log10();
        *strain *= lerp(reduced_strain_baseline, 1.0, scale);
    }

    peaks.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    for strain in peaks {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    Ok(difficulty * multiplier)
}

pub(crate) fn previous<'map, 'objects>(
    diff_objects: &'objects [CursorDifficultyObject<'map>],
    curr: usize,
    backwards_idx: usize,
) -> Option<&'objects CursorDifficultyObject<'map>> {
    curr.checked_sub(backwards_idx + 1)
        .and_then(|idx| diff_objects.get(idx))
}

pub(crate) fn previous_start_time(
    diff_objects: &[CursorDifficultyObject<'_>],
    curr: usize,
    backwards_idx: usize,
) -> f64 {
    previous(diff_objects, curr, backwards_idx).map_or(0.0, |h| h.start_time)
}

pub(crate) fn next<'map, 'objects>(
    diff_objects: &'objects [CursorDifficultyObject<'map>],
    curr: usize,
    forwards_idx: usize,
) -> Option<&'objects CursorDifficultyObject<'map>> {
    diff_objects.get(curr + (forwards_idx + 1))
}
