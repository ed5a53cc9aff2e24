//! The cursor ruleset: circles, sliders, and spinners aimed with a 2D
//! pointer.
//!
//! Skills: aim (with and without slider travel), speed with a multiplicative
//! rhythm bonus, and flashlight.

pub use self::attributes::{CursorDifficultyAttributes, CursorStrains};

use crate::{
    any::{Difficulty, InvalidConfig},
    model::{Chart, HitObjectKind},
};

use self::{
    difficulty_object::{CursorDifficultyObject, Distances},
    object::CursorObject,
    scaling_factor::ScalingFactor,
    skills::{Aim, Flashlight, Skill, Speed, StrainSkill},
};

mod attributes;
mod difficulty_object;
mod object;
mod scaling_factor;
mod skills;

const SECTION_LEN: f64 = 400.0;

const DIFFICULTY_MULTIPLIER: f64 = 0.0675;
const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.15;

const FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;

/// Difficulty calculation for cursor charts.
///
/// Returns zeroed attributes for charts with fewer than two objects.
pub fn difficulty(
    difficulty: &Difficulty,
    chart: &Chart,
) -> Result<CursorDifficultyAttributes, InvalidConfig> {
    let clock_rate = difficulty.checked_clock_rate()?;

    let DifficultyValues { mut skills, attrs } =
        DifficultyValues::calculate(difficulty, chart, clock_rate);

    let mut attrs = attrs;

    let aim_difficulty_value = Skill::difficulty_value(&mut skills.aim)?;
    let aim_no_sliders_difficulty_value = Skill::difficulty_value(&mut skills.aim_no_sliders)?;
    let speed_relevant_note_count = skills.speed.relevant_note_count();
    let speed_difficulty_value = Skill::difficulty_value(&mut skills.speed)?;
    let flashlight_difficulty_value = Skill::difficulty_value(&mut skills.flashlight)?;

    DifficultyValues::eval(
        &mut attrs,
        difficulty.get_flashlight(),
        aim_difficulty_value,
        aim_no_sliders_difficulty_value,
        speed_difficulty_value,
        speed_relevant_note_count,
        flashlight_difficulty_value,
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(
        aim = attrs.aim,
        speed = attrs.speed,
        flashlight = attrs.flashlight,
        stars = attrs.stars,
        "cursor difficulty calculated",
    );

    Ok(attrs)
}

/// The strain peak sequence of every cursor skill, one peak per 400 ms
/// section.
pub fn strains(difficulty: &Difficulty, chart: &Chart) -> Result<CursorStrains, InvalidConfig> {
    let clock_rate = difficulty.checked_clock_rate()?;

    let DifficultyValues { mut skills, .. } =
        DifficultyValues::calculate(difficulty, chart, clock_rate);

    Ok(CursorStrains {
        aim: skills.aim.get_curr_strain_peaks(),
        aim_no_sliders: skills.aim_no_sliders.get_curr_strain_peaks(),
        speed: skills.speed.get_curr_strain_peaks(),
        flashlight: skills.flashlight.get_curr_strain_peaks(),
    })
}

struct CursorSkills {
    aim: Aim,
    aim_no_sliders: Aim,
    speed: Speed,
    flashlight: Flashlight,
}

struct DifficultyValues {
    skills: CursorSkills,
    attrs: CursorDifficultyAttributes,
}

impl DifficultyValues {
    fn calculate(difficulty: &Difficulty, chart: &Chart, clock_rate: f64) -> Self {
        let take = difficulty.get_passed_objects();
        let hidden = difficulty.get_hidden();

        let scaling_factor = ScalingFactor::new(chart.cs);
        let hit_window = chart.hit_window_great(clock_rate);
        let time_preempt = chart.preempt(clock_rate);

        let time_fade_in = if hidden {
            time_preempt * FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (time_preempt / 450.0).min(1.0)
        };

        let mut attrs = CursorDifficultyAttributes {
            ar: f64::from(chart.ar),
            od: f64::from(chart.od),
            hit_window,
            ..Default::default()
        };

        let cursor_objects: Vec<_> = chart
            .hit_objects
            .iter()
            .take(take)
            .inspect(|h| match &h.kind {
                HitObjectKind::Slider(slider) => {
                    attrs.n_sliders += 1;
                    attrs.max_combo += 1 + slider.checkpoints.len() as u32;
                }
                HitObjectKind::Spinner(_) => {
                    attrs.n_spinners += 1;
                    attrs.max_combo += 1;
                }
                HitObjectKind::Circle | HitObjectKind::Note(_) => {
                    attrs.n_circles += 1;
                    attrs.max_combo += 1;
                }
            })
            .map(|h| CursorObject::new(h, scaling_factor.radius))
            .collect();

        let diff_objects =
            Self::create_difficulty_objects(&cursor_objects, clock_rate, &scaling_factor);

        let mut skills = CursorSkills {
            aim: Aim::new(true),
            aim_no_sliders: Aim::new(false),
            speed: Speed::new(hit_window),
            flashlight: Flashlight::new(
                hidden,
                scaling_factor.radius,
                time_preempt,
                time_fade_in,
            ),
        };

        for h in diff_objects.iter() {
            Skill::process(&mut skills.aim, h, &diff_objects);
            Skill::process(&mut skills.aim_no_sliders, h, &diff_objects);
            Skill::process(&mut skills.speed, h, &diff_objects);
            Skill::process(&mut skills.flashlight, h, &diff_objects);
        }

        Self { skills, attrs }
    }

    /// Process the difficulty values and store the results in `attrs`.
    fn eval(
        attrs: &mut CursorDifficultyAttributes,
        flashlight_enabled: bool,
        aim_difficulty_value: f64,
        aim_no_sliders_difficulty_value: f64,
        speed_difficulty_value: f64,
        speed_relevant_note_count: f64,
        flashlight_difficulty_value: f64,
    ) {
        let aim_rating = aim_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;
        let aim_rating_no_sliders = aim_no_sliders_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;
        let speed_rating = speed_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;
        let flashlight_rating = flashlight_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;

        let slider_factor = if aim_rating > 0.0 {
            aim_rating_no_sliders / aim_rating
        } else {
            1.0
        };

        let base_aim_performance = (5.0 * (aim_rating / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0;
        let base_speed_performance =
            (5.0 * (speed_rating / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0;

        let base_flashlight_performance = if flashlight_enabled {
            flashlight_rating.powi(2) * 25.0
        } else {
            0.0
        };

        let base_performance = ((base_aim_performance).powf(1.1)
            + (base_speed_performance).powf(1.1)
            + (base_flashlight_performance).powf(1.1))
        .powf(1.0 / 1.1);

        let star_rating = if base_performance > 0.00001 {
            PERFORMANCE_BASE_MULTIPLIER.cbrt()
                * 0.027
                * ((100_000.0 / 2.0_f64.powf(1.0 / 1.1) * base_performance).cbrt() + 4.0)
        } else {
            0.0
        };

        attrs.aim = aim_rating;
        attrs.speed = speed_rating;
        attrs.flashlight = flashlight_rating;
        attrs.slider_factor = slider_factor;
        attrs.stars = star_rating;
        attrs.speed_note_count = speed_relevant_note_count;
    }

    /// The first object has no predecessor, so the derived sequence is one
    /// element shorter than the raw one.
    fn create_difficulty_objects<'h>(
        cursor_objects: &'h [CursorObject<'h>],
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) -> Vec<CursorDifficultyObject<'h>> {
        let Some(mut last) = cursor_objects.first() else {
            return Vec::new();
        };

        let mut last_last = None;

        cursor_objects
            .iter()
            .skip(1)
            .enumerate()
            .map(|(idx, h)| {
                let delta_time = (h.start_time() - last.start_time()) / clock_rate;
                let strain_time = delta_time.max(f64::from(CursorDifficultyObject::MIN_DELTA_TIME));

                let dists =
                    Distances::new(h, last, last_last, clock_rate, strain_time, scaling_factor);

                let diff_object = CursorDifficultyObject::new(h, last, clock_rate, idx, dists);

                last_last = Some(last);
                last = h;

                diff_object
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{HitObject, HitObjectKind},
        util::pos::Pos,
    };

    use super::*;

    fn circles(count: usize, spacing: f32, delta: f64) -> Chart {
        Chart {
            cs: 4.0,
            ar: 9.0,
            od: 8.0,
            hit_objects: (0..count)
                .map(|i| HitObject {
                    pos: Pos::new(i as f32 * spacing % 512.0, 192.0),
                    start_time: i as f64 * delta,
                    kind: HitObjectKind::Circle,
                })
                .collect(),
        }
    }

    #[test]
    fn difficulty_object_invariants() {
        let chart = circles(32, 60.0, 170.0);
        let scaling_factor = ScalingFactor::new(chart.cs);

        let cursor_objects: Vec<_> = chart
            .hit_objects
            .iter()
            .map(|h| CursorObject::new(h, scaling_factor.radius))
            .collect();

        let diff_objects =
            DifficultyValues::create_difficulty_objects(&cursor_objects, 1.0, &scaling_factor);

        assert_eq!(diff_objects.len(), chart.hit_objects.len() - 1);

        for (i, h) in diff_objects.iter().enumerate() {
            assert_eq!(h.idx, i);
            assert!(h.delta_time >= 0.0);
            assert!(h.strain_time >= f64::from(CursorDifficultyObject::MIN_DELTA_TIME));

            if let Some(prev) = i.checked_sub(1).and_then(|i| diff_objects.get(i)) {
                assert!(h.start_time >= prev.start_time);
            }
        }
    }

    #[test]
    fn single_object_rates_zero() {
        let chart = circles(1, 0.0, 0.0);
        let attrs = difficulty(&Difficulty::new(), &chart).unwrap();

        assert_eq!(attrs.stars, 0.0);
        assert_eq!(attrs.aim, 0.0);
        assert_eq!(attrs.speed, 0.0);
    }

    #[test]
    fn jumps_rate_above_zero() {
        let chart = circles(64, 120.0, 150.0);
        let attrs = difficulty(&Difficulty::new(), &chart).unwrap();

        assert!(attrs.stars > 0.0);
        assert!(attrs.aim > 0.0);
        assert!(attrs.speed > 0.0);
        assert!(attrs.max_combo == 64);
    }

    #[test]
    fn clock_rate_raises_difficulty() {
        let chart = circles(64, 120.0, 150.0);

        let nomod = difficulty(&Difficulty::new(), &chart).unwrap();
        let double_time = difficulty(&Difficulty::new().clock_rate(1.5), &chart).unwrap();

        assert!(double_time.stars > nomod.stars);
    }

    #[test]
    fn flashlight_toggle_changes_stars() {
        let chart = circles(64, 120.0, 150.0);

        let without = difficulty(&Difficulty::new(), &chart).unwrap();
        let with = difficulty(&Difficulty::new().flashlight(true), &chart).unwrap();

        assert!(with.stars > without.stars);
        assert!(with.flashlight > 0.0);
    }

    #[test]
    fn silent_sections_carry_decayed_strain() {
        // 16 circles at 150 ms, then a 2 s break before the final object.
        let mut chart = circles(16, 140.0, 150.0);

        chart.hit_objects.push(HitObject {
            pos: Pos::new(100.0, 100.0),
            start_time: 4250.0,
            kind: HitObjectKind::Circle,
        });

        let strains = strains(&Difficulty::new(), &chart).unwrap();

        // Sections ending 400..=2400 see activity, the break spans four
        // silent sections, and the final object lands in the section
        // ending 4400.
        assert_eq!(strains.aim.len(), 11);

        let silent = &strains.aim[6..10];

        assert!(silent[0] > 0.0);
        assert!(silent[0] < strains.aim[5]);

        // Each silent section's peak is the previous strain decayed by
        // another section length.
        let decay_per_section = 0.15_f64.powf(0.4);

        for pair in silent.windows(2) {
            assert!((pair[1] / pair[0] - decay_per_section).abs() < 1e-9);
        }
    }

    #[test]
    fn passed_objects_truncate_the_chart() {
        let chart = circles(64, 120.0, 150.0);

        let full = difficulty(&Difficulty::new(), &chart).unwrap();
        let partial = difficulty(&Difficulty::new().passed_objects(16), &chart).unwrap();

        assert!(partial.stars < full.stars);
        assert_eq!(partial.max_combo, 16);
    }
}
