//! The drum ruleset: two-tone notes (rim and center) on a single lane.
//!
//! Skills: colour (pattern-encoder driven), rhythm, and stamina with one
//! instance per hand.

pub use self::attributes::{DrumDifficultyAttributes, DrumStrains};

use std::f32::consts::PI;

use crate::{
    any::{Difficulty, InvalidConfig},
    model::Chart,
    util::difficulty::norm,
};

use self::{
    cheese::find_cheese,
    colour::{ColourEncoding, ColourPreprocessor},
    difficulty_object::DrumDifficultyObjects,
    skills::DrumSkill,
};

mod attributes;
mod cheese;
mod colour;
mod difficulty_object;
mod skills;

const SECTION_LEN: f32 = 400.0;

const COLOUR_RATING_MULTIPLIER: f32 = 0.01;
const RHYTHM_RATING_MULTIPLIER: f32 = 0.014;
const STAMINA_RATING_MULTIPLIER: f32 = 0.02;

/// Difficulty calculation for drum charts.
///
/// Returns zeroed attributes for charts with fewer than two objects.
pub fn difficulty(
    difficulty: &Difficulty,
    chart: &Chart,
) -> Result<DrumDifficultyAttributes, InvalidConfig> {
    let clock_rate = difficulty.checked_clock_rate()?;
    let skills = run_skills(difficulty, chart, clock_rate);

    let mut attrs = DrumDifficultyAttributes {
        max_combo: max_combo(difficulty, chart),
        ..Default::default()
    };

    let mut buf = vec![0.0; skills[0].strain_peaks.len()];

    let colour_rating = skills[0].difficulty_value(&mut buf) * COLOUR_RATING_MULTIPLIER;
    let rhythm_rating = skills[1].difficulty_value(&mut buf) * RHYTHM_RATING_MULTIPLIER;

    let mut stamina_rating = (skills[2].difficulty_value(&mut buf)
        + skills[3].difficulty_value(&mut buf))
        * STAMINA_RATING_MULTIPLIER;

    let stamina_penalty = simple_colour_penalty(stamina_rating, colour_rating);
    stamina_rating *= stamina_penalty;

    let combined_rating = locally_combined_difficulty(&skills, stamina_penalty);
    let separate_rating = norm(1.5, colour_rating, rhythm_rating, stamina_rating);

    attrs.colour = colour_rating;
    attrs.rhythm = rhythm_rating;
    attrs.stamina = stamina_rating;
    attrs.peak = combined_rating;
    attrs.stars = rescale(1.4 * separate_rating + 0.5 * combined_rating);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        colour = attrs.colour,
        rhythm = attrs.rhythm,
        stamina = attrs.stamina,
        stars = attrs.stars,
        "drum difficulty calculated",
    );

    Ok(attrs)
}

/// The strain peak sequence of every drum skill, one peak per 400 ms
/// section.
pub fn strains(difficulty: &Difficulty, chart: &Chart) -> Result<DrumStrains, InvalidConfig> {
    let clock_rate = difficulty.checked_clock_rate()?;
    let mut skills = run_skills(difficulty, chart, clock_rate);

    let stamina_left = std::mem::take(&mut skills[3].strain_peaks);
    let stamina_right = std::mem::take(&mut skills[2].strain_peaks);
    let rhythm = std::mem::take(&mut skills[1].strain_peaks);
    let colour = std::mem::take(&mut skills[0].strain_peaks);

    Ok(DrumStrains {
        colour,
        rhythm,
        stamina_right,
        stamina_left,
    })
}

fn run_skills(difficulty: &Difficulty, chart: &Chart, clock_rate: f64) -> [DrumSkill; 4] {
    let take = difficulty.get_passed_objects().min(chart.hit_objects.len());
    let hit_objects = &chart.hit_objects[..take];

    let cheese = find_cheese(hit_objects);
    let mut objects = DrumDifficultyObjects::new(hit_objects, clock_rate, &cheese);
    let encoding = ColourPreprocessor::process_and_assign(&mut objects);

    let mut skills = [
        DrumSkill::colour(),
        DrumSkill::rhythm(),
        DrumSkill::stamina(true),
        DrumSkill::stamina(false),
    ];

    process_objects(&mut skills, &objects, &encoding);

    skills
}

/// Feeds all objects from the third one onwards through the skills,
/// saving one strain peak per section. The first processed object only
/// advances the section cursor, there is no earlier strain to save.
fn process_objects(
    skills: &mut [DrumSkill; 4],
    objects: &DrumDifficultyObjects,
    encoding: &ColourEncoding,
) {
    let mut current_section_end = objects
        .objects
        .first()
        .map_or(0.0, |h| (h.start_time / SECTION_LEN).ceil() * SECTION_LEN);

    let mut iter = objects.objects.iter().skip(2);

    if let Some(h) = iter.next() {
        while h.start_time > current_section_end {
            current_section_end += SECTION_LEN;
        }

        for skill in skills.iter_mut() {
            skill.process(h, encoding);
        }
    }

    for h in iter {
        while h.start_time > current_section_end {
            for skill in skills.iter_mut() {
                skill.save_current_peak();
                skill.start_new_section_from(current_section_end);
            }

            current_section_end += SECTION_LEN;
        }

        for skill in skills.iter_mut() {
            skill.process(h, encoding);
        }
    }

    for skill in skills.iter_mut() {
        skill.save_current_peak();
    }
}

fn max_combo(difficulty: &Difficulty, chart: &Chart) -> u32 {
    let take = difficulty.get_passed_objects().min(chart.hit_objects.len());

    chart.hit_objects[..take]
        .iter()
        .filter(|h| h.is_note())
        .count() as u32
}

/// Penalizes stamina on charts whose difficulty comes from raw speed with
/// barely any colour variety.
#[inline]
fn simple_colour_penalty(stamina: f32, colour: f32) -> f32 {
    if colour <= 0.0 {
        0.79 - 0.25
    } else {
        (0.79 - (stamina / colour - 12.0).atan() / PI / 2.0).clamp(0.0, 1.0)
    }
}

/// Per-section p-norm over all skills, so that sections which are hard in
/// several skills at once weigh more than isolated single-skill spikes.
fn locally_combined_difficulty(skills: &[DrumSkill; 4], stamina_penalty: f32) -> f32 {
    let mut peaks: Vec<f32> = skills[0]
        .strain_peaks
        .iter()
        .zip(skills[1].strain_peaks.iter())
        .zip(skills[2].strain_peaks.iter())
        .zip(skills[3].strain_peaks.iter())
        .map(|(((&colour, &rhythm), &stamina_right), &stamina_left)| {
            norm(
                2.0,
                colour * COLOUR_RATING_MULTIPLIER,
                rhythm * RHYTHM_RATING_MULTIPLIER,
                (stamina_right + stamina_left) * STAMINA_RATING_MULTIPLIER * stamina_penalty,
            )
        })
        .collect();

    peaks.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= 0.9;
    }

    difficulty
}

#[inline]
fn rescale(stars: f32) -> f32 {
    if stars < 0.0 {
        stars
    } else {
        10.43 * (stars / 8.0 + 1.0).ln()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{HitObject, HitObjectKind, Note},
        util::pos::Pos,
    };

    use super::*;

    fn chart(colours: &[bool], repeats: usize, delta: f64) -> Chart {
        Chart {
            cs: 5.0,
            ar: 5.0,
            od: 5.0,
            hit_objects: colours
                .iter()
                .cycle()
                .take(colours.len() * repeats)
                .enumerate()
                .map(|(i, &is_rim)| HitObject {
                    pos: Pos::default(),
                    start_time: i as f64 * delta,
                    kind: HitObjectKind::Note(Note { is_rim }),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_chart_rates_zero() {
        let chart = Chart {
            cs: 5.0,
            ar: 5.0,
            od: 5.0,
            hit_objects: Vec::new(),
        };

        let attrs = difficulty(&Difficulty::new(), &chart).unwrap();

        assert_eq!(attrs.stars, 0.0);
        assert_eq!(attrs.max_combo, 0);
    }

    #[test]
    fn alternating_notes_rate_above_zero() {
        let chart = chart(&[false, false, true, true], 24, 120.0);
        let attrs = difficulty(&Difficulty::new(), &chart).unwrap();

        assert!(attrs.stars > 0.0);
        assert!(attrs.colour > 0.0);
        assert!(attrs.stamina > 0.0);
        assert_eq!(attrs.max_combo, 96);
    }

    #[test]
    fn clock_rate_raises_difficulty() {
        let chart = chart(&[false, false, true, true], 24, 120.0);

        let nomod = difficulty(&Difficulty::new(), &chart).unwrap();
        let double_time = difficulty(&Difficulty::new().clock_rate(1.5), &chart).unwrap();

        assert!(double_time.stars > nomod.stars);
    }

    #[test]
    fn strain_peaks_cover_the_chart_length() {
        let chart = chart(&[false, true], 64, 100.0);
        let strains = strains(&Difficulty::new(), &chart).unwrap();

        // 128 objects at 100 ms span 12.7 seconds, one peak per 400 ms.
        assert_eq!(strains.colour.len(), 32);
        assert_eq!(strains.rhythm.len(), strains.colour.len());
        assert_eq!(strains.stamina_right.len(), strains.colour.len());
        assert_eq!(strains.stamina_left.len(), strains.colour.len());
    }

    #[test]
    fn silent_sections_carry_decayed_strain() {
        // 32 notes at 100 ms, then a 2 s break before the final note.
        let mut chart = chart(&[false, true], 16, 100.0);

        chart.hit_objects.push(HitObject {
            pos: Pos::default(),
            start_time: 5100.0,
            kind: HitObjectKind::Note(Note { is_rim: false }),
        });

        let strains = strains(&Difficulty::new(), &chart).unwrap();

        // Sections ending 400..=3200 see activity, the break spans four
        // silent sections, and the final note lands in the section
        // ending 5200.
        assert_eq!(strains.stamina_right.len(), 13);

        let silent = &strains.stamina_right[8..12];

        assert!(silent[0] > 0.0);
        assert!(silent[0] < strains.stamina_right[7]);

        // Each silent section's peak is the previous strain decayed by
        // another section length.
        let decay_per_section = 0.4_f32.powf(0.4);

        for pair in silent.windows(2) {
            assert!((pair[1] / pair[0] - decay_per_section).abs() < 1e-3);
        }
    }

    #[test]
    fn invalid_clock_rate_is_rejected() {
        let chart = chart(&[false], 8, 100.0);
        let res = difficulty(&Difficulty::new().clock_rate(0.0), &chart);

        assert!(matches!(res, Err(InvalidConfig::ClockRate(_))));
    }
}
