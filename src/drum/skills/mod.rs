pub(crate) use self::{colour::Colour, rhythm::Rhythm, stamina::Stamina};

mod colour;
mod rhythm;
mod stamina;

use super::{colour::ColourEncoding, difficulty_object::DrumDifficultyObject};

const DECAY_WEIGHT: f32 = 0.9;

const COLOUR_SKILL_MULTIPLIER: f32 = 0.12;
const COLOUR_STRAIN_DECAY_BASE: f32 = 0.8;

const RHYTHM_SKILL_MULTIPLIER: f32 = 10.0;
const RHYTHM_STRAIN_DECAY_BASE: f32 = 0.0;

const STAMINA_SKILL_MULTIPLIER: f32 = 1.0;
const STAMINA_STRAIN_DECAY_BASE: f32 = 0.4;

pub(crate) enum SkillKind {
    Colour(Colour),
    Rhythm(Rhythm),
    Stamina(Stamina),
}

/// The shared strain state machine of the drum skills: exponential decay
/// between objects and one peak per 400 ms section.
pub(crate) struct DrumSkill {
    current_strain: f32,
    current_section_peak: f32,
    kind: SkillKind,
    pub(crate) strain_peaks: Vec<f32>,
    prev_time: Option<f32>,
}

impl DrumSkill {
    fn new(kind: SkillKind) -> Self {
        Self {
            current_strain: 0.0,
            current_section_peak: 0.0,
            kind,
            strain_peaks: Vec::with_capacity(128),
            prev_time: None,
        }
    }

    pub(crate) fn colour() -> Self {
        Self::new(SkillKind::Colour(Colour))
    }

    pub(crate) fn rhythm() -> Self {
        Self::new(SkillKind::Rhythm(Rhythm::new()))
    }

    pub(crate) fn stamina(right_hand: bool) -> Self {
        Self::new(SkillKind::Stamina(Stamina::new(right_hand)))
    }

    #[inline]
    pub(crate) fn save_current_peak(&mut self) {
        self.strain_peaks.push(self.current_section_peak);
    }

    /// A section without activity still carries the decayed strain from the
    /// previous one.
    #[inline]
    pub(crate) fn start_new_section_from(&mut self, time: f32) {
        self.current_section_peak = self
            .prev_time
            .map_or(0.0, |prev| self.peak_strain(time - prev));
    }

    pub(crate) fn process(&mut self, curr: &DrumDifficultyObject, encoding: &ColourEncoding) {
        self.current_strain *= self.strain_decay(curr.delta);
        self.current_strain += self.strain_value_of(curr, encoding) * self.skill_multiplier();
        self.current_section_peak = self.current_section_peak.max(self.current_strain);
        self.prev_time = Some(curr.start_time);
    }

    /// Sorted weighted sum of the strain peaks; `buf` must be as long as the
    /// peak vector and serves as sorting scratch space.
    pub(crate) fn difficulty_value(&self, buf: &mut [f32]) -> f32 {
        let mut difficulty = 0.0;
        let mut weight = 1.0;

        buf.copy_from_slice(&self.strain_peaks);
        buf.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        for &strain in buf.iter() {
            difficulty += strain * weight;
            weight *= DECAY_WEIGHT;
        }

        difficulty
    }

    fn strain_value_of(&mut self, curr: &DrumDifficultyObject, encoding: &ColourEncoding) -> f32 {
        match &mut self.kind {
            SkillKind::Colour(colour) => colour.strain_value_of(curr, encoding),
            SkillKind::Rhythm(rhythm) => rhythm.strain_value_of(curr),
            SkillKind::Stamina(stamina) => stamina.strain_value_of(curr),
        }
    }

    fn skill_multiplier(&self) -> f32 {
        match self.kind {
            SkillKind::Colour(_) => COLOUR_SKILL_MULTIPLIER,
            SkillKind::Rhythm(_) => RHYTHM_SKILL_MULTIPLIER,
            SkillKind::Stamina(_) => STAMINA_SKILL_MULTIPLIER,
        }
    }

    fn strain_decay_base(&self) -> f32 {
        match self.kind {
            SkillKind::Colour(_) => COLOUR_STRAIN_DECAY_BASE,
            SkillKind::Rhythm(_) => RHYTHM_STRAIN_DECAY_BASE,
            SkillKind::Stamina(_) => STAMINA_STRAIN_DECAY_BASE,
        }
    }

    #[inline]
    fn peak_strain(&self, delta_time: f32) -> f32 {
        self.current_strain * self.strain_decay(delta_time)
    }

    #[inline]
    fn strain_decay(&self, ms: f32) -> f32 {
        self.strain_decay_base().powf(ms / 1000.0)
    }
}
