/// The result of a difficulty calculation on a drum chart.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DrumDifficultyAttributes {
    /// The difficulty corresponding to the colour skill.
    pub colour: f32,
    /// The difficulty corresponding to the rhythm skill.
    pub rhythm: f32,
    /// The difficulty corresponding to the stamina skill, summed over both
    /// hands and penalized against colourless charts.
    pub stamina: f32,
    /// The weighted sum of the section-wise combined skill peaks.
    pub peak: f32,
    /// The final star rating.
    pub stars: f32,
    /// The maximum achievable combo.
    pub max_combo: u32,
}

impl DrumDifficultyAttributes {
    /// The final star rating.
    pub const fn stars(&self) -> f32 {
        self.stars
    }
}

/// The strain peaks of all drum skills.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DrumStrains {
    /// Strain peaks of the colour skill.
    pub colour: Vec<f32>,
    /// Strain peaks of the rhythm skill.
    pub rhythm: Vec<f32>,
    /// Strain peaks of the right-hand stamina skill.
    pub stamina_right: Vec<f32>,
    /// Strain peaks of the left-hand stamina skill.
    pub stamina_left: Vec<f32>,
}

impl DrumStrains {
    /// Time inbetween two strain peaks in ms.
    pub const SECTION_LEN: f32 = 400.0;
}
