/// The result of a difficulty calculation on a cursor chart.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CursorDifficultyAttributes {
    /// The difficulty of the aim skill.
    pub aim: f64,
    /// The difficulty of the speed skill.
    pub speed: f64,
    /// The difficulty of the flashlight skill.
    pub flashlight: f64,
    /// The ratio of the aim difficulty with and without slider travel.
    pub slider_factor: f64,
    /// The number of clickable objects weighted by difficulty.
    pub speed_note_count: f64,
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The perceived hit window for a top-accuracy judgement in milliseconds.
    pub hit_window: f64,
    /// The amount of circles.
    pub n_circles: u32,
    /// The amount of sliders.
    pub n_sliders: u32,
    /// The amount of spinners.
    pub n_spinners: u32,
    /// The final star rating.
    pub stars: f64,
    /// The maximal combo.
    pub max_combo: u32,
}

impl CursorDifficultyAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.stars
    }
}

/// The strain peak sequences of all cursor skills.
///
/// Suitable for plotting the difficulty over time.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CursorStrains {
    /// Strain peaks of the aim skill.
    pub aim: Vec<f64>,
    /// Strain peaks of the aim skill without slider travel.
    pub aim_no_sliders: Vec<f64>,
    /// Strain peaks of the speed skill.
    pub speed: Vec<f64>,
    /// Strain peaks of the flashlight skill.
    pub flashlight: Vec<f64>,
}

impl CursorStrains {
    /// Time between two strain peaks in milliseconds.
    pub const SECTION_LEN: f64 = 400.0;
}
