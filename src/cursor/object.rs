use crate::{
    model::{CheckpointKind, HitObject, HitObjectKind, Slider},
    util::pos::Pos,
};

use super::difficulty_object::Distances;

/// A hit object from the perspective of the cursor ruleset.
///
/// Sliders get their lazy cursor movement resolved once, up front, so that
/// later stages only ever read from this view.
#[derive(Clone, Debug)]
pub(crate) struct CursorObject<'h> {
    pub(crate) h: &'h HitObject,
    pub(crate) slider_cursor: Option<SliderCursor>,
}

impl<'h> CursorObject<'h> {
    pub(crate) fn new(h: &'h HitObject, radius: f32) -> Self {
        let slider_cursor = match &h.kind {
            HitObjectKind::Slider(slider) => Some(SliderCursor::compute(h.pos, slider, radius)),
            _ => None,
        };

        Self { h, slider_cursor }
    }

    pub(crate) const fn pos(&self) -> Pos {
        self.h.pos
    }

    pub(crate) const fn start_time(&self) -> f64 {
        self.h.start_time
    }

    pub(crate) const fn is_slider(&self) -> bool {
        self.h.is_slider()
    }

    pub(crate) const fn is_spinner(&self) -> bool {
        self.h.is_spinner()
    }

    pub(crate) fn slider(&self) -> Option<(&Slider, &SliderCursor)> {
        match (&self.h.kind, &self.slider_cursor) {
            (HitObjectKind::Slider(slider), Some(cursor)) => Some((slider, cursor)),
            _ => None,
        }
    }

    /// Time the cursor lazily spends on the slider body, unadjusted for the
    /// clock rate. Zero for everything that is not a slider.
    pub(crate) fn lazy_travel_time(&self) -> f64 {
        self.slider()
            .and_then(|(slider, _)| slider.tail())
            .map_or(0.0, |tail| tail.start_time - self.h.start_time)
    }

    /// The cursor position after the object has been hit: the lazy end
    /// position for sliders, the object position for everything else.
    pub(crate) fn end_pos(&self) -> Pos {
        self.slider_cursor
            .as_ref()
            .map_or(self.h.pos, |cursor| cursor.lazy_end_pos)
    }
}

/// The lazy cursor movement over one slider body.
#[derive(Clone, Debug)]
pub(crate) struct SliderCursor {
    pub(crate) lazy_end_pos: Pos,
    pub(crate) lazy_travel_dist: f32,
}

impl SliderCursor {
    /// Walks the slider's checkpoints and only moves the cursor when a
    /// checkpoint leaves the assumed follow radius, accumulating the
    /// normalized distance actually travelled.
    fn compute(head_pos: Pos, slider: &Slider, radius: f32) -> Self {
        let mut curr_cursor_pos = head_pos;
        let scaling_factor = f64::from(Distances::NORMALISED_RADIUS) / f64::from(radius);

        let mut lazy_travel_dist: f32 = 0.0;

        for checkpoint in slider.checkpoints.iter() {
            let curr_movement = checkpoint.pos - curr_cursor_pos;
            let mut curr_movement_len = scaling_factor * f64::from(curr_movement.length());

            // Amount of movement required so that the cursor position needs
            // to be updated.
            let required_movement = match checkpoint.kind {
                // A tighter threshold to better assess repeat sliders.
                CheckpointKind::Repeat => f64::from(Distances::NORMALISED_RADIUS),
                CheckpointKind::Tick | CheckpointKind::Tail => {
                    f64::from(Distances::ASSUMED_SLIDER_RADIUS)
                }
            };

            if curr_movement_len > required_movement {
                curr_cursor_pos += curr_movement
                    * (((curr_movement_len - required_movement) / curr_movement_len) as f32);
                curr_movement_len *= (curr_movement_len - required_movement) / curr_movement_len;
                lazy_travel_dist += curr_movement_len as f32;
            }
        }

        Self {
            lazy_end_pos: curr_cursor_pos,
            lazy_travel_dist,
        }
    }
}
