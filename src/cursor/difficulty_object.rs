use super::{object::CursorObject, scaling_factor::ScalingFactor};

/// A hit object with all timing and spatial features derived relative to its
/// neighbors, as consumed by the skills.
///
/// Lookups of earlier or later objects go through the owning slice by index;
/// the objects themselves never reference each other.
#[derive(Clone, Debug)]
pub(crate) struct CursorDifficultyObject<'h> {
    pub(crate) start_time: f64,
    pub(crate) delta_time: f64,
    pub(crate) base: &'h CursorObject<'h>,
    pub(crate) strain_time: f64,
    pub(crate) dists: Distances,
    pub(crate) idx: usize,
}

impl<'h> CursorDifficultyObject<'h> {
    pub(crate) const MIN_DELTA_TIME: u32 = 25;

    pub(crate) fn new(
        base: &'h CursorObject<'h>,
        last: &'h CursorObject<'h>,
        clock_rate: f64,
        idx: usize,
        dists: Distances,
    ) -> Self {
        let start_time = base.start_time() / clock_rate;
        let delta_time = (base.start_time() - last.start_time()) / clock_rate;

        // Capped to 25ms to prevent difficulty calculation breaking from
        // simultaneous objects.
        let strain_time = delta_time.max(f64::from(Self::MIN_DELTA_TIME));

        Self {
            start_time,
            delta_time,
            base,
            strain_time,
            dists,
            idx,
        }
    }

    pub(crate) fn opacity_at(
        &self,
        time: f64,
        hidden: bool,
        time_preempt: f64,
        time_fade_in: f64,
    ) -> f64 {
        if time > self.base.start_time() {
            // An object is treated as invisible once its start time has
            // passed.
            return 0.0;
        }

        let fade_in_start_time = self.base.start_time() - time_preempt;
        let fade_in_duration = time_fade_in;

        if hidden {
            let fade_out_start_time = self.base.start_time() - time_preempt + time_fade_in;
            const FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;
            let fade_out_duration = time_preempt * FADE_OUT_DURATION_MULTIPLIER;

            (((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0))
                .min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0))
        } else {
            ((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0)
        }
    }
}

/// Spatial features of the movement onto one object.
#[derive(Clone, Debug, Default)]
pub(crate) struct Distances {
    pub(crate) lazy_jump_dist: f64,
    pub(crate) lazy_travel_dist: f32,
    pub(crate) min_jump_dist: f64,
    pub(crate) min_jump_time: f64,
    pub(crate) travel_dist: f64,
    pub(crate) travel_time: f64,
    pub(crate) angle: Option<f64>,
}

impl Distances {
    pub(crate) const NORMALISED_RADIUS: f32 = 50.0;

    pub(crate) const MAXIMUM_SLIDER_RADIUS: f32 = Self::NORMALISED_RADIUS * 2.4;
    pub(crate) const ASSUMED_SLIDER_RADIUS: f32 = Self::NORMALISED_RADIUS * 1.8;

    pub(crate) fn new(
        base: &CursorObject<'_>,
        last: &CursorObject<'_>,
        last_last: Option<&CursorObject<'_>>,
        clock_rate: f64,
        strain_time: f64,
        scaling_factor_: &ScalingFactor,
    ) -> Self {
        let mut this = if let Some((slider, cursor)) = base.slider() {
            Self {
                // Bonus for repeat sliders until a better per nested object
                // strain system can be achieved.
                travel_dist: f64::from(
                    cursor.lazy_travel_dist
                        * (1.0 + slider.repeats as f64 / 2.5).powf(1.0 / 2.5) as f32,
                ),
                travel_time: (base.lazy_travel_time() / clock_rate)
                    .max(f64::from(CursorDifficultyObject::MIN_DELTA_TIME)),
                lazy_travel_dist: cursor.lazy_travel_dist,
                ..Default::default()
            }
        } else {
            Self::default()
        };

        // Neither angle nor distance is meaningful when one of the
        // participating objects is a spinner.
        if base.is_spinner() || last.is_spinner() {
            return this;
        }

        // Distances are scaled by this factor so that a uniform circle size
        // can be assumed across charts.
        let scaling_factor = scaling_factor_.factor;

        let last_cursor_pos = last.end_pos();

        this.lazy_jump_dist =
            f64::from((base.pos() * scaling_factor - last_cursor_pos * scaling_factor).length());
        this.min_jump_time = strain_time;
        this.min_jump_dist = this.lazy_jump_dist;

        if let Some((slider, _)) = last.slider() {
            let last_travel_time = (last.lazy_travel_time() / clock_rate)
                .max(f64::from(CursorDifficultyObject::MIN_DELTA_TIME));
            this.min_jump_time = (strain_time - last_travel_time)
                .max(f64::from(CursorDifficultyObject::MIN_DELTA_TIME));

            // Players either cut the slider short to jump to the next object
            // or follow it through to its tail. The jump actually taken is
            // assumed to be the shorter of the two movements.
            let tail_pos = slider.tail().map_or_else(|| last.pos(), |tail| tail.pos);
            let tail_jump_dist = tail_pos.distance(base.pos()) * scaling_factor;

            this.min_jump_dist = (this.lazy_jump_dist
                - f64::from(Self::MAXIMUM_SLIDER_RADIUS - Self::ASSUMED_SLIDER_RADIUS))
            .min(f64::from(tail_jump_dist - Self::MAXIMUM_SLIDER_RADIUS))
            .max(0.0);
        }

        if let Some(last_last) = last_last.filter(|obj| !obj.is_spinner()) {
            let last_last_cursor_pos = last_last.end_pos();

            let v1 = last_last_cursor_pos - last.pos();
            let v2 = base.pos() - last_cursor_pos;

            let dot = f64::from(v1.dot(v2));
            let det = f64::from(v1.x * v2.y - v1.y * v2.x);

            this.angle = Some(det.atan2(dot).abs());
        }

        this
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{HitObject, HitObjectKind},
        util::pos::Pos,
    };

    use super::*;

    fn circle(x: f32, y: f32, start_time: f64) -> HitObject {
        HitObject {
            pos: Pos::new(x, y),
            start_time,
            kind: HitObjectKind::Circle,
        }
    }

    #[test]
    fn strain_time_has_floor() {
        let scaling_factor = ScalingFactor::new(4.0);

        let a = circle(0.0, 0.0, 1000.0);
        let b = circle(10.0, 0.0, 1001.0);

        let a = CursorObject::new(&a, scaling_factor.radius);
        let b = CursorObject::new(&b, scaling_factor.radius);

        let dists = Distances::new(&b, &a, None, 1.0, 25.0, &scaling_factor);
        let diff_object = CursorDifficultyObject::new(&b, &a, 1.0, 0, dists);

        assert!(diff_object.delta_time >= 0.0);
        assert_eq!(diff_object.strain_time, 25.0);
    }

    #[test]
    fn right_angle_is_detected() {
        let scaling_factor = ScalingFactor::new(4.0);

        let a = circle(0.0, 100.0, 0.0);
        let b = circle(0.0, 0.0, 500.0);
        let c = circle(100.0, 0.0, 1000.0);

        let a = CursorObject::new(&a, scaling_factor.radius);
        let b = CursorObject::new(&b, scaling_factor.radius);
        let c = CursorObject::new(&c, scaling_factor.radius);

        let dists = Distances::new(&c, &b, Some(&a), 1.0, 500.0, &scaling_factor);
        let angle = dists.angle.unwrap();

        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn spinner_yields_no_angle() {
        let scaling_factor = ScalingFactor::new(4.0);

        let a = HitObject {
            pos: Pos::new(256.0, 192.0),
            start_time: 0.0,
            kind: HitObjectKind::Spinner(crate::model::Spinner { duration: 400.0 }),
        };
        let b = circle(0.0, 0.0, 500.0);
        let c = circle(100.0, 0.0, 1000.0);

        let a = CursorObject::new(&a, scaling_factor.radius);
        let b = CursorObject::new(&b, scaling_factor.radius);
        let c = CursorObject::new(&c, scaling_factor.radius);

        let dists = Distances::new(&c, &b, Some(&a), 1.0, 500.0, &scaling_factor);

        assert!(dists.angle.is_none());
    }
}
