use super::difficulty_object::Distances;

const OBJECT_RADIUS: f32 = 64.0;

/// Converts circle size into the factor that maps raw coordinates into the
/// normalized space where every object has the reference radius.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ScalingFactor {
    pub(crate) factor: f32,
    pub(crate) radius: f32,
}

impl ScalingFactor {
    pub(crate) fn new(cs: f32) -> Self {
        let scale = (1.0 - 0.7 * (cs - 5.0) / 5.0) / 2.0;
        let radius = OBJECT_RADIUS * scale;

        let factor = Distances::NORMALISED_RADIUS / radius;

        // Small circles get a slight bonus on top of the normalization.
        let factor = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius).min(5.0) / 50.0)
        } else {
            factor
        };

        Self { factor, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_radius_at_mid_cs() {
        let scaling_factor = ScalingFactor::new(5.0);
        assert!((scaling_factor.radius - 32.0).abs() < f32::EPSILON);
    }

    #[test]
    fn small_circles_get_bonus() {
        let regular = ScalingFactor::new(4.0);
        let small = ScalingFactor::new(7.0);

        assert!(small.radius < 30.0);
        assert!(small.factor * small.radius / Distances::NORMALISED_RADIUS > 1.0);
        assert!(regular.radius > 30.0);
    }
}
