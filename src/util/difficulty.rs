pub fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + (end - start) * amount
}

/// p-norm of three skill values.
pub fn norm(p: f32, a: f32, b: f32, c: f32) -> f32 {
    (a.powf(p) + b.powf(p) + c.powf(p)).powf(p.recip())
}

/// Maps a difficulty setting in `0..=10` onto its millisecond range; `mid`
/// corresponds to setting 5.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid + (mid - min) * (difficulty - 5.0) / 5.0
    } else {
        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_range_endpoints() {
        assert_eq!(difficulty_range(0.0, 1800.0, 1200.0, 450.0), 1800.0);
        assert_eq!(difficulty_range(5.0, 1800.0, 1200.0, 450.0), 1200.0);
        assert_eq!(difficulty_range(10.0, 1800.0, 1200.0, 450.0), 450.0);
    }

    #[test]
    fn norm_is_max_dominant() {
        let n = norm(2.0, 3.0, 4.0, 0.0);
        assert!((n - 5.0).abs() < f32::EPSILON);
    }
}
