use chart_strain::{
    Chart, Checkpoint, CheckpointKind, Difficulty, HitObject, HitObjectKind, Note, Pos, Slider,
    Spinner,
};
use proptest::prelude::*;

fn arb_chart() -> impl Strategy<Value = Chart> {
    let object = (1.0f64..400.0, 0.0f32..512.0, 0.0f32..384.0, any::<bool>(), 0u8..4);

    prop::collection::vec(object, 0..64).prop_map(|objects| {
        let mut time = 0.0;

        let hit_objects = objects
            .into_iter()
            .map(|(delta, x, y, is_rim, kind)| {
                time += delta;
                let pos = Pos::new(x, y);

                let kind = match kind {
                    0 => HitObjectKind::Circle,
                    1 => HitObjectKind::Note(Note { is_rim }),
                    2 => HitObjectKind::Spinner(Spinner { duration: 200.0 }),
                    _ => HitObjectKind::Slider(Slider {
                        end_time: time + 100.0,
                        repeats: 0,
                        checkpoints: vec![Checkpoint {
                            pos: pos + Pos::new(50.0, 0.0),
                            start_time: time + 100.0,
                            kind: CheckpointKind::Tail,
                        }],
                    }),
                };

                HitObject {
                    pos,
                    start_time: time,
                    kind,
                }
            })
            .collect();

        Chart {
            cs: 4.0,
            ar: 9.0,
            od: 8.0,
            hit_objects,
        }
    })
}

proptest! {
    #[test]
    fn cursor_is_idempotent(chart in arb_chart()) {
        let first = chart_strain::cursor::difficulty(&Difficulty::new(), &chart).unwrap();
        let second = chart_strain::cursor::difficulty(&Difficulty::new(), &chart).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn drum_is_idempotent(chart in arb_chart()) {
        let first = chart_strain::drum::difficulty(&Difficulty::new(), &chart).unwrap();
        let second = chart_strain::drum::difficulty(&Difficulty::new(), &chart).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn cursor_ratings_are_finite_and_non_negative(chart in arb_chart()) {
        let attrs = chart_strain::cursor::difficulty(&Difficulty::new(), &chart).unwrap();

        for value in [attrs.aim, attrs.speed, attrs.flashlight, attrs.stars] {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
    }

    #[test]
    fn drum_ratings_are_finite_and_non_negative(chart in arb_chart()) {
        let attrs = chart_strain::drum::difficulty(&Difficulty::new(), &chart).unwrap();

        for value in [attrs.colour, attrs.rhythm, attrs.stamina, attrs.stars] {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
    }

    #[test]
    fn strain_peak_sequences_align(chart in arb_chart()) {
        let cursor = chart_strain::cursor::strains(&Difficulty::new(), &chart).unwrap();

        prop_assert_eq!(cursor.aim.len(), cursor.aim_no_sliders.len());
        prop_assert_eq!(cursor.aim.len(), cursor.speed.len());
        prop_assert_eq!(cursor.aim.len(), cursor.flashlight.len());

        let drum = chart_strain::drum::strains(&Difficulty::new(), &chart).unwrap();

        prop_assert_eq!(drum.colour.len(), drum.rhythm.len());
        prop_assert_eq!(drum.colour.len(), drum.stamina_right.len());
        prop_assert_eq!(drum.colour.len(), drum.stamina_left.len());
    }

    #[test]
    fn clock_rate_is_validated(clock_rate in prop::num::f64::ANY) {
        let chart = Chart { cs: 4.0, ar: 9.0, od: 8.0, hit_objects: Vec::new() };
        let res = chart_strain::cursor::difficulty(
            &Difficulty::new().clock_rate(clock_rate),
            &chart,
        );

        prop_assert_eq!(res.is_ok(), clock_rate.is_finite() && clock_rate > 0.0);
    }
}
