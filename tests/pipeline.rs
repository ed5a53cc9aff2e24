use chart_strain::{
    Chart, Checkpoint, CheckpointKind, Difficulty, HitObject, HitObjectKind, Note, Pos, Slider,
};

fn circle_chart(count: usize, spacing: f32, delta: f64) -> Chart {
    Chart {
        cs: 4.0,
        ar: 9.0,
        od: 8.0,
        hit_objects: (0..count)
            .map(|i| HitObject {
                pos: Pos::new((i as f32 * spacing) % 512.0, 192.0),
                start_time: i as f64 * delta,
                kind: HitObjectKind::Circle,
            })
            .collect(),
    }
}

fn note_chart(colours: &[bool], repeats: usize, delta: f64) -> Chart {
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

fn slider(pos: Pos, start_time: f64) -> HitObject {
    HitObject {
        pos,
        start_time,
        kind: HitObjectKind::Slider(Slider {
            end_time: start_time + 100.0,
            repeats: 0,
            checkpoints: vec![Checkpoint {
                pos: pos + Pos::new(120.0, 0.0),
                start_time: start_time + 100.0,
                kind: CheckpointKind::Tail,
            }],
        }),
    }
}

#[test]
fn spaced_jumps_outrate_stacked_notes() {
    let stacked = circle_chart(64, 0.0, 150.0);
    let spaced = circle_chart(64, 140.0, 150.0);

    let stacked = chart_strain::cursor::difficulty(&Difficulty::new(), &stacked).unwrap();
    let spaced = chart_strain::cursor::difficulty(&Difficulty::new(), &spaced).unwrap();

    assert!(spaced.stars > stacked.stars);
    assert!(spaced.aim > stacked.aim);
}

#[test]
fn slider_factor_stays_in_unit_range() {
    let mut chart = circle_chart(48, 100.0, 170.0);

    for i in 0..16 {
        chart
            .hit_objects
            .push(slider(Pos::new(i as f32 * 30.0, 100.0), 8160.0 + f64::from(i) * 170.0));
    }

    let attrs = chart_strain::cursor::difficulty(&Difficulty::new(), &chart).unwrap();

    assert!(attrs.slider_factor > 0.0);
    assert!(attrs.slider_factor <= 1.0);
    assert_eq!(attrs.n_sliders, 16);
    assert_eq!(attrs.max_combo, 48 + 2 * 16);
}

#[test]
fn hidden_raises_flashlight_difficulty() {
    let chart = circle_chart(64, 120.0, 150.0);

    let base = chart_strain::cursor::difficulty(&Difficulty::new().flashlight(true), &chart);
    let hidden = chart_strain::cursor::difficulty(
        &Difficulty::new().flashlight(true).hidden(true),
        &chart,
    );

    assert!(hidden.unwrap().flashlight > base.unwrap().flashlight);
}

#[test]
fn colour_variety_raises_colour_rating() {
    let mono = note_chart(&[false], 96, 120.0);
    let alternating = note_chart(&[false, false, true, true], 24, 120.0);

    let mono = chart_strain::drum::difficulty(&Difficulty::new(), &mono).unwrap();
    let alternating = chart_strain::drum::difficulty(&Difficulty::new(), &alternating).unwrap();

    assert!(alternating.colour > mono.colour);
}

#[test]
fn denser_notes_raise_stamina() {
    let slow = note_chart(&[false, true], 48, 200.0);
    let fast = note_chart(&[false, true], 48, 80.0);

    let slow = chart_strain::drum::difficulty(&Difficulty::new(), &slow).unwrap();
    let fast = chart_strain::drum::difficulty(&Difficulty::new(), &fast).unwrap();

    assert!(fast.stamina > slow.stamina);
    assert!(fast.stars > slow.stars);
}

#[test]
fn rolled_patterns_still_rate_above_zero() {
    let chart = note_chart(&[true, true, false], 16, 90.0);
    let attrs = chart_strain::drum::difficulty(&Difficulty::new(), &chart).unwrap();

    assert!(attrs.stars > 0.0);
    assert!(attrs.stamina > 0.0);
}

#[test]
fn strains_match_difficulty_sections() {
    let chart = note_chart(&[false, true], 64, 100.0);

    let strains = chart_strain::drum::strains(&Difficulty::new(), &chart).unwrap();
    let attrs = chart_strain::drum::difficulty(&Difficulty::new(), &chart).unwrap();

    assert!(!strains.colour.is_empty());
    assert!(attrs.stars > 0.0);
}
