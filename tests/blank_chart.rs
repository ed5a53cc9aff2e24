use chart_strain::{Chart, Difficulty};

fn blank() -> Chart {
    Chart {
        cs: 5.0,
        ar: 5.0,
        od: 5.0,
        hit_objects: Vec::new(),
    }
}

#[test]
fn cursor() {
    let attrs = chart_strain::cursor::difficulty(&Difficulty::new(), &blank()).unwrap();

    assert_eq!(attrs.stars, 0.0);
    assert_eq!(attrs.aim, 0.0);
    assert_eq!(attrs.speed, 0.0);
    assert_eq!(attrs.flashlight, 0.0);
    assert_eq!(attrs.max_combo, 0);
}

#[test]
fn cursor_strains() {
    let strains = chart_strain::cursor::strains(&Difficulty::new(), &blank()).unwrap();

    assert!(strains.aim.iter().all(|&peak| peak == 0.0));
    assert!(strains.speed.iter().all(|&peak| peak == 0.0));
}

#[test]
fn drum() {
    let attrs = chart_strain::drum::difficulty(&Difficulty::new(), &blank()).unwrap();

    assert_eq!(attrs.stars, 0.0);
    assert_eq!(attrs.colour, 0.0);
    assert_eq!(attrs.rhythm, 0.0);
    assert_eq!(attrs.stamina, 0.0);
    assert_eq!(attrs.max_combo, 0);
}

#[test]
fn drum_strains() {
    let strains = chart_strain::drum::strains(&Difficulty::new(), &blank()).unwrap();

    assert!(strains.colour.iter().all(|&peak| peak == 0.0));
    assert!(strains.stamina_right.iter().all(|&peak| peak == 0.0));
}
