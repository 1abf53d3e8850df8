use mlc_aperture::core::device::{HALCYON_WIDTHS, MILLENNIUM_120_HD_WIDTHS, MILLENNIUM_120_WIDTHS};
use mlc_aperture::{
    ApertureAssembler, ApertureEngine, ApertureError, Beam, ControlPoint, InMemoryBeamSource,
    JawPositions, LeafBanks, ResolutionError,
};
use std::sync::Arc;

fn jaw(x1: f64, x2: f64, y1: f64, y2: f64) -> JawPositions {
    JawPositions { x1, x2, y1, y2 }
}

fn sweep(slots: usize, step: usize) -> ControlPoint {
    let shift = step as f64 * 0.5;
    ControlPoint::new(
        LeafBanks::new(
            (0..slots).map(|i| -20.0 - i as f64 * 0.1 + shift).collect(),
            (0..slots).map(|i| 20.0 + i as f64 * 0.1 + shift).collect(),
        ),
        jaw(-20.0 + shift, 20.0 + shift, -15.0, 15.0),
    )
}

#[test]
fn test_truebeam_example_scenario() {
    let beam = Beam::new("Arc 1", "TrueBeamSN4831").with_control_point(ControlPoint::new(
        LeafBanks::filled(60, 10.0, 10.0),
        jaw(-5.0, 5.0, -3.0, 3.0),
    ));

    let apertures = ApertureAssembler::default().assemble(&beam).unwrap();

    assert_eq!(apertures.len(), 1);
    assert_eq!(apertures[0].leaf_positions, LeafBanks::filled(60, 10.0, 10.0));
    assert_eq!(apertures[0].leaf_widths.to_vec(), MILLENNIUM_120_WIDTHS.to_vec());
    assert_eq!(apertures[0].jaw.to_array(), [-5.0, 3.0, 5.0, -3.0]);
}

#[test]
fn test_halcyon_touching_banks_close_every_pair() {
    let mut leaves = LeafBanks::filled(58, 0.0, 0.0);
    leaves.bank_b[29] = -1.5;

    let beam = Beam::new("Arc H", "HalcyonSN1386")
        .with_control_point(ControlPoint::new(leaves, jaw(-14.0, 14.0, -14.0, 14.0)));

    let apertures = ApertureAssembler::default().assemble(&beam).unwrap();
    let aperture = &apertures[0];

    assert_eq!(aperture.leaf_positions, LeafBanks::filled(56, 0.0, 0.0));
    assert_eq!(aperture.leaf_widths.to_vec(), HALCYON_WIDTHS.to_vec());
}

#[test]
fn test_leaf_pair_count_matches_widths_for_every_class() {
    let cases = [
        ("TRILOGY6085", 60, 60),
        ("Linac4", 60, 60),
        ("HalcyonSN1386", 58, 56),
        ("HalcyonSN2020", 58, 56),
        ("Unlisted-Linac", 60, 60),
    ];

    let assembler = ApertureAssembler::default();
    for (device, raw_slots, expected) in cases {
        let beam = Beam::new(device, device).with_control_point(sweep(raw_slots, 0));
        let apertures = assembler.assemble(&beam).unwrap();

        assert_eq!(apertures[0].leaf_positions.len(), expected, "{}", device);
        assert_eq!(apertures[0].leaf_positions.bank_b.len(), expected, "{}", device);
        assert_eq!(apertures[0].leaf_widths.len(), expected, "{}", device);
    }
}

#[test]
fn test_hd_beam_order_and_sharing() {
    let mut beam = Beam::new("VMAT", "Linac3");
    for step in 0..10 {
        beam = beam.with_control_point(sweep(60, step));
    }

    let apertures = ApertureAssembler::default().assemble(&beam).unwrap();
    assert_eq!(apertures.len(), beam.control_points.len());

    for (aperture, control_point) in apertures.iter().zip(&beam.control_points) {
        let raw = &control_point.leaf_positions;
        assert_eq!(aperture.leaf_positions.bank_a[0], raw.bank_a[59]);
        assert_eq!(aperture.leaf_positions.bank_b[59], raw.bank_b[0]);
        assert_eq!(aperture.jaw.left, control_point.jaw.x1);
        assert!(Arc::ptr_eq(&aperture.leaf_widths, &apertures[0].leaf_widths));
        assert_eq!(aperture.leaf_widths.to_vec(), MILLENNIUM_120_HD_WIDTHS.to_vec());
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let beam = Beam::new("Arc H", "HalcyonSN1386")
        .with_control_point(sweep(58, 1))
        .with_control_point(sweep(58, 2));
    let assembler = ApertureAssembler::default();

    let first = assembler.assemble(&beam).unwrap();
    let second = assembler.assemble(&beam).unwrap();
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_halcyon_beam_with_standard_slot_count_fails_loudly() {
    let beam = Beam::new("Wrong", "HalcyonSN1386").with_control_point(sweep(60, 0));

    match ApertureAssembler::default().assemble(&beam) {
        Err(ApertureError::LeafCountMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 58);
            assert_eq!(actual, 60);
        }
        other => panic!("expected LeafCountMismatch, got {:?}", other),
    }
}

#[test]
fn test_engine_reports_each_beam() {
    let mut unnamed = Beam::new("No unit", "x").with_control_point(sweep(60, 0));
    unnamed.device_id = None;

    let source = InMemoryBeamSource::new(vec![
        Beam::new("A", "TrueBeamSN4831").with_control_point(sweep(60, 0)),
        unnamed,
        Beam::new("C", "HalcyonSN1386")
            .with_control_point(sweep(58, 0))
            .with_control_point(sweep(58, 1)),
    ]);

    let report = ApertureEngine::new(source, ApertureAssembler::default())
        .run()
        .unwrap();

    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.aperture_count(), 3);
    assert_eq!(report.failures.len(), 1);

    match &report.failures[0].error {
        ApertureError::LeafWidthsNotFound { beam_id, source } => {
            assert_eq!(beam_id, "No unit");
            assert_eq!(*source, ResolutionError::MissingDeviceId);
        }
        other => panic!("expected LeafWidthsNotFound, got {:?}", other),
    }
}

#[test]
fn test_blank_identity_uses_default_profile() {
    for device in ["", "   "] {
        let beam = Beam::new("B", device).with_control_point(sweep(60, 0));

        let apertures = ApertureAssembler::default().assemble(&beam).unwrap();
        assert_eq!(apertures.len(), 1);
        assert_eq!(apertures[0].leaf_widths.to_vec(), MILLENNIUM_120_WIDTHS.to_vec());
        assert_eq!(
            apertures[0].leaf_positions.bank_a[0],
            beam.control_points[0].leaf_positions.bank_a[59]
        );
    }
}
