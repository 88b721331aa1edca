// Host-side tests for the control table and keyboard shortcuts.

use app_core::*;

fn setup() -> (ControlPanel, AppState) {
    (
        ControlPanel::standard(),
        AppState::new(SceneConfig::default(), 800, 600),
    )
}

#[test]
fn standard_panel_has_two_folders_in_order() {
    let (panel, _) = setup();
    assert_eq!(panel.folders(), vec!["Sphere Controls", "Pyramid Controls"]);
    assert_eq!(panel.specs().len(), 6);
    let labels: Vec<_> = panel.specs().iter().map(|s| s.label).collect();
    assert_eq!(
        labels,
        vec!["Color", "Metalness", "Wireframe", "X-Axis", "Visible", "Rotate Pyramid"]
    );
}

#[test]
fn initial_values_match_scene_defaults() {
    let (panel, app) = setup();
    assert_eq!(
        panel.value(&app, "color"),
        Ok(ControlValue::Color(INITIAL_COLOR_PARAM))
    );
    assert_eq!(panel.value(&app, "metalness"), Ok(ControlValue::Number(1.0)));
    assert_eq!(panel.value(&app, "wireframe"), Ok(ControlValue::Bool(true)));
    assert_eq!(panel.value(&app, "cone_x"), Ok(ControlValue::Number(0.0)));
    assert_eq!(panel.value(&app, "visible"), Ok(ControlValue::Bool(true)));
    assert_eq!(panel.value(&app, "rotate"), Ok(ControlValue::Bool(true)));
}

#[test]
fn color_edit_reaches_material_and_params() {
    let (panel, mut app) = setup();
    let stored = panel
        .apply(&mut app, "color", ControlValue::Color(0xff0000))
        .unwrap();
    assert_eq!(stored, ControlValue::Color(0xff0000));
    assert_eq!(app.params.color, 0xff0000);
    assert_eq!(app.scene.sphere.material.color, 0xff0000);
}

#[test]
fn color_is_masked_to_24_bits() {
    let (panel, mut app) = setup();
    let stored = panel
        .apply(&mut app, "color", ControlValue::Color(0xaa12_3456))
        .unwrap();
    assert_eq!(stored, ControlValue::Color(0x12_3456));
}

#[test]
fn metalness_is_clamped() {
    let (panel, mut app) = setup();
    panel
        .apply(&mut app, "metalness", ControlValue::Number(0.3))
        .unwrap();
    assert_eq!(app.scene.sphere.material.metalness, 0.3);
    assert_eq!(app.params.metalness, 0.3);

    panel
        .apply(&mut app, "metalness", ControlValue::Number(7.0))
        .unwrap();
    assert_eq!(app.scene.sphere.material.metalness, 1.0);
    panel
        .apply(&mut app, "metalness", ControlValue::Number(-2.0))
        .unwrap();
    assert_eq!(app.scene.sphere.material.metalness, 0.0);
}

#[test]
fn cone_x_snaps_to_step_and_clamps() {
    let (panel, mut app) = setup();
    let stored = panel
        .apply(&mut app, "cone_x", ControlValue::Number(3.14159))
        .unwrap();
    let ControlValue::Number(v) = stored else {
        panic!("expected a number, got {stored:?}");
    };
    assert!((v - 3.142).abs() < 1e-4);
    assert_eq!(app.scene.cone.transform.position.x, v);

    panel
        .apply(&mut app, "cone_x", ControlValue::Number(42.0))
        .unwrap();
    assert_eq!(app.scene.cone.transform.position.x, 10.0);
}

#[test]
fn toggles_reach_the_scene() {
    let (panel, mut app) = setup();
    panel
        .apply(&mut app, "wireframe", ControlValue::Bool(false))
        .unwrap();
    assert!(!app.scene.sphere.material.wireframe);
    panel
        .apply(&mut app, "visible", ControlValue::Bool(false))
        .unwrap();
    assert!(!app.scene.cone.visible);
    panel
        .apply(&mut app, "rotate", ControlValue::Bool(false))
        .unwrap();
    assert!(!app.params.rotate_cone);
}

#[test]
fn hidden_cone_stops_casting_shadow() {
    let (panel, mut app) = setup();
    assert_eq!(app.scene.shadow_casters().count(), 2);
    panel
        .apply(&mut app, "visible", ControlValue::Bool(false))
        .unwrap();
    assert_eq!(app.scene.shadow_casters().count(), 1);
}

#[test]
fn bad_edits_are_rejected_without_side_effects() {
    let (panel, mut app) = setup();
    assert_eq!(
        panel.apply(&mut app, "nope", ControlValue::Bool(true)),
        Err(ControlError::Unknown("nope".to_string()))
    );
    assert_eq!(
        panel.apply(&mut app, "metalness", ControlValue::Bool(true)),
        Err(ControlError::KindMismatch {
            name: "metalness",
            expected: "number"
        })
    );
    assert_eq!(
        panel.apply(&mut app, "metalness", ControlValue::Number(f32::NAN)),
        Err(ControlError::NotFinite("metalness"))
    );
    assert_eq!(app.scene.sphere.material.metalness, 1.0);
}

#[test]
fn snap_to_range_without_step_only_clamps() {
    assert_eq!(snap_to_range(0.123, 0.0, 1.0, None), 0.123);
    assert_eq!(snap_to_range(5.0, 0.0, 1.0, None), 1.0);
    assert_eq!(snap_to_range(0.26, 0.0, 1.0, Some(0.5)), 0.5);
    assert_eq!(snap_to_range(0.24, 0.0, 1.0, Some(0.5)), 0.0);
}

#[test]
fn key_map_covers_shortcuts() {
    assert_eq!(KeyCommand::from_key("r"), Some(KeyCommand::Toggle("rotate")));
    assert_eq!(KeyCommand::from_key("W"), Some(KeyCommand::Toggle("wireframe")));
    assert_eq!(KeyCommand::from_key("v"), Some(KeyCommand::Toggle("visible")));
    assert_eq!(
        KeyCommand::from_key("]"),
        Some(KeyCommand::Nudge("metalness", METALNESS_KEY_STEP))
    );
    assert_eq!(
        KeyCommand::from_key("ArrowLeft"),
        Some(KeyCommand::Nudge("cone_x", -CONE_X_KEY_STEP))
    );
    assert_eq!(KeyCommand::from_key("c"), Some(KeyCommand::CycleColor));
    assert_eq!(KeyCommand::from_key("q"), None);
}

#[test]
fn key_commands_go_through_the_table() {
    let (panel, mut app) = setup();
    panel
        .apply_key(&mut app, KeyCommand::Toggle("rotate"))
        .unwrap();
    assert!(!app.params.rotate_cone);
    panel
        .apply_key(&mut app, KeyCommand::Toggle("rotate"))
        .unwrap();
    assert!(app.params.rotate_cone);

    // already at the top of its range
    panel
        .apply_key(&mut app, KeyCommand::from_key("]").unwrap())
        .unwrap();
    assert_eq!(app.params.metalness, 1.0);
    panel
        .apply_key(&mut app, KeyCommand::from_key("[").unwrap())
        .unwrap();
    assert!((app.params.metalness - 0.9).abs() < 1e-6);

    for _ in 0..30 {
        panel
            .apply_key(&mut app, KeyCommand::from_key("ArrowRight").unwrap())
            .unwrap();
    }
    assert_eq!(app.scene.cone.transform.position.x, 10.0);
}

#[test]
fn nudging_a_toggle_is_a_kind_mismatch() {
    let (panel, mut app) = setup();
    assert!(matches!(
        panel.apply_key(&mut app, KeyCommand::Nudge("visible", 1.0)),
        Err(ControlError::KindMismatch { .. })
    ));
}

#[test]
fn cycle_color_walks_the_palette() {
    let (panel, mut app) = setup();
    assert_eq!(app.params.color, SPHERE_PALETTE[0]);
    for expected in SPHERE_PALETTE.iter().cycle().skip(1).take(7) {
        panel.apply_key(&mut app, KeyCommand::CycleColor).unwrap();
        assert_eq!(app.scene.sphere.material.color, *expected);
    }
}

#[test]
fn unknown_color_restarts_the_palette() {
    assert_eq!(next_palette_color(0x123456), SPHERE_PALETTE[0]);
    let last = SPHERE_PALETTE[SPHERE_PALETTE.len() - 1];
    assert_eq!(next_palette_color(last), SPHERE_PALETTE[0]);
}

#[test]
fn hex_colors_parse_and_format() {
    assert_eq!(parse_hex_color("#1509ff"), Some(0x1509ff));
    assert_eq!(parse_hex_color("FFFFFF"), Some(0xffffff));
    assert_eq!(parse_hex_color(" #653069 "), Some(0x653069));
    assert_eq!(parse_hex_color("#fff"), None);
    assert_eq!(parse_hex_color("#gggggg"), None);
    assert_eq!(format_hex_color(0x1509ff), "#1509ff");
    assert_eq!(format_hex_color(0x00000a), "#00000a");
}

#[test]
fn modifier_chords_are_not_shortcuts() {
    let ctrl = KeyModifiers {
        ctrl: true,
        ..Default::default()
    };
    let meta = KeyModifiers {
        meta: true,
        ..Default::default()
    };
    let alt = KeyModifiers {
        alt: true,
        ..Default::default()
    };
    assert_eq!(KeyCommand::from_shortcut("r", ctrl), None);
    assert_eq!(KeyCommand::from_shortcut("c", meta), None);
    assert_eq!(KeyCommand::from_shortcut("w", alt), None);
    assert_eq!(
        KeyCommand::from_shortcut("r", KeyModifiers::default()),
        Some(KeyCommand::Toggle("rotate"))
    );
    assert!(!KeyModifiers::default().any());
}
