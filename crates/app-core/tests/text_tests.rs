// Host-side tests for typeface metrics and glyph layout.

use app_core::{layout_text, FontError, FontMetrics};

fn optimer_like() -> FontMetrics {
    let mut m = FontMetrics::new(1000.0).unwrap();
    m.insert_advance('X', 700.0);
    m.insert_advance('R', 750.0);
    m.insert_advance(' ', 250.0);
    m
}

#[test]
fn resolution_must_be_positive_and_finite() {
    assert_eq!(
        FontMetrics::new(0.0).unwrap_err(),
        FontError::InvalidResolution(0.0)
    );
    assert!(FontMetrics::new(-5.0).is_err());
    assert!(FontMetrics::new(f64::NAN).is_err());
    assert!(FontMetrics::new(f64::INFINITY).is_err());
}

#[test]
fn lays_out_xr_left_to_right() {
    let slabs = layout_text("XR", &optimer_like(), 5.0, 0.0001);
    assert_eq!(slabs.len(), 2);
    // X advances 700/1000 * 5 = 3.5
    assert!((slabs[0].center.x - 1.75).abs() < 1e-5);
    assert!((slabs[1].center.x - (3.5 + 1.875)).abs() < 1e-5);
    assert!(slabs[1].center.x > slabs[0].center.x);
    for s in &slabs {
        assert!((s.size.y - 3.6).abs() < 1e-5);
        assert!((s.center.y - 1.8).abs() < 1e-5);
        assert_eq!(s.size.z, 0.0001);
    }
    assert!(slabs[0].size.x < 3.5);
}

#[test]
fn whitespace_advances_without_a_slab() {
    let m = optimer_like();
    let slabs = layout_text("X R", &m, 5.0, 1.0);
    assert_eq!(slabs.len(), 2);
    // 3.5 for X, 1.25 for the space
    assert!((slabs[1].center.x - (4.75 + 1.875)).abs() < 1e-5);
}

#[test]
fn missing_glyphs_leave_a_gap() {
    let slabs = layout_text("XQR", &optimer_like(), 5.0, 1.0);
    assert_eq!(slabs.len(), 2);
    assert!((slabs[1].center.x - (3.5 + 2.5 + 1.875)).abs() < 1e-5);
}

#[test]
fn empty_text_has_no_slabs() {
    assert!(layout_text("", &optimer_like(), 5.0, 1.0).is_empty());
}

#[test]
fn metrics_report_glyphs() {
    let m = optimer_like();
    assert_eq!(m.glyph_count(), 3);
    assert_eq!(m.advance('X'), Some(700.0));
    assert_eq!(m.advance('Z'), None);
    assert_eq!(m.resolution(), 1000.0);
}

#[test]
fn slab_height_is_cap_height_of_the_size() {
    for size in [1.0_f32, 5.0, 12.0] {
        let slabs = layout_text("X", &optimer_like(), size, 1.0);
        assert!((slabs[0].size.y - size * 0.72).abs() < 1e-5);
        assert!(slabs[0].size.y < size);
    }
}
