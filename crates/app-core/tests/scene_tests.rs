// Host-side tests for the initial scene graph.

use app_core::*;
use glam::Vec3;

fn scene() -> SceneState {
    SceneState::new(&SceneConfig::default())
}

#[test]
fn environment_uses_background_for_fog() {
    let s = scene();
    assert_eq!(s.background, 0x503070);
    assert_eq!(s.fog.color, 0x503070);
    assert_eq!(s.fog.density, 0.1);
    assert_eq!(s.ambient, 0x707070);
}

#[test]
fn sphere_starts_as_wireframe_metal() {
    let s = scene();
    let m = &s.sphere.material;
    assert!(m.wireframe);
    assert_eq!(m.color, 0x1509ff);
    assert_eq!(m.metalness, 1.0);
    assert_eq!(m.roughness, 0.5);
    assert!(s.sphere.cast_shadow);
}

#[test]
fn cone_is_tilted_and_placed() {
    let s = scene();
    assert_eq!(s.cone.transform.position, Vec3::new(0.0, 3.0, 3.0));
    assert_eq!(s.cone.transform.rotation.z, 1.0);
    assert!(s.cone.visible);
}

#[test]
fn ground_is_a_flat_shadow_catcher() {
    let s = scene();
    assert_eq!(s.ground.transform.position.y, -1.5);
    assert!(s.ground.receive_shadow);
    assert!(!s.ground.cast_shadow);
    assert_eq!(
        s.ground.material.kind,
        MaterialKind::ShadowCatcher { opacity: 0.2 }
    );
    // plane normal (+Z) rotated to point up
    let up = s.ground.transform.matrix().transform_vector3(Vec3::Z);
    assert!((up - Vec3::Y).length() < 1e-5);
}

#[test]
fn draw_order_puts_ground_last() {
    let mut s = scene();
    let ids: Vec<_> = s.meshes().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec![MeshId::Backdrop, MeshId::Cone, MeshId::Sphere, MeshId::Ground]
    );

    let mut metrics = FontMetrics::new(1000.0).unwrap();
    metrics.insert_advance('X', 700.0);
    metrics.insert_advance('R', 750.0);
    s.attach_text(layout_text("XR", &metrics, 5.0, 0.0001));
    let ids: Vec<_> = s.meshes().map(|(id, _)| id).collect();
    assert_eq!(ids[1], MeshId::Text);
    assert_eq!(ids.len(), 5);
}

#[test]
fn text_sits_behind_the_backdrop() {
    let mut s = scene();
    assert!(s.mesh(MeshId::Text).is_none());
    s.attach_text(Default::default());
    let text = s.mesh(MeshId::Text).unwrap();
    assert_eq!(text.transform.position, Vec3::new(0.0, 0.0, -50.0));
    assert_eq!(text.material.color, 0xffffff);
    assert!(text.transform.position.z < s.backdrop.transform.position.z);
}

#[test]
fn casters_are_sphere_and_cone() {
    let s = scene();
    let casters: Vec<_> = s.shadow_casters().collect();
    assert_eq!(casters.len(), 2);
    assert_eq!(casters[0].0, s.cone.transform.position);
    assert_eq!(casters[1], (s.sphere.transform.position, 1.5));
}

#[test]
fn light_sits_above_and_left() {
    let s = scene();
    assert_eq!(s.point_light.position, Vec3::new(-10.0, 20.0, 5.0));
    assert_eq!(s.point_light.intensity, 1.5);
    assert!(s.point_light.cast_shadow);
}

#[test]
fn hex_conversion() {
    assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
    assert_eq!(hex_to_rgb(0x000000), [0.0, 0.0, 0.0]);
    assert_eq!(hex_to_rgb(0xffffff), [1.0, 1.0, 1.0]);
}
