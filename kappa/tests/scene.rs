use glam::Vec4;
use image::Rgba;
use kappa::core::geometry::ORIGIN;
use kappa::scene::{checkerboard, ObjectUniforms, Scene, ShaderKind};
use kappa::{Camera, Curvature};

fn assert_vec4_close(actual: Vec4, expected: Vec4, tol: f32) {
    assert!(
        (actual - expected).abs().max_element() < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_demo_scene_contents() {
    let scene = Scene::demo();
    assert_eq!(scene.objects().len(), 23);
    assert_eq!(scene.lights().len(), 3);

    let object = &scene.objects()[0];
    assert!(scene.mesh(object.mesh).is_some());
    assert!(scene.texture(object.texture).is_some());
    assert!(scene.material(object.material).is_some());
}

#[test]
fn test_visible_draws_per_curvature() {
    let scene = Scene::demo();
    let camera = Camera::default();

    let counts: Vec<usize> = [Curvature::EUCLIDEAN, Curvature::SPHERICAL, Curvature::HYPERBOLIC]
        .into_iter()
        .map(|k| scene.render(&camera, k).draws.len())
        .collect();
    println!("draws per space: {counts:?}");
    assert_eq!(counts, vec![23, 10, 23]);

    let frame = scene.render(&camera, Curvature::SPHERICAL);
    assert!(frame.draws.iter().all(|draw| draw.shader == ShaderKind::Geom));
}

#[test]
fn test_render_state_is_consistent() {
    let scene = Scene::demo();
    let camera = Camera::default();

    for k in [Curvature::SPHERICAL, Curvature::HYPERBOLIC] {
        let frame = scene.render(&camera, k);
        let state = &frame.state;

        assert_eq!(state.curvature, k);
        assert_eq!(state.view_projection, state.view * state.projection);
        assert_eq!(state.eye, camera.eye(k));

        for light in &state.lights {
            let p = Vec4::from_array(light.position);
            assert!((k.dot(p, p) - k.w_sign()).abs() < 1e-4, "{k}: light at {p:?}");
        }

        for draw in &frame.draws {
            assert_eq!(draw.uniforms.curvature, k.value());
            assert_eq!(draw.uniforms.n_lights, 3);
            assert_eq!(draw.uniforms.translate, draw.transform.translate.to_rows_array());

            let placed = ORIGIN * draw.transform.translate;
            assert!((k.dot(placed, placed) - k.w_sign()).abs() < 1e-4);
        }
    }
}

#[test]
fn test_translate_places_origin_at_ported_translation() {
    let scene = Scene::demo();
    let k = Curvature::HYPERBOLIC;

    for object in scene.objects() {
        let transform = object.modelling_transform(k);
        let expected = k.port_point(object.translation.truncate());
        assert_vec4_close(Vec4::W * transform.translate, expected, 1e-6);
    }
}

#[test]
fn test_checkerboard_texture() {
    let texture = checkerboard(4, 4);
    assert_eq!(texture.dimensions(), (4, 4));
    assert_eq!(*texture.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    assert_eq!(*texture.get_pixel(1, 0), Rgba([255, 255, 0, 255]));
    assert_eq!(*texture.get_pixel(1, 1), Rgba([0, 0, 255, 255]));
}

#[test]
fn test_uniform_block_layout() {
    let frame = Scene::demo().render(&Camera::default(), Curvature::EUCLIDEAN);
    let uniforms: &ObjectUniforms = &frame.draws[0].uniforms;
    assert_eq!(bytemuck::bytes_of(uniforms).len(), 288);
    assert_eq!(std::mem::size_of::<ObjectUniforms>(), 288);
}
