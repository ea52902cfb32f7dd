use glam::{Vec3, Vec4};
use kappa::{Camera, Curvature, Direction};

const ALL: [Curvature; 3] = [Curvature::EUCLIDEAN, Curvature::SPHERICAL, Curvature::HYPERBOLIC];

fn assert_vec4_close(actual: Vec4, expected: Vec4, tol: f32) {
    assert!(
        (actual - expected).abs().max_element() < tol,
        "expected {expected:?}, got {actual:?}"
    );
}

fn camera_at(position: Vec3) -> Camera {
    let mut camera = Camera::default();
    camera.set_position(position.extend(1.0));
    camera
}

#[test]
fn test_view_moves_eye_to_origin() {
    let camera = camera_at(Vec3::new(0.3, 0.2, 0.5));

    for k in ALL {
        let view = camera.view(k);
        let eye = camera.eye(k);
        println!("{k}: eye={eye:?}");
        assert_vec4_close(eye * view, Vec4::W, 1e-4);
    }
}

#[test]
fn test_view_aligns_look_with_negative_z() {
    let camera = camera_at(Vec3::new(0.3, 0.2, 0.5));

    for k in ALL {
        let eye = camera.eye(k);
        let forward = k.port_vector(camera.look_at().truncate(), eye);
        assert_vec4_close(forward * camera.view(k), Vec4::new(0.0, 0.0, -1.0, 0.0), 1e-4);
    }
}

#[test]
fn test_projection_maps_near_and_far_to_depth_range() {
    let camera = Camera::default();

    for k in ALL {
        let projection = camera.projection(k);
        let near = camera.projection.near;
        let far = camera.projection.far_for(k);

        // View-space point at geodesic depth `d` straight ahead.
        let ahead = |d: f32| {
            if k.is_euclidean() {
                Vec4::new(0.0, 0.0, -d, 1.0)
            } else {
                Vec4::new(0.0, 0.0, -k.sin(d), k.cos(d))
            }
        };

        let clip_near = ahead(near) * projection;
        let clip_far = ahead(far) * projection;
        println!("{k}: near={clip_near:?} far={clip_far:?}");

        assert!((clip_near.z / clip_near.w + 1.0).abs() < 1e-2);
        assert!((clip_far.z / clip_far.w - 1.0).abs() < 1e-2);
    }
}

#[test]
fn test_euclidean_move_is_linear() {
    let mut camera = Camera::default();
    let start = camera.position();

    assert!(!camera.move_by(Curvature::EUCLIDEAN, 0.5, Direction::Forward));
    assert_vec4_close(camera.position(), start + Vec4::new(0.0, 0.0, -0.5, 0.0), 1e-6);

    assert!(!camera.move_by(Curvature::EUCLIDEAN, 0.25, Direction::Up));
    assert_vec4_close(camera.position(), start + Vec4::new(0.0, 0.25, -0.5, 0.0), 1e-6);
}

#[test]
fn test_none_direction_is_a_no_op() {
    for k in ALL {
        let mut camera = Camera::default();
        let before = camera.clone();
        assert!(!camera.move_by(k, 1.0, Direction::None));
        assert_eq!(camera, before);
    }
}

#[test]
fn test_left_is_up_cross_look() {
    let camera = Camera::default();
    assert_eq!(camera.direction_vector(Direction::Left), Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(camera.direction_vector(Direction::Right), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(camera.direction_vector(Direction::Backward), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_spherical_walk_wraps_once_at_equator() {
    let k = Curvature::SPHERICAL;
    let dt = 0.01;
    let mut camera = Camera::default();
    camera.set_position(Vec4::W);

    let mut wraps = Vec::new();
    for step in 0..393 {
        if camera.move_by(k, dt, Direction::Forward) {
            wraps.push((step + 1) as f32 * dt);
        }
        assert!(camera.eye(k).w >= 0.0, "step {step}: eye left the front hemisphere");
    }

    println!("wraps at arc {wraps:?}, final {:?}", camera.position());
    assert_eq!(wraps.len(), 1);
    assert!((wraps[0] - std::f32::consts::FRAC_PI_2).abs() < 0.02);

    // 1.25π of travel: once over the equator, back through the origin,
    // and a quarter turn beyond it.
    let flat = camera.position().truncate();
    assert!((flat.length() - 0.25 * std::f32::consts::PI).abs() < 1e-2);
    assert!(flat.z < 0.0);
    assert_eq!(camera.up(), Vec4::new(0.0, -1.0, 0.0, 0.0));
}

#[test]
fn test_hyperbolic_walk_follows_geodesic() {
    let k = Curvature::HYPERBOLIC;
    let mut camera = Camera::default();
    camera.set_position(Vec4::W);

    for _ in 0..100 {
        assert!(!camera.move_by(k, 0.01, Direction::Forward));
    }

    let eye = camera.eye(k);
    let travelled = k.distance(Vec4::W, eye);
    println!("travelled {travelled}, eye {eye:?}");
    assert!((travelled - 1.0).abs() < 1e-3);
    assert_vec4_close(camera.position(), Vec4::new(0.0, 0.0, -1.0, 1.0), 1e-3);
    assert!((k.dot(eye, eye) + 1.0).abs() < 1e-3);
}

#[test]
fn test_move_from_spherical_antipode_stays_finite() {
    let k = Curvature::SPHERICAL;
    let mut camera = Camera::default();
    // Reachable by walking in flat space and then switching curvature.
    camera.set_position(Vec4::new(0.0, 0.0, std::f32::consts::PI, 1.0));

    for step in 0..11 {
        camera.move_by(k, 0.01, Direction::Forward);
        let position = camera.position();
        println!("step {step}: {position:?}");
        assert!(position.is_finite(), "step {step}: position {position:?}");
    }

    let view = camera.view(Curvature::EUCLIDEAN);
    assert!(view.rows.iter().all(|row| row.is_finite()), "{view:?}");
    assert!(camera.up().is_finite());
}

#[test]
fn test_curvature_switch_keeps_flat_position() {
    let mut camera = Camera::default();
    camera.move_by(Curvature::SPHERICAL, 0.3, Direction::Right);
    let flat = camera.position();

    let h = Curvature::HYPERBOLIC;
    assert_eq!(camera.position(), flat);
    assert_eq!(camera.eye(h), h.port_point(flat.truncate()));
    assert_eq!(camera.eye(Curvature::EUCLIDEAN), flat);
}

#[test]
fn test_pan_keeps_unit_look_direction() {
    let mut camera = Camera::default();
    camera.pan(0.3, -0.2);
    camera.pan(-0.7, 0.9);

    let look = camera.look_at();
    assert_eq!(look.w, 0.0);
    assert!((look.truncate().length() - 1.0).abs() < 1e-5);
    assert_eq!(camera.up(), Vec4::new(0.0, 1.0, 0.0, 0.0));
}

#[test]
fn test_aspect_ratio_update() {
    let mut camera = Camera::default();
    camera.update_aspect_ratio(1920, 1080);
    assert!((camera.projection.aspect - 16.0 / 9.0).abs() < 1e-6);
}
