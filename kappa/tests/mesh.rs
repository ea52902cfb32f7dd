use glam::{Vec3, Vec4};
use kappa::mesh::{vertex, Mesh, Plane, Sphere, TESSELLATION_LEVEL};

#[test]
fn test_plane_vertices() {
    let v = vertex(&Plane, 0.25, 0.75);
    assert_eq!(v.position, [-0.25, 0.0, 0.25, 1.0]);
    assert_eq!(v.normal, [0.0, -1.0, 0.0, 0.0]);
    assert_eq!(v.texcoord, [0.25, 0.75]);
}

#[test]
fn test_sphere_normals_point_inward() {
    let samples = [(0.1_f32, 0.3_f32), (0.3, 0.4), (0.55, 0.5), (0.9, 0.85)];

    for (u, v) in samples {
        let vertex = vertex(&Sphere, u, v);
        let position = Vec4::from_array(vertex.position).truncate();
        let normal = Vec4::from_array(vertex.normal).truncate();
        println!("({u}, {v}): position={position:?} normal={normal:?}");

        assert!((position.length() - 1.0).abs() < 1e-5);
        assert!((normal.length() - 1.0).abs() < 1e-5);
        assert!((normal.dot(position) + 1.0).abs() < 1e-4);
    }
}

#[test]
fn test_tessellation_layout() {
    let mesh = Mesh::tessellate(&Plane, 4, 3);

    assert_eq!(mesh.strips(), 4);
    assert_eq!(mesh.vertices_per_strip(), 8);
    assert_eq!(mesh.vertices().len(), 32);
    assert_eq!(mesh.as_bytes().len(), 32 * 40);

    let strip = mesh.strip(1).unwrap();
    assert_eq!(strip.len(), 8);
    assert_eq!(strip[0].texcoord, [0.0, 0.25]);
    assert_eq!(strip[1].texcoord, [0.0, 0.5]);
    assert_eq!(strip[7].texcoord, [1.0, 0.5]);

    // Consecutive pairs advance along u.
    let a = Vec3::from_slice(&strip[2].position[..3]);
    let b = Vec3::from_slice(&strip[0].position[..3]);
    assert!(((a - b).x - 1.0 / 3.0).abs() < 1e-6);

    assert_eq!(mesh.strip(3).map(|s| s.len()), Some(8));
    assert!(mesh.strip(4).is_none());
    assert!(Mesh::default().strip(0).is_none());
}

#[test]
fn test_sphere_pole_normal_is_nan() {
    // dr/du vanishes at v = 0, so no normal exists there.
    let pole = vertex(&Sphere, 0.3, 0.0);
    assert_eq!(pole.position, [0.0, 0.0, 1.0, 1.0]);
    assert!(pole.normal[..3].iter().all(|c| c.is_nan()));

    // Tessellation samples both poles and must still go through.
    let mesh = Mesh::with_default_level(&Sphere);
    assert!(mesh.vertices().iter().any(|v| v.normal[0].is_nan()));
}

#[cfg(feature = "numeric-checks")]
#[test]
fn test_sphere_tessellates_with_numeric_checks() {
    let mesh = Mesh::with_default_level(&Sphere);
    assert_eq!(mesh.vertices().len(), 20 * 42);

    let scene = kappa::scene::Scene::demo();
    assert_eq!(scene.objects().len(), 23);
}

#[test]
fn test_default_level() {
    let mesh = Mesh::with_default_level(&Sphere);
    assert_eq!(TESSELLATION_LEVEL, 20);
    assert_eq!(mesh.strips(), 20);
    assert_eq!(mesh.vertices_per_strip(), 42);
    assert_eq!(mesh.vertices().len(), 20 * 42);
}
