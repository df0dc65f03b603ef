use codec_charts::geometry::pool::matrix_allocation_count;
use codec_charts::geometry::{Matrix, MatrixKind, Point, Rectangle};

fn assert_point_near(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() <= 1e-9 && (actual.y - expected.y).abs() <= 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn concat_applies_other_first() {
    let mut m = Matrix::translation(10.0, 0.0);
    m.concat(&Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
    // scale, then translate
    assert_point_near(m.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
}

#[test]
fn pre_multiply_applies_other_after() {
    let mut m = Matrix::translation(10.0, 0.0);
    m.pre_multiply(&Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
    // translate, then scale
    assert_point_near(m.transform_point(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
}

#[test]
fn translation_updates_promote_identity_tag() {
    let mut m = Matrix::identity();
    assert_eq!(m.kind(), MatrixKind::Identity);
    m.set_tx(5.0);
    assert_eq!(m.kind(), MatrixKind::Translation);
    m.set_a(2.0);
    assert_eq!(m.kind(), MatrixKind::Unknown);

    let mut tagged_unknown = Matrix::new(1.0, 0.0, 0.0, 1.0, 3.0, 4.0);
    assert_eq!(tagged_unknown.kind(), MatrixKind::Unknown);
    assert!(tagged_unknown.is_translation_only());
    assert_eq!(tagged_unknown.kind(), MatrixKind::Translation);
}

#[test]
fn singular_matrix_inverts_to_identity() {
    let singular = Matrix::new(1.0, 2.0, 2.0, 4.0, 5.0, 6.0);
    let mut result = Matrix::new(9.0, 9.0, 9.0, 9.0, 9.0, 9.0);
    singular.inverse(&mut result);
    assert!(result.is_identity());
}

#[test]
fn inverse_round_trips_points() {
    let mut m = Matrix::identity();
    m.scale(3.0, -2.0);
    m.rotate(0.7);
    m.translate(11.0, -4.0);
    let inverse = m.inverted();

    let original = Point::new(2.5, -7.25);
    let back = inverse.transform_point(m.transform_point(original));
    assert_point_near(back, original);
}

#[test]
fn translation_inverse_uses_fast_path() {
    let inverse = Matrix::translation(3.0, -4.0).inverted();
    assert_eq!(inverse.kind(), MatrixKind::Translation);
    assert_eq!(inverse.elements(), [1.0, 0.0, 0.0, 1.0, -3.0, 4.0]);
}

#[test]
fn rotated_rectangle_bounds_cover_corners() {
    let mut rect = Rectangle::new(0.0, 0.0, 2.0, 2.0);
    let mut m = Matrix::identity();
    m.rotate(std::f64::consts::FRAC_PI_4);
    m.transform_rectangle_aabb(&mut rect);

    let half_diagonal = 2.0_f64.sqrt();
    assert!((rect.x + half_diagonal).abs() <= 1e-9);
    assert!(rect.y.abs() <= 1e-9);
    assert!((rect.w - 2.0 * half_diagonal).abs() <= 1e-9);
    assert!((rect.h - 2.0 * half_diagonal).abs() <= 1e-9);
}

#[test]
fn snap_only_rounds_translation_matrices() {
    let mut translated = Matrix::translation(1.4, 2.6);
    assert!(translated.snap());
    assert_eq!(translated.elements(), [1.0, 0.0, 0.0, 1.0, 1.0, 3.0]);

    let mut scaled = Matrix::new(2.0, 0.0, 0.0, 2.0, 1.4, 2.6);
    assert!(!scaled.snap());
    assert_eq!(scaled.tx(), 1.4);
}

#[test]
fn scale_and_rotation_queries() {
    let mut m = Matrix::identity();
    m.scale(2.0, 3.0);
    assert_eq!(m.scale_x(), 2.0);
    assert_eq!(m.scale_y(), 3.0);
    assert_eq!(m.average_scale(), 2.5);
    assert!(m.is_scale_or_rotation());

    let mut rotated = Matrix::identity();
    rotated.rotate(std::f64::consts::FRAC_PI_2);
    assert!((rotated.rotation_degrees() - 90.0).abs() <= 1e-9);

    let sheared = Matrix::new(1.0, 0.0, 1.0, 1.0, 0.0, 0.0);
    assert!(!sheared.is_scale_or_rotation());
}

#[test]
fn area_queries_detect_degenerate_transforms() {
    let query = Rectangle::new(0.0, 0.0, 1.0, 1.0);
    assert!(Matrix::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0).empty_area(&query));
    assert!(!Matrix::identity().empty_area(&query));
    let wide = Rectangle::new(-10.0, 0.0, 20.0, 1.0);
    assert!(Matrix::new(1e308, 0.0, 0.0, 1.0, 0.0, 0.0).infinite_area(&wide));
    assert!(!Matrix::new(1e308, 0.0, 0.0, 1.0, 0.0, 0.0).infinite_area(&Rectangle::new(0.0, 0.0, 1e-3, 1.0)));
}

#[test]
fn pooled_matrices_are_reused_after_free() {
    let first = Matrix::allocate();
    let baseline = matrix_allocation_count();
    first.free();
    let mut reused = Matrix::allocate();
    assert_eq!(matrix_allocation_count(), baseline);
    reused.set_identity();
    reused.free();
}
