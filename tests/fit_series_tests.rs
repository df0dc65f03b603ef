use codec_charts::PlotError;
use codec_charts::core::fit::{pad_axis_rect, to_axis_rect};
use codec_charts::core::{AxisHint, FitPadding, ScaleKind, Series, data_bounds, fit_series};
use codec_charts::geometry::Rectangle;
use codec_charts::render::Color;

const LINEAR: (ScaleKind, ScaleKind) = (ScaleKind::Linear, ScaleKind::Linear);

fn padding_300x200_at_2x() -> FitPadding {
    FitPadding {
        device_width: 600.0,
        device_height: 400.0,
        horizontal_px: 84.0,
        vertical_px: 52.0,
    }
}

fn assert_rect_near(actual: Rectangle, expected: Rectangle) {
    let pairs = [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.w, expected.w),
        (actual.h, expected.h),
    ];
    assert!(
        pairs.iter().all(|(a, e)| (a - e).abs() <= 1e-9),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn data_bounds_cover_all_series() {
    let a = Series::from_pairs("a", Color::BLACK, &[(0.0, 0.0), (1.0, 1.0)]);
    let b = Series::from_pairs("b", Color::BLACK, &[(0.5, -2.0), (3.0, 0.5)]);

    assert_eq!(
        data_bounds(std::slice::from_ref(&a), LINEAR),
        Some(Rectangle::new(0.0, 0.0, 1.0, 1.0))
    );
    assert_eq!(
        data_bounds(&[a, b], LINEAR),
        Some(Rectangle::new(0.0, -2.0, 3.0, 3.0))
    );
}

#[test]
fn axis_hints_extend_the_data_domain() {
    let series = Series::from_pairs("psnr", Color::BLACK, &[(100.0, 35.0), (200.0, 38.0)])
        .with_y_axis(AxisHint::range(30.0, 45.0));

    let bounds = data_bounds(&[series], LINEAR).expect("bounds");
    assert_eq!(bounds, Rectangle::new(100.0, 30.0, 100.0, 15.0));
}

#[test]
fn series_without_finite_samples_have_no_bounds() {
    let series = Series::from_pairs("empty", Color::BLACK, &[(f64::NAN, f64::NAN)]);
    assert_eq!(data_bounds(&[series], LINEAR), None);
    assert_eq!(data_bounds(&[], LINEAR), None);
}

#[test]
fn fit_reserves_tick_bar_and_margin_pixels() {
    let series = Series::from_pairs("a", Color::BLACK, &[(0.0, 0.0), (10.0, 20.0)]);
    let fitted = fit_series(&[series], LINEAR, padding_300x200_at_2x()).expect("fit");

    // 84px of 600 on a span of 10, 52px of 400 on a span of 20.
    assert_rect_near(fitted, Rectangle::new(-1.4, -2.6, 12.8, 25.2));
}

#[test]
fn log_axis_is_fitted_in_log_space() {
    let series = Series::from_pairs("rate", Color::BLACK, &[(10.0, 0.0), (1000.0, 1.0)])
        .with_x_axis(AxisHint::log());
    let kinds = (ScaleKind::Log, ScaleKind::Linear);

    let axis = to_axis_rect(data_bounds(std::slice::from_ref(&series), kinds).expect("bounds"), kinds)
        .expect("axis rect");
    assert_rect_near(axis, Rectangle::new(1.0, 0.0, 2.0, 1.0));

    let fitted = fit_series(&[series], kinds, padding_300x200_at_2x()).expect("fit");
    assert!((fitted.x - 0.72).abs() <= 1e-9);
    assert!((fitted.right() - 3.28).abs() <= 1e-9);
}

#[test]
fn log_axis_leaves_non_positive_samples_out_of_the_fit() {
    let kinds = (ScaleKind::Log, ScaleKind::Linear);
    let with_zero = Series::from_pairs(
        "rate",
        Color::BLACK,
        &[(0.0, 1.0), (-5.0, 1.5), (10.0, 2.0), (1000.0, 3.0)],
    );
    let positive = Series::from_pairs("rate", Color::BLACK, &[(10.0, 2.0), (1000.0, 3.0)]);

    let bounds = data_bounds(std::slice::from_ref(&with_zero), kinds).expect("bounds");
    assert_eq!(bounds, Rectangle::new(10.0, 1.0, 990.0, 2.0));

    let fitted = fit_series(&[with_zero], kinds, padding_300x200_at_2x()).expect("fit");
    let reference = fit_series(&[positive], kinds, padding_300x200_at_2x()).expect("fit");
    assert_rect_near(
        Rectangle::new(fitted.x, 0.0, fitted.w, 1.0),
        Rectangle::new(reference.x, 0.0, reference.w, 1.0),
    );
}

#[test]
fn log_axis_rejects_non_positive_hints() {
    let series = Series::from_pairs("rate", Color::BLACK, &[(10.0, 1.0), (100.0, 2.0)])
        .with_x_axis(AxisHint {
            min: Some(0.0),
            ..AxisHint::log()
        });
    let err = fit_series(
        &[series],
        (ScaleKind::Log, ScaleKind::Linear),
        padding_300x200_at_2x(),
    )
    .expect_err("zero hint on log axis must fail");
    assert!(matches!(err, PlotError::InvalidLogDomain { .. }));
}

#[test]
fn single_sample_is_widened_instead_of_collapsing() {
    let series = Series::from_pairs("one", Color::BLACK, &[(5.0, 5.0)]);
    let fitted = fit_series(&[series], LINEAR, FitPadding::none(100.0, 100.0)).expect("fit");
    assert!(fitted.w > 0.0 && fitted.h > 0.0);
    assert!(fitted.x < 5.0 && fitted.right() > 5.0);
}

#[test]
fn zero_sized_device_is_rejected() {
    let err = pad_axis_rect(
        Rectangle::new(0.0, 0.0, 1.0, 1.0),
        FitPadding::none(0.0, 100.0),
    )
    .expect_err("empty device");
    assert!(matches!(err, PlotError::InvalidViewport { .. }));
}
