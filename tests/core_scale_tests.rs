use approx::assert_relative_eq;
use plots::PlotsError;
use plots::core::contour::polygon_area;
use plots::core::{Bounds, auto_levels, filled_bands, nice_ticks, tick_label};

#[test]
fn nice_ticks_handle_reversed_and_fractional_ranges() {
    assert_eq!(nice_ticks(1.0, 0.0, 3), vec![0.0, 0.5, 1.0]);
    let ticks = nice_ticks(-1.0, 1.0, 5);
    assert_eq!(ticks, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    assert_eq!(tick_label(ticks[1]), "-0.5");
    assert_eq!(tick_label(ticks[2]), "0");
}

#[test]
fn non_finite_contour_levels_are_rejected() {
    let x = [0.0, 1.0];
    let y = [0.0, 1.0];
    let z = vec![vec![0.0, 1.0], vec![1.0, 2.0]];
    let err = filled_bands(&x, &y, &z, &[0.0, 1.0, f64::INFINITY]).expect_err("inf level");
    assert!(matches!(err, PlotsError::InvalidData(_)));
}

#[test]
fn bounds_union_and_points() {
    let bounds = Bounds::from_points([(1.0, 5.0), (-2.0, 3.0)]).expect("bounds");
    assert_eq!(bounds, Bounds::new(-2.0, 1.0, 3.0, 5.0));
    let grown = bounds.union(Bounds::new(0.0, 4.0, 0.0, 1.0));
    assert_eq!(grown, Bounds::new(-2.0, 4.0, 0.0, 5.0));
    assert_relative_eq!(grown.width(), 6.0);
}

#[test]
fn contour_bands_cover_the_grid() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0];
    let z = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]];
    let levels = auto_levels(&z, 4).expect("levels");
    let bands = filled_bands(&x, &y, &z, &levels).expect("bands");

    let area: f64 = bands
        .iter()
        .flat_map(|band| &band.polygons)
        .map(|polygon| polygon_area(polygon))
        .sum();
    assert_relative_eq!(area, 2.0, epsilon = 1e-9);
}
