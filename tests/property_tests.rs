use plots::api::{Base64Alphabet, BarHeights, EncodeOptions, ImageFormat, encode_canvas};
use plots::core::{nice_ticks, stats};
use plots::render::Colormap;
use plots::{Figure, ImgAttributes, Plots, render_img};
use proptest::prelude::*;

proptest! {
    #[test]
    fn histogram_counts_every_finite_sample(
        values in prop::collection::vec(-1.0e6f64..1.0e6f64, 1..256),
        bins in 1usize..64
    ) {
        let histogram = stats::histogram(&values, bins);
        let total: f64 = histogram.counts.iter().sum();

        prop_assert_eq!(histogram.counts.len(), bins);
        prop_assert_eq!(histogram.edges.len(), bins + 1);
        prop_assert_eq!(total, values.len() as f64);
        prop_assert!(histogram.edges.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn box_summary_is_ordered(values in prop::collection::vec(-1.0e4f64..1.0e4f64, 1..128)) {
        let summary = stats::box_summary(&values).expect("non-empty sample");

        prop_assert!(summary.whisker_low <= summary.q1);
        prop_assert!(summary.q1 <= summary.median);
        prop_assert!(summary.median <= summary.q3);
        prop_assert!(summary.q3 <= summary.whisker_high);
        prop_assert!(summary
            .fliers
            .iter()
            .all(|f| *f < summary.whisker_low || *f > summary.whisker_high));
    }

    #[test]
    fn nice_ticks_stay_inside_range_and_ascend(
        low in -1.0e6f64..1.0e6f64,
        span in 1.0e-3f64..1.0e6f64,
        max_ticks in 2usize..12
    ) {
        let high = low + span;
        let ticks = nice_ticks(low, high, max_ticks);
        let tolerance = span * 1e-6;

        prop_assert!(ticks.iter().all(|t| *t >= low - tolerance && *t <= high + tolerance));
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn colormap_samples_are_valid_colors(t in -2.0f64..3.0f64, reversed in any::<bool>()) {
        let name = if reversed { "viridis_r" } else { "viridis" };
        let color = Colormap::by_name(name).expect("colormap").sample(t);

        prop_assert!(color.validate().is_ok());
        prop_assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn img_tag_wraps_payload_verbatim(data in "[A-Za-z0-9+/]{0,64}={0,2}") {
        let tag = render_img(Some(data.as_str()), &ImgAttributes::new()).expect("tag");

        prop_assert_eq!(tag, format!("<img src=\"data:image/png;base64,{data}\"/>"));
    }

    #[test]
    fn bar_figures_encode_deterministically(
        heights in prop::collection::vec(-500.0f64..500.0f64, 1..24)
    ) {
        let plots = Plots::default();
        let mut figure = Figure::with_size(160, 120).expect("figure");
        let positions: Vec<f64> = (0..heights.len()).map(|i| i as f64).collect();
        plots
            .bar(&mut figure, positions, Some(BarHeights::PerBar(heights)), None, None)
            .expect("bar");

        let first = encode_canvas(&figure, ImageFormat::Svg).expect("first svg");
        let second = encode_canvas(&figure, ImageFormat::Svg).expect("second svg");
        prop_assert_eq!(&first, &second);

        let encoded = plots.get_data(&figure, EncodeOptions::new()).expect("get_data");
        let bytes = Base64Alphabet::Standard.decode(&encoded).expect("base64");
        prop_assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
