use plots::api::{
    AxisId, BarHeights, BarPositions, Canvas, ChartKind, ChartRequest, ContourLevels, DrawOptions,
    Plots, PlotsConfig,
};
use plots::{PlotsError, PlotsResult};
use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend};
use plotters::style::WHITE;

/// Canvas that records every request instead of drawing it.
#[derive(Debug, Default)]
struct RecordingCanvas {
    current: usize,
    gca_calls: usize,
    calls: Vec<(AxisId, ChartRequest)>,
    fail_on: Option<ChartKind>,
}

impl RecordingCanvas {
    fn with_current(index: usize) -> Self {
        Self {
            current: index,
            ..Self::default()
        }
    }

    fn kinds(&self) -> Vec<ChartKind> {
        self.calls.iter().map(|(_, request)| request.kind()).collect()
    }
}

impl Canvas for RecordingCanvas {
    fn gca(&mut self) -> AxisId {
        self.gca_calls += 1;
        AxisId::new(self.current)
    }

    fn draw(&mut self, axis: AxisId, request: ChartRequest) -> PlotsResult<()> {
        if self.fail_on == Some(request.kind()) {
            return Err(PlotsError::InvalidData("rejected by canvas".to_owned()));
        }
        self.calls.push((axis, request));
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (4, 3)
    }

    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotsResult<()> {
        root.fill(&WHITE)?;
        Ok(())
    }
}

fn plots() -> Plots {
    Plots::default()
}

#[test]
fn explicit_axis_is_returned_without_consulting_current_axis() {
    let mut canvas = RecordingCanvas::with_current(0);
    let axis = plots()
        .hist(&mut canvas, &[1.0, 2.0, 2.0, 3.0], Some(AxisId::new(3)), None)
        .expect("hist");

    assert_eq!(axis, AxisId::new(3));
    assert_eq!(canvas.gca_calls, 0);
    assert_eq!(canvas.calls[0].0, AxisId::new(3));
}

#[test]
fn missing_axis_falls_back_to_current_axis() {
    let mut canvas = RecordingCanvas::with_current(2);
    let axis = plots()
        .pie(&mut canvas, &[1.0, 2.0, 3.0], None, None)
        .expect("pie");

    assert_eq!(axis, AxisId::new(2));
    assert_eq!(canvas.gca_calls, 1);
}

#[test]
fn missing_options_are_forwarded_as_empty_options() {
    let mut canvas = RecordingCanvas::default();
    plots()
        .errorbar(&mut canvas, &[1.0, 2.0], &[3.0, 4.0], None, None)
        .expect("errorbar");

    match &canvas.calls[0].1 {
        ChartRequest::ErrorBar { x, y, options } => {
            assert_eq!(x, &[1.0, 2.0]);
            assert_eq!(y, &[3.0, 4.0]);
            assert_eq!(options, &DrawOptions::default());
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn caller_options_are_forwarded_unchanged() {
    let mut canvas = RecordingCanvas::default();
    let options = DrawOptions::new()
        .with_bins(30)
        .with_alpha(0.5)
        .with_extra("density", true);
    plots()
        .hist(&mut canvas, &[1.0, 2.0], None, Some(options.clone()))
        .expect("hist");

    assert_eq!(canvas.calls[0].1.options(), &options);
}

#[test]
fn scatter_hist2d_draws_background_then_scatter_on_one_axis() {
    let mut canvas = RecordingCanvas::with_current(1);
    let x = [0.0, 1.0, 2.0];
    let y = [2.0, 1.0, 0.0];
    let axis = plots()
        .scatter_hist2d(&mut canvas, &x, &y, None, None, None)
        .expect("scatter_hist2d");

    assert_eq!(axis, AxisId::new(1));
    assert_eq!(canvas.gca_calls, 1);
    assert_eq!(canvas.kinds(), vec![ChartKind::Hist2d, ChartKind::Scatter]);
    assert!(canvas.calls.iter().all(|(drawn_on, _)| *drawn_on == axis));
    assert_eq!(canvas.calls[0].1.options().cmap.as_deref(), Some("Greys"));
    assert_eq!(canvas.calls[1].1.options(), &DrawOptions::default());
}

#[test]
fn color_map_unknown_to_the_figure_engine_reaches_the_canvas() {
    let plots = Plots::new(PlotsConfig::new().with_color_map_name("coolwarm")).expect("plots");
    let mut canvas = RecordingCanvas::default();
    plots
        .scatter_hexbin(&mut canvas, &[0.0, 1.0], &[1.0, 0.0], None, None, None)
        .expect("recording canvas accepts any cmap");

    assert_eq!(canvas.calls[0].1.options().cmap.as_deref(), Some("coolwarm"));
}

#[test]
fn scatter_hexbin_uses_configured_color_map() {
    let config = PlotsConfig::new().with_color_map_name("viridis");
    let plots = Plots::new(config).expect("plots");
    let mut canvas = RecordingCanvas::default();
    let scatter_kws = DrawOptions::new().with_marker_size(4.0);
    plots
        .scatter_hexbin(
            &mut canvas,
            &[0.0, 1.0],
            &[1.0, 0.0],
            None,
            Some(DrawOptions::new().with_extra("gridsize", 20_i64)),
            Some(scatter_kws.clone()),
        )
        .expect("scatter_hexbin");

    assert_eq!(canvas.kinds(), vec![ChartKind::Hexbin, ChartKind::Scatter]);
    let hexbin = canvas.calls[0].1.options();
    assert_eq!(hexbin.cmap.as_deref(), Some("viridis"));
    assert!(hexbin.extra.contains_key("gridsize"));
    assert_eq!(canvas.calls[1].1.options(), &scatter_kws);
}

#[test]
fn caller_color_map_wins_over_configured_one() {
    let mut canvas = RecordingCanvas::default();
    plots()
        .scatter_hist2d(
            &mut canvas,
            &[0.0, 1.0],
            &[1.0, 0.0],
            None,
            Some(DrawOptions::new().with_cmap("Blues")),
            None,
        )
        .expect("scatter_hist2d");

    assert_eq!(canvas.calls[0].1.options().cmap.as_deref(), Some("Blues"));
}

#[test]
fn plain_hist2d_does_not_inject_color_map() {
    let mut canvas = RecordingCanvas::default();
    plots()
        .hist2d(&mut canvas, &[0.0, 1.0], &[1.0, 0.0], None, None)
        .expect("hist2d");

    assert_eq!(canvas.calls[0].1.options().cmap, None);
}

#[test]
fn background_failure_skips_scatter() {
    let mut canvas = RecordingCanvas {
        fail_on: Some(ChartKind::Hexbin),
        ..RecordingCanvas::default()
    };
    let err = plots()
        .scatter_hexbin(&mut canvas, &[0.0], &[0.0], None, None, None)
        .expect_err("canvas error must propagate");

    assert!(matches!(err, PlotsError::InvalidData(_)));
    assert!(canvas.calls.is_empty());
}

#[test]
fn bar_height_defaults_to_configured_value() {
    let plots = Plots::new(PlotsConfig::new().with_bar_height_default(12.5)).expect("plots");
    let mut canvas = RecordingCanvas::default();
    plots
        .bar(&mut canvas, vec![1.0, 2.0, 3.0], None, None, None)
        .expect("bar");

    match &canvas.calls[0].1 {
        ChartRequest::Bar { x, height, .. } => {
            assert_eq!(x, &BarPositions::Numeric(vec![1.0, 2.0, 3.0]));
            assert_eq!(height, &BarHeights::Uniform(12.5));
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn explicit_bar_heights_are_forwarded() {
    let mut canvas = RecordingCanvas::default();
    plots()
        .bar(
            &mut canvas,
            &["a", "b"][..],
            Some(BarHeights::from(vec![3.0, 4.0])),
            None,
            None,
        )
        .expect("bar");

    match &canvas.calls[0].1 {
        ChartRequest::Bar { x, height, .. } => {
            assert_eq!(
                x,
                &BarPositions::Categorical(vec!["a".to_owned(), "b".to_owned()])
            );
            assert_eq!(height, &BarHeights::PerBar(vec![3.0, 4.0]));
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn default_bar_height_is_fifty() {
    let mut canvas = RecordingCanvas::default();
    plots()
        .bar(&mut canvas, vec![0.0], None, None, None)
        .expect("bar");

    match &canvas.calls[0].1 {
        ChartRequest::Bar { height, .. } => assert_eq!(height, &BarHeights::Uniform(50.0)),
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn every_single_chart_operation_issues_exactly_one_request() {
    let plots = plots();
    let mut canvas = RecordingCanvas::default();
    let grid = vec![vec![0.0, 1.0], vec![1.0, 2.0]];
    let samples = vec![vec![1.0, 2.0, 3.0]];

    plots.hist(&mut canvas, &[1.0], None, None).expect("hist");
    plots
        .errorbar(&mut canvas, &[1.0], &[1.0], None, None)
        .expect("errorbar");
    plots
        .violinplot(&mut canvas, &samples, &[], None, None)
        .expect("violinplot");
    plots
        .eventplot(&mut canvas, &samples, None, None)
        .expect("eventplot");
    plots
        .hist2d(&mut canvas, &[1.0], &[1.0], None, None)
        .expect("hist2d");
    plots
        .hexbin(&mut canvas, &[1.0], &[1.0], None, None)
        .expect("hexbin");
    plots
        .bar(&mut canvas, vec![1.0], None, None, None)
        .expect("bar");
    plots.pie(&mut canvas, &[1.0], None, None).expect("pie");
    plots
        .boxplot(&mut canvas, &samples, None, None)
        .expect("boxplot");
    plots
        .quiver(&mut canvas, &[0.0], &[0.0], &[1.0], &[1.0], None, None)
        .expect("quiver");
    plots
        .streamplot(&mut canvas, &[0.0, 1.0], &[0.0, 1.0], &grid, &grid, None, None)
        .expect("streamplot");
    plots
        .contourf(&mut canvas, &[0.0, 1.0], &[0.0, 1.0], &grid, 5_usize, None, None)
        .expect("contourf");

    assert_eq!(
        canvas.kinds(),
        vec![
            ChartKind::Hist,
            ChartKind::ErrorBar,
            ChartKind::Violin,
            ChartKind::Event,
            ChartKind::Hist2d,
            ChartKind::Hexbin,
            ChartKind::Bar,
            ChartKind::Pie,
            ChartKind::Box,
            ChartKind::Quiver,
            ChartKind::Streamplot,
            ChartKind::Contourf,
        ]
    );
    assert_eq!(canvas.gca_calls, 12);
}

#[test]
fn contour_levels_accept_count_or_explicit_values() {
    let plots = plots();
    let mut canvas = RecordingCanvas::default();
    let z = vec![vec![0.0, 1.0], vec![1.0, 2.0]];
    plots
        .contourf(&mut canvas, &[0.0, 1.0], &[0.0, 1.0], &z, 7_usize, None, None)
        .expect("count");
    plots
        .contourf(
            &mut canvas,
            &[0.0, 1.0],
            &[0.0, 1.0],
            &z,
            vec![0.0, 0.5, 2.0],
            None,
            None,
        )
        .expect("explicit");

    let levels: Vec<&ContourLevels> = canvas
        .calls
        .iter()
        .filter_map(|(_, request)| match request {
            ChartRequest::Contourf { levels, .. } => Some(levels),
            _ => None,
        })
        .collect();
    assert_eq!(levels[0], &ContourLevels::Count(7));
    assert_eq!(levels[1], &ContourLevels::Explicit(vec![0.0, 0.5, 2.0]));
}

#[test]
fn get_data_encodes_the_canvas_painting() {
    let canvas = RecordingCanvas::default();
    let encoded = plots()
        .get_data(&canvas, Default::default())
        .expect("get_data");

    assert!(!encoded.is_empty());
    assert!(!encoded.contains('\n'));
    let bytes = plots::api::Base64Alphabet::Standard
        .decode(&encoded)
        .expect("base64");
    let image = image::load_from_memory(&bytes).expect("png");
    assert_eq!((image.width(), image.height()), (4, 3));
}
