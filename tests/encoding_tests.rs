use plots::api::{
    AxisId, Base64Alphabet, ChartRequest, EncodeOptions, ImageFormat, encode_canvas,
};
use plots::render::Color;
use plots::{Canvas, DrawOptions, Figure, Plots, PlotsError, PlotsResult};
use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend, IntoDrawingArea, SVGBackend};
use plotters::style::RGBAColor;

fn sample_figure() -> Figure {
    let mut figure = Figure::with_size(200, 150).expect("figure");
    Plots::default()
        .bar(&mut figure, vec![1.0, 2.0, 3.0], None, None, None)
        .expect("bar");
    figure
}

/// Canvas with a fixed size that only paints its background.
struct Blank {
    size: (u32, u32),
}

impl Canvas for Blank {
    fn gca(&mut self) -> AxisId {
        AxisId::new(0)
    }

    fn draw(&mut self, _axis: AxisId, _request: ChartRequest) -> PlotsResult<()> {
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> PlotsResult<()> {
        root.fill(&RGBAColor::from(Color::rgb(0.0, 0.0, 1.0)))?;
        Ok(())
    }
}

#[test]
fn png_payload_decodes_to_figure_dimensions() {
    let bytes = encode_canvas(&sample_figure(), ImageFormat::Png).expect("encode");

    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let image = image::load_from_memory(&bytes).expect("png");
    assert_eq!((image.width(), image.height()), (200, 150));
}

#[test]
fn png_background_is_painted() {
    let figure = Figure::with_size(4, 4)
        .expect("figure")
        .with_facecolor(Color::rgb(1.0, 0.0, 0.0));
    let bytes = encode_canvas(&figure, ImageFormat::Png).expect("encode");
    let image = image::load_from_memory(&bytes).expect("png").to_rgb8();

    assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0]);
}

#[test]
fn encoding_is_deterministic() {
    let figure = sample_figure();
    let first = encode_canvas(&figure, ImageFormat::Png).expect("first");
    let second = encode_canvas(&figure, ImageFormat::Png).expect("second");
    assert_eq!(first, second);
}

#[test]
fn get_data_returns_single_line_base64_png() {
    let figure = sample_figure();
    let encoded = Plots::default()
        .get_data(&figure, EncodeOptions::new())
        .expect("get_data");

    assert!(!encoded.contains('\n'));
    assert!(
        encoded
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '/' | '='))
    );
    let bytes = Base64Alphabet::Standard.decode(&encoded).expect("base64");
    let image = image::load_from_memory(&bytes).expect("png");
    assert_eq!((image.width(), image.height()), (200, 150));
}

#[test]
fn url_safe_alphabet_avoids_plus_and_slash() {
    let figure = sample_figure();
    let options = EncodeOptions::new().with_alphabet(Base64Alphabet::UrlSafe);
    let encoded = Plots::default()
        .get_data(&figure, options)
        .expect("get_data");

    assert!(!encoded.contains(['+', '/']));
    let bytes = Base64Alphabet::UrlSafe.decode(&encoded).expect("base64");
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[test]
fn get_data_does_not_change_the_figure() {
    let figure = sample_figure();
    let before = figure.clone();
    Plots::default()
        .get_data(&figure, EncodeOptions::new())
        .expect("get_data");
    assert_eq!(figure, before);
}

#[test]
fn svg_get_data_decodes_to_a_sized_document() {
    let figure = sample_figure();
    let options = EncodeOptions::new().with_format(ImageFormat::Svg);
    let encoded = Plots::default()
        .get_data(&figure, options)
        .expect("get_data");
    let bytes = Base64Alphabet::Standard.decode(&encoded).expect("base64");
    let text = String::from_utf8(bytes).expect("utf-8");

    assert!(text.contains("<svg"));
    assert!(text.contains(r#"width="200""#));
    assert!(text.contains(r#"height="150""#));
    assert!(text.contains("<rect"));
    assert!(text.trim_end().ends_with("</svg>"));
}

#[test]
fn scatter_markers_become_svg_circles() {
    let mut figure = Figure::with_size(320, 240).expect("figure");
    let axis = figure.gca();
    figure
        .draw(
            axis,
            ChartRequest::Scatter {
                x: vec![0.0, 1.0, 2.0],
                y: vec![2.0, 0.0, 1.0],
                options: DrawOptions::new(),
            },
        )
        .expect("scatter");
    let bytes = encode_canvas(&figure, ImageFormat::Svg).expect("svg");
    let text = String::from_utf8(bytes).expect("utf-8");

    assert!(text.matches("<circle").count() >= 3);
}

#[test]
fn canvas_paints_onto_a_caller_owned_backend() {
    let figure = sample_figure();
    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, (400, 300)).into_drawing_area();
        figure.paint(&root).expect("paint");
        root.present().expect("present");
    }
    assert!(document.contains(r#"width="400""#));
    assert!(document.contains("<rect"));
}

#[test]
fn empty_canvas_size_is_rejected() {
    let err = encode_canvas(&Blank { size: (0, 10) }, ImageFormat::Png).expect_err("zero width");
    assert!(matches!(err, PlotsError::InvalidViewport { width: 0, height: 10 }));
}

#[test]
fn custom_canvas_encodes_its_own_painting() {
    let bytes = encode_canvas(&Blank { size: (3, 2) }, ImageFormat::Png).expect("png");
    let image = image::load_from_memory(&bytes).expect("png").to_rgb8();
    assert_eq!(image.dimensions(), (3, 2));
    assert_eq!(image.get_pixel(2, 1).0, [0, 0, 255]);
}

#[test]
fn histogram_figure_encodes_in_both_formats() {
    let mut figure = Figure::new();
    Plots::default()
        .hist(
            &mut figure,
            &[1.0, 2.0, 2.0, 3.0, 3.0, 3.0],
            None,
            Some(DrawOptions::new().with_bins(3)),
        )
        .expect("hist");

    assert!(encode_canvas(&figure, ImageFormat::Png).is_ok());
    let svg = encode_canvas(&figure, ImageFormat::Svg).expect("svg");
    let text = String::from_utf8(svg).expect("utf-8");
    assert!(text.matches("<rect").count() >= 3);
}

#[test]
fn invalid_base64_is_reported() {
    let err = Base64Alphabet::Standard
        .decode("not base64!")
        .expect_err("must fail");
    assert!(matches!(err, PlotsError::Encode(_)));
}
