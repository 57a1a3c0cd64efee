use plots::api::{ImageFormat, UTILS_TEMPLATE, raise_helper};
use plots::{ImgAttributes, PlotsError, render_img};

#[test]
fn data_only_renders_src_attribute() {
    let tag = render_img(Some("AAA="), &ImgAttributes::new()).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/png;base64,AAA="/>"#);
}

#[test]
fn alt_is_emitted_after_src() {
    let attributes = ImgAttributes::new().with_alt("x");
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/png;base64,AAA=" alt="x"/>"#);
}

#[test]
fn attributes_keep_fixed_order() {
    let attributes = ImgAttributes::new()
        .with_style("width:50%")
        .with_class("ui")
        .with_alt("x");
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    assert_eq!(
        tag,
        r#"<img src="data:image/png;base64,AAA=" alt="x" class="ui" style="width:50%"/>"#
    );
}

#[test]
fn class_without_alt_skips_alt_attribute() {
    let attributes = ImgAttributes::new().with_class("ui");
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/png;base64,AAA=" class="ui"/>"#);
}

#[test]
fn empty_data_still_renders() {
    let tag = render_img(Some(""), &ImgAttributes::new()).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/png;base64,"/>"#);
}

#[test]
fn empty_attribute_values_are_dropped() {
    let attributes = ImgAttributes::new()
        .with_alt("")
        .with_class("")
        .with_style("");
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/png;base64,AAA="/>"#);

    let attributes = ImgAttributes::new().with_alt("").with_class("ui");
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/png;base64,AAA=" class="ui"/>"#);
}

#[test]
fn utils_macro_matches_render_img_markup() {
    let fragments = [
        "macro render_img(data=None, alt_img=None, class_img=None, style=None)",
        "if data is none",
        "raise('You must send the data of the image.')",
        r#"<img src="data:image/png;base64,{{ data }}""#,
        r#"if alt_img %} alt="{{ alt_img }}""#,
        r#"if class_img %} class="{{ class_img }}""#,
        r#"if style %} style="{{ style }}""#,
        "/>",
        "endmacro",
    ];
    let positions: Vec<usize> = fragments
        .iter()
        .map(|fragment| {
            UTILS_TEMPLATE
                .find(fragment)
                .unwrap_or_else(|| panic!("template lacks `{fragment}`"))
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let attributes = ImgAttributes::new()
        .with_alt("a")
        .with_class("c")
        .with_style("s");
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    let order: Vec<usize> = [r#" alt="a""#, r#" class="c""#, r#" style="s""#]
        .iter()
        .map(|attribute| tag.find(attribute).expect("attribute present"))
        .collect();
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(tag.starts_with(r#"<img src="data:image/png;base64,AAA=""#));
    assert!(tag.ends_with("/>"));

    let err = render_img(None, &ImgAttributes::new()).expect_err("missing data");
    assert!(UTILS_TEMPLATE.contains(&err.to_string()));
}

#[test]
fn svg_format_changes_mime_subtype() {
    let attributes = ImgAttributes::new().with_format(ImageFormat::Svg);
    let tag = render_img(Some("PHN2Zz4="), &attributes).expect("tag");
    assert_eq!(tag, r#"<img src="data:image/svg+xml;base64,PHN2Zz4="/>"#);
}

#[test]
fn attribute_values_are_escaped() {
    let attributes = ImgAttributes::new().with_alt(r#"say "hi" <b>"#);
    let tag = render_img(Some("AAA="), &attributes).expect("tag");
    assert_eq!(
        tag,
        r#"<img src="data:image/png;base64,AAA=" alt="say &#34;hi&#34; &lt;b&gt;"/>"#
    );
}

#[test]
fn missing_data_is_rejected_with_fixed_message() {
    let err = render_img(None, &ImgAttributes::new().with_alt("x")).expect_err("must fail");
    assert!(matches!(err, PlotsError::MissingImageData));
    assert_eq!(err.to_string(), "You must send the data of the image.");
}

#[test]
fn raise_helper_always_fails_with_its_message() {
    let err = raise_helper("boom").expect_err("raise must fail");
    assert!(matches!(&err, PlotsError::Raised(message) if message == "boom"));
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn attributes_deserialize_from_partial_json() {
    let attributes: ImgAttributes =
        serde_json::from_str(r#"{"alt_img":"chart","format":"svg"}"#).expect("json");
    assert_eq!(attributes.alt_img.as_deref(), Some("chart"));
    assert_eq!(attributes.class_img, None);
    assert_eq!(attributes.format, ImageFormat::Svg);
}
