use plots::api::{BarHeights, EncodeOptions, ImageFormat};
use plots::{
    AppConfig, DrawOptions, Figure, ImgAttributes, Plots, PlotsResult, StandaloneHost, render_img,
};
use std::fs;
use std::path::PathBuf;

const DEFAULT_OUTPUT_PATH: &str = "target/plots_gallery.html";

#[derive(Debug)]
struct CliArgs {
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    format: ImageFormat,
}

type Chart = fn(&Plots, &mut Figure) -> PlotsResult<()>;

fn main() {
    let _ = plots::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            AppConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => AppConfig::new(),
    };
    let mut host = StandaloneHost::new().with_config(config);
    let plots = Plots::init_app(&mut host).map_err(|err| format!("failed to bind: {err}"))?;
    let options = EncodeOptions::new().with_format(args.format);

    let mut body = String::new();
    for (name, chart) in CHARTS {
        let tag = chart_tag(&plots, name, *chart, options)?;
        body.push_str(&format!("<figure>{tag}<figcaption>{name}</figcaption></figure>\n"));
    }

    if let Some(parent) = args.output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create `{}`: {err}", parent.display()))?;
    }
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>plots gallery</title>\
         <style>figure{{display:inline-block;margin:8px}}.chart{{width:480px}}</style></head>\n\
         <body>\n{body}</body>\n</html>\n"
    );
    fs::write(&args.output_path, page)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output_path.display()))?;
    println!("wrote {}", args.output_path.display());
    Ok(())
}

/// Draws one chart titled `name` and returns its `<img>` tag.
fn chart_tag(
    plots: &Plots,
    name: &str,
    chart: Chart,
    options: EncodeOptions,
) -> Result<String, String> {
    let mut figure = Figure::new();
    chart(plots, &mut figure).map_err(|err| format!("chart `{name}` failed: {err}"))?;
    if let Some(axis) = figure.current_axis() {
        figure
            .axes_mut(axis)
            .map_err(|err| err.to_string())?
            .set_title(name);
    }
    let data = plots
        .get_data(&figure, options)
        .map_err(|err| format!("chart `{name}` failed to encode: {err}"))?;
    let attributes = ImgAttributes::new()
        .with_alt(name)
        .with_class("chart")
        .with_format(options.format);
    render_img(Some(data.as_str()), &attributes).map_err(|err| err.to_string())
}

const CHARTS: &[(&str, Chart)] = &[
    ("hist", hist),
    ("errorbar", errorbar),
    ("violinplot", violinplot),
    ("eventplot", eventplot),
    ("hist2d", hist2d),
    ("hexbin", hexbin),
    ("scatter_hist2d", scatter_hist2d),
    ("scatter_hexbin", scatter_hexbin),
    ("bar", bar),
    ("bar_default_height", bar_default_height),
    ("pie", pie),
    ("boxplot", boxplot),
    ("quiver", quiver),
    ("streamplot", streamplot),
    ("contourf", contourf),
];

fn hist(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    plots.hist(fig, &normal(400, 0.0), None, None).map(drop)
}

fn errorbar(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let x: Vec<f64> = (0..8).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| (v * 0.7).sin()).collect();
    let kws = DrawOptions::new()
        .with_extra("yerr", 0.2)
        .with_extra("capsize", 3.0)
        .with_extra("fmt", "o-");
    plots.errorbar(fig, &x, &y, None, Some(kws)).map(drop)
}

fn violinplot(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let dataset = vec![normal(200, 0.0), normal(201, 1.5), normal(202, -1.0)];
    let kws = DrawOptions::new().with_extra("showmedians", true);
    plots.violinplot(fig, &dataset, &[], None, Some(kws)).map(drop)
}

fn eventplot(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let positions = vec![normal(40, 0.0), normal(41, 2.0), normal(42, 4.0)];
    plots.eventplot(fig, &positions, None, None).map(drop)
}

fn hist2d(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (x, y) = correlated(800);
    let kws = DrawOptions::new().with_bins(20);
    plots.hist2d(fig, &x, &y, None, Some(kws)).map(drop)
}

fn hexbin(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (x, y) = correlated(800);
    let kws = DrawOptions::new().with_extra("gridsize", 25_i64);
    plots.hexbin(fig, &x, &y, None, Some(kws)).map(drop)
}

fn scatter_hist2d(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (x, y) = correlated(300);
    let scatter = DrawOptions::new().with_marker_size(4.0);
    plots
        .scatter_hist2d(fig, &x, &y, None, None, Some(scatter))
        .map(drop)
}

fn scatter_hexbin(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (x, y) = correlated(300);
    let hexbin = DrawOptions::new().with_extra("gridsize", 20_i64);
    let scatter = DrawOptions::new().with_marker_size(4.0);
    plots
        .scatter_hexbin(fig, &x, &y, None, Some(hexbin), Some(scatter))
        .map(drop)
}

fn bar(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let labels = ["north", "south", "east", "west"];
    let heights = BarHeights::from(vec![12.0, 30.0, 21.0, 8.0]);
    plots.bar(fig, &labels[..], Some(heights), None, None).map(drop)
}

fn bar_default_height(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    plots.bar(fig, vec![1.0, 2.0, 3.0], None, None, None).map(drop)
}

fn pie(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let kws = DrawOptions::new().with_extra("startangle", 90.0);
    plots.pie(fig, &[35.0, 25.0, 25.0, 15.0], None, Some(kws)).map(drop)
}

fn boxplot(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let dataset = vec![normal(100, 0.0), normal(101, 1.0), normal(102, 0.5)];
    plots.boxplot(fig, &dataset, None, None).map(drop)
}

fn quiver(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (mut x, mut y, mut u, mut v) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for row in 0..8 {
        for col in 0..8 {
            let (px, py) = (f64::from(col) - 3.5, f64::from(row) - 3.5);
            x.push(px);
            y.push(py);
            u.push(-py);
            v.push(px);
        }
    }
    plots.quiver(fig, &x, &y, &u, &v, None, None).map(drop)
}

fn streamplot(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (x, y, u) = field(|_, py| 1.0 - py * py);
    let (_, _, v) = field(|px, py| -1.0 - px + py * py);
    plots.streamplot(fig, &x, &y, &u, &v, None, None).map(drop)
}

fn contourf(plots: &Plots, fig: &mut Figure) -> PlotsResult<()> {
    let (x, y, z) = field(|px, py| (-(px * px + py * py) / 2.0).exp());
    let kws = DrawOptions::new().with_cmap("viridis");
    plots.contourf(fig, &x, &y, &z, 8_usize, None, Some(kws)).map(drop)
}

/// Deterministic, roughly normal samples (sum of uniforms) around `center`.
fn normal(count: usize, center: f64) -> Vec<f64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d ^ count as u64;
    let mut uniform = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|_| center + (0..6).map(|_| uniform()).sum::<f64>() - 3.0)
        .collect()
}

fn correlated(count: usize) -> (Vec<f64>, Vec<f64>) {
    let x = normal(count, 0.0);
    let noise = normal(count + 1, 0.0);
    let y = x.iter().zip(&noise).map(|(a, n)| 0.6 * a + 0.8 * n).collect();
    (x, y)
}

fn field(f: impl Fn(f64, f64) -> f64) -> (Vec<f64>, Vec<f64>, Vec<Vec<f64>>) {
    let axis: Vec<f64> = (0..25).map(|i| -3.0 + 0.25 * f64::from(i)).collect();
    let grid = axis
        .iter()
        .map(|py| axis.iter().map(|px| f(*px, *py)).collect())
        .collect();
    (axis.clone(), axis, grid)
}

fn parse_args() -> Result<CliArgs, String> {
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut config_path = None;
    let mut format = ImageFormat::Png;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --format".to_owned())?;
                format = value.parse().map_err(|err| format!("--format: {err}"))?;
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => return Err(format!("unknown argument `{arg}`\n\n{}", usage_message())),
        }
    }

    Ok(CliArgs {
        output_path,
        config_path,
        format,
    })
}

fn usage_message() -> &'static str {
    "usage: render_gallery [--output <page.html>] [--config <host_config.json>] [--format png|svg]"
}
