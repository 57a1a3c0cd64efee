use tracing::trace;

use crate::api::canvas::{AxisId, BarHeights, BarPositions, Canvas, ChartRequest, ContourLevels};
use crate::api::config::PlotsConfig;
use crate::api::encoding::{self, EncodeOptions};
use crate::api::options::DrawOptions;
use crate::error::PlotsResult;

/// Configuration-aware drawing dispatcher.
///
/// Each chart method resolves the target axis (the given one, else the
/// canvas's current axis), fills in configured defaults where the caller
/// left them out, hands one request to the canvas and returns the axis.
/// Canvas errors propagate unchanged.
///
/// `Plots` never mutates its configuration; share it as `Arc<Plots>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plots {
    config: PlotsConfig,
}

impl Plots {
    pub fn new(config: PlotsConfig) -> PlotsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &PlotsConfig {
        &self.config
    }

    pub fn hist<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        ax: Option<AxisId>,
        hist_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Hist {
            x: x.to_vec(),
            options: hist_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    pub fn errorbar<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        ax: Option<AxisId>,
        errorbar_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::ErrorBar {
            x: x.to_vec(),
            y: y.to_vec(),
            options: errorbar_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    /// An empty `positions` places the violins at `1..=n`.
    pub fn violinplot<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        dataset: &[Vec<f64>],
        positions: &[f64],
        ax: Option<AxisId>,
        violinplot_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Violin {
            dataset: dataset.to_vec(),
            positions: positions.to_vec(),
            options: violinplot_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    pub fn eventplot<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        positions: &[Vec<f64>],
        ax: Option<AxisId>,
        eventplot_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Event {
            positions: positions.to_vec(),
            options: eventplot_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    pub fn hist2d<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        ax: Option<AxisId>,
        hist2d_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Hist2d {
            x: x.to_vec(),
            y: y.to_vec(),
            options: hist2d_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    pub fn hexbin<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        ax: Option<AxisId>,
        hexbin_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Hexbin {
            x: x.to_vec(),
            y: y.to_vec(),
            options: hexbin_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    /// 2D histogram with the samples scattered on top. The histogram uses
    /// the configured color map unless `hist2d_kws` names one.
    pub fn scatter_hist2d<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        ax: Option<AxisId>,
        hist2d_kws: Option<DrawOptions>,
        scatter_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let axis = self.resolve_axis(fig, ax);
        let background = ChartRequest::Hist2d {
            x: x.to_vec(),
            y: y.to_vec(),
            options: self.with_default_cmap(hist2d_kws),
        };
        self.draw(fig, axis, background)?;
        self.draw(fig, axis, scatter(x, y, scatter_kws))?;
        Ok(axis)
    }

    /// Hexbin with the samples scattered on top. The hexbin uses the
    /// configured color map unless `hexbin_kws` names one.
    pub fn scatter_hexbin<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        ax: Option<AxisId>,
        hexbin_kws: Option<DrawOptions>,
        scatter_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let axis = self.resolve_axis(fig, ax);
        let background = ChartRequest::Hexbin {
            x: x.to_vec(),
            y: y.to_vec(),
            options: self.with_default_cmap(hexbin_kws),
        };
        self.draw(fig, axis, background)?;
        self.draw(fig, axis, scatter(x, y, scatter_kws))?;
        Ok(axis)
    }

    /// Bars at `x`; `bar_height` falls back to the configured default.
    pub fn bar<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: impl Into<BarPositions>,
        bar_height: Option<BarHeights>,
        ax: Option<AxisId>,
        bar_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Bar {
            x: x.into(),
            height: bar_height
                .unwrap_or(BarHeights::Uniform(self.config.bar_height_default)),
            options: bar_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    pub fn pie<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        ax: Option<AxisId>,
        pie_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Pie {
            x: x.to_vec(),
            options: pie_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    pub fn boxplot<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        dataset: &[Vec<f64>],
        ax: Option<AxisId>,
        boxplot_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Box {
            dataset: dataset.to_vec(),
            options: boxplot_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    /// Arrows from `(x[i], y[i])` along `(u[i], v[i])`.
    #[allow(clippy::too_many_arguments)]
    pub fn quiver<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        u: &[f64],
        v: &[f64],
        ax: Option<AxisId>,
        quiver_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Quiver {
            x: x.to_vec(),
            y: y.to_vec(),
            u: u.to_vec(),
            v: v.to_vec(),
            options: quiver_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    /// Streamlines of the field `(u, v)` sampled on the `x` by `y` grid;
    /// `u[row][col]` lies at `(x[col], y[row])`.
    #[allow(clippy::too_many_arguments)]
    pub fn streamplot<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        u: &[Vec<f64>],
        v: &[Vec<f64>],
        ax: Option<AxisId>,
        streamplot_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Streamplot {
            x: x.to_vec(),
            y: y.to_vec(),
            u: u.to_vec(),
            v: v.to_vec(),
            options: streamplot_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn contourf<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        x: &[f64],
        y: &[f64],
        z: &[Vec<f64>],
        levels: impl Into<ContourLevels>,
        ax: Option<AxisId>,
        contourf_kws: Option<DrawOptions>,
    ) -> PlotsResult<AxisId> {
        let request = ChartRequest::Contourf {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.to_vec(),
            levels: levels.into(),
            options: contourf_kws.unwrap_or_default(),
        };
        self.dispatch(fig, ax, request)
    }

    /// Renders the canvas and returns the image as base64 text.
    pub fn get_data<C: Canvas + ?Sized>(
        &self,
        fig: &C,
        options: EncodeOptions,
    ) -> PlotsResult<String> {
        let bytes = encoding::encode_canvas(fig, options.format)?;
        Ok(options.alphabet.encode(&bytes))
    }

    fn resolve_axis<C: Canvas + ?Sized>(&self, fig: &mut C, ax: Option<AxisId>) -> AxisId {
        ax.unwrap_or_else(|| fig.gca())
    }

    fn dispatch<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        ax: Option<AxisId>,
        request: ChartRequest,
    ) -> PlotsResult<AxisId> {
        let axis = self.resolve_axis(fig, ax);
        self.draw(fig, axis, request)?;
        Ok(axis)
    }

    fn draw<C: Canvas + ?Sized>(
        &self,
        fig: &mut C,
        axis: AxisId,
        request: ChartRequest,
    ) -> PlotsResult<()> {
        trace!(chart = request.kind().as_str(), axis = axis.index(), "dispatching chart");
        fig.draw(axis, request)
    }

    fn with_default_cmap(&self, options: Option<DrawOptions>) -> DrawOptions {
        let mut options = options.unwrap_or_default();
        if options.cmap.is_none() {
            options.cmap = Some(self.config.color_map_name.clone());
        }
        options
    }
}

fn scatter(x: &[f64], y: &[f64], scatter_kws: Option<DrawOptions>) -> ChartRequest {
    ChartRequest::Scatter {
        x: x.to_vec(),
        y: y.to_vec(),
        options: scatter_kws.unwrap_or_default(),
    }
}
