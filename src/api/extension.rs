//! Binding the dispatcher into a hosting web application.
//!
//! The host is reached only through [`HostApp`]: a mutable key/value
//! configuration plus registries for extensions, static asset bundles and
//! template globals. [`StandaloneHost`] implements it in memory for
//! applications without a framework.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::api::config::{
    AppConfig, BAR_HEIGHT, DEFAULT_BAR_HEIGHT, DEFAULT_COLOR_MAP, DEFAULT_STATIC_FOLDER,
    PLOTS_CMAP, PlotsConfig, STATIC_FOLDER,
};
use crate::api::markup::raise_helper;
use crate::api::plots::Plots;
use crate::error::{PlotsError, PlotsResult};

/// Name of the extension, its asset bundle and its dispatcher global.
pub const EXTENSION_NAME: &str = "plots";
/// Name of the error-raising template global.
pub const RAISE_GLOBAL: &str = "raise";
/// Template path of the `render_img` macro.
pub const UTILS_TEMPLATE_PATH: &str = "plots/utils.html";
/// Source of the `render_img` macro template.
pub const UTILS_TEMPLATE: &str = include_str!("../../templates/plots/utils.html");

pub type TemplateHelper = fn(&str) -> PlotsResult<()>;

/// Value exposed to the host's template environment.
#[derive(Clone)]
pub enum TemplateGlobal {
    Dispatcher(Arc<Plots>),
    Helper(TemplateHelper),
}

impl fmt::Debug for TemplateGlobal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatcher(plots) => f.debug_tuple("Dispatcher").field(plots).finish(),
            Self::Helper(_) => f.debug_tuple("Helper").field(&"fn(&str)").finish(),
        }
    }
}

impl TemplateGlobal {
    #[must_use]
    pub fn as_dispatcher(&self) -> Option<&Arc<Plots>> {
        match self {
            Self::Dispatcher(plots) => Some(plots),
            Self::Helper(_) => None,
        }
    }

    #[must_use]
    pub fn as_helper(&self) -> Option<TemplateHelper> {
        match self {
            Self::Helper(helper) => Some(*helper),
            Self::Dispatcher(_) => None,
        }
    }
}

/// Static files and templates shipped with the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundle {
    pub name: String,
    /// Directory the host serves static files from, relative to the bundle.
    pub static_folder: String,
    /// URL prefix for those files; `None` uses the host's default.
    pub static_url_path: Option<String>,
    /// Template path to template source.
    pub templates: IndexMap<String, &'static str>,
}

/// Capabilities the extension needs from a hosting application.
pub trait HostApp {
    fn config(&self) -> &AppConfig;

    fn config_mut(&mut self) -> &mut AppConfig;

    /// URL prefix under which the host serves its own static files.
    fn static_url_path(&self) -> Option<&str>;

    fn register_extension(&mut self, name: &str, plots: Arc<Plots>);

    /// Fails when a different bundle is already registered under the name.
    fn register_asset_bundle(&mut self, bundle: AssetBundle) -> PlotsResult<()>;

    fn add_template_global(&mut self, name: &str, value: TemplateGlobal);
}

impl Plots {
    /// Binds a dispatcher to `host`.
    ///
    /// Writes the configuration defaults the host has not set, builds the
    /// dispatcher from the resulting configuration and registers it with
    /// its asset bundle and the `plots` / `raise` template globals.
    pub fn init_app<H: HostApp + ?Sized>(host: &mut H) -> PlotsResult<Arc<Self>> {
        let app_config = host.config_mut();
        app_config.set_default(PLOTS_CMAP, DEFAULT_COLOR_MAP);
        app_config.set_default(STATIC_FOLDER, DEFAULT_STATIC_FOLDER);
        app_config.set_default(BAR_HEIGHT, DEFAULT_BAR_HEIGHT);

        let config = PlotsConfig::from_app_config(host.config())?;
        let plots = Arc::new(Self::new(config)?);

        let bundle = AssetBundle {
            name: EXTENSION_NAME.to_owned(),
            static_folder: format!("static/{}", plots.config().static_asset_path),
            static_url_path: host.static_url_path().map(str::to_owned),
            templates: IndexMap::from([(UTILS_TEMPLATE_PATH.to_owned(), UTILS_TEMPLATE)]),
        };
        host.register_asset_bundle(bundle)?;
        host.register_extension(EXTENSION_NAME, Arc::clone(&plots));
        host.add_template_global(EXTENSION_NAME, TemplateGlobal::Dispatcher(Arc::clone(&plots)));
        host.add_template_global(RAISE_GLOBAL, TemplateGlobal::Helper(raise_helper));

        debug!(
            cmap = plots.config().color_map_name.as_str(),
            bar_height = plots.config().bar_height_default,
            static_folder = plots.config().static_asset_path.as_str(),
            "bound plots extension"
        );
        Ok(plots)
    }
}

/// In-memory host for applications without a web framework.
#[derive(Debug, Clone, Default)]
pub struct StandaloneHost {
    config: AppConfig,
    static_url_path: Option<String>,
    extensions: IndexMap<String, Arc<Plots>>,
    bundles: IndexMap<String, AssetBundle>,
    globals: IndexMap<String, TemplateGlobal>,
}

impl StandaloneHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_static_url_path(mut self, path: impl Into<String>) -> Self {
        self.static_url_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&Arc<Plots>> {
        self.extensions.get(name)
    }

    #[must_use]
    pub fn asset_bundle(&self, name: &str) -> Option<&AssetBundle> {
        self.bundles.get(name)
    }

    #[must_use]
    pub fn template_global(&self, name: &str) -> Option<&TemplateGlobal> {
        self.globals.get(name)
    }

    /// Registered global names in registration order.
    pub fn template_global_names(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }

    /// Looks up a template by path across every registered bundle.
    #[must_use]
    pub fn template(&self, path: &str) -> Option<&'static str> {
        self.bundles
            .values()
            .find_map(|bundle| bundle.templates.get(path).copied())
    }
}

impl HostApp for StandaloneHost {
    fn config(&self) -> &AppConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    fn static_url_path(&self) -> Option<&str> {
        self.static_url_path.as_deref()
    }

    fn register_extension(&mut self, name: &str, plots: Arc<Plots>) {
        if self.extensions.insert(name.to_owned(), plots).is_some() {
            warn!(name, "replaced registered extension");
        }
    }

    fn register_asset_bundle(&mut self, bundle: AssetBundle) -> PlotsResult<()> {
        match self.bundles.get(&bundle.name) {
            Some(existing) if *existing != bundle => Err(PlotsError::Host(format!(
                "asset bundle `{}` is already registered with different content",
                bundle.name
            ))),
            Some(_) => Ok(()),
            None => {
                self.bundles.insert(bundle.name.clone(), bundle);
                Ok(())
            }
        }
    }

    fn add_template_global(&mut self, name: &str, value: TemplateGlobal) {
        if self.globals.insert(name.to_owned(), value).is_some() {
            warn!(name, "overwrote template global");
        }
    }
}
