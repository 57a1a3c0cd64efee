//! Font registration for titles and tick labels.
//!
//! plotters draws text through `ab_glyph`, which only knows fonts that were
//! registered at runtime. The first call to [`text_available`] looks for a
//! sans-serif face in `PLOTS_FONT` and then in the usual system locations;
//! figures render without text when none is found.

use std::fs;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use plotters::style::{FontStyle, register_font};
use tracing::{debug, warn};

use crate::error::{PlotsError, PlotsResult};

/// Environment variable naming a `.ttf`/`.otf` file to use for all text.
pub const FONT_ENV: &str = "PLOTS_FONT";

/// Family every label and title is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static DISCOVERY: Once = Once::new();
static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Registers `bytes` as the sans-serif face used for every figure.
pub fn register_font_bytes(bytes: &'static [u8]) -> PlotsResult<()> {
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| {
        PlotsError::InvalidConfig("font data is not a usable TrueType/OpenType face".to_owned())
    })?;
    REGISTERED.store(true, Ordering::Release);
    Ok(())
}

/// Reads and registers a font file. The bytes stay alive for the rest of
/// the process.
pub fn register_font_file(path: impl AsRef<Path>) -> PlotsResult<()> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        PlotsError::InvalidConfig(format!("failed to read font `{}`: {err}", path.display()))
    })?;
    register_font_bytes(Box::leak(bytes.into_boxed_slice()))?;
    debug!(path = %path.display(), "registered font");
    Ok(())
}

/// Whether a font is registered, searching once for one when nothing was
/// registered explicitly.
#[must_use]
pub fn text_available() -> bool {
    DISCOVERY.call_once(|| {
        if REGISTERED.load(Ordering::Acquire) {
            return;
        }
        let configured = std::env::var(FONT_ENV).ok();
        let candidates = configured
            .iter()
            .map(String::as_str)
            .chain(SYSTEM_FONTS.iter().copied());
        for candidate in candidates {
            if !Path::new(candidate).is_file() {
                continue;
            }
            match register_font_file(candidate) {
                Ok(()) => return,
                Err(err) => warn!(error = %err, "skipping font"),
            }
        }
        debug!("no font found, figures are drawn without text");
    });
    REGISTERED.load(Ordering::Acquire)
}
