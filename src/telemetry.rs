//! Log output for the `render_gallery` binary and for hosts that embed
//! `plots` without a subscriber of their own.
//!
//! The library itself only emits `tracing` events. Nothing is printed
//! until a subscriber is installed, either by the host or through
//! `init_default_tracing`.

/// Installs a compact `fmt` subscriber when the `telemetry` feature is
/// enabled.
///
/// The filter comes from `RUST_LOG` and defaults to `plots=info`; use
/// `RUST_LOG=plots=debug` to see per-chart and per-encode events.
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("plots=info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn nothing_is_installed_without_the_feature() {
        assert!(!init_default_tracing());
    }
}
