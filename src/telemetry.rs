//! Opt-in `tracing` subscriber setup for hosts embedding the widgets.
//!
//! Widgets emit `debug!` events for data replacement, render scheduling and
//! mode changes, `trace!` for donut key joins, and `warn!` when a colour or
//! detail series cannot be used. Hosts that already install a subscriber can
//! ignore this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "stat_charts=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"stat_charts=trace"` to follow every donut slice join.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn init_is_a_no_op_without_feature() {
        assert!(!super::init_default_tracing());
        assert!(!super::init_tracing_with_filter("stat_charts=trace"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = super::init_default_tracing();
        assert!(!super::init_tracing_with_filter("stat_charts=debug"));
    }
}
