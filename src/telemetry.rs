//! Telemetry helpers for applications embedding `review-timeline`.
//!
//! Tracing setup stays explicit and opt-in. Rebuild passes log at `debug`,
//! per-frame and per-gesture details at `trace`.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_TRACING_FILTER: &str = "review_timeline=info";

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Honors `RUST_LOG`, falling back to `DEFAULT_TRACING_FILTER`. Returns
/// `false` when the feature is disabled or a global subscriber was already
/// installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_TRACING_FILTER)
}

/// Same as `init_default_tracing` with a caller-chosen fallback filter,
/// e.g. `"review_timeline=trace"` while debugging pointer handling.
#[must_use]
pub fn init_tracing_with_fallback(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
