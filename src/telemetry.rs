//! Telemetry helpers for applications embedding `series-geom`.
//!
//! Layout passes emit `tracing` events (`debug` on data replacement, `trace`
//! per pass, `warn` on ignored configuration). Subscriber setup stays
//! explicit and opt-in; hosts can also wire their own subscriber and skip
//! this module entirely.

/// Initializes a default `tracing` subscriber when the `telemetry` feature
/// is enabled, honoring `RUST_LOG` and falling back to `info`.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or
/// if a global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Initializes a default `tracing` subscriber with an explicit fallback
/// filter directive (e.g. `"series_geom=trace"`).
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
