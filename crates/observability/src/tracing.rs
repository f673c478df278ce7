//! JSON tracing subscriber.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

pub(crate) fn init(directive: Option<&str>) {
    let (filter, rejected) = resolve_filter(directive);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_current_span(true)
        .try_init()
        .is_ok();

    // Reported only once a subscriber exists to receive it.
    if let (true, Some(e)) = (installed, rejected) {
        ::tracing::warn!(?directive, error = %e, "ignoring invalid log filter");
    }
}

/// Filter from `directive`, else `RUST_LOG`, else `info`. An unparsable
/// directive is returned alongside the fallback filter.
fn resolve_filter(directive: Option<&str>) -> (EnvFilter, Option<ParseError>) {
    let mut rejected = None;
    if let Some(directive) = directive {
        match EnvFilter::try_new(directive) {
            Ok(filter) => return (filter, None),
            Err(e) => rejected = Some(e),
        }
    }

    let fallback = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    (fallback, rejected)
}
