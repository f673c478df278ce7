//! Process-wide tracing setup shared by the binaries and integration tests.

/// Initialize tracing with `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(None);
}

/// Initialize tracing with an explicit filter directive, falling back to
/// `RUST_LOG` and then `info` when `directive` is `None` or unparsable.
pub fn init_with_filter(directive: Option<&str>) {
    tracing::init(directive);
}

/// Subscriber construction (filters, JSON formatting).
pub mod tracing;
