/// Indentation emitted per depth level in the text rendering
pub const INDENT_UNIT: &str = "  ";

/// Marker placed between the indentation and the region path
pub const RECORD_MARKER: &str = "- ";

/// Default log filter for the `serve` command
pub const DEFAULT_SERVE_LOG_FILTER: &str = "info";

/// Default log filter for the `list` command (stdout must stay clean)
pub const DEFAULT_LIST_LOG_FILTER: &str = "warn";
