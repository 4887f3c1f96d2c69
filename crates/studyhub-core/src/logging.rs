//! Structured logging schema and field name constants for studyhub.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same field names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, fallback applied or retry scheduled |
//! | INFO  | Lifecycle events (startup, shutdown), completed searches |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (individual results, parsed questions) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "search", "inference", "notes", "store"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "orchestrator", "youtube", "gemini", "retry", "fallback"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "generate_quiz", "export"
pub const OPERATION: &str = "op";

/// Provider adapter name.
pub const PROVIDER: &str = "provider";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Search topic text.
pub const TOPIC: &str = "topic";

/// Search bundle id.
pub const BUNDLE_ID: &str = "bundle_id";

/// Study note id.
pub const NOTE_ID: &str = "note_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a provider.
pub const RESULT_COUNT: &str = "result_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Retry fields ──────────────────────────────────────────────────────────

/// Zero-based attempt counter.
pub const ATTEMPT: &str = "attempt";

/// Scheduled backoff delay in milliseconds.
pub const DELAY_MS: &str = "delay_ms";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Machine-readable error kind.
pub const ERROR_KIND: &str = "error_kind";

/// Whether placeholder content replaced the provider result.
pub const FALLBACK: &str = "fallback";
