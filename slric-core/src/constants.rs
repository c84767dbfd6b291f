//! Shared constants for the SLRIC influence engine.

/// SLRIC version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default quota as a percentage of weighted in-degree.
pub const DEFAULT_QUOTA_PERCENT: f64 = 20.0;

/// Default quota percentage for the interdependence entry point.
pub const DEFAULT_INTERDEPENDENCE_QUOTA_PERCENT: f64 = 50.0;

/// Default maximal coalition size.
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Default maximal propagation path length.
pub const DEFAULT_PATH_LIMIT: usize = 3;

/// Default interdependence model (product path strength).
pub const DEFAULT_INTERDEPENDENCE_MODEL: u8 = 1;

// ---- Personalized walk ----

/// Default PageRank damping factor.
pub const DEFAULT_DAMPING: f64 = 0.85;

/// Default PageRank iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default PageRank per-node convergence tolerance.
pub const DEFAULT_WALK_TOLERANCE: f64 = 1e-6;

// ---- Tolerance convention ----

/// Relative tolerance for all floating-point comparisons.
pub const REL_TOLERANCE: f64 = 1e-9;

/// Absolute tolerance floor for comparisons near zero.
pub const ABS_TOLERANCE: f64 = 1e-12;

// ---- Similarity ----

/// Default measurement error for interval construction.
pub const DEFAULT_EPSILON: f64 = 0.05;

// ---- Export ----

/// Default field separator for exported rows.
pub const DEFAULT_SEPARATOR: &str = ";";

/// Rows buffered before each write.
pub const DEFAULT_EXPORT_BATCH_SIZE: usize = 1000;

// ---- Result attribute names ----

/// Node attribute for the LRIC max-path score.
pub const SCORE_LRIC_MAX: &str = "lric_max";

/// Node attribute for the LRIC max-min path score.
pub const SCORE_LRIC_MAXMIN: &str = "lric_maxmin";

/// Node attribute for the LRIC personalized-walk score.
pub const SCORE_LRIC_PAGERANK: &str = "lric_pagerank";

/// Node attribute for the SRIC score.
pub const SCORE_SRIC: &str = "sric";

/// Node attribute for the interdependence score.
pub const SCORE_INTERDEPENDENCE: &str = "interdependence";
