//! Constants shared by the proxy, the client and the UI state holders.

use std::time::Duration;

/// Largest PDF accepted client-side: 25 MiB.
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 25 * 1024 * 1024;

/// Multipart field carrying the uploaded PDF.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Route the browser (and the API client) posts uploads to.
pub const UPLOAD_ROUTE: &str = "/api/upload";

/// Route for URL-based generation.
pub const GENERATE_ROUTE: &str = "/api/generate";

/// Upstream endpoint used when `UPSTREAM_UPLOAD_URL` is unset.
pub const DEFAULT_UPSTREAM_UPLOAD_URL: &str = "http://backend:8080/upload";

/// Message returned to callers for every proxy failure.
pub const UPLOAD_FAILURE_MESSAGE: &str = "Failed to process upload";

/// Progress increment applied per simulation tick.
pub const PROGRESS_STEP: u8 = 5;

/// Cadence of the progress simulation.
pub const PROGRESS_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How long the success (or error) state stays on screen before returning to idle.
pub const RESULT_DISPLAY_WINDOW: Duration = Duration::from_secs(2);

/// Message for the URL generation path, which has no backend contract yet.
pub const URL_GENERATION_UNAVAILABLE: &str = "URL-based generation is not available yet";
