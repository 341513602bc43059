/// Recognized input field names
pub const FIELD_LAT: &str = "lat";
pub const FIELD_LON: &str = "lon";
pub const FIELD_EVENTS_ATTENDED: &str = "events_attended";
pub const FIELD_LAST_ACCESS_TIME: &str = "last_access_time";

/// Tokens treated as an absent value (compared case-insensitively)
pub const ABSENT_TOKENS: [&str; 3] = ["nan", "none", "null"];

/// Output file names
pub const POINTS_FILE: &str = "members_points.json";
pub const HEAT_PRESENCE_FILE: &str = "members_heat_presence.json";
pub const HEAT_ENGAGEMENT_FILE: &str = "members_heat_engagement.json";
pub const METADATA_FILE: &str = "members_meta.json";

/// Geographic bounds (inclusive)
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Engagement weight model
pub const BASELINE_ENGAGEMENT_WEIGHT: f64 = 1.0;
pub const MAX_ENGAGEMENT_WEIGHT: f64 = 10.0;

/// Processing defaults
pub const DEFAULT_OUT_DIR: &str = "./out";
pub const DEFAULT_PRECISION_DECIMALS: i32 = 3;
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Beyond this many decimals, rounding an f64 coordinate is a no-op
pub const MAX_EFFECTIVE_DECIMALS: i32 = 15;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MEMBER_HEATMAP";

pub const PRIVACY_NOTE: &str =
    "No member_name or member_id included. Only lat/lon + derived weights/recency.";
