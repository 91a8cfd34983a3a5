pub const DEFAULT_HOST: &str = "api.therm-app.com";

pub const SERVICE_PATH: &str = "/mobileservice.svc";

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

// What the Android app sends.
pub const DEFAULT_USER_AGENT: &str = "Apache-HttpClient/UNAVAILABLE (Java/0)";

pub const CREATED_DATE_PATTERN: &str = r"^/Date\(([0-9]+)([+-][0-9]+)?\)/$";

pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
