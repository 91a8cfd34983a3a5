use crate::constants::{CREATED_DATE_PATTERN, NANOS_PER_MILLI, NANOS_PER_SECOND};
use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static CREATED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CREATED_DATE_PATTERN).expect("created date pattern is valid"));

/// Identifying fields sent with every request.
///
/// Holds only the fields the operator supplied, plus the session ID once the
/// server has handed one out. Each call renders it with its own `data` member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBody {
    fields: BTreeMap<String, String>,
    session_id: Option<String>,
}

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.get("serialNumber")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    /// Render the JSON object for one call.
    ///
    /// `None` omits the `data` member entirely, `Some(Value::Null)` sends an
    /// explicit `null`.
    pub fn render(&self, data: Option<Value>) -> Value {
        let mut object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        if let Some(session_id) = &self.session_id {
            object.insert("sessionID".to_string(), Value::String(session_id.clone()));
        }
        if let Some(data) = data {
            object.insert("data".to_string(), data);
        }

        Value::Object(object)
    }
}

/// Envelope wrapped around every JSON answer of the mobile service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub has_error: Option<bool>,
}

impl<T> ServiceResponse<T> {
    pub fn has_error(&self) -> bool {
        self.has_error.unwrap_or(false)
    }
}

/// One entry of the GetFilesList listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_by_user_id: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub length: u64,
    pub name: String,
    pub token: String,
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,
}

impl FileDescriptor {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_date.as_deref().and_then(decode_created_date)
    }
}

/// Decode a `/Date(<millis>[<±HHMM>])/` creation stamp into a UTC instant.
///
/// The server adds its own UTC offset into the encoded value, so the offset
/// is subtracted again. Returns `None` when the text does not follow that
/// grammar.
pub fn decode_created_date(raw: &str) -> Option<DateTime<Utc>> {
    let caps = CREATED_DATE.captures(raw)?;

    let millis: i64 = caps[1].parse().ok()?;
    let mut nanos = millis.checked_mul(NANOS_PER_MILLI)?;

    if let Some(offset) = caps.get(2) {
        let offset = parse_utc_offset(offset.as_str())?;
        nanos = nanos.checked_sub(i64::from(offset.local_minus_utc()) * NANOS_PER_SECOND)?;
    }

    Some(DateTime::from_timestamp_nanos(nanos))
}

/// `±HHMM` or `±HHMMSS`.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, digits) = raw.split_at_checked(1)?;
    if digits.len() != 4 && digits.len() != 6 {
        return None;
    }

    let hours: i32 = digits.get(0..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    let seconds: i32 = match digits.get(4..6) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let total = hours * 3600 + minutes * 60 + seconds;
    match sign {
        "+" => FixedOffset::east_opt(total),
        "-" => FixedOffset::west_opt(total),
        _ => None,
    }
}
