use crate::constants::{DEFAULT_HOST, DEFAULT_USER_AGENT};
use crate::protocol::RequestBody;
use crate::runner::Config;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Downloads the calibration files for your camera. All files are stored in
/// a subdirectory named after the camera's serial number.
#[derive(Debug, Parser)]
#[command(name = "thermapp-calibration", version)]
pub struct Cli {
    /// Camera serial number, as printed by the camera at start-up
    #[arg(long = "serialNumber", help_heading = "JSON data")]
    pub serial_number: String,

    #[arg(long = "fWVersion", help_heading = "JSON data")]
    pub fw_version: Option<String>,

    #[arg(long = "hWVersion", help_heading = "JSON data")]
    pub hw_version: Option<String>,

    /// Observed as "0"
    #[arg(long = "calibType", help_heading = "JSON data")]
    pub calib_type: Option<String>,

    /// Observed as "2.6.25"
    #[arg(long = "appVersion", help_heading = "JSON data")]
    pub app_version: Option<String>,

    #[arg(long = "androidVersion", help_heading = "JSON data")]
    pub android_version: Option<String>,

    #[arg(long = "phoneIMEI", help_heading = "JSON data")]
    pub phone_imei: Option<String>,

    #[arg(long = "phoneHWVersion", help_heading = "JSON data")]
    pub phone_hw_version: Option<String>,

    #[arg(long = "clientIP", help_heading = "JSON data")]
    pub client_ip: Option<String>,

    /// Service host or base URL
    #[arg(long, env = "THERMAPP_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Directory in which the serial-number directory is created
    #[arg(long = "output-dir", env = "THERMAPP_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long = "user-agent", env = "THERMAPP_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds; none by default
    #[arg(long, env = "THERMAPP_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Only the fields given on the command line end up in the body.
    pub fn request_body(&self) -> RequestBody {
        let fields = [
            ("serialNumber", Some(&self.serial_number)),
            ("fWVersion", self.fw_version.as_ref()),
            ("hWVersion", self.hw_version.as_ref()),
            ("calibType", self.calib_type.as_ref()),
            ("appVersion", self.app_version.as_ref()),
            ("androidVersion", self.android_version.as_ref()),
            ("phoneIMEI", self.phone_imei.as_ref()),
            ("phoneHWVersion", self.phone_hw_version.as_ref()),
            ("clientIP", self.client_ip.as_ref()),
        ];

        let mut body = RequestBody::new();
        for (key, value) in fields {
            if let Some(value) = value {
                body.insert(key, value.as_str());
            }
        }
        body
    }

    pub fn into_config(self) -> Config {
        Config {
            body: self.request_body(),
            host: self.host,
            output_dir: self.output_dir,
            user_agent: self.user_agent,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}
