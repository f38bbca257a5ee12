use chrono::{Local, NaiveDateTime};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::types::Device;

pub const DEFAULT_BASE_URL: &str = "https://app.rac.apws.panasonic.com/eolia/v2";

const TERMINAL_TYPE: u8 = 3;
const EOLIA_DATE_HEADER: &str = "X-Eolia-Date";
const EOLIA_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// URL provider for the three endpoints the session talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.base_url)
    }

    pub fn devices(&self) -> String {
        format!("{}/devices", self.base_url)
    }

    /// Read and write share this URL; only the method differs.
    pub fn status(&self, id: &str) -> String {
        format!("{}/devices/{id}/status", self.base_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub fn login_message(username: &str, password: &str) -> Value {
    json!({
        "idpw": {
            "id": username,
            "next_easy": true,
            "pass": password,
            "terminal_type": TERMINAL_TYPE
        }
    })
}

pub fn eolia_date(now: NaiveDateTime) -> String {
    now.format(EOLIA_DATE_FORMAT).to_string()
}

/// Headers sent with every call. The date is local time without offset.
pub fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json;charset=UTF-8"),
    );
    let date = eolia_date(Local::now().naive_local());
    if let Ok(value) = HeaderValue::from_str(&date) {
        headers.insert(EOLIA_DATE_HEADER, value);
    }
    headers
}

#[derive(Deserialize)]
struct DeviceList {
    ac_list: Vec<DeviceEntry>,
}

#[derive(Deserialize)]
struct DeviceEntry {
    appliance_id: String,
    nickname: String,
    product_code: String,
}

pub fn parse_device_list(body: &str) -> serde_json::Result<Vec<Device>> {
    let list: DeviceList = serde_json::from_str(body)?;
    Ok(list
        .ac_list
        .into_iter()
        .map(|entry| Device {
            id: entry.appliance_id,
            name: entry.nickname,
            model: entry.product_code,
        })
        .collect())
}

/// Parse an error body for inspection, keeping non-JSON text as a string.
pub fn response_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
