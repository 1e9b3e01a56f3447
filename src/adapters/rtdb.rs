//! Firebase Realtime Database adapter (REST over HTTPS).
//!
//! Implements [`RemotePort`]. Every field maps to `<base><path>.json` with
//! the auth token as a query parameter: GET for reads, PUT for writes,
//! POST for history appends (the store assigns push-ids, giving the
//! append-only log).
//!
//! Missing fields read back as the JSON literal `null`, surfaced as
//! [`RemoteError::FieldMissing`] so callers can tell "no override set"
//! from a transport failure.
//!
//! ## Dual-target design
//!
//! - **`target_os = "espidf"`** — raw `esp_http_client` sys calls with a
//!   per-request timeout; a timed-out call is just a failed read/write.
//! - **`not(target_os = "espidf")`** — an in-memory store with injectable
//!   failure flags for host-side testing and simulation.

use crate::app::ports::{RemoteError, RemotePort};
use crate::telemetry::HistoryRecord;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

/// Per-request deadline. A slow store must not stall the control cycle
/// longer than this.
#[cfg(target_os = "espidf")]
const REQUEST_TIMEOUT_MS: i32 = 5_000;

/// Remote key-value store client.
pub struct RtdbAdapter {
    base_url: &'static str,
    auth_token: &'static str,
    #[cfg(not(target_os = "espidf"))]
    sim: SimStore,
}

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
struct SimStore {
    values: HashMap<String, String>,
    history: Vec<String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl RtdbAdapter {
    pub fn new(base_url: &'static str, auth_token: &'static str) -> Self {
        Self {
            base_url,
            auth_token,
            #[cfg(not(target_os = "espidf"))]
            sim: SimStore::default(),
        }
    }

    // ── Platform-specific raw transfer ────────────────────────

    #[cfg(target_os = "espidf")]
    fn request(
        &mut self,
        method: esp_idf_svc::sys::esp_http_client_method_t,
        path: &str,
        body: Option<&str>,
    ) -> Result<String, RemoteError> {
        use esp_idf_svc::sys::*;
        use std::ffi::CString;

        let url = format!("{}{}.json?auth={}", self.base_url, path, self.auth_token);
        let c_url = CString::new(url).map_err(|_| RemoteError::Malformed)?;

        let config = esp_http_client_config_t {
            url: c_url.as_ptr(),
            method,
            timeout_ms: REQUEST_TIMEOUT_MS,
            crt_bundle_attach: Some(esp_crt_bundle_attach),
            ..Default::default()
        };

        // SAFETY: the client handle is created, used, and destroyed within
        // this call; c_url outlives every use of the config.
        let client = unsafe { esp_http_client_init(&config) };
        if client.is_null() {
            return Err(RemoteError::RequestFailed);
        }
        // SAFETY: client is non-null and owned exclusively by this call.
        let result = unsafe { Self::perform(client, body) };
        unsafe { esp_http_client_cleanup(client) };
        result
    }

    /// Drive one open/write/read exchange on an initialised client handle.
    ///
    /// SAFETY: `client` must be a live handle from `esp_http_client_init`,
    /// not shared with any other context.
    #[cfg(target_os = "espidf")]
    unsafe fn perform(
        client: esp_idf_svc::sys::esp_http_client_handle_t,
        body: Option<&str>,
    ) -> Result<String, RemoteError> {
        use esp_idf_svc::sys::*;

        let payload = body.unwrap_or("");
        if body.is_some() {
            unsafe {
                esp_http_client_set_header(
                    client,
                    c"Content-Type".as_ptr(),
                    c"application/json".as_ptr(),
                );
            }
        }

        let rc = unsafe { esp_http_client_open(client, payload.len() as i32) };
        if rc == ESP_ERR_TIMEOUT {
            return Err(RemoteError::Timeout);
        }
        if rc != ESP_OK as i32 {
            return Err(RemoteError::NotConnected);
        }

        if !payload.is_empty() {
            let written = unsafe {
                esp_http_client_write(client, payload.as_ptr().cast(), payload.len() as i32)
            };
            if written < payload.len() as i32 {
                return Err(RemoteError::RequestFailed);
            }
        }

        if unsafe { esp_http_client_fetch_headers(client) } < 0 {
            return Err(RemoteError::RequestFailed);
        }

        let mut buf = [0u8; 256];
        let mut response = String::new();
        loop {
            let n =
                unsafe { esp_http_client_read(client, buf.as_mut_ptr().cast(), buf.len() as i32) };
            if n < 0 {
                return Err(RemoteError::RequestFailed);
            }
            if n == 0 {
                break;
            }
            response.push_str(&String::from_utf8_lossy(&buf[..n as usize]));
        }

        let status = unsafe { esp_http_client_get_status_code(client) };
        if !(200..300).contains(&status) {
            return Err(RemoteError::RequestFailed);
        }
        Ok(response)
    }

    #[cfg(target_os = "espidf")]
    fn get_raw(&mut self, path: &str) -> Result<String, RemoteError> {
        use esp_idf_svc::sys::esp_http_client_method_t_HTTP_METHOD_GET;
        self.request(esp_http_client_method_t_HTTP_METHOD_GET, path, None)
    }

    #[cfg(target_os = "espidf")]
    fn put_raw(&mut self, path: &str, body: &str) -> Result<(), RemoteError> {
        use esp_idf_svc::sys::esp_http_client_method_t_HTTP_METHOD_PUT;
        self.request(esp_http_client_method_t_HTTP_METHOD_PUT, path, Some(body))
            .map(|_| ())
    }

    #[cfg(target_os = "espidf")]
    fn post_raw(&mut self, path: &str, body: &str) -> Result<(), RemoteError> {
        use esp_idf_svc::sys::esp_http_client_method_t_HTTP_METHOD_POST;
        self.request(esp_http_client_method_t_HTTP_METHOD_POST, path, Some(body))
            .map(|_| ())
    }

    // ── Simulation (host targets) ─────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn get_raw(&mut self, path: &str) -> Result<String, RemoteError> {
        let _ = (self.base_url, self.auth_token);
        if self.sim.fail_reads {
            return Err(RemoteError::RequestFailed);
        }
        Ok(self
            .sim
            .values
            .get(path)
            .cloned()
            .unwrap_or_else(|| "null".to_string()))
    }

    #[cfg(not(target_os = "espidf"))]
    fn put_raw(&mut self, path: &str, body: &str) -> Result<(), RemoteError> {
        if self.sim.fail_writes {
            return Err(RemoteError::RequestFailed);
        }
        self.sim.values.insert(path.to_string(), body.to_string());
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn post_raw(&mut self, _path: &str, body: &str) -> Result<(), RemoteError> {
        if self.sim.fail_writes {
            return Err(RemoteError::RequestFailed);
        }
        self.sim.history.push(body.to_string());
        Ok(())
    }

    // ── Simulation controls ───────────────────────────────────

    /// Seed a field with a raw JSON body (e.g. `"\"ON\""` or `"true"`).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_insert(&mut self, path: &str, json: &str) {
        self.sim.values.insert(path.to_string(), json.to_string());
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_fail_reads(&mut self, fail: bool) {
        self.sim.fail_reads = fail;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_fail_writes(&mut self, fail: bool) {
        self.sim.fail_writes = fail;
    }

    /// Raw JSON body last written to `path`, if any.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_value(&self, path: &str) -> Option<&str> {
        self.sim.values.get(path).map(String::as_str)
    }

    /// Raw JSON bodies appended to the history log, oldest first.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_history(&self) -> &[String] {
        &self.sim.history
    }
}

// ───────────────────────────────────────────────────────────────
// RemotePort
// ───────────────────────────────────────────────────────────────

impl RemotePort for RtdbAdapter {
    fn get_string(&mut self, path: &str) -> Result<heapless::String<16>, RemoteError> {
        let body = self.get_raw(path)?;
        if body == "null" {
            return Err(RemoteError::FieldMissing);
        }
        let value: String = serde_json::from_str(&body).map_err(|_| RemoteError::Malformed)?;
        heapless::String::try_from(value.as_str()).map_err(|()| RemoteError::Malformed)
    }

    fn get_bool(&mut self, path: &str) -> Result<bool, RemoteError> {
        let body = self.get_raw(path)?;
        if body == "null" {
            return Err(RemoteError::FieldMissing);
        }
        serde_json::from_str(&body).map_err(|_| RemoteError::Malformed)
    }

    fn set_float(&mut self, path: &str, value: f32) -> Result<(), RemoteError> {
        // JSON has no NaN/Inf; a sensor sentinel cannot be published.
        if !value.is_finite() {
            return Err(RemoteError::Malformed);
        }
        let body = serde_json::to_string(&value).map_err(|_| RemoteError::Malformed)?;
        self.put_raw(path, &body)
    }

    fn set_int(&mut self, path: &str, value: i32) -> Result<(), RemoteError> {
        let body = serde_json::to_string(&value).map_err(|_| RemoteError::Malformed)?;
        self.put_raw(path, &body)
    }

    fn set_bool(&mut self, path: &str, value: bool) -> Result<(), RemoteError> {
        let body = serde_json::to_string(&value).map_err(|_| RemoteError::Malformed)?;
        self.put_raw(path, &body)
    }

    fn push_history(&mut self, record: &HistoryRecord) -> Result<(), RemoteError> {
        let body = serde_json::to_string(record).map_err(|_| RemoteError::Malformed)?;
        self.post_raw(crate::config::paths::HISTORY, &body)
    }
}
