pub mod data;
pub mod forecast;

use common::ApiResponse;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use web_sys::FormData;
use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Payload plus the service's status message.
pub type Reply<T> = (T, Option<String>);

/// Checks the HTTP status, decodes the envelope and unwraps `ok: false`.
async fn read_reply<T>(method: &str, endpoint: &str, response: Response) -> Result<Reply<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        // the service still describes most failures with an envelope
        let error_response: Result<ApiResponse<serde_json::Value>, _> = response.json().await;
        return Err(match error_response.ok().and_then(|r| r.message) {
            Some(message) => {
                log::error!("{} {} - API error: {}", method, endpoint, message);
                format!("Error: {}", message)
            }
            None => {
                let error_msg = format!("HTTP error: {}", response.status());
                log::error!("{} {} - {}", method, endpoint, error_msg);
                error_msg
            }
        });
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let api_response: ApiResponse<T> = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;

    match api_response.into_result() {
        Ok(reply) => {
            log::info!("{} {} - Success", method, endpoint);
            Ok(reply)
        }
        Err(message) => {
            log::warn!("{} {} - Rejected: {}", method, endpoint, message);
            Err(message)
        }
    }
}

fn request_failed(method: &str, endpoint: &str, e: gloo_net::Error) -> String {
    let error_msg = format!("Request failed: {}", e);
    log::error!("{} {} - {}", method, endpoint, error_msg);
    error_msg
}

/// Common GET request handler keeping the status message
pub async fn get_reply<T>(endpoint: &str) -> Result<Reply<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    get_reply_from(&api_base(), endpoint).await
}

/// GET against an explicit base URL instead of the configured one.
pub async fn get_reply_from<T>(base: &str, endpoint: &str) -> Result<Reply<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", base, endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| request_failed("GET", endpoint, e))?;

    read_reply("GET", endpoint, response).await
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    get_reply(endpoint).await.map(|(data, _)| data)
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| request_failed("POST", endpoint, e))?;

    read_reply("POST", endpoint, response).await.map(|(data, _)| data)
}

/// Multipart POST request handler, used for file uploads
pub async fn post_form<T>(endpoint: &str, form: FormData) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("POST (multipart) request to: {}", url);

    let response = Request::post(&url)
        .body(form)
        .map_err(|e| {
            let error_msg = format!("Failed to build request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| request_failed("POST", endpoint, e))?;

    read_reply("POST", endpoint, response).await.map(|(data, _)| data)
}
