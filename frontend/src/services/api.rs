//! HTTP calls to the csvtidy backend.
//!
//! Every call returns an [`AppResult`]; the backend's `{"status":"error"}`
//! body is unwrapped into [`AppError::Server`].

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::types::{AppError, AppResult, CleanOptions, CleanResponse, ErrorBody, UploadResponse};

/// Upload a CSV file and open a new session.
pub async fn upload_csv(file: File, backend_url: &str) -> AppResult<UploadResponse> {
    let form_data = FormData::new().map_err(|e| AppError::Browser(format!("FormData: {:?}", e)))?;
    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| AppError::Browser(format!("Failed to append file: {:?}", e)))?;

    let url = format!("{}/api/upload", backend_url);
    let response = Request::post(&url)
        .body(form_data)
        .map_err(|e| AppError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response).await
}

/// Run the selected cleaning steps on the session's raw data.
pub async fn clean_data(
    backend_url: &str,
    session_id: &str,
    options: CleanOptions,
) -> AppResult<CleanResponse> {
    let url = format!("{}/api/sessions/{}/clean", backend_url, session_id);
    let response = Request::post(&url)
        .json(&options)
        .map_err(|e| AppError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    read_json(response).await
}

/// Fetch the cleaned CSV text.
pub async fn download_csv(backend_url: &str, session_id: &str) -> AppResult<String> {
    let url = format!("{}/api/sessions/{}/download", backend_url, session_id);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(server_error(response).await);
    }

    response.text().await.map_err(|e| AppError::Network(e.to_string()))
}

/// Drop a session on the backend. A missing session is not an error.
pub async fn close_session(backend_url: &str, session_id: &str) -> AppResult<()> {
    let url = format!("{}/api/sessions/{}", backend_url, session_id);
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    match response.status() {
        204 | 404 => Ok(()),
        _ => Err(server_error(response).await),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    if !response.ok() {
        return Err(server_error(response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Network(format!("Failed to parse response: {}", e)))
}

async fn server_error(response: Response) -> AppError {
    let status = response.status();
    let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    AppError::Server {
        status,
        message: error_message(&text),
    }
}

/// Pull the `error` field out of a backend error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"status":"error","error":"Please upload a CSV file."}"#;
        assert_eq!(error_message(body), "Please upload a CSV file.");
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
