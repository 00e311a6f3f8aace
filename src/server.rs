use bytes::BufMut;
use futures::TryStreamExt;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::multipart::{FormData, Part};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::config::ServerConfig;
use crate::upload::{ProcessedUpload, UploadError, UploadService};

/// Multipart field that carries the spreadsheet
pub const FILE_FIELD: &str = "file";

const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Catalog importer</title></head>
  <body>
    <h1>Upload a catalog spreadsheet</h1>
    <form action="/upload" method="post" enctype="multipart/form-data">
      <input type="file" name="file" accept=".xlsx,.xls">
      <button type="submit">Convert to CSV</button>
    </form>
  </body>
</html>
"#;

/// The file part of an upload form
struct FilePart {
    filename: String,
    bytes: Vec<u8>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse {
        status: "healthy",
        service: "catalog-importer",
    }))
}

async fn index_page() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::html(INDEX_HTML))
}

/// Pull the `file` part out of the form. `Ok(None)` when the form has none.
async fn read_file_part(mut form: FormData) -> Result<Option<FilePart>, UploadError> {
    while let Some(part) = form
        .try_next()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if part.name() != FILE_FIELD {
            continue;
        }
        // A part without a filename is a plain form field, not a file
        let Some(filename) = part.filename().map(str::to_string) else {
            return Ok(None);
        };
        let bytes = read_part_bytes(part).await?;
        return Ok(Some(FilePart { filename, bytes }));
    }
    Ok(None)
}

async fn read_part_bytes(part: Part) -> Result<Vec<u8>, UploadError> {
    part.stream()
        .try_fold(Vec::new(), |mut acc, chunk| async move {
            acc.put(chunk);
            Ok::<_, warp::Error>(acc)
        })
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))
}

async fn handle_upload(form: FormData, service: Arc<UploadService>) -> Result<Response, Rejection> {
    let file_part = match read_file_part(form).await {
        Ok(Some(part)) => part,
        Ok(None) => return Ok(error_reply(&UploadError::MissingFilePart)),
        Err(e) => return Ok(error_reply(&e)),
    };

    // Decoding is synchronous and can be slow on large workbooks
    let result = tokio::task::spawn_blocking(move || {
        service.process_upload(Some(file_part.filename.as_str()), &file_part.bytes)
    })
    .await;

    let reply = match result {
        Ok(Ok(processed)) => csv_reply(processed),
        Ok(Err(e)) => error_reply(&e),
        Err(join_error) => {
            warn!("Upload worker failed: {}", join_error);
            error_reply(&UploadError::Processing(join_error.to_string()))
        }
    };
    Ok(reply)
}

/// `Content-Disposition` value for a download, with characters that cannot
/// appear inside the quoted filename replaced by `_`
pub fn content_disposition(download_name: &str) -> String {
    let safe_name: String = download_name
        .chars()
        .map(|c| if c.is_control() || c == '"' || c == '\\' { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{safe_name}\"")
}

fn csv_reply(processed: ProcessedUpload) -> Response {
    let disposition = content_disposition(&processed.download_name);
    let reply = warp::reply::with_header(processed.csv, "content-type", "text/csv");
    warp::reply::with_header(reply, "content-disposition", disposition).into_response()
}

fn error_reply(error: &UploadError) -> Response {
    warp::reply::with_status(error.to_string(), error.status()).into_response()
}

/// Turn unmatched routes and rejected requests into plain-text replies
async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (message, status) = if err.is_not_found() {
        ("Not Found".to_string(), StatusCode::NOT_FOUND)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ("File too large".to_string(), StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ("Method Not Allowed".to_string(), StatusCode::METHOD_NOT_ALLOWED)
    } else {
        // Requests to /upload that are not multipart forms carry no file part
        (UploadError::MissingFilePart.to_string(), StatusCode::BAD_REQUEST)
    };
    Ok(warp::reply::with_status(message, status).into_response())
}

fn with_service(
    service: Arc<UploadService>,
) -> impl Filter<Extract = (Arc<UploadService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

/// All routes of the upload service
pub fn routes(
    service: Arc<UploadService>,
    max_upload_bytes: u64,
) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    let index = warp::path::end().and(warp::get()).and_then(index_page);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_check);

    let upload = warp::path("upload")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::multipart::form().max_length(max_upload_bytes))
        .and(with_service(service))
        .and_then(handle_upload);

    index
        .map(Reply::into_response)
        .or(health.map(Reply::into_response))
        .unify()
        .or(upload)
        .unify()
        .recover(handle_rejection)
        .unify()
}

/// Run the upload service until the process is stopped
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.upload_dir)?;
    let service = Arc::new(
        UploadService::new(&config.upload_dir).with_error_log(&config.error_log),
    );

    let addr = config.socket_addr();
    info!("Server starting on {}", addr);
    info!("Upload form: http://{}/", addr);
    info!("Upload endpoint: POST http://{}/upload", addr);
    info!("Uploads are staged in {}", config.upload_dir.display());

    warp::serve(routes(service, config.max_upload_bytes))
        .run(addr)
        .await;

    Ok(())
}
