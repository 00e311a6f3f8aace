//! Per-request upload processing: store the bytes in a temp file, convert, clean up.

use catalog_lib::utils::write_error_to_log;
use catalog_lib::{ALIAS_TABLE, DecoderChain, output_filename, process_spreadsheet, to_csv_bytes};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use warp::http::StatusCode;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file part")]
    MissingFilePart,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid upload: {0}")]
    Multipart(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Processing error: could not store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// HTTP status reported for this error
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::MissingFilePart | UploadError::EmptyFilename | UploadError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            UploadError::Processing(_) | UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A converted upload, ready to be sent back as an attachment
#[derive(Debug)]
pub struct ProcessedUpload {
    pub download_name: String,
    pub csv: Vec<u8>,
    pub rows: usize,
}

/// Converts uploaded spreadsheets. Shared read-only across requests.
pub struct UploadService {
    decoders: DecoderChain,
    upload_dir: PathBuf,
    error_log: Option<PathBuf>,
}

impl UploadService {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        UploadService {
            decoders: DecoderChain::default(),
            upload_dir: upload_dir.into(),
            error_log: None,
        }
    }

    /// Append processing failures to `error_log`
    pub fn with_error_log(mut self, error_log: impl Into<PathBuf>) -> Self {
        self.error_log = Some(error_log.into());
        self
    }

    pub fn with_decoders(mut self, decoders: DecoderChain) -> Self {
        self.decoders = decoders;
        self
    }

    /// Convert one uploaded file.
    ///
    /// `filename` is `None` when the request carried no file part. The bytes are
    /// written to a temp file inside the upload directory, which is removed
    /// before this returns on every path.
    pub fn process_upload(
        &self,
        filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<ProcessedUpload, UploadError> {
        let filename = match filename {
            None => return Err(UploadError::MissingFilePart),
            Some("") => return Err(UploadError::EmptyFilename),
            Some(name) => name,
        };

        tracing::info!("Processing upload '{}' ({} bytes)", filename, bytes.len());

        let result = self.convert(filename, bytes);
        match &result {
            Ok(processed) => tracing::info!(
                "Converted '{}' into {} ({} rows)",
                filename,
                processed.download_name,
                processed.rows
            ),
            Err(e) => {
                tracing::error!("Failed to process upload '{}': {}", filename, e);
                if let Some(log_path) = &self.error_log {
                    write_error_to_log(
                        log_path,
                        "Upload Processing Error",
                        &format!("{filename}: {e}"),
                    );
                }
            }
        }
        result
    }

    fn convert(&self, filename: &str, bytes: &[u8]) -> Result<ProcessedUpload, UploadError> {
        std::fs::create_dir_all(&self.upload_dir)?;

        // Dropping the handle deletes the file, including on early returns
        let mut temp_file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(&self.upload_dir)?;
        temp_file.write_all(bytes)?;
        temp_file.flush()?;

        let table = process_spreadsheet(temp_file.path(), None, &self.decoders, &ALIAS_TABLE)
            .map_err(|e| UploadError::Processing(e.to_string()))?;
        let csv = to_csv_bytes(&table).map_err(|e| UploadError::Processing(e.to_string()))?;

        if let Err(e) = temp_file.close() {
            tracing::warn!("Could not remove temporary upload: {}", e);
        }

        Ok(ProcessedUpload {
            download_name: output_filename(filename),
            csv,
            rows: table.row_count(),
        })
    }
}
