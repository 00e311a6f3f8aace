use catalog_importer::upload::UploadService;
use std::path::Path;
use std::sync::Arc;

// Re-export the spreadsheet fixture helpers from catalog-lib
pub use catalog_lib::test_utils::{write_xlsx, xlsx_bytes};

pub const BOUNDARY: &str = "----catalog-importer-test-boundary";

pub const EXPECTED_HEADER: &str = "ean,title,cost_gbp,family,subgroup";

/// One multipart form part: field name, optional filename, content
#[allow(dead_code)]
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

/// Encode `parts` as a multipart/form-data body delimited by [`BOUNDARY`]
#[allow(dead_code)]
pub fn multipart_body(parts: &[FormPart]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match part.filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if part.filename.is_some() {
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Content-Type header value matching [`multipart_body`]
#[allow(dead_code)]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Upload service staging files in `upload_dir`
#[allow(dead_code)]
pub fn create_service(upload_dir: &Path) -> Arc<UploadService> {
    Arc::new(UploadService::new(upload_dir))
}

/// Number of files left behind in `dir` (0 if it was never created)
#[allow(dead_code)]
pub fn leftover_files(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}
