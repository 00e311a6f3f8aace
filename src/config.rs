use clap::Args;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// 20 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Settings for the HTTP upload service. Every flag can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "CATALOG_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "CATALOG_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory that holds uploads while they are being processed
    #[arg(long, env = "CATALOG_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Largest accepted multipart body, in bytes
    #[arg(long, env = "CATALOG_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: u64,

    /// File that processing failures are appended to
    #[arg(long, env = "CATALOG_ERROR_LOG", default_value = catalog_lib::ERRORS_LOG_FILE)]
    pub error_log: PathBuf,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Options for converting a local spreadsheet
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the Excel file to convert
    #[arg(short, long)]
    pub excel_file: PathBuf,

    /// Optional sheet name to convert (if not specified, the first sheet is used)
    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Directory the processed CSV is written to
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,
}
