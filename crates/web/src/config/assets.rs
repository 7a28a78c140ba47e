//! Assets Config

use std::path::PathBuf;

use clap::Args;

/// Uploaded asset settings.
#[derive(Debug, Args)]
pub(crate) struct AssetsConfig {
    /// Directory uploaded featured images are written to
    #[arg(long, env = "ASSETS_DIR", default_value = "storage")]
    pub assets_dir: PathBuf,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub max_upload_bytes: u64,
}
