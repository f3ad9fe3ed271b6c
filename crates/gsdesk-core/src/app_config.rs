use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Spreadsheet web-app endpoint serving `?action=listProducts`.
    ///
    /// Optional at load time: commands that never touch the catalog still
    /// run without it, and the catalog client reports its absence.
    pub catalog_url: Option<String>,
    pub log_level: String,
    pub user_agent: String,
    pub formats_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub page_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "catalog_url",
                &self.catalog_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("formats_path", &self.formats_path)
            .field("output_dir", &self.output_dir)
            .field("page_size", &self.page_size)
            .finish()
    }
}
