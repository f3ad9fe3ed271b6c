pub mod app_config;
pub mod browse;
pub mod config;
pub mod error;
pub mod estimate;
pub mod formats;
pub mod pricing;
pub mod products;

pub use app_config::AppConfig;
pub use browse::{
    categories, category_label, filter_products, paginate, sort_products, Page, SortDirection,
    SortKey, DEFAULT_PAGE_SIZE,
};
pub use config::{load_app_config, load_app_config_from_env, CATALOG_URL_VAR};
pub use error::ConfigError;
pub use estimate::{supply_amount, Estimate, EstimateLine, EstimateTotals, ESTIMATE_HEADERS};
pub use formats::{load_upload_formats, HeaderAliases, UploadFormats, UploadMode};
pub use pricing::{listed_price, parse_lenient_number, round_to_hundred, strip_numeric, PriceIndex};
pub use products::{value_text, CatalogPayload, ColumnMeta, ProductRow};
