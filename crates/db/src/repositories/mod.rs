//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod app_listing_repo;
pub mod category_repo;
pub mod dashboard_repo;
pub mod demo_request_repo;
pub mod message_repo;
pub mod order_repo;
pub mod product_image_repo;
pub mod product_repo;
pub mod session_repo;
pub mod site_config_repo;
pub mod user_repo;

pub use app_listing_repo::AppListingRepo;
pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use demo_request_repo::DemoRequestRepo;
pub use message_repo::MessageRepo;
pub use order_repo::OrderRepo;
pub use product_image_repo::ProductImageRepo;
pub use product_repo::ProductRepo;
pub use session_repo::SessionRepo;
pub use site_config_repo::SiteConfigRepo;
pub use user_repo::UserRepo;
