pub mod api_handler;
pub mod category_handler;
pub mod resource_handler;
pub mod upload_handler;
