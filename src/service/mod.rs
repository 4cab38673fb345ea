pub mod category_service;
pub mod resource_service;
pub mod upload_service;
pub mod user_service;
