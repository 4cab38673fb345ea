pub mod category_errors;
pub mod resource_errors;
pub mod upload_errors;
pub mod user_errors;
