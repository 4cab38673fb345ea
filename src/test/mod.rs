use std::collections::HashMap;
use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use chrono::Utc;

use crate::guard::HeaderAuth;
use crate::model::repository::Resource;
use crate::repository::{initialize_db, open_connection, resource_repository, user_repository};
use crate::service::upload_service;
use crate::temp_dir;


/// username:password
#[cfg(test)]
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

/// second:password
#[cfg(test)]
pub static AUTH_2: &str = "Basic c2Vjb25kOnBhc3N3b3Jk";

/// ghost:password - no helper ever registers this account
#[cfg(test)]
pub static BAD_AUTH: &str = "Basic Z2hvc3Q6cGFzc3dvcmQ=";

#[cfg(test)]
pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

#[cfg(test)]
pub fn remove_upload_files() {
    let upload_dir = upload_service::upload_dir();
    let dir_path = Path::new(upload_dir.as_str());
    if dir_path.exists() {
        remove_dir_all(dir_path).unwrap_or(());
    }
}

/// registers a user straight into the database, password always `password` so
/// the canned auth headers line up
#[cfg(test)]
pub fn create_user_db_entry(username: &str) {
    let auth = HeaderAuth {
        username: username.to_string(),
        password: "password".to_string(),
    };
    let connection = open_connection();
    user_repository::create_user(username, auth.hashed().as_str(), &connection).unwrap();
    connection.close().unwrap();
}

#[cfg(test)]
pub fn create_resource_db_entry(user_id: u32, title: &str) -> u32 {
    let now = Utc::now().naive_utc();
    let connection = open_connection();
    let id = resource_repository::create_resource(
        &Resource {
            id: None,
            user_id,
            title: String::from(title),
            url: None,
            screenshot: None,
            embed_code: None,
            embed_type: None,
            notes: None,
            tags: HashMap::new(),
            created_at: now,
            updated_at: now,
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    id
}

/// seeds a resource carrying a single tag category with the passed options
#[cfg(test)]
pub fn create_tagged_resource_db_entry(
    user_id: u32,
    title: &str,
    category: &str,
    options: Vec<&str>,
) -> u32 {
    let now = Utc::now().naive_utc();
    let mut tags = HashMap::new();
    tags.insert(
        category.to_string(),
        options.iter().map(|option| option.to_string()).collect(),
    );
    let connection = open_connection();
    let id = resource_repository::create_resource(
        &Resource {
            id: None,
            user_id,
            title: String::from(title),
            url: None,
            screenshot: None,
            embed_code: None,
            embed_type: None,
            notes: None,
            tags,
            created_at: now,
            updated_at: now,
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

#[cfg(test)]
pub fn cleanup() {
    let thread_name = current_thread_name();
    let temp_dir_name = temp_dir();
    remove_upload_files();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    remove_dir_all(Path::new(temp_dir_name.as_str())).unwrap_or(());
}
