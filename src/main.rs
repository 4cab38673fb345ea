#[macro_use]
extern crate rocket;

use std::fs;
use std::path::Path;

use rocket::data::{Limits, ToByteUnit};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket};

use handler::{
    api_handler::{api_version, create_user},
    category_handler::{get_categories, replace_categories, reset_categories},
    resource_handler::{
        create_resource, delete_resource, get_resource, search_resources, update_resource,
    },
    upload_handler::{download_upload, upload_data_url, upload_file},
};

use crate::model::response::BasicMessage;
use crate::repository::initialize_db;

mod config;
mod guard;
mod handler;
mod model;
mod repository;
mod service;
#[cfg(test)]
mod test;

static TEMP_DIR: &str = "./.moodboard_temp";

/// where rocket buffers multipart uploads before the service persists them
#[cfg(not(test))]
pub fn temp_dir() -> String {
    String::from(TEMP_DIR)
}

/// tests run in parallel, so every test thread gets its own scratch directory
#[cfg(test)]
pub fn temp_dir() -> String {
    format!("{TEMP_DIR}-{}", crate::test::current_thread_name())
}

#[cfg(not(test))]
fn configure_logging() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {message}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target()
            ))
        })
        .level(log::LevelFilter::Info)
        // rocket narrates every request at info; the handlers already log what matters
        .level_for("rocket", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .chain(fern::log_file("moodboard_server.log").unwrap())
        .apply()
        .unwrap();
}

#[launch]
fn rocket() -> Rocket<Build> {
    #[cfg(not(test))]
    configure_logging();
    initialize_db().unwrap();
    let temp_dir = temp_dir();
    fs::remove_dir_all(Path::new(temp_dir.as_str()))
        .or(Ok::<(), ()>(()))
        .unwrap();
    fs::create_dir(Path::new(temp_dir.as_str())).unwrap();
    let figment = rocket::Config::figment()
        .merge(("temp_dir", temp_dir))
        .merge((
            "limits",
            Limits::default()
                .limit("file", 10.mebibytes())
                .limit("data-form", 12.mebibytes())
                // data urls ride in json bodies and carry whole screenshots
                .limit("json", 10.mebibytes()),
        ));
    rocket::custom(figment)
        .mount("/api", routes![api_version, create_user])
        .mount(
            "/resources",
            routes![
                search_resources,
                create_resource,
                get_resource,
                update_resource,
                delete_resource
            ],
        )
        .mount(
            "/categories",
            routes![get_categories, replace_categories, reset_categories],
        )
        .mount(
            "/uploads",
            routes![upload_file, upload_data_url, download_upload],
        )
        .register(
            "/",
            catchers![bad_request, unauthorized, not_found, fallback],
        )
}

// rejections that never reach a handler still need the `{"error": ...}` shape

#[catch(400)]
fn bad_request() -> Json<BasicMessage> {
    BasicMessage::new("Bad Request")
}

#[catch(401)]
fn unauthorized() -> Json<BasicMessage> {
    BasicMessage::new("Unauthorized")
}

#[catch(404)]
fn not_found() -> Json<BasicMessage> {
    BasicMessage::new("Not Found")
}

#[catch(default)]
fn fallback(status: Status, _req: &Request) -> Json<BasicMessage> {
    BasicMessage::new(status.reason().unwrap_or("Unknown Error"))
}
