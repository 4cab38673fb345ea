pub mod category_requests;
pub mod resource_requests;
pub mod upload_requests;

use rocket::serde::Deserialize;

/// Because `HeaderAuth` is used as a request guard, we can't use it for
/// registering accounts. This allows us to accept credentials in a post body.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
