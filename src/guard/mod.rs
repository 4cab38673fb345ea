use std::io::Write;

use base64::engine::general_purpose;
use base64::Engine as _;
use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use sha2::{Digest, Sha256};

use crate::model::service::users::CheckAuthResult;
use crate::service::user_service;

/// used to represent the result of calling `HeaderAuth::validate`
pub enum ValidateResult {
    /// credentials match a registered user; carries the caller's user id
    Ok(u32),
    /// credentials don't match any registered user
    Invalid,
    /// the users table couldn't be checked
    DbError,
}

#[derive(Debug)]
pub struct HeaderAuth {
    pub username: String,
    pub password: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.to_string().replace("Basic ", "");
        match general_purpose::STANDARD.decode(stripped_header.as_str()) {
            Ok(value) => {
                let combined = String::from_utf8(value).unwrap_or_default();
                let split = combined.split(':').collect::<Vec<&str>>();
                // if there aren't exactly 2 parts, then something is wrong here
                if split.len() != 2 || split.contains(&"") {
                    return Err("Invalid basic auth format: missing username or password");
                }
                Ok(HeaderAuth {
                    username: String::from(split[0].trim()),
                    password: String::from(split[1].trim()),
                })
            }
            Err(_) => Err("Invalid basic auth format: not base64"),
        }
    }

    /// resolves these credentials against the users table, producing the
    /// caller's user id on success.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(self) -> ValidateResult {
        match user_service::check_auth(self) {
            CheckAuthResult::Valid(user_id) => ValidateResult::Ok(user_id),
            CheckAuthResult::Invalid => ValidateResult::Invalid,
            CheckAuthResult::DbError => ValidateResult::DbError,
        }
    }

    /// the value stored in the auth column: a hex sha256 over `username:password`
    pub fn hashed(&self) -> String {
        let mut hasher = Sha256::new();
        // hash username and password combined
        let combined = format!("{}:{}", self.username.trim(), self.password.trim());
        hasher.write_all(combined.as_bytes()).unwrap_or(());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for HeaderAuth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        // just check if it's basic auth
        fn check_basic_auth(value: &str) -> bool {
            String::from(value).starts_with("Basic")
        }
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if check_basic_auth(value) => match HeaderAuth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}
