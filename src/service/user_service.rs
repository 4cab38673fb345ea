use std::backtrace::Backtrace;

use crate::guard::HeaderAuth;
use crate::model::error::user_errors::CreateUserError;
use crate::model::request::NewUser;
use crate::model::service::users::CheckAuthResult;
use crate::repository;
use crate::repository::user_repository;

/// registers the passed credentials as a new account.
///
/// The username has to be free; credentials are stored as a single hash,
/// so there is no way to recover a password later.
pub fn create_user(user: NewUser) -> Result<(), CreateUserError> {
    let auth = HeaderAuth {
        username: String::from(user.username.trim()),
        password: String::from(user.password.trim()),
    };
    if auth.username.is_empty() || auth.password.is_empty() {
        return Err(CreateUserError::MissingFields);
    }
    let con = repository::open_connection();
    match user_repository::get_user_by_name(auth.username.as_str(), &con) {
        Ok(Some(_)) => {
            con.close().unwrap();
            return Err(CreateUserError::AlreadyExists);
        }
        Ok(None) => { /* name is free */ }
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to look up username before registering. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(CreateUserError::DbError);
        }
    };
    let created = user_repository::create_user(auth.username.as_str(), auth.hashed().as_str(), &con);
    con.close().unwrap();
    match created {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!(
                "Failed to save new user to the database. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateUserError::DbError)
        }
    }
}

/// Checks the passed `auth` object against the users table
pub fn check_auth(auth: HeaderAuth) -> CheckAuthResult {
    let con = repository::open_connection();
    let result =
        user_repository::get_user_id_by_auth(auth.username.as_str(), auth.hashed().as_str(), &con);
    con.close().unwrap();
    match result {
        Ok(Some(id)) => CheckAuthResult::Valid(id),
        Ok(None) => CheckAuthResult::Invalid,
        Err(e) => {
            log::error!(
                "Failed to check credentials against the users table. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            CheckAuthResult::DbError
        }
    }
}
