use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::model::repository::User;

/// creates a user row with the passed auth hash and returns the generated id
pub fn create_user(
    username: &str,
    auth_hash: &str,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/users/create_user.sql"))?;
    let id = pst.insert(rusqlite::params![username, auth_hash])? as u32;
    Ok(id)
}

/// searches for a user with the passed name.
///
/// if `None` is returned, that means no user is registered under it
pub fn get_user_by_name(username: &str, con: &Connection) -> Result<Option<User>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/users/get_user_by_name.sql"))?;
    match pst.query_row(rusqlite::params![username], user_mapper) {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => {
            log::error!(
                "Failed to get user by name, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// looks up the id of the user whose stored hash matches the passed credentials.
///
/// `None` covers both an unknown username and a wrong password, so callers
/// can't tell the two apart
pub fn get_user_id_by_auth(
    username: &str,
    auth_hash: &str,
    con: &Connection,
) -> Result<Option<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/users/get_user_id_by_auth.sql"
    ))?;
    match pst.query_row(rusqlite::params![username, auth_hash], |row| row.get(0)) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => {
            log::error!(
                "Failed to check credentials in database, error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// 1. id
/// 2. username
fn user_mapper(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::open_connection;
    use crate::test::{cleanup, refresh_db};

    #[test]
    fn get_user_id_by_auth_requires_both_to_match() {
        refresh_db();
        let con = open_connection();
        create_user("user", "hash", &con).unwrap();
        assert_eq!(Some(1), get_user_id_by_auth("user", "hash", &con).unwrap());
        assert_eq!(None, get_user_id_by_auth("user", "wrong", &con).unwrap());
        assert_eq!(None, get_user_id_by_auth("nobody", "hash", &con).unwrap());
        con.close().unwrap();
        cleanup();
    }

    #[test]
    fn get_user_by_name_returns_none_for_unknown() {
        refresh_db();
        let con = open_connection();
        assert_eq!(None, get_user_by_name("ghost", &con).unwrap());
        create_user("ghost", "hash", &con).unwrap();
        let found = get_user_by_name("ghost", &con).unwrap().unwrap();
        assert_eq!("ghost", found.username);
        con.close().unwrap();
        cleanup();
    }
}
