use std::path::Path;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result};

pub mod category_repository;
pub mod metadata_repository;
pub mod resource_repository;
pub mod user_repository;

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::MOODBOARD_CONFIG;

    match Connection::open_with_flags(
        Path::new(MOODBOARD_CONFIG.clone().database.location.as_str()),
        OpenFlags::default(),
    ) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    match Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default()) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

/// runs init.sql on the database
fn create_db(con: &mut Connection) {
    let sql = include_str!("../assets/init.sql");
    con.execute_batch(sql).unwrap();
}

/// handles checking if the database exists with the expected version.
/// If not, it creates the schema and seeds the default category set
pub fn initialize_db() -> Result<()> {
    let mut con = open_connection();
    // a failed version lookup means the tables haven't been created yet
    if metadata_repository::get_version(&con).is_err() {
        create_db(&mut con);
    }
    con.close().unwrap();
    Ok(())
}
