/// represents the result of comparing request credentials to the users table
#[derive(PartialEq, Debug)]
pub enum CheckAuthResult {
    /// The passed authorization matches a registered user; carries that user's id
    Valid(u32),
    /// The passed authorization does not match any registered user
    Invalid,
    /// The database encountered an error trying to retrieve authorization
    DbError,
}
