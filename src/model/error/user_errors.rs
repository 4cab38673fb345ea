#[derive(PartialEq, Debug)]
pub enum CreateUserError {
    /// an error with the database
    DbError,
    /// a user with that name is already registered
    AlreadyExists,
    /// username or password was empty
    MissingFields,
}
