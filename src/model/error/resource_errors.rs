//! failure cases for resource operations. The `DbError` variants carry the
//! store's own message, which the handlers pass through to the 500 body
//! unchanged

#[derive(PartialEq, Debug)]
pub enum ListResourcesError {
    /// an error with the database
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum GetResourceError {
    /// an error with the database
    DbError(String),
    /// no resource with that id belongs to the caller
    NotFound,
}

#[derive(PartialEq, Debug)]
pub enum CreateResourceError {
    /// an error with the database
    DbError(String),
    /// the title was absent, empty, or whitespace-only
    MissingTitle,
}

#[derive(PartialEq, Debug)]
pub enum UpdateResourceError {
    /// an error with the database
    DbError(String),
    /// no resource with that id belongs to the caller
    NotFound,
    /// the patch contained no recognized fields
    NoFields,
    /// the patch tried to blank out the title
    MissingTitle,
}

#[derive(PartialEq, Debug)]
pub enum DeleteResourceError {
    /// an error with the database
    DbError(String),
}
