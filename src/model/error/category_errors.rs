#[derive(PartialEq, Debug)]
pub enum GetCategoriesError {
    /// an error with the database
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum ReplaceCategoriesError {
    /// an error with the database. When this comes out of the insert half of
    /// the replace, the caller's old set is already gone (see the concurrency
    /// notes in the service)
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum ResetCategoriesError {
    /// an error with the database
    DbError(String),
}
