#[derive(PartialEq, Debug)]
pub enum UploadFileError {
    /// the multipart body had no file part
    MissingFile,
    /// the file could not be written under the storage root
    Disk(String),
}

#[derive(PartialEq, Debug)]
pub enum UploadDataUrlError {
    /// the payload was not a `data:*;base64,...` url
    InvalidDataUrl,
    /// the decoded bytes could not be written under the storage root
    Disk(String),
}
