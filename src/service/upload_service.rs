use std::backtrace::Backtrace;
use std::path::Path;

use base64::engine::general_purpose;
use base64::Engine as _;
use chrono::Utc;
use regex::Regex;

#[cfg(not(test))]
use crate::config::MOODBOARD_CONFIG;
use crate::model::api::UploadApi;
use crate::model::error::upload_errors::{UploadDataUrlError, UploadFileError};
use crate::model::request::upload_requests::{DataUrlUploadRequest, UploadRequest};

/// where uploaded files live. Each user gets a numbered directory under this
/// root
#[cfg(not(test))]
pub fn upload_dir() -> String {
    MOODBOARD_CONFIG.clone().storage.location
}

#[cfg(test)]
pub fn upload_dir() -> String {
    format!("./{}_uploads", crate::test::current_thread_name())
}

/// moves a multipart upload under the storage root as
/// `{user_id}/{timestamp}-{random}.{extension}` and reports where it landed.
///
/// The extension comes from the form field when one was sent, falling back to
/// the file part's content type
pub async fn save_upload(
    user_id: u32,
    upload: UploadRequest<'_>,
) -> Result<UploadApi, UploadFileError> {
    let mut file = match upload.file {
        Some(file) => file,
        None => return Err(UploadFileError::MissingFile),
    };
    let extension = match upload.extension {
        Some(ref extension) => sanitize_extension(extension),
        None => match file.content_type().and_then(|ct| ct.extension()) {
            Some(extension) => sanitize_extension(extension.as_str()),
            None => String::from("bin"),
        },
    };
    let file_name = format!("{}.{extension}", generated_name());
    let owner_dir = format!("{}/{user_id}", upload_dir());
    if let Err(e) = rocket::tokio::fs::create_dir_all(Path::new(owner_dir.as_str())).await {
        log::error!(
            "Failed to create storage directory {owner_dir}. Exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(UploadFileError::Disk(e.to_string()));
    }
    let disk_path = format!("{owner_dir}/{file_name}");
    if let Err(e) = file.persist_to(Path::new(disk_path.as_str())).await {
        log::error!(
            "Failed to move uploaded file to {disk_path}. Exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(UploadFileError::Disk(e.to_string()));
    }
    Ok(upload_api(user_id, file_name))
}

/// decodes a `data:{mime};base64,{payload}` url and stores the bytes the same
/// way [`save_upload`] stores a multipart file. The extension comes from the
/// request when sent, falling back to the mime subtype
pub async fn save_data_url(
    user_id: u32,
    request: DataUrlUploadRequest,
) -> Result<UploadApi, UploadDataUrlError> {
    let (meta, payload) = match request.data_url.split_once(',') {
        Some(parts) => parts,
        None => return Err(UploadDataUrlError::InvalidDataUrl),
    };
    if !meta.starts_with("data:") {
        return Err(UploadDataUrlError::InvalidDataUrl);
    }
    let bytes = match general_purpose::STANDARD.decode(payload.trim()) {
        Ok(bytes) => bytes,
        Err(_) => return Err(UploadDataUrlError::InvalidDataUrl),
    };
    let extension = match request.extension {
        Some(ref extension) => sanitize_extension(extension),
        None => match mime_subtype(meta) {
            Some(subtype) => sanitize_extension(subtype.as_str()),
            None => String::from("bin"),
        },
    };
    let file_name = format!("{}.{extension}", generated_name());
    let owner_dir = format!("{}/{user_id}", upload_dir());
    if let Err(e) = rocket::tokio::fs::create_dir_all(Path::new(owner_dir.as_str())).await {
        log::error!(
            "Failed to create storage directory {owner_dir}. Exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(UploadDataUrlError::Disk(e.to_string()));
    }
    let disk_path = format!("{owner_dir}/{file_name}");
    if let Err(e) = rocket::tokio::fs::write(Path::new(disk_path.as_str()), bytes).await {
        log::error!(
            "Failed to write decoded upload to {disk_path}. Exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(UploadDataUrlError::Disk(e.to_string()));
    }
    Ok(upload_api(user_id, file_name))
}

// private functions

/// file names embed when the upload happened plus enough randomness that two
/// uploads in the same millisecond can't collide
fn generated_name() -> String {
    format!(
        "{}-{:x}",
        Utc::now().timestamp_millis(),
        rand::random::<u64>()
    )
}

/// builds the wire answer for a file that just landed on disk
fn upload_api(user_id: u32, file_name: String) -> UploadApi {
    let path = format!("{user_id}/{file_name}");
    UploadApi {
        url: format!("{}/{path}", public_url_base().trim_end_matches('/')),
        path,
    }
}

#[cfg(not(test))]
fn public_url_base() -> String {
    MOODBOARD_CONFIG.clone().storage.public_url
}

#[cfg(test)]
fn public_url_base() -> String {
    String::from("http://localhost:8000/uploads")
}

/// strips an extension down to ascii alphanumerics, lowercased. An extension
/// with nothing left falls back to `bin`
fn sanitize_extension(raw: &str) -> String {
    let cleaned = Regex::new("[^a-zA-Z0-9]")
        .unwrap()
        .replace_all(raw, "")
        .to_lowercase();
    if cleaned.is_empty() {
        String::from("bin")
    } else {
        cleaned
    }
}

/// pulls the subtype out of the meta half of a data url, e.g. `png` from
/// `data:image/png;base64`
fn mime_subtype(meta: &str) -> Option<String> {
    let mime = meta.strip_prefix("data:")?;
    let mime = match mime.split_once(';') {
        Some((mime, _)) => mime,
        None => mime,
    };
    match mime.split_once('/') {
        Some((_, subtype)) if !subtype.is_empty() => Some(subtype.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_extension_keeps_alphanumerics() {
        assert_eq!("png", sanitize_extension(".PNG"));
        assert_eq!("targz", sanitize_extension("tar.gz"));
        assert_eq!("bin", sanitize_extension("../../"));
        assert_eq!("bin", sanitize_extension(""));
    }

    #[test]
    fn mime_subtype_reads_the_data_url_meta() {
        assert_eq!(
            Some("png".to_string()),
            mime_subtype("data:image/png;base64")
        );
        assert_eq!(
            Some("svg+xml".to_string()),
            mime_subtype("data:image/svg+xml;base64")
        );
        assert_eq!(None, mime_subtype("data:;base64"));
        assert_eq!(None, mime_subtype("image/png;base64"));
    }

    #[test]
    fn generated_names_have_a_timestamp_and_token() {
        let name = generated_name();
        let (timestamp, token) = name.split_once('-').unwrap();
        assert!(timestamp.parse::<i64>().is_ok());
        assert!(!token.is_empty());
    }
}
