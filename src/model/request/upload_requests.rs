use rocket::fs::TempFile;
use rocket::serde::Deserialize;
use rocket::FromForm;

/// multipart body for `POST /uploads`
#[derive(FromForm)]
pub struct UploadRequest<'a> {
    /// optional so a missing part maps to a 400 instead of a form parse failure
    pub file: Option<TempFile<'a>>,
    /// overrides the extension taken from the part's content type
    pub extension: Option<String>,
}

/// body for `POST /uploads/data-url`
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DataUrlUploadRequest {
    /// `data:{mime};base64,{payload}`
    #[serde(rename = "dataUrl")]
    pub data_url: String,
    /// overrides the extension taken from the mime subtype
    pub extension: Option<String>,
}
