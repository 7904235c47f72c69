use serde::Deserialize;

/// Body of the delete request. The script sets `confirmed` only after the
/// user accepted the confirmation dialog.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteManagerForm {
    #[serde(default)]
    pub confirmed: bool,
}
