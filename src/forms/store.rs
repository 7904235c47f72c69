//! Store registration form payload.

use serde::Deserialize;
use validator::Validate;

use crate::domain::handover::{HandoverOption, HandoverOptions};
use crate::domain::store::StoreProfile;
use crate::domain::types::{MarketplaceToken, StoreDescription, StoreName};
use crate::dto::store::StoreFormFields;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data posted by the store registration panel.
///
/// Checkboxes are only present in the body when ticked.
pub struct StoreRegistrationForm {
    #[validate(length(max = 255))]
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(max = 512))]
    #[serde(default)]
    pub ozon_token: String,
    #[validate(length(max = 512))]
    #[serde(default)]
    pub wb_token: String,
    #[serde(default)]
    pub complaint: Option<String>,
    #[serde(default)]
    pub unclear: Option<String>,
    #[serde(default, rename = "returnRequest")]
    pub return_request: Option<String>,
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub legal: Option<String>,
    #[serde(default, rename = "sensitiveWords")]
    pub sensitive_words: Option<String>,
}

/// Validated profile plus the toggles the user submitted.
#[derive(Debug)]
pub struct StoreRegistrationPayload {
    pub profile: StoreProfile,
    pub handover: HandoverOptions,
}

impl StoreRegistrationForm {
    /// Input values echoed back into the re-rendered form.
    pub fn fields(&self) -> StoreFormFields {
        StoreFormFields {
            store_name: self.store_name.clone(),
            description: self.description.clone(),
            ozon_token: self.ozon_token.clone(),
            wb_token: self.wb_token.clone(),
        }
    }

    pub fn handover(&self) -> HandoverOptions {
        let mut options = HandoverOptions::none();
        let ticked = [
            (HandoverOption::Complaint, &self.complaint),
            (HandoverOption::Unclear, &self.unclear),
            (HandoverOption::ReturnRequest, &self.return_request),
            (HandoverOption::Discount, &self.discount),
            (HandoverOption::Legal, &self.legal),
            (HandoverOption::SensitiveWords, &self.sensitive_words),
        ];
        for (option, value) in ticked {
            options.set(option, value.is_some());
        }
        options
    }
}

impl TryFrom<StoreRegistrationForm> for StoreRegistrationPayload {
    type Error = FormError;

    fn try_from(form: StoreRegistrationForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let store_name =
            StoreName::new(form.store_name.as_str()).map_err(|_| FormError::InvalidStoreName)?;
        let ozon_token = MarketplaceToken::parse_optional(&form.ozon_token)
            .map_err(|_| FormError::InvalidToken)?;
        let wb_token =
            MarketplaceToken::parse_optional(&form.wb_token).map_err(|_| FormError::InvalidToken)?;
        let handover = form.handover();

        Ok(Self {
            profile: StoreProfile::new(
                store_name,
                StoreDescription::new(form.description),
                ozon_token,
                wb_token,
            ),
            handover,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> StoreRegistrationForm {
        StoreRegistrationForm {
            store_name: " ООО Ромашка ".into(),
            description: "<i>Магазин</i>".into(),
            ozon_token: "sample-ozon-token".into(),
            wb_token: String::new(),
            complaint: Some("on".into()),
            legal: Some("on".into()),
            ..StoreRegistrationForm::default()
        }
    }

    #[test]
    fn valid_form_builds_profile() {
        let payload = StoreRegistrationPayload::try_from(filled()).expect("valid form");
        assert_eq!(payload.profile.store_name.as_str(), "ООО Ромашка");
        assert_eq!(payload.profile.description.as_str(), "Магазин");
        assert!(payload.profile.wb_token.is_none());
        assert!(payload.handover.complaint);
        assert!(payload.handover.legal);
        assert!(!payload.handover.unclear);
    }

    #[test]
    fn blank_store_name_is_rejected() {
        let form = StoreRegistrationForm {
            store_name: "   ".into(),
            ..filled()
        };
        let err = StoreRegistrationPayload::try_from(form).expect_err("blank name");
        assert!(matches!(err, FormError::InvalidStoreName));
        assert_eq!(err.hint(), "укажите название магазина.");
    }

    #[test]
    fn token_with_spaces_is_rejected() {
        let form = StoreRegistrationForm {
            ozon_token: "two words".into(),
            ..filled()
        };
        assert!(matches!(
            StoreRegistrationPayload::try_from(form),
            Err(FormError::InvalidToken)
        ));
    }
}
