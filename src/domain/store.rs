use serde::{Deserialize, Serialize};

use crate::domain::types::{MarketplaceToken, StoreDescription, StoreName};

/// Registration data of a store as shown in the store settings form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreProfile {
    pub store_name: StoreName,
    pub description: StoreDescription,
    pub ozon_token: Option<MarketplaceToken>,
    pub wb_token: Option<MarketplaceToken>,
}

impl StoreProfile {
    #[must_use]
    pub fn new(
        store_name: StoreName,
        description: StoreDescription,
        ozon_token: Option<MarketplaceToken>,
        wb_token: Option<MarketplaceToken>,
    ) -> Self {
        Self {
            store_name,
            description,
            ozon_token,
            wb_token,
        }
    }

    /// Masked token previews suitable for log lines.
    pub fn token_previews(&self) -> (String, String) {
        let preview = |token: &Option<MarketplaceToken>| {
            token
                .as_ref()
                .map_or_else(|| "-".to_string(), MarketplaceToken::preview)
        };
        (preview(&self.ozon_token), preview(&self.wb_token))
    }
}
