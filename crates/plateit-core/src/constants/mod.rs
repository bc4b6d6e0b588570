// ABOUTME: Application-wide constants grouped by domain
// ABOUTME: Storage keys, entitlement identifiers, mock store catalog, and default limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

/// Service names for structured logging
pub mod service_names {
    /// Server binary and log target name
    pub const PLATEIT_SERVER: &str = "plateit-server";
}

/// Key names in the key-value store
pub mod storage_keys {
    /// Recipe collection
    pub const RECIPES: &str = "plateit_recipes";
    /// Flat shopping list
    pub const SHOPPING_LIST: &str = "plateit_list";
    /// Recipe ids whose ingredients are already on the list
    pub const SHOPPING_LIST_RECIPE_IDS: &str = "plateit_list_ids";
    /// Entitlement flag written by the mock store
    pub const MOCK_PRO_FLAG: &str = "plateit_rc_mock_pro";
}

/// Entitlement and catalog identifiers
pub mod billing {
    /// Entitlement that unlocks the Pro tier
    pub const ENTITLEMENT_ID: &str = "pro_access";
    /// Period type reported for an active mock entitlement
    pub const PERIOD_TYPE_NORMAL: &str = "NORMAL";
    /// Mock monthly package identifier
    pub const MONTHLY_PACKAGE_ID: &str = "$rc_monthly";
    /// Mock monthly package type
    pub const MONTHLY_PACKAGE_TYPE: &str = "MONTHLY";
    /// Mock monthly product identifier
    pub const MONTHLY_PRODUCT_ID: &str = "plateit_pro_monthly";
    /// Mock monthly product title
    pub const MONTHLY_PRODUCT_TITLE: &str = "Monthly Pro";
    /// Mock monthly product description
    pub const MONTHLY_PRODUCT_DESCRIPTION: &str = "Unlimited recipes & AI usage";
    /// Mock monthly price
    pub const MONTHLY_PRICE: f64 = 4.99;
    /// Mock monthly formatted price
    pub const MONTHLY_PRICE_STRING: &str = "$4.99";
    /// Mock currency
    pub const CURRENCY_CODE: &str = "USD";
}

/// Default limits and delays
pub mod defaults {
    /// Recipes a free user may store before the paywall is shown
    pub const RECIPE_LIMIT: usize = 3;
    /// Mock store initialization delay
    pub const MOCK_INIT_DELAY_MS: u64 = 500;
    /// Mock offerings lookup delay
    pub const MOCK_OFFERINGS_DELAY_MS: u64 = 800;
    /// Mock purchase delay
    pub const MOCK_PURCHASE_DELAY_MS: u64 = 2000;
    /// Mock restore delay
    pub const MOCK_RESTORE_DELAY_MS: u64 = 1500;
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Default Gemini model for recipe extraction
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Gemini REST base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Extraction request timeout
    pub const EXTRACTION_TIMEOUT_SECS: u64 = 60;
    /// Upper bound on pasted recipe text
    pub const MAX_EXTRACTION_INPUT_CHARS: usize = 20_000;
}
