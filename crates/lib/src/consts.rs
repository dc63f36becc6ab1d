/// Prefix of every resource type name, e.g. `flagsmith_feature`.
pub const PROVIDER_TYPE_PREFIX: &str = "flagsmith";

/// Admin API root used when no base URL is configured.
pub const DEFAULT_BASE_API_URL: &str = "https://api.flagsmith.com/api/v1";

/// Environment variable consulted when no master API key is configured.
pub const MASTER_API_KEY_ENV: &str = "FLAGSMITH_MASTER_API_KEY";

/// Separator of composite import identifiers such as `env_key,uuid`.
pub const IMPORT_ID_SEPARATOR: char = ',';
