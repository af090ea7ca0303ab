pub mod settings;
pub mod token_issuer;
pub mod token_store;
pub mod token_validator;

pub use settings::SettingsPort;
pub use token_issuer::TokenIssuerPort;
pub use token_store::TokenStorePort;
pub use token_validator::TokenValidatorPort;
