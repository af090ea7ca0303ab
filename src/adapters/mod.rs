pub mod hyper_server;
pub mod plex_server;
pub mod plex_tv;
pub mod token_file;

pub use hyper_server::HyperRelayAdapter;
pub use plex_server::PlexServerClient;
pub use plex_tv::PlexTvIssuer;
pub use token_file::FileTokenStore;
