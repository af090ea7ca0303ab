use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ServerBuilder;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use plexhook::adapters::{FileTokenStore, HyperRelayAdapter, PlexServerClient, PlexTvIssuer};
use plexhook::config::RelayConfig;
use plexhook::domain::RelayService;
use plexhook::ports::{SettingsPort, TokenValidatorPort};

#[derive(Parser, Debug)]
#[clap(version = env!("PLEXHOOK_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
pub struct Opts {
    /// listen on this network address
    #[clap(long, short = 'b', default_value = "0.0.0.0:4201")]
    bind: String,

    /// where the cached Plex token is persisted
    #[clap(long, default_value = "token/plex_token.json")]
    token_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();

    let config = RelayConfig::from_env();
    if let Err(err) = config.validate() {
        // Keep serving: every route reports the configuration error itself.
        warn!("{}", err);
    }

    let store = Arc::new(FileTokenStore::new(opts.token_file));
    let plex_server = Arc::new(PlexServerClient::new());
    let validator: Arc<dyn TokenValidatorPort> = plex_server.clone();
    let settings: Arc<dyn SettingsPort> = plex_server;
    let issuer = Arc::new(PlexTvIssuer::new());

    let service = Arc::new(RelayService::new(config, store, validator, issuer, settings));
    let adapter = Arc::new(HyperRelayAdapter::new(service));

    let listener = TcpListener::bind(&opts.bind).await?;
    info!("listening on {}", opts.bind);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let adapter = adapter.clone();

        tokio::spawn(async move {
            let service_fn = service_fn(move |req| {
                let adapter = adapter.clone();
                async move { Ok::<_, hyper::Error>(adapter.handle(req).await) }
            });

            if let Err(err) = ServerBuilder::new(TokioExecutor::new())
                .serve_connection(io, service_fn)
                .await
            {
                debug!("connection error: {}", err);
            }
        });
    }
}
