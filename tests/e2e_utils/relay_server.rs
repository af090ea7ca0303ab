#![cfg(test)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ServerBuilder;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use plexhook::adapters::{FileTokenStore, HyperRelayAdapter, PlexServerClient, PlexTvIssuer};
use plexhook::config::RelayConfig;
use plexhook::domain::RelayService;
use plexhook::ports::{SettingsPort, TokenValidatorPort};

pub struct TestRelayServer {
    addr: SocketAddr,
    _server_handle: JoinHandle<()>,
}

impl TestRelayServer {
    /// Wire a full relay (real adapters, stubbed upstreams) on an ephemeral port.
    pub async fn start(
        config: RelayConfig,
        sign_in_url: String,
        token_file: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let store = Arc::new(FileTokenStore::new(token_file));
        let plex_server = Arc::new(PlexServerClient::new());
        let validator: Arc<dyn TokenValidatorPort> = plex_server.clone();
        let settings: Arc<dyn SettingsPort> = plex_server;
        let issuer = Arc::new(PlexTvIssuer::with_sign_in_url(sign_in_url));

        let service = Arc::new(RelayService::new(config, store, validator, issuer, settings));
        let adapter = Arc::new(HyperRelayAdapter::new(service));

        let server_handle = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let adapter = adapter.clone();

                        tokio::spawn(async move {
                            let service_fn = service_fn(move |req| {
                                let adapter = adapter.clone();
                                async move {
                                    Ok::<_, hyper::Error>(adapter.handle(req).await)
                                }
                            });

                            let _ = ServerBuilder::new(TokioExecutor::new())
                                .serve_connection(io, service_fn)
                                .await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            addr,
            _server_handle: server_handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}
