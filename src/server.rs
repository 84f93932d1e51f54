use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::{task, time};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::encoding;
use crate::error::ConnectionError;
use crate::request::Request;
use crate::router::Router;
use crate::store::FileStore;

/// Read-only state shared by all connections.
#[derive(Debug, Clone)]
pub struct Service {
    pub router: Router,
    pub store: FileStore,
}

/// Pause after a failed accept so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Server {
    listener: TcpListener,
    service: Arc<Service>,
}

impl Service {
    pub fn new(store: FileStore) -> Self {
        Self {
            router: Router::default(),
            store,
        }
    }
}

impl Server {
    pub async fn bind(config: &Config) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.address()).await?;
        let service = Service::new(FileStore::new(&config.directory));
        Ok(Self::from_parts(listener, service))
    }

    pub fn from_parts(listener: TcpListener, service: Service) -> Self {
        Self {
            listener,
            service: Arc::new(service),
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, each one handled on its own task.
    pub async fn run(self) {
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(error) => {
                    warn!(%error, "failed to accept tcp stream.");
                    time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            debug!(%addr, "accepted tcp stream.");
            let service = Arc::clone(&self.service);
            task::spawn(async move {
                if let Err(error) = handle_connection(stream, addr, &service).await {
                    warn!(%error, %addr, "closing connection without response.");
                }
            });
        }
    }
}

/// Parses one request, routes it, negotiates the body encoding and writes
/// the response. The stream is closed when it is dropped by the caller.
#[tracing::instrument(skip(stream, service))]
pub async fn handle_connection<S>(
    mut stream: S,
    peer: SocketAddr,
    service: &Service,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = Request::try_parse_from(&mut stream).await?;
    info!(
        method = request.method_str(),
        path = request.target(),
        "successfully parsed request."
    );

    let mut response = service.router.dispatch(&request, &service.store).await?;
    encoding::negotiate(&request, &mut response).map_err(ConnectionError::Encoding)?;

    let status = response.status().code();
    response
        .try_write_to(&mut stream)
        .await
        .map_err(ConnectionError::Write)?;
    info!(status, "successfully sent response.");
    Ok(())
}
