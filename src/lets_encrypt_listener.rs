use std::{
    io::{Error, ErrorKind, Result},
    net::SocketAddr,
    path::PathBuf,
    pin::Pin,
    task::{Context, Poll},
};

use rocket::listener::{Connection, Endpoint, Listener};
use rustls_acme::{
    AcmeConfig,
    caches::DirCache,
    futures_rustls::server::TlsStream,
    tokio::{TokioIncoming, TokioIncomingTcpWrapper},
};
use tokio::{
    io::{AsyncRead, AsyncWrite, ReadBuf},
    net::{TcpListener, TcpStream},
    sync::Mutex,
};
use tokio_stream::{StreamExt, wrappers::TcpListenerStream};
use tokio_util::compat::Compat;

pub struct AcmeSettings {
    pub address: SocketAddr,
    pub domain: String,
    pub contact: Option<String>,
    pub cache: PathBuf,
}

type Incoming = TokioIncoming<
    Compat<TcpStream>,
    Error,
    TokioIncomingTcpWrapper<TcpStream, Error, TcpListenerStream>,
    Error,
    Error,
>;

/// Terminates TLS itself, with certificates ordered from Let's Encrypt.
pub struct LetsEncryptListener {
    incoming: Mutex<Incoming>,
    address: SocketAddr,
}

impl LetsEncryptListener {
    pub async fn bind(settings: AcmeSettings) -> Result<Self> {
        let tcp_listener = TcpListener::bind(settings.address).await?;
        let address = tcp_listener.local_addr()?;
        let tcp_incoming = TcpListenerStream::new(tcp_listener);

        log::info!(
            "requesting certificates for {} on {address}",
            settings.domain
        );

        let incoming = AcmeConfig::new(vec![settings.domain])
            .contact(settings.contact.map(|email| format!("mailto:{email}")))
            .cache_option(Some(DirCache::new(settings.cache)))
            .directory_lets_encrypt(true)
            .tokio_incoming(tcp_incoming, Vec::new());

        Ok(Self {
            incoming: Mutex::new(incoming),
            address,
        })
    }
}

impl Listener for LetsEncryptListener {
    type Accept = LetsEncryptConnection;

    type Connection = Self::Accept;

    async fn accept(&self) -> Result<Self::Accept> {
        let stream = self
            .incoming
            .lock()
            .await
            .next()
            .await
            .ok_or_else(|| Error::new(ErrorKind::ConnectionAborted, "TLS listener closed"))??;

        Ok(LetsEncryptConnection {
            stream,
            address: self.address,
        })
    }

    async fn connect(&self, accept: Self::Accept) -> Result<Self::Connection> {
        Ok(accept)
    }

    fn endpoint(&self) -> Result<Endpoint> {
        Ok(Endpoint::Tcp(self.address))
    }
}

pub struct LetsEncryptConnection {
    stream: Compat<TlsStream<Compat<TcpStream>>>,
    address: SocketAddr,
}

impl AsyncWrite for LetsEncryptConnection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize>> {
        Pin::new(&mut self.get_mut().stream).poll_write(cx, buf)
    }
    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_flush(cx)
    }
    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_shutdown(cx)
    }
}

impl AsyncRead for LetsEncryptConnection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_read(cx, buf)
    }
}

impl Connection for LetsEncryptConnection {
    fn endpoint(&self) -> Result<Endpoint> {
        Ok(Endpoint::Tcp(self.address))
    }
}
