//! Backend target selection: in-process engine or remote gRPC endpoint

use std::time::Duration;
use tonic::codegen::http::Uri;

use super::traits::{BackendError, BackendResult};

/// Where engine calls are sent. Chosen once from the presence of a gRPC URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendTarget {
    /// Build the engine in-process from the settings string
    Local,
    /// Dial a remote engine service
    Remote(RemoteEndpoint),
}

impl BackendTarget {
    /// `Local` for an empty URL, otherwise the parsed remote endpoint
    pub fn from_grpc_url(grpc_url: &str) -> BackendResult<Self> {
        let grpc_url = grpc_url.trim();
        if grpc_url.is_empty() {
            Ok(BackendTarget::Local)
        } else {
            Ok(BackendTarget::Remote(RemoteEndpoint::parse(grpc_url)?))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, BackendTarget::Remote(_))
    }
}

/// Options applied when the channel is dialled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialOptions {
    pub tls: bool,
    /// Unbounded when `None`
    pub connect_timeout: Option<Duration>,
}

/// A parsed `grpc://` or `grpcs://` address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    /// Transport URI handed to tonic (`http://host:port` / `https://host:port`)
    pub uri: String,
    pub options: DialOptions,
}

impl RemoteEndpoint {
    /// Parse `grpc://host:port` (plaintext) or `grpcs://host:port` (TLS)
    pub fn parse(grpc_url: &str) -> BackendResult<Self> {
        let parsed: Uri = grpc_url
            .parse()
            .map_err(|e| BackendError::InvalidEndpoint(format!("{}: {}", grpc_url, e)))?;

        let tls = match parsed.scheme_str() {
            Some("grpc") => false,
            Some("grpcs") => true,
            other => {
                return Err(BackendError::InvalidEndpoint(format!(
                    "unsupported scheme {:?} in '{}', expected grpc or grpcs",
                    other.unwrap_or(""),
                    grpc_url
                )))
            }
        };

        let authority = parsed
            .authority()
            .filter(|a| !a.host().is_empty())
            .ok_or_else(|| BackendError::InvalidEndpoint(format!("missing host in '{}'", grpc_url)))?;

        let scheme = if tls { "https" } else { "http" };
        Ok(Self {
            uri: format!("{}://{}", scheme, authority),
            options: DialOptions {
                tls,
                connect_timeout: None,
            },
        })
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = Some(timeout);
        self
    }
}
