//! Route table composition from feature flags

use std::fmt;

use crate::config::FeatureFlags;

/// What a mount point delegates to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    ChatApi,
    SwaggerUi,
    Console,
    StaticFiles,
}

impl MountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MountKind::ChatApi => "Chat API",
            MountKind::SwaggerUi => "Swagger UI",
            MountKind::Console => "Console",
            MountKind::StaticFiles => "Static files",
        }
    }
}

impl fmt::Display for MountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A path prefix and the sub-service mounted there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub kind: MountKind,
    /// Prefix without a trailing slash; empty for the root
    pub path: String,
}

impl Mount {
    fn new(kind: MountKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Prefix as matched on the wire, always ending in `/`
    pub fn prefix(&self) -> String {
        format!("{}/", self.path)
    }
}

/// The set of mounted sub-services, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    mounts: Vec<Mount>,
}

impl RouteTable {
    /// Decide which sub-services are mounted, most specific first
    pub fn plan(flags: &FeatureFlags) -> Self {
        let mut mounts = Vec::with_capacity(4);
        if flags.chat_enabled() {
            mounts.push(Mount::new(
                MountKind::ChatApi,
                format!("/{}", flags.chat_prefix),
            ));
        }
        if flags.swagger_enabled() {
            mounts.push(Mount::new(
                MountKind::SwaggerUi,
                format!("/{}", flags.swagger_prefix),
            ));
        }
        mounts.push(Mount::new(MountKind::Console, "/site"));
        mounts.push(Mount::new(MountKind::StaticFiles, ""));
        Self { mounts }
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    /// Wire prefixes in mount order
    pub fn prefixes(&self) -> Vec<String> {
        self.mounts.iter().map(Mount::prefix).collect()
    }

    pub fn contains(&self, kind: MountKind) -> bool {
        self.mounts.iter().any(|m| m.kind == kind)
    }

    /// Startup status lines, one per mounted sub-service
    pub fn banner(&self, flags: &FeatureFlags) -> Vec<String> {
        let host = match flags.server_address.as_str() {
            "" | "0.0.0.0" => "localhost",
            other => other,
        };
        self.mounts
            .iter()
            .map(|m| {
                format!(
                    "Serving {} at http://{}:{}{}",
                    m.kind,
                    host,
                    flags.server_port,
                    m.prefix()
                )
            })
            .collect()
    }
}
