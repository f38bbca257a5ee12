// HTTP client construction: cookie-backed session state plus the TLS
// trust decision, made once per session.

use std::path::PathBuf;

use tracing::warn;

use crate::{Error, Result};

/// How the service certificate is verified.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Verify against the root bundle embedded in rustls.
    #[default]
    BuiltIn,
    /// Verify strictly against the PEM chain in this file; built-in roots are disabled.
    CertificateChain(PathBuf),
    /// Accept any certificate.
    Insecure,
}

pub(crate) fn build_client(tls: &TlsMode) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().cookie_store(true);

    match tls {
        TlsMode::BuiltIn => {}
        TlsMode::CertificateChain(path) => {
            let pem = std::fs::read(path).map_err(|e| {
                Error::Tls(format!("failed to read certificate chain {}: {e}", path.display()))
            })?;
            let certs = reqwest::Certificate::from_pem_bundle(&pem)
                .map_err(|e| Error::Tls(format!("invalid certificate chain: {e}")))?;
            if certs.is_empty() {
                return Err(Error::Tls(format!(
                    "no certificates in {}",
                    path.display()
                )));
            }
            builder = builder.tls_built_in_root_certs(false);
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }
        TlsMode::Insecure => {
            warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
    }

    builder
        .build()
        .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
}
