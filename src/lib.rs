mod codec;
mod error;
mod logger;
mod protocol;
mod session;
mod transport;
mod types;

pub use codec::{build_payload, read_parameters};
pub use error::{DecodeError, Error, Result};
pub use logger::MessageLog;
pub use protocol::{DEFAULT_BASE_URL, Endpoints, login_message};
pub use session::{Session, SessionBuilder};
pub use transport::TlsMode;
pub use types::*;
