/*!

Error classification.

Every failure coming back from the secret service is folded into one of
a small, closed set of causes. The display form of each variant is a fixed
human sentence followed by whatever description the service gave us.

*/

use dbus_secret_service::Error as SsError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The service sent something malformed or unexpected.
    #[error("Received invalid data from secret service.{}", detail(.0))]
    Protocol(String),
    /// The operation needs an unlocked collection or item.
    #[error("Secret item or collection is locked.{}", detail(.0))]
    Locked(String),
    /// The object went away between listing it and reading it.
    #[error("Secret item or collection not found.{}", detail(.0))]
    NotFound(String),
    /// Only ever passed through; nothing here creates objects.
    #[error("Secret item or collection already exists.{}", detail(.0))]
    AlreadyExists(String),
    /// Anything outside the secret service's own error domain.
    #[error("Couldn't get secret service.{}", detail(.0))]
    Unavailable(String),
}

fn detail(description: &str) -> String {
    if description.is_empty() {
        String::new()
    } else {
        format!(" {description}")
    }
}

const SECRET_IS_LOCKED: &str = "org.freedesktop.Secret.Error.IsLocked";
const SECRET_NO_SUCH_OBJECT: &str = "org.freedesktop.Secret.Error.NoSuchObject";
const SECRET_ALREADY_EXISTS: &str = "org.freedesktop.Secret.Error.AlreadyExists";
const DBUS_UNKNOWN_OBJECT: &str = "org.freedesktop.DBus.Error.UnknownObject";
const DBUS_INVALID_ARGS: &str = "org.freedesktop.DBus.Error.InvalidArgs";
const DBUS_INVALID_SIGNATURE: &str = "org.freedesktop.DBus.Error.InvalidSignature";

/// Map an underlying secret-service error to its cause.
pub fn decode_error(err: SsError) -> Error {
    match err {
        SsError::Locked => Error::Locked(String::new()),
        SsError::NoResult => Error::NotFound(String::new()),
        SsError::Crypto(e) => Error::Protocol(e.to_string()),
        SsError::Parse => Error::Protocol("The reply could not be parsed.".to_string()),
        SsError::Path(path) => Error::Protocol(format!("Bad object path {path}")),
        SsError::UnsupportedSecretFormat => {
            Error::Protocol("The secret is in an unsupported format.".to_string())
        }
        SsError::Prompt => Error::Locked("The unlock prompt was dismissed.".to_string()),
        SsError::Unavailable => Error::Unavailable(String::new()),
        SsError::Dbus(e) => decode_dbus_error(&e),
        #[allow(unreachable_patterns)]
        other => Error::Unavailable(other.to_string()),
    }
}

/// Map a raw D-Bus error by its error name.
pub fn decode_dbus_error(err: &dbus::Error) -> Error {
    let description = err
        .message()
        .or_else(|| err.name())
        .unwrap_or_default()
        .to_string();
    match err.name() {
        Some(SECRET_IS_LOCKED) => Error::Locked(description),
        Some(SECRET_NO_SUCH_OBJECT | DBUS_UNKNOWN_OBJECT) => Error::NotFound(description),
        Some(SECRET_ALREADY_EXISTS) => Error::AlreadyExists(description),
        Some(DBUS_INVALID_ARGS | DBUS_INVALID_SIGNATURE) => Error::Protocol(description),
        _ => Error::Unavailable(description),
    }
}
