/*!

Read-only view of a secret store.

The report walks a store through these traits rather than through the
dbus client directly. [`crate::Service`] implements them over the
Secret Service; tests implement them in memory.

*/

use std::collections::HashMap;

use crate::errors::Result;

/// A decrypted secret as handed back by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretValue {
    pub content_type: String,
    pub payload: Vec<u8>,
}

impl SecretValue {
    /// The payload as text: only `text/plain` (or untyped) secrets that
    /// are valid UTF-8 count.
    pub fn text(&self) -> Option<&str> {
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if !(mime.is_empty() || mime.eq_ignore_ascii_case("text/plain")) {
            return None;
        }
        std::str::from_utf8(&self.payload).ok()
    }
}


pub trait SecretStore {
    /// Object path of the service itself.
    fn path(&self) -> String;

    /// The collection path an alias is bound to, if any.
    fn alias_target(&self, alias: &str) -> Result<Option<String>>;

    /// All collections, in the order the service reports them.
    fn collections(&self) -> Result<Vec<Box<dyn CollectionHandle + '_>>>;
}

/// Anything the service can lock.
pub trait Lockable {
    fn path(&self) -> &str;

    fn is_locked(&self) -> Result<bool>;

    /// Ask the service to unlock exactly this object.
    ///
    /// A successful return does not mean the object is now unlocked;
    /// read [`Lockable::is_locked`] again to find out.
    fn unlock(&self) -> Result<()>;
}

pub trait CollectionHandle: Lockable {
    fn label(&self) -> Result<String>;

    /// Creation time in seconds since the epoch, when known.
    fn created(&self) -> Result<Option<u64>>;

    fn modified(&self) -> Result<Option<u64>>;

    fn items(&self) -> Result<Vec<Box<dyn ItemHandle + '_>>>;
}

pub trait ItemHandle: Lockable {
    fn label(&self) -> Result<String>;

    fn created(&self) -> Result<Option<u64>>;

    fn modified(&self) -> Result<Option<u64>>;

    fn attributes(&self) -> Result<HashMap<String, String>>;

    fn secret(&self) -> Result<SecretValue>;
}
