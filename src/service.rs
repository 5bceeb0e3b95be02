/*!

Secret Service access.

This module provides the one live connection to the Secret Service
that a run holds, and exposes its collections and items through the
[`crate::store`] traits.

*/

#[cfg(not(any(feature = "crypto-rust", feature = "crypto-openssl")))]
compile_error!("You must enable one of the features crypto-rust or crypto-openssl");

use std::collections::HashMap;
use std::time::Duration;

use crate::errors::{Result, decode_dbus_error, decode_error};
use crate::store::{CollectionHandle, ItemHandle, Lockable, SecretStore, SecretValue};
use dbus::blocking::Connection;
use dbus::blocking::stdintf::org_freedesktop_dbus::Properties;
use dbus_secret_service::{Collection, EncryptionType, Item, Path, SecretService};
use tracing::debug;

const SERVICE_NAME: &str = "org.freedesktop.secrets";
const SERVICE_PATH: &str = "/org/freedesktop/secrets";
const COLLECTION_INTERFACE: &str = "org.freedesktop.Secret.Collection";

// Same as the libdbus default reply timeout.
const PROPERTY_TIMEOUT: Duration = Duration::from_secs(25);

pub struct Service {
    ss: SecretService,
    bus: Connection,
}

impl Service {
    /// Connect to the Secret Service.
    ///
    /// The session is encrypted only when `want_secrets` is set, since
    /// that is the only case where secret values cross the bus.
    pub fn connect(want_secrets: bool) -> Result<Self> {
        let encryption = if want_secrets {
            EncryptionType::Dh
        } else {
            EncryptionType::Plain
        };
        debug!(want_secrets, "connecting to secret service");
        let ss = SecretService::connect(encryption).map_err(decode_error)?;
        let bus = Connection::new_session().map_err(|e| decode_dbus_error(&e))?;
        Ok(Self { ss, bus })
    }
}

impl SecretStore for Service {
    fn path(&self) -> String {
        SERVICE_PATH.to_string()
    }

    fn alias_target(&self, alias: &str) -> Result<Option<String>> {
        match self.ss.get_collection_by_alias(alias) {
            Ok(collection) => Ok(Some(collection.path.to_string())),
            Err(dbus_secret_service::Error::NoResult) => Ok(None),
            Err(e) => Err(decode_error(e)),
        }
    }

    fn collections(&self) -> Result<Vec<Box<dyn CollectionHandle + '_>>> {
        let all = self.ss.get_all_collections().map_err(decode_error)?;
        Ok(all
            .into_iter()
            .map(|inner| {
                Box::new(DbusCollection {
                    path: inner.path.to_string(),
                    inner,
                    bus: &self.bus,
                }) as Box<dyn CollectionHandle + '_>
            })
            .collect())
    }
}

struct DbusCollection<'a> {
    inner: Collection<'a>,
    bus: &'a Connection,
    path: String,
}

struct DbusItem<'a> {
    inner: Item<'a>,
    path: String,
}

impl Lockable for DbusCollection<'_> {
    fn path(&self) -> &str {
        &self.path
    }

    fn is_locked(&self) -> Result<bool> {
        self.inner.is_locked().map_err(decode_error)
    }

    fn unlock(&self) -> Result<()> {
        self.inner.unlock().map_err(decode_error)
    }
}

impl CollectionHandle for DbusCollection<'_> {
    fn label(&self) -> Result<String> {
        self.inner.get_label().map_err(decode_error)
    }

    fn created(&self) -> Result<Option<u64>> {
        util::timestamp(self.bus, &self.inner.path, COLLECTION_INTERFACE, "Created")
    }

    fn modified(&self) -> Result<Option<u64>> {
        util::timestamp(self.bus, &self.inner.path, COLLECTION_INTERFACE, "Modified")
    }

    fn items(&self) -> Result<Vec<Box<dyn ItemHandle + '_>>> {
        let all = self.inner.get_all_items().map_err(decode_error)?;
        Ok(all
            .into_iter()
            .map(|inner| {
                Box::new(DbusItem {
                    path: inner.path.to_string(),
                    inner,
                }) as Box<dyn ItemHandle + '_>
            })
            .collect())
    }
}

impl Lockable for DbusItem<'_> {
    fn path(&self) -> &str {
        &self.path
    }

    fn is_locked(&self) -> Result<bool> {
        self.inner.is_locked().map_err(decode_error)
    }

    fn unlock(&self) -> Result<()> {
        self.inner.unlock().map_err(decode_error)
    }
}

impl ItemHandle for DbusItem<'_> {
    fn label(&self) -> Result<String> {
        self.inner.get_label().map_err(decode_error)
    }

    fn created(&self) -> Result<Option<u64>> {
        let seconds = self.inner.get_created().map_err(decode_error)?;
        Ok((seconds != 0).then_some(seconds))
    }

    fn modified(&self) -> Result<Option<u64>> {
        let seconds = self.inner.get_modified().map_err(decode_error)?;
        Ok((seconds != 0).then_some(seconds))
    }

    fn attributes(&self) -> Result<HashMap<String, String>> {
        self.inner.get_attributes().map_err(decode_error)
    }

    // Both getters issue their own GetSecret call; the client has no
    // single call returning payload and content type together.
    fn secret(&self) -> Result<SecretValue> {
        let payload = self.inner.get_secret().map_err(decode_error)?;
        let content_type = self
            .inner
            .get_secret_content_type()
            .map_err(decode_error)?;
        Ok(SecretValue {
            content_type,
            payload,
        })
    }
}

/// Raw property access: `Collection` has no timestamp getters, so
/// collection handles read the properties directly.
mod util {
    use super::{
        Connection, PROPERTY_TIMEOUT, Path, Properties, Result, SERVICE_NAME, decode_dbus_error,
    };

    /// Read a `Created`/`Modified` property. The service reports zero
    /// when it has no timestamp.
    pub(super) fn timestamp(
        bus: &Connection,
        path: &Path<'static>,
        interface: &str,
        property: &str,
    ) -> Result<Option<u64>> {
        let proxy = bus.with_proxy(SERVICE_NAME, path.clone(), PROPERTY_TIMEOUT);
        let seconds: u64 = proxy
            .get(interface, property)
            .map_err(|e| decode_dbus_error(&e))?;
        Ok((seconds != 0).then_some(seconds))
    }
}
