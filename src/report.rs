/*!

Keyring traversal.

[`scan`] walks service → collections → items exactly once, in the order
the service returns them, and records what it saw in a plain tree. Errors
that belong to one collection or item are stored on that node and never
stop the walk.

*/

use std::collections::BTreeMap;

use crate::aliases::AliasMap;
use crate::errors::{Error, Result};
use crate::options::{DetailLevel, Options};
use crate::store::{CollectionHandle, ItemHandle, Lockable, SecretStore, SecretValue};
use crate::unlock::unlock;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    pub path: String,
    pub aliases: AliasMap,
    /// `None` when the detail level stops at the service.
    pub collections: Option<Result<Vec<CollectionReport>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub label: Result<String>,
    pub path: String,
    pub aliases: Vec<String>,
    pub created: Option<u64>,
    pub modified: Option<u64>,
    pub unlock_error: Option<Error>,
    pub locked: Result<bool>,
    /// `None` when the detail level stops at collections.
    pub items: Option<Result<Vec<ItemReport>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub label: Result<String>,
    pub path: String,
    pub created: Option<u64>,
    pub modified: Option<u64>,
    /// `None` when attributes were not requested.
    pub attributes: Option<Result<BTreeMap<String, String>>>,
    /// A failed unlock ends the item: nothing after it is read.
    pub unlock_error: Option<Error>,
    pub locked: Option<Result<bool>>,
    /// `None` when secrets were not requested or the unlock failed.
    pub secret: Option<Result<SecretReport>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretReport {
    Value(SecretValue),
    /// The service handed back an empty secret.
    Missing,
}

/// Walk the store and build the report.
pub fn scan(store: &dyn SecretStore, options: &Options) -> ServiceReport {
    let aliases = AliasMap::resolve(store);
    let collections: Option<Result<Vec<CollectionReport>>> =
        (options.detail >= DetailLevel::Collections).then(|| {
            store.collections().map(|all| {
                all.iter()
                    .map(|c| scan_collection(c.as_ref(), &aliases, options))
                    .collect()
            })
        });
    if let Some(Err(e)) = &collections {
        warn!(error = %e, "could not list collections");
    }
    ServiceReport {
        path: store.path(),
        aliases,
        collections,
    }
}

fn scan_collection(
    collection: &dyn CollectionHandle,
    aliases: &AliasMap,
    options: &Options,
) -> CollectionReport {
    let path = collection.path().to_string();
    debug!(%path, "scanning collection");
    let label = collection.label();
    let created = timestamp(collection.created(), &path);
    let modified = timestamp(collection.modified(), &path);

    let (unlock_error, locked) = lock_state(collection, options);

    let items: Option<Result<Vec<ItemReport>>> =
        (options.detail >= DetailLevel::Items).then(|| {
            collection
                .items()
                .map(|all| all.iter().map(|i| scan_item(i.as_ref(), options)).collect())
        });
    if let Some(Err(e)) = &items {
        warn!(%path, error = %e, "could not list items");
    }

    CollectionReport {
        label,
        aliases: aliases.aliases_of(&path).to_vec(),
        path,
        created,
        modified,
        unlock_error,
        locked,
        items,
    }
}

fn scan_item(item: &dyn ItemHandle, options: &Options) -> ItemReport {
    let path = item.path().to_string();
    debug!(%path, "scanning item");
    let mut report = ItemReport {
        label: item.label(),
        created: timestamp(item.created(), &path),
        modified: timestamp(item.modified(), &path),
        attributes: None,
        unlock_error: None,
        locked: None,
        secret: None,
        path,
    };

    if options.detail >= DetailLevel::Attributes {
        report.attributes = Some(item.attributes().map(|a| a.into_iter().collect()));
    }

    let (unlock_error, locked) = lock_state(item, options);
    if unlock_error.is_some() {
        report.unlock_error = unlock_error;
        return report;
    }
    report.locked = Some(locked);

    if options.detail.wants_secrets() {
        report.secret = Some(item.secret().map(|value| {
            if value.payload.is_empty() {
                SecretReport::Missing
            } else {
                SecretReport::Value(value)
            }
        }));
        if let Some(Err(e)) = &report.secret {
            warn!(path = %report.path, error = %e, "could not load secret");
        }
    }
    report
}

/// Unlock the target if asked to and it is locked, then read its state
/// again.
fn lock_state<T: Lockable + ?Sized>(
    target: &T,
    options: &Options,
) -> (Option<Error>, Result<bool>) {
    let locked = target.is_locked();
    if !(options.unlock && matches!(locked, Ok(true))) {
        return (None, locked);
    }
    let unlock_error = unlock(target);
    (unlock_error, target.is_locked())
}

/// Timestamps are optional decorations; a failed read just omits them.
fn timestamp(value: Result<Option<u64>>, path: &str) -> Option<u64> {
    value.unwrap_or_else(|e| {
        debug!(path, error = %e, "timestamp unavailable");
        None
    })
}
