/*!

# lssecrets: list the contents of a Secret Service keyring

This crate walks the keyring exposed by the freedesktop
[Secret Service](https://specifications.freedesktop.org/secret-service/)
and prints what it finds: the service itself, its collections, the items
in each collection, and optionally item attributes and decrypted secret
values. It talks to the service through the
[dbus-secret-service crate](https://crates.io/crates/dbus-secret-service).

Nothing in the keyring is created, changed or deleted. The one side effect
is unlocking, and that only happens when asked for.

## Detail levels

The report depth is an integer from 0 to 4:

- `0`: the service and its well-known aliases (`default`, `login`, `session`)
- `1`: plus every collection
- `2`: plus every item (the default)
- `3`: plus item attributes
- `4`: plus secret values

Secrets can only be read over an encrypted session, so the session is
negotiated with Diffie-Hellman only at level 4; below that a plain session
is used.

## Locking

Collections and items may be locked. With unlocking enabled, each locked
object gets its own unlock request (which may raise a password prompt),
and its lock state is read again afterwards. An unlock that fails is
reported on that object and the walk carries on. A locked item's secret
cannot be read; asking for it reports a "locked" error in place of the
value.

## Errors

Only failing to reach the service at all is fatal. Everything else is
recorded on the collection or item it belongs to and shows up inline in
the report. See [`errors::Error`] for how failures are classified.

## Headless usage

On a headless linux box the keyring daemon is usually not running or is
started locked. The
[Python Keyring docs](https://pypi.org/project/keyring/)
(search for "Using Keyring on headless Linux systems") describe a
workaround; for gnome-keyring something like this starts it unlocked:

```shell
function unlock-keyring ()
{
    read -rsp "Password: " pass
    echo -n "$pass" | gnome-keyring-daemon --unlock
    unset pass
}
```

 */

pub mod aliases;
pub mod errors;
pub mod options;
pub mod render;
pub mod report;
mod service;
pub mod store;
mod unlock;
pub use service::Service;
