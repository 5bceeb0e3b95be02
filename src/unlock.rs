use crate::errors::Error;
use crate::store::Lockable;
use tracing::{debug, warn};

/// Send a single-object unlock request.
///
/// Returns the failure, if any. Success only means the request went
/// through; callers re-read the lock state afterwards.
pub(crate) fn unlock<T: Lockable + ?Sized>(target: &T) -> Option<Error> {
    debug!(path = target.path(), "unlocking");
    match target.unlock() {
        Ok(()) => None,
        Err(e) => {
            warn!(path = target.path(), error = %e, "unlock failed");
            Some(e)
        }
    }
}
