pub mod config;
pub mod goal;
pub mod simulado;
pub mod stats;
pub mod subject;
pub mod timer;

use estuda_core::StoreError;

/// Persist a collection, warning instead of failing the command.
///
/// Storage write failures are non-fatal: the in-memory mutation already
/// happened and the command's output reflects it, so the divergence is
/// only reported on stderr.
pub(crate) fn save_or_warn(what: &str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        eprintln!("warning: failed to persist {what}: {e}");
    }
}

/// Load a collection, warning and falling back to the default on failure.
pub(crate) fn load_or_warn<T: Default>(what: &str, result: Result<T, StoreError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("warning: failed to load {what}: {e}");
            T::default()
        }
    }
}
