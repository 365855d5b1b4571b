use serde::Serialize;

use super::demangle::{demangle, DemanglingService};
use super::reduce::reduce;

/// A demangled signature and the bare name reduced from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemangleResult {
    /// The demangled text, or the original symbol when demangling failed.
    pub demangled: String,
    pub bare_name: String,
}

/// Demangle `symbol` with `service` and reduce the result to a bare name.
/// Falls back to the original symbol when the service cannot demangle it.
pub fn bare_function_name(service: &dyn DemanglingService, symbol: &str) -> DemangleResult {
    let demangled = demangle(service, symbol).unwrap_or_else(|| symbol.to_string());
    let bare_name = reduce(&demangled);
    DemangleResult { demangled, bare_name }
}
