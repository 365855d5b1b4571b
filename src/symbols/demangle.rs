use crate::error::DemangleError;

/// A capability that turns one mangled symbol into readable text.
/// Implementations: CxxFiltDemangler (process), ItaniumDemangler (in-process),
/// AutoDemangler (process with in-process fallback).
pub trait DemanglingService: Send + Sync {
    /// Demangle a single symbol. Unrecognized input may be passed through unchanged.
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError>;

    /// Backend label used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Invoke `service` for `symbol` and return the trimmed demangled text,
/// or `None` when the backend is missing or rejected the input.
pub fn demangle(service: &dyn DemanglingService, symbol: &str) -> Option<String> {
    match service.demangle(symbol) {
        Ok(text) => Some(text.trim().to_string()),
        Err(e @ DemangleError::Unavailable { .. }) => {
            tracing::warn!("{} backend unavailable: {}", service.name(), e);
            None
        }
        Err(e @ DemangleError::Failed { .. }) => {
            tracing::debug!("{} backend: {}", service.name(), e);
            None
        }
    }
}
