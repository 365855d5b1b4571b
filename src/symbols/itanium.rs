use cpp_demangle::{DemangleOptions, Symbol as CppSymbol};

use super::cxxfilt::CxxFiltDemangler;
use super::demangle::DemanglingService;
use crate::error::DemangleError;

/// In-process demangler for Itanium C++ ABI symbols (and Rust symbols,
/// which share the `_ZN` prefix in the legacy scheme).
#[derive(Debug, Clone, Copy, Default)]
pub struct ItaniumDemangler;

impl DemanglingService for ItaniumDemangler {
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError> {
        // Rust first: cpp_demangle would keep the ::h<hash> segment as a name
        if let Ok(demangled) = rustc_demangle::try_demangle(symbol) {
            return Ok(format!("{:#}", demangled));
        }

        // Like c++filt without -t: bare type encodings such as "i" are not symbols
        if !symbol.starts_with("_Z") && !symbol.starts_with("__Z") {
            return Err(DemangleError::Failed {
                symbol: symbol.to_string(),
                reason: "not an Itanium C++ or Rust symbol".to_string(),
            });
        }

        let parsed = CppSymbol::new(symbol).map_err(|e| DemangleError::Failed {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        })?;
        parsed
            .demangle(&DemangleOptions::default())
            .map_err(|e| DemangleError::Failed {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "itanium"
    }
}

/// Runs `c++filt`, answering in-process only when the program cannot be started.
#[derive(Debug, Clone, Default)]
pub struct AutoDemangler {
    process: CxxFiltDemangler,
    fallback: ItaniumDemangler,
}

impl AutoDemangler {
    pub fn new(process: CxxFiltDemangler) -> Self {
        Self {
            process,
            fallback: ItaniumDemangler,
        }
    }
}

impl DemanglingService for AutoDemangler {
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError> {
        match self.process.demangle(symbol) {
            Err(DemangleError::Unavailable { program, source }) => {
                tracing::debug!("{} not runnable ({}), demangling in-process", program, source);
                self.fallback.demangle(symbol)
            }
            other => other,
        }
    }

    fn name(&self) -> &'static str {
        "auto"
    }
}
