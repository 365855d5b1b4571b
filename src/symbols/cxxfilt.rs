use std::io::ErrorKind;
use std::process::Command;

use super::demangle::DemanglingService;
use crate::error::DemangleError;

pub const DEFAULT_PROGRAM: &str = "c++filt";

/// Demangles by running `c++filt` (or a compatible tool) once per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CxxFiltDemangler {
    program: String,
    args: Vec<String>,
    no_params: bool,
}

impl Default for CxxFiltDemangler {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CxxFiltDemangler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            no_params: false,
        }
    }

    /// Extra arguments placed before the symbol, e.g. `-_` for Mach-O symbols.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Ask the tool to omit function parameters (`-p`).
    pub fn with_no_params(mut self, no_params: bool) -> Self {
        self.no_params = no_params;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, symbol: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if self.no_params {
            cmd.arg("-p");
        }
        // "--" keeps symbols that start with '-' from being read as options
        cmd.arg("--").arg(symbol);
        cmd
    }
}

impl DemanglingService for CxxFiltDemangler {
    fn demangle(&self, symbol: &str) -> Result<String, DemangleError> {
        let output = self
            .command(symbol)
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => DemangleError::Unavailable {
                    program: self.program.clone(),
                    source,
                },
                // The program exists but would not accept this symbol (NUL byte, E2BIG)
                _ => DemangleError::Failed {
                    symbol: symbol.to_string(),
                    reason: format!("could not pass symbol to {}: {}", self.program, source),
                },
            })?;

        if !output.status.success() {
            return Err(DemangleError::Failed {
                symbol: symbol.to_string(),
                reason: format!("{} returned non-zero exit status: {}", self.program, output.status),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim();
        if text.is_empty() && !symbol.is_empty() {
            return Err(DemangleError::Failed {
                symbol: symbol.to_string(),
                reason: format!("{} produced no output", self.program),
            });
        }

        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "cxxfilt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let service = CxxFiltDemangler::new("/nonexistent/bin/c++filt");
        let err = service.demangle("_Z1fv").unwrap_err();
        assert!(matches!(err, DemangleError::Unavailable { .. }));
        assert!(err.to_string().contains("/nonexistent/bin/c++filt"));
    }

    #[test]
    fn test_nul_byte_in_symbol_is_failed() {
        let service = CxxFiltDemangler::new("/nonexistent/bin/c++filt");
        let err = service.demangle("_Z1fv\0x").unwrap_err();
        assert!(matches!(err, DemangleError::Failed { .. }), "got {:?}", err);
    }

    #[test]
    fn test_system_cxxfilt_accepts_argument_order() {
        let service = CxxFiltDemangler::default();
        let demangled = match service.demangle("_ZN9StaticLib7isPrimeEi") {
            Err(DemangleError::Unavailable { .. }) => {
                eprintln!("c++filt not on PATH, skipping");
                return;
            }
            other => other.unwrap(),
        };
        assert_eq!(demangled, "StaticLib::isPrime(int)");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failed() {
        let service = CxxFiltDemangler::new("false");
        let err = service.demangle("_Z1fv").unwrap_err();
        assert!(matches!(err, DemangleError::Failed { .. }));
        assert!(err.to_string().contains("non-zero"));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_is_failed() {
        let service = CxxFiltDemangler::new("true");
        let err = service.demangle("_Z1fv").unwrap_err();
        assert!(matches!(err, DemangleError::Failed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_symbol_with_empty_output_succeeds() {
        let service = CxxFiltDemangler::new("true");
        assert_eq!(service.demangle("").unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_symbol_is_passed_after_double_dash() {
        // sh -c SCRIPT $0 $1 $2: $0 = "c++filt", $1 = "--", $2 = symbol
        let service = CxxFiltDemangler::new("sh").with_args(vec![
            "-c".to_string(),
            r#"printf '  Demo::%s(int)  \n' "$2""#.to_string(),
            "c++filt".to_string(),
        ]);
        assert_eq!(service.demangle("-odd").unwrap(), "Demo::-odd(int)");
    }

    #[cfg(unix)]
    #[test]
    fn test_no_params_flag_is_forwarded() {
        let service = CxxFiltDemangler::new("sh")
            .with_args(vec![
                "-c".to_string(),
                r#"echo "$1 $2 $3""#.to_string(),
                "c++filt".to_string(),
            ])
            .with_no_params(true);
        assert_eq!(service.demangle("_Z1fv").unwrap(), "-p -- _Z1fv");
    }

    #[test]
    fn test_default_program() {
        assert_eq!(CxxFiltDemangler::default().program(), "c++filt");
    }
}
