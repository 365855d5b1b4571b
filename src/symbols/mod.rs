mod bare_name;
pub mod cxxfilt;
mod demangle;
pub mod itanium;
mod reduce;

pub use bare_name::{bare_function_name, DemangleResult};
pub use cxxfilt::CxxFiltDemangler;
pub use demangle::{demangle, DemanglingService};
pub use itanium::{AutoDemangler, ItaniumDemangler};
pub use reduce::reduce;

use crate::config::{Backend, Settings};

/// Build the demangling backend selected by `settings`.
pub fn service_for(settings: &Settings) -> Box<dyn DemanglingService> {
    let process = CxxFiltDemangler::new(settings.cxxfilt_program.clone())
        .with_args(settings.cxxfilt_args.clone())
        .with_no_params(settings.cxxfilt_no_params);
    match settings.backend {
        Backend::CxxFilt => Box::new(process),
        Backend::Itanium => Box::new(ItaniumDemangler),
        Backend::Auto => Box::new(AutoDemangler::new(process)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DemangleError;

    /// Backend that always reports a missing executable.
    struct Missing;

    impl DemanglingService for Missing {
        fn demangle(&self, _symbol: &str) -> Result<String, DemangleError> {
            Err(DemangleError::Unavailable {
                program: "c++filt".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }

        fn name(&self) -> &'static str {
            "missing"
        }
    }

    #[test]
    fn test_fallback_pair_when_unavailable() {
        for symbol in ["Foo::Bar::baz(int)", "something@GLIBCXX_3.4", "_Z1fv"] {
            let result = bare_function_name(&Missing, symbol);
            assert_eq!(result.demangled, symbol);
            assert_eq!(result.bare_name, reduce(symbol));
        }
    }

    #[test]
    fn test_empty_symbol() {
        let result = bare_function_name(&Missing, "");
        assert_eq!(result, DemangleResult { demangled: String::new(), bare_name: String::new() });

        let result = bare_function_name(&ItaniumDemangler, "");
        assert_eq!(result.demangled, "");
        assert_eq!(result.bare_name, "");
    }

    #[test]
    fn test_demangle_real_cpp_symbols() {
        let cases = [
            ("_ZN9StaticLib7isPrimeEi", "StaticLib::isPrime(int)", "isPrime"),
            ("_Z15calculateSquarei", "calculateSquare(int)", "calculateSquare"),
            ("_Z1fv", "f()", "f"),
        ];
        for (mangled, demangled, bare) in cases {
            let result = bare_function_name(&ItaniumDemangler, mangled);
            assert_eq!(result.demangled, demangled);
            assert_eq!(result.bare_name, bare);
        }
    }

    #[test]
    fn test_versioned_symbol_falls_back() {
        let symbol = "__cxa_pure_virtual@CXXABI_1.3";
        let result = bare_function_name(&ItaniumDemangler, symbol);
        assert_eq!(result.demangled, symbol);
        assert_eq!(result.bare_name, symbol);
    }

    #[test]
    fn test_service_for_backend() {
        let mut settings = Settings::default();
        assert_eq!(service_for(&settings).name(), "cxxfilt");
        settings.backend = Backend::Itanium;
        assert_eq!(service_for(&settings).name(), "itanium");
        settings.backend = Backend::Auto;
        assert_eq!(service_for(&settings).name(), "auto");
    }

    #[test]
    fn test_service_for_uses_configured_program() {
        let settings = Settings {
            backend: Backend::CxxFilt,
            cxxfilt_program: "/nonexistent/bin/c++filt".to_string(),
            ..Settings::default()
        };
        let service = service_for(&settings);
        let result = bare_function_name(service.as_ref(), "_ZN9StaticLib7isPrimeEi");
        assert_eq!(result.demangled, "_ZN9StaticLib7isPrimeEi");
        assert_eq!(result.bare_name, "_ZN9StaticLib7isPrimeEi");
    }
}
