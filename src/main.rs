use barename::config::{self, Backend};
use barename::symbols::{bare_function_name, service_for};
use barename::{DemangleResult, Error, Result};
use rayon::prelude::*;
use serde::Serialize;

const USAGE: &str = "Usage: barename [--backend cxxfilt|itanium|auto] [--cxxfilt PATH] [--no-params] [--json] [--] [SYMBOL...]";

/// Demonstration symbols used when none are given on the command line.
const SAMPLE_SYMBOLS: &[&str] = &[
    "_Z8multiplyIdET_S0_S0_",
    "_ZN9StaticLib7isPrimeEi",
    "_Z15calculateSquarei",
    "_Z1fv",
    "_ZNSt16allocator_traitsISaINSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEEEE9constructIS5_JS5_EEEvRS6_PT_DpOT0_",
    "_ZStlsISt11char_traitsIcEERSt13basic_ostreamIcT_ES5_PKc@GLIBCXX_3.4",
    "_ZNSt8functionIFvRK6ClassCEEaSIZ12analyzeTypesvE3$_0EENSt9enable_ifIXsrNS4_9_CallableIT_NS7_IXntsr7is_sameINSt9remove_cvINSt16remove_referenceIS9_E4typeEE4typeES4_EE5valueESt5decayIS9_EE4type4typeESt15__invoke_resultIRSK_JS2_EEEE5valueERS4_E4typeEOS9_",
    "_ZNSt16allocator_traitsISaIvEE9constructI6ClassBJEEEvRS0_PT_DpOT0_",
    "__cxa_pure_virtual@CXXABI_1.3",
    "_Z11processNodeB5cxx1111Node_cyclic",
];

#[derive(Debug, Default)]
struct Args {
    backend: Option<Backend>,
    cxxfilt: Option<String>,
    no_params: bool,
    json: bool,
    help: bool,
    symbols: Vec<String>,
}

#[derive(Serialize)]
struct Entry<'a> {
    symbol: &'a str,
    #[serde(flatten)]
    result: &'a DemangleResult,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--backend" => {
                let value = args.next()
                    .ok_or_else(|| Error::Usage("--backend needs a value".to_string()))?;
                parsed.backend = Some(value.parse()?);
            }
            "--cxxfilt" => {
                let value = args.next()
                    .ok_or_else(|| Error::Usage("--cxxfilt needs a path".to_string()))?;
                parsed.cxxfilt = Some(value);
            }
            "--no-params" => parsed.no_params = true,
            "--json" => parsed.json = true,
            "-h" | "--help" => parsed.help = true,
            "--" => {
                parsed.symbols.extend(args.by_ref());
            }
            flag if flag.starts_with("--") => {
                return Err(Error::Usage(format!("unknown option '{}'", flag)));
            }
            _ => parsed.symbols.push(arg),
        }
    }
    Ok(parsed)
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().ok();
    let mut settings = config::resolve(cwd.as_deref());
    if let Some(backend) = args.backend {
        settings.backend = backend;
    }
    if let Some(program) = args.cxxfilt {
        settings.cxxfilt_program = program;
    }
    if args.no_params {
        settings.cxxfilt_no_params = true;
    }

    let symbols: Vec<String> = if args.symbols.is_empty() {
        SAMPLE_SYMBOLS.iter().map(|s| s.to_string()).collect()
    } else {
        args.symbols
    };

    let service = service_for(&settings);
    tracing::debug!("Demangling {} symbols with the {} backend", symbols.len(), service.name());

    let results: Vec<DemangleResult> = symbols
        .par_iter()
        .map(|symbol| bare_function_name(service.as_ref(), symbol))
        .collect();

    if args.json {
        let entries: Vec<Entry<'_>> = symbols
            .iter()
            .zip(&results)
            .map(|(symbol, result)| Entry { symbol, result })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (symbol, result) in symbols.iter().zip(&results) {
            println!("Mangled:   {}", symbol);
            println!("Demangled: {}", result.demangled);
            println!("Bare name: {}", result.bare_name);
            println!();
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let outcome = parse_args(std::env::args().skip(1)).and_then(|args| {
        if args.help {
            println!("{}", USAGE);
            return Ok(());
        }
        run(args)
    });

    match outcome {
        Ok(()) => {}
        Err(e @ (Error::Usage(_) | Error::UnknownBackend(_))) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
