use std::sync::LazyLock;

use regex::Regex;

// Everything through the last "::" that precedes the first '('.
static QUALIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^(]*::").expect("Invalid qualifier regex pattern"));

// Greedy: first '(' through last ')'.
static ARGUMENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("Invalid argument-list regex pattern"));

// Greedy: first '<' through last '>'.
static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*>").expect("Invalid template regex pattern"));

static ABI_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]").expect("Invalid ABI tag regex pattern"));

/// Reduce a demangled signature to its bare function name.
///
/// Strips, in order: namespace/class qualifiers, the argument list, template
/// parameters and ABI tags such as `[abi:cxx11]`, then trims whitespace. If
/// nothing is left, `text` is returned unchanged, so a non-empty input never
/// produces an empty name.
///
/// Parentheses and angle brackets are matched greedily from the first opener
/// to the last closer. Signatures with several disjoint bracketed regions
/// (function pointer return types, for example) are over-stripped; this is
/// kept so that bare names stay stable across versions.
pub fn reduce(text: &str) -> String {
    let unqualified = QUALIFIER_RE.replace(text, "");
    let without_args = ARGUMENTS_RE.replace(&unqualified, "");
    let without_templates = TEMPLATE_RE.replace(&without_args, "");
    let without_tags = ABI_TAG_RE.replace(&without_templates, "");
    let bare = without_tags.trim();

    if bare.is_empty() {
        tracing::trace!("Reduction of '{}' produced an empty name, keeping input", text);
        return text.to_string();
    }
    bare.to_string()
}
