//! Sub-product code rules.

use regex::Regex;
use std::sync::LazyLock;

use super::EditionKind;

/// Horizon client codes share this prefix and follow their own layout.
pub const CLIENT_PREFIX: &str = "cart";
const TARBALL_SUFFIX: &str = "tarball";
/// Join marker left where a version run separated two code tokens.
const JOIN: &str = "+";

/// A digit run and everything after it.
static TRAILING_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+.*").unwrap());

/// A version run with a separator on both sides, e.g. `-2106-` in `dem-2106-standard`.
static BOUNDED_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_][0-9.]+[-_]").unwrap());

/// Feature-pack / hotfix qualifiers left behind after collapsing a bounded run.
static PATCH_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+fp[0-9]|\+hf[0-9]").unwrap());

/// First version-ish run up to the next underscore in a client code.
static CLIENT_VERSION_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.].*?_").unwrap());

/// `lin_<version>_` infix of the Linux tarball client.
static CLIENT_TARBALL_INFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lin_[0-9]+.*?_").unwrap());

/// `_<version>` and everything after it.
static CLIENT_TRAILING_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[0-9.].*").unwrap());

/// One entry of the ordered code rule chain.
#[derive(Debug, Clone, Copy)]
pub struct CodeRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub apply: fn(&str) -> String,
}

/// Rules in precedence order; the first match wins. Codes matching none
/// pass through (already case-folded).
pub const CODE_RULES: &[CodeRule] = &[
    CodeRule {
        name: "client",
        matches: is_client_code,
        apply: client_code,
    },
    CodeRule {
        name: "bounded-version",
        matches: has_bounded_version,
        apply: collapse_bounded_version,
    },
    CodeRule {
        name: "trailing-version",
        matches: has_trailing_version,
        apply: strip_trailing_version,
    },
];

/// Canonical sub-product code for a raw catalog code.
///
/// Always case-folds. The rule chain runs only for product-binary editions;
/// every other edition kind keeps the folded code as-is.
pub fn normalize_code(raw_code: &str, slug: &str, kind: EditionKind) -> String {
    let code = raw_code.to_lowercase();
    if !kind.is_product_binary() {
        return code;
    }
    match CODE_RULES.iter().find(|rule| (rule.matches)(&code)) {
        Some(rule) => {
            let out = (rule.apply)(&code);
            tracing::trace!(slug, rule = rule.name, from = %code, to = %out, "normalized code");
            out
        }
        None => code,
    }
}

fn is_client_code(code: &str) -> bool {
    code.starts_with(CLIENT_PREFIX)
}

fn has_bounded_version(code: &str) -> bool {
    BOUNDED_VERSION.is_match(code)
}

fn has_trailing_version(code: &str) -> bool {
    TRAILING_VERSION.is_match(code)
}

/// Horizon client layout: `cart<build>_<platform>_<version>[_tarball]`.
///
/// Folds the build token into the join marker, then drops the version tail
/// (or the `lin_<version>_` infix for the tarball flavour).
pub fn client_code(code: &str) -> String {
    let code = code.replacen('-', "_", 1);
    let code = CLIENT_VERSION_RUN.replacen(&code, 1, JOIN).into_owned();
    if code.ends_with(TARBALL_SUFFIX) {
        CLIENT_TARBALL_INFIX.replace_all(&code, "").into_owned()
    } else {
        CLIENT_TRAILING_VERSION.replace_all(&code, "").into_owned()
    }
}

fn collapse_bounded_version(code: &str) -> String {
    let joined = BOUNDED_VERSION.replace_all(code, JOIN);
    PATCH_QUALIFIER.replace_all(&joined, "").into_owned()
}

fn strip_trailing_version(code: &str) -> String {
    let stripped = strip_trailing_version_run(code);
    let stripped = stripped.strip_suffix('_').unwrap_or(&stripped);
    let stripped = stripped.strip_suffix('-').unwrap_or(stripped);
    stripped.to_string()
}

/// Removes the first digit run and everything after it. Shared with names.
pub(super) fn strip_trailing_version_run(s: &str) -> String {
    TRAILING_VERSION.replace_all(s, "").into_owned()
}
