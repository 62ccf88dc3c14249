//! Glob-expression matching for filter rules.
//!
//! Filter expressions are shell-style globs (`*`, `?`, `[...]` character
//! classes, `**`) tested against a bare file name or a `/`-separated path.
//! Matching is case-sensitive. `*` is not anchored at separators, so a rule
//! written as `*.tmp` matches both `a.tmp` and `dir/a.tmp`.
//!
//! Expressions are compiled per evaluation; rule lists are short and the
//! compile cost is dwarfed by the surrounding request handling.

use globset::Glob;

use crate::error::CoreError;

/// Test `candidate` against a single glob `expression`.
///
/// Returns [`CoreError::Validation`] when the expression does not compile;
/// callers decide whether a malformed expression is fatal (the filter
/// service treats it as non-matching and moves on).
pub fn match_glob(expression: &str, candidate: &str) -> Result<bool, CoreError> {
    let glob = Glob::new(expression).map_err(|e| {
        CoreError::Validation(format!("invalid glob expression '{expression}': {e}"))
    })?;
    Ok(glob.compile_matcher().is_match(candidate))
}
