//! Boolean signals over submission source text.
//!
//! A signal is a single regex test against an in-memory blob. Signals are the
//! only primitive the task scorers build on: each scorer combines a handful
//! of them into category points. A pattern that fails to compile is treated
//! as a non-match rather than an error, so a bad pattern can cost marks but
//! never abort a grading run.

use regex::Regex;

/// Test whether `pattern` matches anywhere in `text`.
///
/// Case-sensitive unless the pattern itself carries an `(?i)` flag. Empty
/// text (the stand-in for a missing file) matches nothing except patterns
/// that match the empty string, which none of the built-in signals do.
pub fn matches(text: &str, pattern: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// An Express route registration: `app.<verb>("<path>",`.
///
/// Accepts single or double quotes around the path.
pub fn route(text: &str, verb: &str, path: &str) -> bool {
    let pattern = format!(r#"app\.{verb}\s*\(\s*["']{}["']\s*,"#, regex::escape(path));
    matches(text, &pattern)
}

/// A response status call with a specific code: `.status(201)`.
pub fn status_code(text: &str, code: u16) -> bool {
    matches(text, &format!(r"\.status\s*\(\s*{code}\s*\)"))
}

/// A call to a method on the `Song` model: `Song.create(`.
pub fn model_call(text: &str, method: &str) -> bool {
    matches(text, &format!(r"Song\.{method}\s*\("))
}

/// A try/catch block somewhere enclosing the given inner pattern.
///
/// Matches the lab's loose shape `try { ... <inner> ... } catch (` anywhere
/// in the blob; the opening `try` and the closing `catch` need not belong to
/// the same lexical block, which is deliberate slack in the rubric.
pub fn try_catch_around(text: &str, inner: &str) -> bool {
    matches(
        text,
        &format!(r"(?s)try\s*\{{.*(?:{inner}).*\}}\s*catch\s*\("),
    )
}

/// A route handler whose body wraps `inner` in try/catch, located after the
/// registration matched by `opener` (e.g. `app\.post`).
pub fn guarded_handler(text: &str, opener: &str, inner: &str) -> bool {
    matches(
        text,
        &format!(r"(?s){opener}.*try\s*\{{.*{inner}.*\}}\s*catch\s*\("),
    )
}

/// A Mongoose schema field declaration carrying all of `options`, in order:
/// `field: { ... opt1 ... opt2 ... }`.
///
/// Each option is itself a regex fragment (e.g. `type\s*:\s*String`).
pub fn schema_field(text: &str, field: &str, options: &[&str]) -> bool {
    let inner = options.join(".*");
    matches(text, &format!(r"(?s){field}\s*:\s*\{{.*{inner}.*\}}"))
}

/// Case-insensitive literal search, for log-message signals.
pub fn contains_ci(text: &str, needle: &str) -> bool {
    matches(text, &format!("(?i){}", regex::escape(needle)))
}
