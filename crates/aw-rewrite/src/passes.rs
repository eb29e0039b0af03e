//! The six ordered conversion passes.
//!
//! Each pass is one regex sweep over the text; the output of one pass is
//! the input of the next. Order matters: the delimited-expression passes
//! run first so the later catch-all passes never touch text that already
//! sits inside a converted `{{ }}` block.

// Pattern literals are fixed at compile time; construction cannot fail.
#![allow(clippy::unwrap_used)]

use aw_core::RewriteResult;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Variable names follow the `SCREAMING_SNAKE_CASE` convention of the
/// workflow environment: `[A-Z_][A-Z0-9_]*`.
static SIMPLE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\$vars\.([A-Z_][A-Z0-9_]*)\}\}").unwrap());

static COMPOUND_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]*)\$vars\.([A-Z_][A-Z0-9_]*)([^}]*)\}\}").unwrap());

static QUOTED_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)\$vars\.([A-Z_][A-Z0-9_]*)([^"]*)""#).unwrap());

static REDUNDANT_FALLBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$vars\.([A-Z_][A-Z0-9_]*)\s*\|\|\s*\$env\.([A-Z_][A-Z0-9_]*)").unwrap());

static BARE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^{])\$vars\.([A-Z_][A-Z0-9_]*)([^}])").unwrap());

static WHITESPACE_BOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\s)\$vars\.([A-Z_][A-Z0-9_]*)").unwrap());

/// Applies all six passes in order, recording every substitution in `result`.
pub(crate) fn apply_all(text: &str, result: &mut RewriteResult) -> String {
    let out = simple_delimited(text, result);
    let out = compound_expression(&out, result);
    let out = quoted_value(&out, result);
    let out = redundant_fallback(&out, result);
    let out = bare_code(&out, result);
    whitespace_boundary(&out, result)
}

/// Pass 1: `{{$vars.NAME}}` becomes `{{$env.NAME}}`.
fn simple_delimited(text: &str, result: &mut RewriteResult) -> String {
    SIMPLE_REF
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            result.record(
                name,
                format!("{{{{$vars.{name}}}}} → {{{{$env.{name}}}}}"),
            );
            format!("{{{{$env.{name}}}}}")
        })
        .into_owned()
}

/// Pass 2: any `{{ ... }}` block still containing a legacy token.
///
/// The whole block is rebuilt with every `$vars.` inside renamed, so
/// concatenations and fallback chains convert in one step. The ledger
/// records one entry per block, not per token.
fn compound_expression(text: &str, result: &mut RewriteResult) -> String {
    COMPOUND_EXPR
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[2];
            let rebuilt = format!("{{{{{}$env.{}{}}}}}", &caps[1], name, &caps[3]);
            let rebuilt = rebuilt.replace("$vars.", "$env.");
            let head: String = caps[0].chars().take(50).collect();
            result.record(name, format!("Expression: {head}... → converted to $env"));
            rebuilt
        })
        .into_owned()
}

/// Pass 3: a legacy token inside a double-quoted string.
fn quoted_value(text: &str, result: &mut RewriteResult) -> String {
    QUOTED_VALUE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[2];
            result.record(
                name,
                format!(r#"Quoted: "$vars.{name}" → "$env.{name}""#),
            );
            format!("\"{}$env.{}{}\"", &caps[1], name, &caps[3])
        })
        .into_owned()
}

/// Pass 4: `$vars.KEY1 || $env.KEY2` collapses to `$env.KEY2`.
///
/// The legacy alternative is dropped, not renamed: once every variable
/// lives in the environment the fallback is redundant.
fn redundant_fallback(text: &str, result: &mut RewriteResult) -> String {
    REDUNDANT_FALLBACK
        .replace_all(text, |caps: &Captures<'_>| {
            let legacy = &caps[1];
            let target = &caps[2];
            result.record(
                target,
                format!(
                    "Removed redundant fallback: $vars.{legacy} || $env.{target} → $env.{target}"
                ),
            );
            format!("$env.{target}")
        })
        .into_owned()
}

/// Pass 5: a bare legacy token in embedded script text.
///
/// The adjacency guard (no `{` before, no `}` after) keeps this pass off
/// tokens that sit inside `{{ }}` blocks handled by passes 1 and 2.
fn bare_code(text: &str, result: &mut RewriteResult) -> String {
    BARE_CODE
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[2];
            result.record(name, format!("Code: $vars.{name} → $env.{name}"));
            format!("{}$env.{}{}", &caps[1], name, &caps[3])
        })
        .into_owned()
}

/// Pass 6: whatever pass 5's adjacency guard skipped, provided the token
/// is preceded by whitespace.
fn whitespace_boundary(text: &str, result: &mut RewriteResult) -> String {
    WHITESPACE_BOUND
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[2];
            result.record(
                name,
                format!("Code (whitespace): $vars.{name} → $env.{name}"),
            );
            format!("{}$env.{}", &caps[1], name)
        })
        .into_owned()
}
