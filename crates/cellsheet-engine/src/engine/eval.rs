//! Formula evaluation.
//!
//! A formula (the text after the leading `=`) is evaluated in stages:
//!
//! 1. Text made only of digits, `.`, `+ - * / ( )` and spaces is evaluated as
//!    arithmetic without looking at any cell.
//! 2. Otherwise every single cell reference is replaced by its current numeric
//!    value (absent or non-numeric cells become 0). Range operands such as
//!    `A1:B2` are left as they are.
//! 3. If the substituted text starts with `SUM(`, the range inside the first
//!    `SUM(...)` is summed and returned.
//! 4. Otherwise the substituted text is evaluated as arithmetic.
//!
//! Any failure yields [`Computed::Error`].

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use super::cell_id::CellId;
use super::error::{FormulaError, Result};
use super::format::format_operand;
use super::parser::eval_arithmetic;
use super::range::Range;
use super::value::Computed;

/// Read access to cell values during evaluation.
pub trait CellLookup {
    /// Numeric value of a cell; `None` when absent or non-numeric.
    fn number_at(&self, id: CellId) -> Option<f64>;
}

impl CellLookup for HashMap<CellId, f64> {
    fn number_at(&self, id: CellId) -> Option<f64> {
        self.get(&id).copied()
    }
}

fn pure_arithmetic_re() -> &'static Regex {
    static PURE_RE: OnceLock<Regex> = OnceLock::new();
    PURE_RE.get_or_init(|| {
        Regex::new(r"^[0-9+\-*/.() ]+$").expect("arithmetic literal regex must compile")
    })
}

fn reference_re() -> &'static Regex {
    static REF_RE: OnceLock<Regex> = OnceLock::new();
    REF_RE.get_or_init(|| {
        Regex::new(r"[A-Z]+[0-9]+(:[A-Z]+[0-9]+)?").expect("reference regex must compile")
    })
}

fn sum_call_re() -> &'static Regex {
    static SUM_RE: OnceLock<Regex> = OnceLock::new();
    SUM_RE.get_or_init(|| Regex::new(r"SUM\(([^)]+)\)").expect("SUM regex must compile"))
}

/// Evaluate formula text, turning any failure into the error marker.
pub fn evaluate_formula<L: CellLookup + ?Sized>(formula: &str, cells: &L) -> Computed {
    match try_evaluate(formula, cells) {
        Ok(n) => Computed::Number(n),
        Err(err) => {
            debug!(formula, error = %err, "formula evaluation failed");
            Computed::Error
        }
    }
}

fn try_evaluate<L: CellLookup + ?Sized>(formula: &str, cells: &L) -> Result<f64> {
    let formula = formula.trim();

    if pure_arithmetic_re().is_match(formula) {
        return eval_arithmetic(formula);
    }

    let substituted = substitute_references(formula, cells);

    if substituted.starts_with("SUM(") {
        return sum_call(&substituted, cells);
    }

    eval_arithmetic(&substituted)
}

/// Replace each single cell reference with its numeric value.
///
/// The scan runs once over the original text, so a reference is never matched
/// inside text produced by an earlier replacement. Tokens that are not valid
/// cell ids (e.g. `AA1`) resolve like absent cells.
pub fn substitute_references<L: CellLookup + ?Sized>(formula: &str, cells: &L) -> String {
    reference_re()
        .replace_all(formula, |caps: &Captures| {
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            let value = CellId::parse(&caps[0])
                .and_then(|id| cells.number_at(id))
                .unwrap_or(0.0);
            format_operand(value)
        })
        .into_owned()
}

fn sum_call<L: CellLookup + ?Sized>(text: &str, cells: &L) -> Result<f64> {
    let caps = sum_call_re()
        .captures(text)
        .ok_or_else(|| FormulaError::InvalidRange(text.to_string()))?;
    let mut endpoints = caps[1].split(':');
    let start = endpoints.next().unwrap_or_default();
    let end = endpoints.next().unwrap_or_default();
    if start.is_empty() || end.is_empty() {
        return Ok(0.0);
    }
    let range = Range::from_endpoints(start, end)?;
    Ok(range.sum(cells))
}
