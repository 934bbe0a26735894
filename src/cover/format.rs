//! Sum-of-products and product-of-sums rendering

use super::ImplicantList;

/// Text produced for a function that is never true
pub const CONSTANT_FALSE: &str = "0 (False)";
/// Text produced for a function that is always true
pub const CONSTANT_TRUE: &str = "1 (True)";

/// Render minterm-derived implicants as a sum of products
///
/// Each implicant becomes a product of its fixed variables, primed when the
/// variable is fixed to 0, and products are joined with `" + "`.
///
/// # Examples
///
/// ```
/// use logic_compiler::cover::{format_sop, Implicant, ImplicantList};
///
/// let list: ImplicantList = [Implicant::new(0b001, 0b111010), Implicant::new(0b010, 0b111100)]
///     .into_iter()
///     .collect();
/// assert_eq!(format_sop(&list), "AC' + A'B");
/// ```
pub fn format_sop(list: &ImplicantList) -> String {
    if list.is_empty() {
        return CONSTANT_FALSE.to_string();
    }
    if list.iter().any(|imp| imp.is_blanket()) {
        return CONSTANT_TRUE.to_string();
    }

    let mut out = String::new();
    for (i, implicant) in list.iter().enumerate() {
        if i > 0 {
            out.push_str(" + ");
        }
        for (name, polarity) in implicant.literals() {
            out.push(name);
            if !polarity {
                out.push('\'');
            }
        }
    }
    out
}

/// Render maxterm-derived implicants as a product of sums
///
/// Each implicant becomes a parenthesised OR clause with the polarity of
/// every literal inverted (a variable fixed to 1 appears primed); clauses are
/// written side by side, joined by implicit AND.
///
/// # Examples
///
/// ```
/// use logic_compiler::cover::{format_pos, Implicant, ImplicantList};
///
/// let list: ImplicantList = [Implicant::new(0b001, 0b111010)].into_iter().collect();
/// assert_eq!(format_pos(&list), "(A' + C)");
/// ```
pub fn format_pos(list: &ImplicantList) -> String {
    if list.is_empty() {
        return CONSTANT_TRUE.to_string();
    }
    if list.iter().any(|imp| imp.is_blanket()) {
        return CONSTANT_FALSE.to_string();
    }

    let mut out = String::new();
    for implicant in list.iter() {
        out.push('(');
        for (i, (name, polarity)) in implicant.literals().enumerate() {
            if i > 0 {
                out.push_str(" + ");
            }
            out.push(name);
            if polarity {
                out.push('\'');
            }
        }
        out.push(')');
    }
    out
}
