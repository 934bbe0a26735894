//! Quine-McCluskey prime implicant generation
//!
//! Each pass compares every pair of implicants, combines the pairs that
//! differ in a single fixed variable and carries the combined cubes into the
//! next pass. Whatever could not be combined in a pass is prime. The result
//! is the union of all prime implicants; no covering selection is made, so
//! the output can contain redundant primes (for example the consensus term
//! `B * C` of `A * B + !A * C`).

use super::cubes::Implicant;
use super::truth_table::TruthTable;
use super::ImplicantList;
use log::trace;

/// Find every prime implicant of the function whose terms are in `table`
///
/// # Examples
///
/// ```
/// use logic_compiler::{cover::find_prime_implicants, TruthTable};
///
/// // A' B' + A' B + A B  ==>  A' + B  (over the two low bits)
/// let table = TruthTable::from_terms([0, 2, 3]).unwrap();
/// let primes = find_prime_implicants(&table);
/// assert_eq!(primes.len(), 2);
/// ```
pub fn find_prime_implicants(table: &TruthTable) -> ImplicantList {
    reduce_to_primes(
        table
            .terms()
            .iter()
            .map(|&term| Implicant::from_term(term))
            .collect(),
    )
}

/// Run the combining passes starting from an arbitrary implicant list
///
/// Starting from a list of primes performs a single pass with no merges
/// and returns the same list.
pub fn reduce_to_primes(start: ImplicantList) -> ImplicantList {
    let mut current = start.into_vec();
    let mut primes = ImplicantList::new();
    let mut pass = 0usize;

    loop {
        let mut next = ImplicantList::new();
        for implicant in current.iter_mut() {
            implicant.merged = false;
        }

        for i in 0..current.len() {
            for j in (i + 1)..current.len() {
                if let Some(combined) = current[i].combine(&current[j]) {
                    current[i].merged = true;
                    current[j].merged = true;
                    next.insert(combined);
                }
            }
        }

        let before = primes.len();
        for implicant in current.iter().filter(|imp| !imp.merged) {
            primes.insert(*implicant);
        }
        trace!(
            "QM pass {}: {} implicants, {} combined, {} new primes",
            pass,
            current.len(),
            next.len(),
            primes.len() - before
        );

        if next.is_empty() {
            break;
        }
        current = next.into_vec();
        pass += 1;
    }

    primes
}
