//! Conjunctive-normal-form representation and normalization.
//!
//! [`Cnf::from_expr`] rewrites an arbitrary formula tree into CNF: negation
//! is pushed down to individual literals via De Morgan's laws, then `|` is
//! distributed over `&`, and the resulting clause set is deduplicated.

use std::collections::BTreeSet;

use super::ast::Expr;

/// A single literal: a feature id, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    /// The referenced feature id.
    pub id: String,
    /// Whether this literal negates the feature.
    pub negated: bool,
}

/// A formula in conjunctive normal form: an AND of ORs of literals.
///
/// An empty clause list represents the empty conjunction, `TRUE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    /// The clauses, each an OR of literals, implicitly ANDed together.
    pub clauses: Vec<Vec<Literal>>,
}

impl Cnf {
    /// Converts a formula expression tree into normalized CNF.
    #[must_use]
    pub fn from_expr(expr: &Expr) -> Self {
        let nnf = to_nnf(expr.clone());
        let raw = to_clauses(&nnf);
        Self {
            clauses: normalize(raw),
        }
    }
}

/// Rewrites `expr` into negation normal form: `Not` appears only directly
/// around a `Var`, via De Morgan's laws and double-negation elimination.
fn to_nnf(expr: Expr) -> Expr {
    match expr {
        Expr::Var(_) => expr,
        Expr::And(a, b) => Expr::And(Box::new(to_nnf(*a)), Box::new(to_nnf(*b))),
        Expr::Or(a, b) => Expr::Or(Box::new(to_nnf(*a)), Box::new(to_nnf(*b))),
        Expr::Not(inner) => match *inner {
            Expr::Var(_) => Expr::Not(inner),
            Expr::Not(inner2) => to_nnf(*inner2),
            Expr::And(a, b) => Expr::Or(
                Box::new(to_nnf(Expr::Not(a))),
                Box::new(to_nnf(Expr::Not(b))),
            ),
            Expr::Or(a, b) => Expr::And(
                Box::new(to_nnf(Expr::Not(a))),
                Box::new(to_nnf(Expr::Not(b))),
            ),
        },
    }
}

/// Distributes `|` over `&` on an expression already in negation normal
/// form, producing a raw (not yet deduplicated) clause list.
fn to_clauses(expr: &Expr) -> Vec<Vec<Literal>> {
    match expr {
        Expr::Var(id) => vec![vec![Literal {
            id: id.clone(),
            negated: false,
        }]],
        Expr::Not(inner) => match inner.as_ref() {
            Expr::Var(id) => vec![vec![Literal {
                id: id.clone(),
                negated: true,
            }]],
            // to_nnf guarantees Not only ever wraps a Var.
            _ => unreachable!("formula not in negation normal form"),
        },
        Expr::And(a, b) => {
            let mut clauses = to_clauses(a);
            clauses.extend(to_clauses(b));
            clauses
        }
        Expr::Or(a, b) => distribute(&to_clauses(a), &to_clauses(b)),
    }
}

fn distribute(left: &[Vec<Literal>], right: &[Vec<Literal>]) -> Vec<Vec<Literal>> {
    let mut result = Vec::with_capacity(left.len() * right.len().max(1));
    for clause_a in left {
        for clause_b in right {
            let mut merged = clause_a.clone();
            merged.extend(clause_b.iter().cloned());
            result.push(merged);
        }
    }
    result
}

/// Deduplicates literals within each clause, drops tautology clauses (a
/// clause containing both a literal and its negation), and deduplicates
/// clauses across the whole formula.
fn normalize(raw: Vec<Vec<Literal>>) -> Vec<Vec<Literal>> {
    let mut seen_clauses: BTreeSet<Vec<Literal>> = BTreeSet::new();
    for clause in raw {
        let mut literals: BTreeSet<Literal> = BTreeSet::new();
        for literal in clause {
            literals.insert(literal);
        }
        let is_tautology = literals.iter().any(|lit| {
            literals.contains(&Literal {
                id: lit.id.clone(),
                negated: !lit.negated,
            })
        });
        if is_tautology {
            continue;
        }
        seen_clauses.insert(literals.into_iter().collect());
    }
    seen_clauses.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(id: &str) -> Expr {
        Expr::Var(id.to_string())
    }

    fn lit(id: &str, negated: bool) -> Literal {
        Literal {
            id: id.to_string(),
            negated,
        }
    }

    #[test]
    fn test_single_var_is_one_clause_one_literal() {
        let cnf = Cnf::from_expr(&var("a"));
        assert_eq!(cnf.clauses, vec![vec![lit("a", false)]]);
    }

    #[test]
    fn test_negated_var() {
        let cnf = Cnf::from_expr(&Expr::Not(Box::new(var("a"))));
        assert_eq!(cnf.clauses, vec![vec![lit("a", true)]]);
    }

    #[test]
    fn test_double_negation_eliminated() {
        let cnf = Cnf::from_expr(&Expr::Not(Box::new(Expr::Not(Box::new(var("a"))))));
        assert_eq!(cnf.clauses, vec![vec![lit("a", false)]]);
    }

    #[test]
    fn test_and_produces_two_clauses() {
        let expr = Expr::And(Box::new(var("a")), Box::new(var("b")));
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses.len(), 2);
        assert!(cnf.clauses.contains(&vec![lit("a", false)]));
        assert!(cnf.clauses.contains(&vec![lit("b", false)]));
    }

    #[test]
    fn test_or_produces_one_clause_two_literals() {
        let expr = Expr::Or(Box::new(var("a")), Box::new(var("b")));
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses.len(), 1);
        assert_eq!(cnf.clauses[0].len(), 2);
    }

    #[test]
    fn test_de_morgan_not_and() {
        // ~(a & b) == ~a | ~b
        let expr = Expr::Not(Box::new(Expr::And(Box::new(var("a")), Box::new(var("b")))));
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses.len(), 1);
        let clause = &cnf.clauses[0];
        assert!(clause.contains(&lit("a", true)));
        assert!(clause.contains(&lit("b", true)));
    }

    #[test]
    fn test_de_morgan_not_or() {
        // ~(a | b) == ~a & ~b
        let expr = Expr::Not(Box::new(Expr::Or(Box::new(var("a")), Box::new(var("b")))));
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses.len(), 2);
        assert!(cnf.clauses.contains(&vec![lit("a", true)]));
        assert!(cnf.clauses.contains(&vec![lit("b", true)]));
    }

    #[test]
    fn test_or_distributes_over_and() {
        // (a & b) | c == (a | c) & (b | c)
        let expr = Expr::Or(
            Box::new(Expr::And(Box::new(var("a")), Box::new(var("b")))),
            Box::new(var("c")),
        );
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses.len(), 2);
        for clause in &cnf.clauses {
            assert_eq!(clause.len(), 2);
            assert!(clause.contains(&lit("c", false)));
        }
    }

    #[test]
    fn test_tautology_clause_dropped() {
        // a | ~a is always true and should vanish entirely.
        let expr = Expr::Or(Box::new(var("a")), Box::new(Expr::Not(Box::new(var("a")))));
        let cnf = Cnf::from_expr(&expr);
        assert!(cnf.clauses.is_empty());
    }

    #[test]
    fn test_duplicate_literal_deduped_within_clause() {
        // a | a collapses to a single-literal clause.
        let expr = Expr::Or(Box::new(var("a")), Box::new(var("a")));
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses, vec![vec![lit("a", false)]]);
    }

    #[test]
    fn test_duplicate_clause_deduped_across_formula() {
        // (a & a) should produce a single clause, not two identical ones.
        let expr = Expr::And(Box::new(var("a")), Box::new(var("a")));
        let cnf = Cnf::from_expr(&expr);
        assert_eq!(cnf.clauses, vec![vec![lit("a", false)]]);
    }

    #[test]
    fn test_empty_conjunction_is_true() {
        // A vacuous tautology collapsing entirely yields the empty clause set.
        let expr = Expr::Or(Box::new(var("x")), Box::new(Expr::Not(Box::new(var("x")))));
        let cnf = Cnf::from_expr(&expr);
        assert!(cnf.clauses.is_empty());
    }
}
