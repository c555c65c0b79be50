//! Grammar fixtures shared by the unit tests.

use crate::grammar::{Grammar, GrammarBuilder};

fn grammar(name: &str, nonterms: &[&str], terms: &[&str], rules: &[(&str, &[&str])]) -> Grammar {
    let mut b = GrammarBuilder::new(name, "tests");
    for nt in nonterms {
        b.nonterminal(nt, []).unwrap();
    }
    for t in terms {
        b.terminal(t, []).unwrap();
    }
    for (lhs, rhs) in rules {
        b.rule(lhs, rhs).unwrap();
    }
    let start = b.symbol(nonterms[0]).unwrap();
    b.start(start).unwrap();
    b.build().unwrap()
}

/// `S -> a S b | ε`
pub fn epsilon() -> Grammar {
    grammar(
        "Balanced",
        &["S"],
        &["a", "b"],
        &[("S", &["a", "S", "b"]), ("S", &[])],
    )
}

/// `E -> E + T | T; T -> T * F | F; F -> ( E ) | id`
///
/// Production ids 1..=6 in that order.
pub fn expr() -> Grammar {
    grammar(
        "Expr",
        &["E", "T", "F"],
        &["+", "*", "(", ")", "id"],
        &[
            ("E", &["E", "+", "T"]),
            ("E", &["T"]),
            ("T", &["T", "*", "F"]),
            ("T", &["F"]),
            ("F", &["(", "E", ")"]),
            ("F", &["id"]),
        ],
    )
}

/// `E -> E + E | id`: ambiguous, shift/reduce on `+`.
pub fn ambiguous_expr() -> Grammar {
    grammar(
        "Ambiguous",
        &["E"],
        &["+", "id"],
        &[("E", &["E", "+", "E"]), ("E", &["id"])],
    )
}

/// `S -> i S | i S e S | x`: the dangling else.
pub fn dangling_else() -> Grammar {
    grammar(
        "DanglingElse",
        &["S"],
        &["i", "e", "x"],
        &[
            ("S", &["i", "S"]),
            ("S", &["i", "S", "e", "S"]),
            ("S", &["x"]),
        ],
    )
}

/// `S -> A | B; A -> x; B -> x`: reduce/reduce on EOF.
pub fn reduce_reduce() -> Grammar {
    grammar(
        "TwoWays",
        &["S", "A", "B"],
        &["x"],
        &[
            ("S", &["A"]),
            ("S", &["B"]),
            ("A", &["x"]),
            ("B", &["x"]),
        ],
    )
}

/// `S -> A x; A -> B C; B -> b | ε; C -> c | ε`
pub fn nullable_chain() -> Grammar {
    grammar(
        "Chain",
        &["S", "A", "B", "C"],
        &["x", "b", "c"],
        &[
            ("S", &["A", "x"]),
            ("A", &["B", "C"]),
            ("B", &["b"]),
            ("B", &[]),
            ("C", &["c"]),
            ("C", &[]),
        ],
    )
}

/// `S -> a | L; L -> L a; U -> b`: `L` derives no terminal string and `U`
/// is unreachable.
pub fn unproductive() -> Grammar {
    grammar(
        "Unproductive",
        &["S", "L", "U"],
        &["a", "b"],
        &[
            ("S", &["a"]),
            ("S", &["L"]),
            ("L", &["L", "a"]),
            ("U", &["b"]),
        ],
    )
}
