use crate::compile::Options;
use crate::data::CompileError;
use crate::grammar::*;
use crate::inference;

mod integers;
mod ite;
mod lets;
mod properties;

pub const EPS: f64 = 1e-6;

/// Run a program under both let strategies and check the probability.
pub fn check_exact(s: &str, expected: f64, p: &Program) {
    for opts in [Options::default(), Options::eager()] {
        let lazy = opts.lazy;
        let pr = match inference::exact_with(p, &opts) {
            Ok(pr) => pr,
            Err(e) => panic!("[check_exact][{s}][lazy={lazy}] compile failed: {e}"),
        };
        assert!(
            (pr - expected).abs() < EPS,
            "[check_exact][{s}][lazy={lazy}][err]((expected: {expected}) - (actual: {pr})).abs < {EPS}"
        );
    }
}

pub fn check_exact1(s: &str, expected: f64, body: Expr) {
    check_exact(s, expected, &Program::body(body))
}

/// Both strategies must fail, with an error the predicate accepts.
pub fn check_err(s: &str, p: &Program, pred: fn(&CompileError) -> bool) {
    for opts in [Options::default(), Options::eager()] {
        let lazy = opts.lazy;
        match inference::exact_with(p, &opts) {
            Ok(pr) => panic!("[check_err][{s}][lazy={lazy}] expected a compile error, got {pr}"),
            Err(e) => assert!(pred(&e), "[check_err][{s}][lazy={lazy}] unexpected error: {e}"),
        }
    }
}

pub fn check_err1(s: &str, body: Expr, pred: fn(&CompileError) -> bool) {
    check_err(s, &Program::body(body), pred)
}
