use crate::compile::Options;
use crate::inference;
use crate::tests::*;
use crate::*;

#[test]
fn let_shadowing() {
    let p = lets![
        "x" ;= flip!(0.3);
        "x" ;= b!(!"x");
        ...? b!("x")
    ];
    check_exact1("let_shadowing", 0.7, p);
}

#[test]
fn let_reuse_is_consistent() {
    // Every use of a binder refers to the same coin.
    check_exact1(
        "let_reuse/and",
        0.5,
        lets!["x" ;= flip!(0.5); ...? b!("x" && "x")],
    );
    check_exact1(
        "let_reuse/contra",
        0.0,
        lets!["x" ;= flip!(0.5); ...? b!("x" && !"x")],
    );
    check_exact1(
        "let_reuse/tauto",
        1.0,
        lets!["x" ;= flip!(0.5); ...? b!("x" || !"x")],
    );
}

#[test]
fn let_unused_binder() {
    let p = lets![
        "x" ;= flip!(0.5);
        ...? flip!(0.25)
    ];
    check_exact1("let_unused", 0.25, p);
}

#[test]
fn let_chain_with_observe() {
    let p = lets![
        "x" ;= flip!(0.5);
        "y" ;= or!(var!("x"), flip!(0.5));
        "_" ;= observe!(b!("y"));
        ...? b!("x")
    ];
    check_exact1("let_chain", 0.5 / 0.75, p);
}

#[test]
fn let_bound_tuple() {
    let p = lets![
        "t" ;= tup!(flip!(0.3), flip!(0.4));
        ...? and!(fst!(var!("t")), snd!(var!("t")))
    ];
    check_exact1("let_tuple", 0.12, p);
}

#[test]
fn let_strategies_agree_on_deep_nesting() {
    let p = Program::body(lets![
        "a" ;= flip!(0.2);
        "b" ;= or!(var!("a"), flip!(0.3));
        "c" ;= and!(var!("b"), flip!(0.9));
        "_" ;= observe!(b!("b" || "c"));
        ...? b!("a" && "c")
    ]);
    let lazy = inference::exact_with(&p, &Options::default()).unwrap();
    let eager = inference::exact_with(&p, &Options::eager()).unwrap();
    assert!(
        (lazy - eager).abs() < 1e-9,
        "strategies disagree: lazy {lazy} vs eager {eager}"
    );
}
