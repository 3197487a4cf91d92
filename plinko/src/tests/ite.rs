use crate::tests::*;
use crate::*;
use tracing_test::traced_test;

#[test]
fn ite_constant_guards() {
    check_exact1(
        "ite_const/T",
        1.0 / 3.0,
        ite!(b!(true), flip!(1 / 3), flip!(1 / 5)),
    );
    check_exact1(
        "ite_const/F",
        1.0 / 5.0,
        ite!(b!(false), flip!(1 / 3), flip!(1 / 5)),
    );
}

#[test]
#[traced_test]
fn ite_mixes_branches() {
    let p = lets![
        "x" ;= flip!(0.5);
        ...? ite!(b!("x"), flip!(0.9), flip!(0.1))
    ];
    check_exact1("ite_mix", 0.5, p);
}

#[test]
fn ite_nested() {
    let p = ite!(
        flip!(0.3),
        ite!(flip!(0.5), b!(true), b!(false)),
        flip!(0.25)
    );
    check_exact1("ite_nested", 0.3 * 0.5 + 0.7 * 0.25, p);
}

#[test]
fn ite_guard_feeds_result() {
    let p = lets![
        "x" ;= flip!(1 / 3);
        "y" ;= ite!(b!("x"), flip!(0.25), flip!(0.4));
        ...? b!("y")
    ];
    check_exact1("ite_guard", 1.0 / 3.0 * 0.25 + 2.0 / 3.0 * 0.4, p);
}

#[test]
fn ite_observe_in_branch() {
    // Only the branch actually taken contributes its evidence.
    let p = ite!(
        flip!(0.5),
        lets!["_" ;= observe!(flip!(0.2)); ...? b!(true)],
        b!(false)
    );
    check_exact1("ite_observe", (0.5 * 0.2) / (0.5 * 0.2 + 0.5), p);
}

#[test]
fn ite_observe_after_branching() {
    let p = lets![
        "x" ;= flip!(1 / 3);
        "y" ;= ite!(b!("x"), flip!(0.25), flip!(0.2));
        "_" ;= observe!(b!("x" || "y"));
        ...? b!("y")
    ];
    // Pr[y ∧ (x ∨ y)] / Pr[x ∨ y]
    let num = 1.0 / 3.0 * 0.25 + 2.0 / 3.0 * 0.2;
    let den = 1.0 / 3.0 + 2.0 / 3.0 * 0.2;
    check_exact1("ite_observe_after", num / den, p);
}
