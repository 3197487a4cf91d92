use crate::tests::*;
use crate::*;

#[test]
fn int_literal_equality() {
    check_exact1("int_eq/same", 1.0, eq!(int!(3, 1), int!(3, 1)));
    check_exact1("int_eq/diff", 0.0, eq!(int!(3, 1), int!(3, 2)));
}

#[test]
fn discrete_point_queries() {
    let mk = |v: usize| {
        lets![
            "d" ;= discrete![0.2, 0.3, 0.5];
            ...? eq!(var!("d"), int!(3, v))
        ]
    };
    check_exact1("discrete/0", 0.2, mk(0));
    check_exact1("discrete/1", 0.3, mk(1));
    check_exact1("discrete/2", 0.5, mk(2));
}

#[test]
fn discrete_degenerate_mass() {
    let p = lets![
        "d" ;= discrete![0.0, 1.0];
        ...? eq!(var!("d"), int!(2, 1))
    ];
    check_exact1("discrete_degenerate", 1.0, p);
}

#[test]
fn observe_rules_out_a_value() {
    let p = lets![
        "d" ;= discrete![0.5, 0.3, 0.2];
        "_" ;= observe!(not!(eq!(var!("d"), int!(3, 0))));
        ...? eq!(var!("d"), int!(3, 1))
    ];
    check_exact1("observe_int", 0.3 / 0.5, p);
}

#[test]
fn ite_on_integer_guard() {
    let p = lets![
        "d" ;= discrete![0.1, 0.2, 0.7];
        ...? ite!(eq!(var!("d"), int!(3, 2)), flip!(0.5), flip!(0.25))
    ];
    check_exact1("ite_int_guard", 0.7 * 0.5 + 0.3 * 0.25, p);
}

#[test]
fn ite_producing_integers() {
    let p = lets![
        "x" ;= flip!(0.4);
        "d" ;= ite!(b!("x"), int!(2, 0), discrete![0.5, 0.5]);
        ...? eq!(var!("d"), int!(2, 0))
    ];
    check_exact1("ite_int_result", 0.4 + 0.6 * 0.5, p);
}

#[test]
fn integer_function_parameter() {
    let p = Program {
        functions: vec![fun!("is_zero"; ("n", I!(3)) => eq!(var!("n"), int!(3, 0)))],
        body: call!("is_zero", discrete![0.2, 0.3, 0.5]),
    };
    check_exact("int_param", 0.2, &p);
}

#[test]
fn integer_through_two_binders() {
    let p = lets![
        "d" ;= discrete![0.4, 0.6];
        "e" ;= var!("d");
        ...? eq!(var!("e"), int!(2, 0))
    ];
    check_exact1("int_rebind", 0.4, p);
}

#[test]
fn integer_inside_tuple() {
    let p = lets![
        "t" ;= tup!(discrete![0.3, 0.7], flip!(0.5));
        ...? eq!(fst!(var!("t")), int!(2, 1))
    ];
    check_exact1("int_in_tuple", 0.7, p);
}
