use crate::compile::Options;
use crate::grammar::*;
use crate::inference;
use crate::tests::arbitrary::BoolProgram;

#[quickcheck]
fn probabilities_stay_in_the_unit_interval(p: BoolProgram) -> bool {
    let pr = inference::exact(&p.0).unwrap();
    (-1e-9..=1.0 + 1e-9).contains(&pr)
}

#[quickcheck]
fn lazy_and_eager_lets_agree(p: BoolProgram) -> bool {
    let lazy = inference::exact_with(&p.0, &Options::default()).unwrap();
    let eager = inference::exact_with(&p.0, &Options::eager()).unwrap();
    (lazy - eager).abs() < 1e-9
}

#[quickcheck]
fn inference_is_deterministic(p: BoolProgram) -> bool {
    let a = inference::exact(&p.0).unwrap();
    let b = inference::exact(&p.0).unwrap();
    a.to_bits() == b.to_bits()
}

#[quickcheck]
fn observation_free_queries_normalize(p: BoolProgram) -> bool {
    let negated = Program::body(Expr::Not(Box::new(p.0.body.clone())));
    let a = inference::exact(&p.0).unwrap();
    let b = inference::exact(&negated).unwrap();
    (a + b - 1.0).abs() < 1e-9
}
