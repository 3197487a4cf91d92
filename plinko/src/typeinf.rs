use crate::data::*;
use crate::grammar::*;

/// Variable and function-return types in scope. Well-typedness of the
/// input is a precondition, so this pass only reconstructs the shape of
/// a sub-expression (placeholder synthesis needs it); it does not check.
pub type TyEnv = HashMap<String, Ty>;

pub fn type_of(tenv: &TyEnv, e: &Expr) -> Result<Ty> {
    use Expr::*;
    match e {
        True | False | Flip(_) | Observe(_) => Ok(Ty::Bool),
        Not(_) | And(_, _) | Or(_, _) | Eq(_, _) => Ok(Ty::Bool),
        Var(x) => match tenv.get(x) {
            Some(t) => Ok(t.clone()),
            None => errors::unknown_ident(x),
        },
        Int(n, _) => Ok(Ty::Int(*n)),
        Discrete(ps) => Ok(Ty::Int(ps.len())),
        Ite(_, t, _) => type_of(tenv, t),
        Tup(a, b) => Ok(Ty::Prod(
            Box::new(type_of(tenv, a)?),
            Box::new(type_of(tenv, b)?),
        )),
        Fst(e1) => match type_of(tenv, e1)? {
            Ty::Prod(l, _) => Ok(*l),
            t => errors::projection(&format!("{} of type {}", e1, t)),
        },
        Snd(e1) => match type_of(tenv, e1)? {
            Ty::Prod(_, r) => Ok(*r),
            t => errors::projection(&format!("{} of type {}", e1, t)),
        },
        Let(x, e1, e2) => {
            let t1 = type_of(tenv, e1)?;
            let mut tenv2 = tenv.clone();
            tenv2.insert(x.clone(), t1);
            type_of(&tenv2, e2)
        }
        Call(name, _) => match tenv.get(name) {
            Some(t) => Ok(t.clone()),
            None => errors::unknown_function(name),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn test_type_of_shapes() {
        let tenv = TyEnv::default();
        assert_eq!(type_of(&tenv, &flip!(0.5)).unwrap(), Ty::Bool);
        assert_eq!(type_of(&tenv, &int!(3, 1)).unwrap(), Ty::Int(3));
        assert_eq!(
            type_of(&tenv, &discrete![0.2, 0.8]).unwrap(),
            Ty::Int(2)
        );
        let p = lets![
            "x" ;= tup!(flip!(0.5), int!(2, 0));
            ...? snd!(var!("x"))
        ];
        assert_eq!(type_of(&tenv, &p).unwrap(), Ty::Int(2));
        assert!(type_of(&tenv, &var!("nope")).is_err());
    }
}
