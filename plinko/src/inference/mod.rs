pub mod wmc;
pub use wmc::*;

use tracing::*;

use crate::compile::*;
use crate::data::*;
use crate::grammar::*;
use crate::typeinf::{type_of, TyEnv};

/// Compile every function in declaration order (dependency order is a
/// precondition; definitions may only call earlier ones), then the main
/// body under an empty value environment.
pub fn compile_program(state: &mut State, p: &Program) -> Result<CompiledExpr> {
    let mut tenv = TyEnv::default();
    for f in &p.functions {
        if state.funcs.contains_key(&f.name) {
            return errors::duplicate(&format!("function {} is defined twice", f.name));
        }
        let compiled = compile_function(state, &tenv, f)?;

        let mut ftenv = tenv.clone();
        for (n, t) in &f.params {
            ftenv.insert(n.clone(), t.clone());
        }
        let ret = type_of(&ftenv, &f.body)?;
        debug!("fun {} : {}", f.name, ret);
        tenv.insert(f.name.clone(), ret);
        state.funcs.insert(f.name.clone(), compiled);
    }
    state.eval_expr(&tenv, &Env::default(), &p.body)
}

/// The conditional probability of a compiled Boolean query:
/// `wmc(state ∧ z) / wmc(z)`.
pub fn wmc_prob(state: &mut State, c: &CompiledExpr) -> Result<f64> {
    let dist = c.state.as_bdd()?;
    let num = state.mgr.and(dist, c.z);
    let a = wmc(&state.mgr, num, &state.weights);
    let z = wmc(&state.mgr, c.z, &state.weights);
    debug!("numerator {a}");
    debug!("evidence  {z}");
    if z == 0.0 {
        return Err(CompileError::ZeroEvidence);
    }
    Ok(a / z)
}

/// Exact inference end to end with the default (lazy) strategy.
pub fn exact(p: &Program) -> Result<f64> {
    exact_with(p, &Options::default())
}

pub fn exact_with(p: &Program, opts: &Options) -> Result<f64> {
    let mut state = State::new(opts.clone());
    let c = compile_program(&mut state, p)?;
    wmc_prob(&mut state, &c)
}
