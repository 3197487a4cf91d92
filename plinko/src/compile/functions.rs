use itertools::Itertools;
use tracing::*;

use crate::compile::context::{CompiledFunc, Env, State};
use crate::data::*;
use crate::grammar::{Function, Ty};
use crate::typeinf::TyEnv;
use robdd::Bdd;

/// A fresh placeholder tree matching a type: one variable per Boolean
/// position, `n` variables per `Int(n)` position.
pub fn gen_sym_type(state: &mut State, ty: &Ty, hint: &str) -> SymTree {
    match ty {
        Ty::Bool => SymTree::bool(state.fresh_placeholder(hint)),
        Ty::Int(n) => SymTree::ints((0..*n).map(|_| state.fresh_placeholder(hint)).collect_vec()),
        Ty::Prod(l, r) => SymTree::pair(
            gen_sym_type(state, l, hint),
            gen_sym_type(state, r, hint),
        ),
    }
}

/// Re-encode a placeholder tree as one-hot before it enters an
/// environment: entry `i` of an integer vector becomes
/// `vᵢ ∧ ∧_{j≠i} ¬vⱼ`. Without this, a guard or equality over the
/// placeholder vector multiplies out all 2ⁿ raw assignments. The raw
/// tree must still be the one used for substitution.
pub fn mutex_encode(mgr: &mut Bdd, t: &SymTree) -> SymTree {
    match t {
        SymTree::Leaf(SymLeaf::Bool(b)) => SymTree::bool(*b),
        SymTree::Leaf(SymLeaf::Int(vs)) => {
            let encoded = (0..vs.len())
                .map(|i| {
                    let mut acc = vs[i];
                    for (j, v) in vs.iter().enumerate() {
                        if j != i {
                            acc = mgr.and(acc, !*v);
                        }
                    }
                    acc
                })
                .collect_vec();
            SymTree::ints(encoded)
        }
        SymTree::Node(l, r) => SymTree::pair(mutex_encode(mgr, l), mutex_encode(mgr, r)),
    }
}

/// Compile a function body once against placeholder arguments. The raw
/// placeholder trees are kept for call-site substitution; the
/// environment sees their one-hot encodings.
pub fn compile_function(state: &mut State, tenv: &TyEnv, f: &Function) -> Result<CompiledFunc> {
    let span = span!(Level::DEBUG, "fun", name = %f.name);
    let _enter = span.enter();

    let mut tenv = tenv.clone();
    let mut env = Env::default();
    let mut args = vec![];
    let mut seen: HashSet<String> = HashSet::default();
    for (name, ty) in &f.params {
        if !seen.insert(name.clone()) {
            return errors::duplicate(&format!(
                "parameter {} appears twice in function {}",
                name, f.name
            ));
        }
        let raw = gen_sym_type(state, ty, name);
        let encoded = mutex_encode(&mut state.mgr, &raw);
        debug!("param {} : {} over {} fresh variables", name, ty, raw.bdds().len());
        tenv.insert(name.clone(), ty.clone());
        env.insert(name.clone(), encoded);
        args.push(raw);
    }

    let body = state.eval_expr(&tenv, &env, &f.body)?;
    Ok(CompiledFunc { args, body })
}
