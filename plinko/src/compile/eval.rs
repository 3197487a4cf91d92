use itertools::{izip, Itertools};
use tracing::*;

use crate::compile::context::{CompiledExpr, Env, State};
use crate::compile::functions::{gen_sym_type, mutex_encode};
use crate::data::*;
use crate::grammar::*;
use crate::typeinf::{type_of, TyEnv};
use crate::utils::render::render_refs;
use robdd::{Bdd, Ref, Var};

/// `(a ⇔ b)` for one leaf pair, conjoined pointwise over one-hot
/// vectors of equal length.
fn iff_leaf(mgr: &mut Bdd, a: &SymLeaf, b: &SymLeaf, at: &Expr) -> Result<Ref> {
    match (a, b) {
        (SymLeaf::Bool(x), SymLeaf::Bool(y)) => Ok(mgr.iff(*x, *y)),
        (SymLeaf::Int(xs), SymLeaf::Int(ys)) => {
            if xs.len() != ys.len() {
                return errors::shape_mismatch(&format!(
                    "integer domains of size {} and {} in {}",
                    xs.len(),
                    ys.len(),
                    at
                ));
            }
            let mut acc = mgr.one;
            for (x, y) in izip!(xs, ys) {
                let e = mgr.iff(*x, *y);
                acc = mgr.and(acc, e);
            }
            Ok(acc)
        }
        _ => errors::shape_mismatch(&format!("boolean against integer in {}", at)),
    }
}

/// Structural equivalence of two same-shaped trees as one formula.
fn iff_trees(mgr: &mut Bdd, a: &SymTree, b: &SymTree, at: &Expr) -> Result<Ref> {
    let pairs = SymTree::zip_leaves(a, b)
        .map_err(|_| CompileError::ShapeMismatch(format!("mismatched value shapes in {}", at)))?;
    let mut acc = mgr.one;
    for (l, r) in pairs {
        let e = iff_leaf(mgr, l, r, at)?;
        acc = mgr.and(acc, e);
    }
    Ok(acc)
}

/// Substitute the cube variables out of every formula in a tree:
/// each leaf formula `ψ` becomes `∃cube. iff ∧ ψ`.
fn existand_tree(mgr: &mut Bdd, cube: &[Var], iff: Ref, t: &SymTree) -> SymTree {
    t.map_bdds(&mut |b| mgr.and_exists(cube, iff, b))
}

fn as_bool(c: &CompiledExpr, at: &Expr) -> Result<Ref> {
    c.state
        .as_bdd()
        .map_err(|_| CompileError::ShapeMismatch(format!("expected a boolean operand in {}", at)))
}

impl State {
    /// Translate one expression under the given typing and value
    /// environments into `{state, z, flips}`.
    pub fn eval_expr(&mut self, tenv: &TyEnv, env: &Env, e: &Expr) -> Result<CompiledExpr> {
        use Expr::*;
        match e {
            True => Ok(CompiledExpr {
                state: SymTree::bool(self.mgr.one),
                z: self.mgr.one,
                flips: vec![],
            }),
            False => Ok(CompiledExpr {
                state: SymTree::bool(self.mgr.zero),
                z: self.mgr.one,
                flips: vec![],
            }),
            Var(x) => match env.get(x) {
                Some(t) => Ok(CompiledExpr {
                    state: t.clone(),
                    z: self.mgr.one,
                    flips: vec![],
                }),
                None => errors::unknown_ident(x),
            },
            Not(e1) => {
                let c = self.eval_expr(tenv, env, e1)?;
                let b = as_bool(&c, e)?;
                Ok(CompiledExpr {
                    state: SymTree::bool(!b),
                    z: c.z,
                    flips: c.flips,
                })
            }
            And(e1, e2) | Or(e1, e2) => {
                let c1 = self.eval_expr(tenv, env, e1)?;
                let c2 = self.eval_expr(tenv, env, e2)?;
                let b1 = as_bool(&c1, e)?;
                let b2 = as_bool(&c2, e)?;
                let mgr = &mut self.mgr;
                let b = match e {
                    And(_, _) => mgr.and(b1, b2),
                    _ => mgr.or(b1, b2),
                };
                let z = mgr.and(c1.z, c2.z);
                Ok(CompiledExpr {
                    state: SymTree::bool(b),
                    z,
                    flips: [c1.flips, c2.flips].concat(),
                })
            }
            Eq(e1, e2) => {
                let c1 = self.eval_expr(tenv, env, e1)?;
                let c2 = self.eval_expr(tenv, env, e2)?;
                let mgr = &mut self.mgr;
                let b = iff_trees(mgr, &c1.state, &c2.state, e)?;
                let z = mgr.and(c1.z, c2.z);
                Ok(CompiledExpr {
                    state: SymTree::bool(b),
                    z,
                    flips: [c1.flips, c2.flips].concat(),
                })
            }
            Flip(theta) => {
                let span = span!(Level::DEBUG, "flip", theta = *theta);
                let _enter = span.enter();
                if !(0.0..=1.0).contains(theta) {
                    return errors::generic(&format!("flip probability out of range: {}", e));
                }
                let f = self.fresh_flip(*theta);
                debug!("allocated {}", f);
                Ok(CompiledExpr {
                    state: SymTree::bool(f),
                    z: self.mgr.one,
                    flips: vec![f],
                })
            }
            Int(n, v) => {
                if v >= n {
                    return errors::generic(&format!("integer literal out of range: {}", e));
                }
                let vs = (0..*n)
                    .map(|i| self.mgr.constant(i == *v))
                    .collect_vec();
                Ok(CompiledExpr {
                    state: SymTree::ints(vs),
                    z: self.mgr.one,
                    flips: vec![],
                })
            }
            Discrete(ps) => self.eval_discrete(e, ps),
            Tup(e1, e2) => {
                let c1 = self.eval_expr(tenv, env, e1)?;
                let c2 = self.eval_expr(tenv, env, e2)?;
                let z = self.mgr.and(c1.z, c2.z);
                Ok(CompiledExpr {
                    state: SymTree::pair(c1.state, c2.state),
                    z,
                    flips: [c1.flips, c2.flips].concat(),
                })
            }
            Fst(e1) => {
                let c = self.eval_expr(tenv, env, e1)?;
                let state = c
                    .state
                    .fst()
                    .map_err(|_| CompileError::ProjectionError(format!("{}", e)))?
                    .clone();
                Ok(CompiledExpr { state, z: c.z, flips: c.flips })
            }
            Snd(e1) => {
                let c = self.eval_expr(tenv, env, e1)?;
                let state = c
                    .state
                    .snd()
                    .map_err(|_| CompileError::ProjectionError(format!("{}", e)))?
                    .clone();
                Ok(CompiledExpr { state, z: c.z, flips: c.flips })
            }
            Observe(e1) => {
                let span = span!(Level::DEBUG, "observe");
                let _enter = span.enter();
                let c = self.eval_expr(tenv, env, e1)?;
                let b = as_bool(&c, e)?;
                let z = self.mgr.and(c.z, b);
                debug!("accept {}", z);
                Ok(CompiledExpr {
                    state: SymTree::bool(self.mgr.one),
                    z,
                    flips: c.flips,
                })
            }
            Ite(g, t, f) => self.eval_ite(tenv, env, e, g, t, f),
            Let(x, e1, e2) => {
                let span = span!(Level::DEBUG, "let", var = %x);
                let _enter = span.enter();
                if self.opts.lazy {
                    self.eval_let_lazy(tenv, env, e, x, e1, e2)
                } else {
                    self.eval_let_eager(tenv, env, x, e1, e2)
                }
            }
            Call(name, args) => {
                let span = span!(Level::DEBUG, "call", name = %name);
                let _enter = span.enter();
                self.eval_call(tenv, env, e, name, args)
            }
        }
    }

    /// A finite distribution lowered to a chain of flips: flip `i` is
    /// taken with the mass of value `i` renormalized by the mass still
    /// unclaimed, and entry `i` of the one-hot vector is
    /// `fᵢ ∧ ∧_{j<i} ¬fⱼ`.
    fn eval_discrete(&mut self, e: &Expr, ps: &[f64]) -> Result<CompiledExpr> {
        let span = span!(Level::DEBUG, "discrete", n = ps.len());
        let _enter = span.enter();
        if ps.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return errors::generic(&format!("discrete weight out of range: {}", e));
        }
        if (ps.iter().sum::<f64>() - 1.0).abs() > 1e-9 {
            return errors::generic(&format!("discrete weights must sum to one: {}", e));
        }

        let mut flips = vec![];
        let mut remaining = 1.0;
        for p in ps {
            let theta = if remaining <= 0.0 {
                0.0
            } else {
                (p / remaining).clamp(0.0, 1.0)
            };
            flips.push(self.fresh_flip(theta));
            remaining -= p;
        }

        let mut vs = vec![];
        let mut none_before = self.mgr.one;
        for f in &flips {
            let entry = self.mgr.and(none_before, *f);
            vs.push(entry);
            none_before = self.mgr.and(none_before, !*f);
        }
        debug!("one-hot {}", render_refs(&vs));
        Ok(CompiledExpr {
            state: SymTree::ints(vs),
            z: self.mgr.one,
            flips,
        })
    }

    fn eval_ite(
        &mut self,
        tenv: &TyEnv,
        env: &Env,
        e: &Expr,
        g: &Expr,
        t: &Expr,
        f: &Expr,
    ) -> Result<CompiledExpr> {
        let span = span!(Level::DEBUG, "ite");
        let _enter = span.enter();

        let cg = self.eval_expr(tenv, env, g)?;
        let gb = as_bool(&cg, g)?;
        let ct = self.eval_expr(tenv, env, t)?;
        let cf = self.eval_expr(tenv, env, f)?;

        let mgr = &mut self.mgr;
        let state = SymTree::try_map2(&ct.state, &cf.state, &mut |lt, lf| match (lt, lf) {
            (SymLeaf::Bool(a), SymLeaf::Bool(b)) => Ok(SymLeaf::Bool(mgr.ite(gb, *a, *b))),
            (SymLeaf::Int(xs), SymLeaf::Int(ys)) => {
                if xs.len() != ys.len() {
                    return errors::shape_mismatch(&format!(
                        "integer domains of size {} and {} in {}",
                        xs.len(),
                        ys.len(),
                        e
                    ));
                }
                let vs = izip!(xs, ys).map(|(x, y)| mgr.ite(gb, *x, *y)).collect_vec();
                Ok(SymLeaf::Int(vs))
            }
            _ => errors::shape_mismatch(&format!("boolean against integer in {}", e)),
        })?;

        // Evidence from the branch actually taken, under the guard's own.
        let zbranch = mgr.ite(gb, ct.z, cf.z);
        let z = mgr.and(cg.z, zbranch);
        Ok(CompiledExpr {
            state,
            z,
            flips: [cg.flips, ct.flips, cf.flips].concat(),
        })
    }

    fn eval_let_eager(
        &mut self,
        tenv: &TyEnv,
        env: &Env,
        x: &str,
        e1: &Expr,
        e2: &Expr,
    ) -> Result<CompiledExpr> {
        let c1 = self.eval_expr(tenv, env, e1)?;
        let t1 = type_of(tenv, e1)?;

        let mut tenv2 = tenv.clone();
        tenv2.insert(x.to_string(), t1);
        let mut env2 = env.clone();
        env2.insert(x.to_string(), c1.state.clone());

        let c2 = self.eval_expr(&tenv2, &env2, e2)?;
        let z = self.mgr.and(c1.z, c2.z);
        Ok(CompiledExpr {
            state: c2.state,
            z,
            flips: [c1.flips, c2.flips].concat(),
        })
    }

    /// Bind a placeholder tree instead of the compiled formulas, then
    /// eliminate it: each result formula `ψ` becomes
    /// `∃placeholders. (bound ⇔ placeholders) ∧ ψ`. The body sees the
    /// one-hot encoding; the equivalence is over the raw placeholders.
    fn eval_let_lazy(
        &mut self,
        tenv: &TyEnv,
        env: &Env,
        e: &Expr,
        x: &str,
        e1: &Expr,
        e2: &Expr,
    ) -> Result<CompiledExpr> {
        let c1 = self.eval_expr(tenv, env, e1)?;
        let t1 = type_of(tenv, e1)?;

        let tmp = gen_sym_type(self, &t1, x);
        let encoded = mutex_encode(&mut self.mgr, &tmp);
        let mut tenv2 = tenv.clone();
        tenv2.insert(x.to_string(), t1);
        let mut env2 = env.clone();
        env2.insert(x.to_string(), encoded);

        let c2 = self.eval_expr(&tenv2, &env2, e2)?;

        let mgr = &mut self.mgr;
        let cube = tmp.bdds().iter().map(|b| mgr.top_var(*b)).collect_vec();
        let iff = iff_trees(mgr, &c1.state, &tmp, e)?;
        debug!("{} placeholders, iff {}", cube.len(), iff);

        let state = existand_tree(mgr, &cube, iff, &c2.state);
        let z2 = mgr.and_exists(&cube, iff, c2.z);
        let z = mgr.and(c1.z, z2);
        Ok(CompiledExpr {
            state,
            z,
            flips: [c1.flips, c2.flips].concat(),
        })
    }

    /// Inline a compiled function: give its flips fresh identities, then
    /// substitute actual arguments for the raw placeholders with
    /// `∃placeholders. (actuals ⇔ placeholders) ∧ ψ`.
    fn eval_call(
        &mut self,
        tenv: &TyEnv,
        env: &Env,
        e: &Expr,
        name: &str,
        actuals: &[Expr],
    ) -> Result<CompiledExpr> {
        let func = match self.funcs.get(name) {
            Some(f) => f.clone(),
            None => return errors::unknown_function(name),
        };
        if func.args.len() != actuals.len() {
            return errors::arity_mismatch(&format!(
                "{} takes {} arguments, got {} in {}",
                name,
                func.args.len(),
                actuals.len(),
                e
            ));
        }

        let mut couts = vec![];
        for a in actuals {
            couts.push(self.eval_expr(tenv, env, a)?);
        }

        // Fresh coins for this call site.
        let mut olds: Vec<Var> = vec![];
        let mut news: Vec<Var> = vec![];
        let mut fresh: Vec<Ref> = vec![];
        for fb in &func.body.flips {
            let old = self.mgr.top_var(*fb);
            let f = self.refresh_flip(old);
            olds.push(old);
            news.push(self.mgr.top_var(f));
            fresh.push(f);
        }

        let mgr = &mut self.mgr;
        let rstate = func.body.state.map_bdds(&mut |b| mgr.swap_variables(b, &news, &olds));
        let rz = mgr.swap_variables(func.body.z, &news, &olds);
        debug!("refreshed flips {}, z {}", render_refs(&fresh), rz);

        let cube = func
            .args
            .iter()
            .flat_map(|t| t.bdds())
            .map(|b| mgr.top_var(b))
            .collect_vec();
        let mut iff = mgr.one;
        for (c, p) in izip!(&couts, &func.args) {
            let i = iff_trees(mgr, &c.state, p, e)?;
            iff = mgr.and(iff, i);
        }

        let state = existand_tree(mgr, &cube, iff, &rstate);
        let mut z = mgr.and_exists(&cube, iff, rz);
        let mut flips = vec![];
        for c in couts {
            z = mgr.and(z, c.z);
            flips.extend(c.flips);
        }
        flips.extend(fresh);
        Ok(CompiledExpr { state, z, flips })
    }
}
