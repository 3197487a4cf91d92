use rustc_hash::FxHashMap;
use tracing::trace;

use crate::reference::Ref;
use crate::Var;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Node {
    var: Var,
    low: Ref,
    high: Ref,
}

/// A BDD manager: node storage, unique table, and operation caches.
///
/// Nodes are kept canonical (a `high` edge is never complemented), so
/// equal functions always share one node and equality of handles is
/// equality of functions. The manager owns every node it ever allocated;
/// handles stay valid for the manager's lifetime.
pub struct Bdd {
    nodes: Vec<Node>,
    unique: FxHashMap<(Var, Ref, Ref), u32>,
    ite_cache: FxHashMap<(Ref, Ref, Ref), Ref>,
    exists_cache: FxHashMap<(Ref, Var), Ref>,
    num_vars: Var,
    pub zero: Ref,
    pub one: Ref,
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new()
    }
}

impl std::fmt::Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("nodes", &self.nodes.len())
            .field("vars", &self.num_vars)
            .finish()
    }
}

impl Bdd {
    pub fn new() -> Self {
        let one = Ref::positive(1);
        let terminal = Node { var: 0, low: one, high: one };
        Self {
            // Cell 0 is a sentry, cell 1 is the terminal node.
            nodes: vec![terminal, terminal],
            unique: FxHashMap::default(),
            ite_cache: FxHashMap::default(),
            exists_cache: FxHashMap::default(),
            num_vars: 0,
            zero: !one,
            one,
        }
    }

    pub fn num_vars(&self) -> Var {
        self.num_vars
    }
    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Allocate a fresh variable at the bottom of the order.
    pub fn new_var(&mut self) -> Ref {
        self.num_vars += 1;
        let v = self.num_vars;
        self.mk_node(v, self.zero, self.one)
    }

    /// The single-variable function for an already-allocated variable.
    pub fn var(&mut self, v: Var) -> Ref {
        assert_ne!(v, 0, "Variable index must not be zero");
        assert!(v <= self.num_vars, "Variable {} was never allocated", v);
        self.mk_node(v, self.zero, self.one)
    }

    pub fn constant(&self, b: bool) -> Ref {
        if b {
            self.one
        } else {
            self.zero
        }
    }

    pub fn is_true(&self, f: Ref) -> bool {
        f == self.one
    }
    pub fn is_false(&self, f: Ref) -> bool {
        f == self.zero
    }
    pub fn is_const(&self, f: Ref) -> bool {
        f.index() == 1
    }

    /// Top variable of `f`, or 0 for a terminal.
    pub fn variable(&self, f: Ref) -> Var {
        self.nodes[f.index() as usize].var
    }
    /// Alias for [`Bdd::variable`] restricted to non-terminals.
    pub fn top_var(&self, f: Ref) -> Var {
        debug_assert!(!self.is_const(f), "terminal has no top variable");
        self.variable(f)
    }

    /// Low child with the complement flag of `f` pushed through.
    pub fn low_node(&self, f: Ref) -> Ref {
        self.nodes[f.index() as usize].low.under(f)
    }
    /// High child with the complement flag of `f` pushed through.
    pub fn high_node(&self, f: Ref) -> Ref {
        self.nodes[f.index() as usize].high.under(f)
    }

    fn mk_node(&mut self, v: Var, low: Ref, high: Ref) -> Ref {
        assert_ne!(v, 0, "Variable index must not be zero");

        if low == high {
            return low;
        }
        // Canonicity: the high edge is never complemented.
        if high.is_complement() {
            return !self.mk_node(v, !low, !high);
        }

        let key = (v, low, high);
        if let Some(&i) = self.unique.get(&key) {
            return Ref::positive(i);
        }
        let i = self.nodes.len() as u32;
        self.nodes.push(Node { var: v, low, high });
        self.unique.insert(key, i);
        trace!("mk: created node {}(x{}, {}, {})", i, v, low, high);
        Ref::positive(i)
    }

    fn top_cofactors(&self, f: Ref, v: Var) -> (Ref, Ref) {
        if self.is_const(f) || self.variable(f) != v {
            return (f, f);
        }
        (self.low_node(f), self.high_node(f))
    }

    /// `ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)`, the single apply everything
    /// else is expressed through.
    pub fn ite(&mut self, f: Ref, g: Ref, h: Ref) -> Ref {
        if self.is_true(f) {
            return g;
        }
        if self.is_false(f) {
            return h;
        }

        // Standard triples: branches that restate the guard collapse.
        let (f, mut g, mut h) = (f, g, h);
        if g == f {
            g = self.one;
        } else if g == !f {
            g = self.zero;
        }
        if h == f {
            h = self.zero;
        } else if h == !f {
            h = self.one;
        }

        if g == h {
            return g;
        }
        if self.is_true(g) && self.is_false(h) {
            return f;
        }
        if self.is_false(g) && self.is_true(h) {
            return !f;
        }

        // Normalize for the cache: guard positive, then-branch positive.
        let (mut f, mut g, mut h) = (f, g, h);
        if f.is_complement() {
            f = !f;
            std::mem::swap(&mut g, &mut h);
        }
        let n = g.is_complement();
        if n {
            g = !g;
            h = !h;
        }

        if let Some(&res) = self.ite_cache.get(&(f, g, h)) {
            return if n { !res } else { res };
        }

        let mut m = self.variable(f);
        let vg = self.variable(g);
        let vh = self.variable(h);
        if vg != 0 {
            m = m.min(vg);
        }
        if vh != 0 {
            m = m.min(vh);
        }

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let e = self.ite(f0, g0, h0);
        let t = self.ite(f1, g1, h1);
        let res = self.mk_node(m, e, t);

        self.ite_cache.insert((f, g, h), res);
        if n {
            !res
        } else {
            res
        }
    }

    pub fn and(&mut self, u: Ref, v: Ref) -> Ref {
        self.ite(u, v, self.zero)
    }
    pub fn or(&mut self, u: Ref, v: Ref) -> Ref {
        self.ite(u, self.one, v)
    }
    pub fn xor(&mut self, u: Ref, v: Ref) -> Ref {
        self.ite(u, !v, v)
    }
    pub fn iff(&mut self, u: Ref, v: Ref) -> Ref {
        self.ite(u, v, !v)
    }

    /// Existentially quantify a single variable: `∃v. f`.
    pub fn exists(&mut self, f: Ref, v: Var) -> Ref {
        assert_ne!(v, 0, "Variable index must not be zero");
        if self.is_const(f) {
            return f;
        }
        let t = self.variable(f);
        if t > v {
            // v is above the top variable, so it does not occur in f.
            return f;
        }
        if let Some(&res) = self.exists_cache.get(&(f, v)) {
            return res;
        }

        let f0 = self.low_node(f);
        let f1 = self.high_node(f);
        let res = if t == v {
            self.or(f0, f1)
        } else {
            let lo = self.exists(f0, v);
            let hi = self.exists(f1, v);
            self.mk_node(t, lo, hi)
        };

        self.exists_cache.insert((f, v), res);
        res
    }

    /// `∃vars. f`.
    pub fn exists_all(&mut self, f: Ref, vars: &[Var]) -> Ref {
        let mut res = f;
        for &v in vars {
            res = self.exists(res, v);
        }
        res
    }

    /// `∃cube. a ∧ b` — the substitution primitive: when `b` holds a set
    /// of defining equivalences for the cube variables, this rewrites `a`
    /// with the definitions while sharing work across uses.
    pub fn and_exists(&mut self, cube: &[Var], a: Ref, b: Ref) -> Ref {
        let h = self.and(a, b);
        self.exists_all(h, cube)
    }

    /// Simultaneously exchange the variable lists `a` and `b` in `f`.
    /// The lists must have equal length and be pairwise disjoint.
    pub fn swap_variables(&mut self, f: Ref, a: &[Var], b: &[Var]) -> Ref {
        assert_eq!(a.len(), b.len(), "swap lists must have equal length");
        if a.is_empty() {
            return f;
        }
        let mut perm: FxHashMap<Var, Var> = FxHashMap::default();
        for (&x, &y) in a.iter().zip(b.iter()) {
            perm.insert(x, y);
            perm.insert(y, x);
        }
        let mut memo: FxHashMap<Ref, Ref> = FxHashMap::default();
        self.swap_rec(f, &perm, &mut memo)
    }

    fn swap_rec(
        &mut self,
        f: Ref,
        perm: &FxHashMap<Var, Var>,
        memo: &mut FxHashMap<Ref, Ref>,
    ) -> Ref {
        if self.is_const(f) {
            return f;
        }
        if let Some(&res) = memo.get(&f) {
            return res;
        }
        let f0 = self.low_node(f);
        let f1 = self.high_node(f);
        let lo = self.swap_rec(f0, perm, memo);
        let hi = self.swap_rec(f1, perm, memo);
        let v = self.variable(f);
        let w = perm.get(&v).copied().unwrap_or(v);
        // The renamed variable may sit anywhere in the order, so rebuild
        // through the apply rather than mk_node.
        let wf = self.var(w);
        let res = self.ite(wf, hi, lo);
        memo.insert(f, res);
        res
    }
}
