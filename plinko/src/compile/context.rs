use crate::data::*;
use robdd::{Bdd, Ref, Var};

/// Compilation switches. `lazy` selects the let strategy: bind a
/// placeholder and eliminate it by `∃cube. iff ∧ body` (the default), or
/// bind the compiled formula directly.
#[derive(Debug, Clone)]
pub struct Options {
    pub lazy: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { lazy: true }
    }
}

impl Options {
    pub fn eager() -> Self {
        Options { lazy: false }
    }
}

/// A compiled expression: the symbolic value, the accumulated
/// observation constraint, and the flip variables introduced while
/// compiling it, in introduction order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    pub state: SymTree,
    pub z: Ref,
    pub flips: Vec<Ref>,
}

/// A function compiled once against placeholder arguments. `args` holds
/// the raw (non-mutex) placeholder trees; call sites substitute actuals
/// into a flip-refreshed copy of `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunc {
    pub args: Vec<SymTree>,
    pub body: CompiledExpr,
}

/// Value environment: the symbolic tree currently bound to each name.
pub type Env = HashMap<String, SymTree>;

/// Everything one compilation owns: the BDD manager, the weight table,
/// debug names, compiled functions, and the flip counter. Dropping the
/// state invalidates every handle it produced.
#[derive(Debug)]
pub struct State {
    pub mgr: Bdd,
    pub weights: WeightMap,
    pub names: HashMap<Var, String>,
    pub funcs: HashMap<String, CompiledFunc>,
    pub opts: Options,
    flip_ct: u64,
}

impl State {
    pub fn new(opts: Options) -> Self {
        State {
            mgr: Bdd::new(),
            weights: WeightMap::default(),
            names: HashMap::default(),
            funcs: HashMap::default(),
            opts,
            flip_ct: 0,
        }
    }

    /// A fresh flip variable with head probability `theta`.
    pub fn fresh_flip(&mut self, theta: f64) -> Ref {
        let f = self.mgr.new_var();
        let v = self.mgr.top_var(f);
        self.weights.insert(v, theta);
        self.names.insert(v, format!("flip{}", self.flip_ct));
        self.flip_ct += 1;
        f
    }

    /// A fresh copy of an existing flip variable, inheriting its weight.
    /// Call sites use this to give every inlining independent coins.
    pub fn refresh_flip(&mut self, old: Var) -> Ref {
        let f = self.mgr.new_var();
        let v = self.mgr.top_var(f);
        self.weights.insert_weight(v, self.weights.get(old));
        if let Some(n) = self.names.get(&old).cloned() {
            self.names.insert(v, format!("{}'", n));
        }
        f
    }

    /// A fresh placeholder variable. Placeholders carry no weight; every
    /// one is eliminated by quantification before counting.
    pub fn fresh_placeholder(&mut self, hint: &str) -> Ref {
        let f = self.mgr.new_var();
        let v = self.mgr.top_var(f);
        self.names.insert(v, format!("{}#{}", hint, v));
        f
    }
}
