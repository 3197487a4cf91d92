use itertools::Itertools;
use std::fmt;

/// Types of the core language. `Int(n)` is the finite integer domain
/// `0..n`, compiled as a one-hot vector of `n` formulas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Bool,
    Int(usize),
    Prod(Box<Ty>, Box<Ty>),
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Bool => write!(f, "Bool"),
            Ty::Int(n) => write!(f, "Int[{}]", n),
            Ty::Prod(l, r) => write!(f, "({}, {})", l, r),
        }
    }
}

/// The core AST. Programs arrive here already parsed, desugared, and
/// well-typed; this is the input of the symbolic compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    True,
    False,
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    /// Structural equality, over Booleans, one-hot integers, and tuples.
    Eq(Box<Expr>, Box<Expr>),
    /// A coin flip with the given head probability.
    Flip(f64),
    /// A one-hot integer literal: domain size, then value.
    Int(usize, usize),
    /// A finite distribution over `0..n`, one probability per value.
    Discrete(Vec<f64>),
    Ite(Box<Expr>, Box<Expr>, Box<Expr>),
    Tup(Box<Expr>, Box<Expr>),
    Fst(Box<Expr>),
    Snd(Box<Expr>),
    Let(String, Box<Expr>, Box<Expr>),
    /// Soft conditioning: the argument is required to hold.
    Observe(Box<Expr>),
    Call(String, Vec<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            True => write!(f, "true"),
            False => write!(f, "false"),
            Var(x) => write!(f, "{}", x),
            Not(e) => write!(f, "!{}", e),
            And(a, b) => write!(f, "({} && {})", a, b),
            Or(a, b) => write!(f, "({} || {})", a, b),
            Eq(a, b) => write!(f, "({} == {})", a, b),
            Flip(theta) => write!(f, "flip {}", theta),
            Int(n, v) => write!(f, "int({}, {})", n, v),
            Discrete(ps) => write!(f, "discrete({})", ps.iter().map(|p| p.to_string()).join(", ")),
            Ite(g, t, e) => write!(f, "if {} then {} else {}", g, t, e),
            Tup(a, b) => write!(f, "({}, {})", a, b),
            Fst(e) => write!(f, "fst {}", e),
            Snd(e) => write!(f, "snd {}", e),
            Let(x, e1, e2) => write!(f, "let {} = {} in {}", x, e1, e2),
            Observe(e) => write!(f, "observe {}", e),
            Call(name, args) => {
                write!(f, "{}({})", name, args.iter().map(|a| a.to_string()).join(", "))
            }
        }
    }
}

/// A user-defined function: name, typed parameters, body. The return
/// type is synthesized from the body when the program is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<(String, Ty)>,
    pub body: Expr,
}

/// Function definitions in dependency order, then the query body.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>,
    pub body: Expr,
}

impl Program {
    /// A program that is just a body, no function definitions.
    pub fn body(body: Expr) -> Program {
        Program { functions: vec![], body }
    }
}
