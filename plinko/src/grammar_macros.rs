//! Construction macros for core-AST programs. The textual front-end
//! lives elsewhere; tests and embedders build programs with these.

/// Boolean atoms and small connective chains:
/// `b!("x")`, `b!(true)`, `b!("x" && "y")`, `b!(!"x")`.
#[macro_export]
macro_rules! b {
    ( $x:literal && $($rest:tt)+ ) => {
        $crate::and!($crate::b!($x), $crate::b!($($rest)+))
    };
    ( $x:literal || $($rest:tt)+ ) => {
        $crate::or!($crate::b!($x), $crate::b!($($rest)+))
    };
    ( ! $($rest:tt)+ ) => {
        $crate::not!($crate::b!($($rest)+))
    };
    ( $x:literal ) => {{
        let s = $x.to_string();
        if s == "true" {
            $crate::grammar::Expr::True
        } else if s == "false" {
            $crate::grammar::Expr::False
        } else {
            $crate::grammar::Expr::Var(s)
        }
    }};
}

#[macro_export]
macro_rules! var {
    ( $x:literal ) => {
        $crate::grammar::Expr::Var($x.to_string())
    };
}

/// `flip!(0.3)` or `flip!(1/3)`.
#[macro_export]
macro_rules! flip {
    ( $n:literal / $d:literal ) => {
        $crate::grammar::Expr::Flip($n as f64 / $d as f64)
    };
    ( $e:expr ) => {
        $crate::grammar::Expr::Flip(($e) as f64)
    };
}

#[macro_export]
macro_rules! not {
    ( $e:expr ) => {
        $crate::grammar::Expr::Not(Box::new($e))
    };
}

#[macro_export]
macro_rules! and {
    ( $a:expr , $b:expr ) => {
        $crate::grammar::Expr::And(Box::new($a), Box::new($b))
    };
}

#[macro_export]
macro_rules! or {
    ( $a:expr , $b:expr ) => {
        $crate::grammar::Expr::Or(Box::new($a), Box::new($b))
    };
}

#[macro_export]
macro_rules! eq {
    ( $a:expr , $b:expr ) => {
        $crate::grammar::Expr::Eq(Box::new($a), Box::new($b))
    };
}

#[macro_export]
macro_rules! ite {
    ( $g:expr , $t:expr , $e:expr ) => {
        $crate::grammar::Expr::Ite(Box::new($g), Box::new($t), Box::new($e))
    };
}

#[macro_export]
macro_rules! tup {
    ( $a:expr , $b:expr ) => {
        $crate::grammar::Expr::Tup(Box::new($a), Box::new($b))
    };
}

#[macro_export]
macro_rules! fst {
    ( $e:expr ) => {
        $crate::grammar::Expr::Fst(Box::new($e))
    };
}

#[macro_export]
macro_rules! snd {
    ( $e:expr ) => {
        $crate::grammar::Expr::Snd(Box::new($e))
    };
}

#[macro_export]
macro_rules! observe {
    ( $e:expr ) => {
        $crate::grammar::Expr::Observe(Box::new($e))
    };
}

/// `int!(3, 1)`: the literal 1 in the domain `0..3`.
#[macro_export]
macro_rules! int {
    ( $n:expr , $v:expr ) => {
        $crate::grammar::Expr::Int($n, $v)
    };
}

/// `discrete![0.2, 0.3, 0.5]`.
#[macro_export]
macro_rules! discrete {
    ( $( $p:expr ),+ $(,)? ) => {
        $crate::grammar::Expr::Discrete(vec![ $( ($p) as f64 ),+ ])
    };
}

#[macro_export]
macro_rules! call {
    ( $name:literal ) => {
        $crate::grammar::Expr::Call($name.to_string(), vec![])
    };
    ( $name:literal , $( $a:expr ),+ ) => {
        $crate::grammar::Expr::Call($name.to_string(), vec![ $( $a ),+ ])
    };
}

/// Let-chains in the shape programs are usually written:
///
/// ```
/// # use plinko::*;
/// let p = lets![
///     "x" ;= flip!(1/3);
///     "y" ;= flip!(1/4);
///     ...? b!("x" || "y")
/// ];
/// ```
#[macro_export]
macro_rules! lets {
    ( $x:literal ;= $e:expr ; $($rest:tt)+ ) => {
        $crate::grammar::Expr::Let(
            $x.to_string(),
            Box::new($e),
            Box::new($crate::lets!($($rest)+)),
        )
    };
    ( ...? $ret:expr ) => {
        $ret
    };
}

/// Type shorthands: `B!()`, `I!(3)`, `P!(B!(), B!())`.
#[macro_export]
macro_rules! B {
    () => {
        $crate::grammar::Ty::Bool
    };
}

#[macro_export]
macro_rules! I {
    ( $n:expr ) => {
        $crate::grammar::Ty::Int($n)
    };
}

#[macro_export]
macro_rules! P {
    ( $l:expr , $r:expr ) => {
        $crate::grammar::Ty::Prod(Box::new($l), Box::new($r))
    };
}

/// `fun!("f"; ("x", B!()) => body)`.
#[macro_export]
macro_rules! fun {
    ( $name:literal ; $( ( $p:literal , $t:expr ) ),* => $body:expr ) => {
        $crate::grammar::Function {
            name: $name.to_string(),
            params: vec![ $( ($p.to_string(), $t) ),* ],
            body: $body,
        }
    };
}
