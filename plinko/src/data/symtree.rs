use crate::data::errors::{self, Result};
use robdd::Ref;

/// A compiled value at a single position: either one Boolean formula or
/// a one-hot vector for a finite integer, one formula per inhabitant.
#[derive(Debug, Clone, PartialEq)]
pub enum SymLeaf {
    Bool(Ref),
    Int(Vec<Ref>),
}

/// The symbolic counterpart of a value: leaves for base types, nodes for
/// pairs. Shapes mirror types exactly, so two trees for the same type
/// always zip.
#[derive(Debug, Clone, PartialEq)]
pub enum SymTree {
    Leaf(SymLeaf),
    Node(Box<SymTree>, Box<SymTree>),
}

impl SymTree {
    pub fn bool(b: Ref) -> SymTree {
        SymTree::Leaf(SymLeaf::Bool(b))
    }
    pub fn ints(vs: Vec<Ref>) -> SymTree {
        SymTree::Leaf(SymLeaf::Int(vs))
    }
    pub fn pair(l: SymTree, r: SymTree) -> SymTree {
        SymTree::Node(Box::new(l), Box::new(r))
    }

    /// The single Boolean formula of a `Bool`-typed tree.
    pub fn as_bdd(&self) -> Result<Ref> {
        match self {
            SymTree::Leaf(SymLeaf::Bool(b)) => Ok(*b),
            t => errors::shape_mismatch(&format!("expected a boolean value, got {:?}", t)),
        }
    }

    pub fn fst(&self) -> Result<&SymTree> {
        match self {
            SymTree::Node(l, _) => Ok(l),
            t => errors::projection(&format!("{:?}", t)),
        }
    }
    pub fn snd(&self) -> Result<&SymTree> {
        match self {
            SymTree::Node(_, r) => Ok(r),
            t => errors::projection(&format!("{:?}", t)),
        }
    }

    /// All formulas in the tree, left to right; one-hot vectors
    /// contribute every entry.
    pub fn bdds(&self) -> Vec<Ref> {
        match self {
            SymTree::Leaf(SymLeaf::Bool(b)) => vec![*b],
            SymTree::Leaf(SymLeaf::Int(vs)) => vs.clone(),
            SymTree::Node(l, r) => {
                let mut out = l.bdds();
                out.extend(r.bdds());
                out
            }
        }
    }

    pub fn try_map<F>(&self, f: &mut F) -> Result<SymTree>
    where
        F: FnMut(&SymLeaf) -> Result<SymLeaf>,
    {
        match self {
            SymTree::Leaf(l) => Ok(SymTree::Leaf(f(l)?)),
            SymTree::Node(l, r) => Ok(SymTree::pair(l.try_map(f)?, r.try_map(f)?)),
        }
    }

    /// Zip two trees of the same shape, combining leaf-wise.
    pub fn try_map2<F>(a: &SymTree, b: &SymTree, f: &mut F) -> Result<SymTree>
    where
        F: FnMut(&SymLeaf, &SymLeaf) -> Result<SymLeaf>,
    {
        match (a, b) {
            (SymTree::Leaf(x), SymTree::Leaf(y)) => Ok(SymTree::Leaf(f(x, y)?)),
            (SymTree::Node(al, ar), SymTree::Node(bl, br)) => Ok(SymTree::pair(
                SymTree::try_map2(al, bl, f)?,
                SymTree::try_map2(ar, br, f)?,
            )),
            _ => errors::shape_mismatch(&format!("cannot zip {:?} against {:?}", a, b)),
        }
    }

    /// The leaf pairs of two same-shaped trees, left to right.
    pub fn zip_leaves<'a>(a: &'a SymTree, b: &'a SymTree) -> Result<Vec<(&'a SymLeaf, &'a SymLeaf)>> {
        match (a, b) {
            (SymTree::Leaf(x), SymTree::Leaf(y)) => Ok(vec![(x, y)]),
            (SymTree::Node(al, ar), SymTree::Node(bl, br)) => {
                let mut out = SymTree::zip_leaves(al, bl)?;
                out.extend(SymTree::zip_leaves(ar, br)?);
                Ok(out)
            }
            _ => errors::shape_mismatch(&format!("cannot zip {:?} against {:?}", a, b)),
        }
    }

    /// Rewrite every formula in place, keeping the shape.
    pub fn map_bdds<F>(&self, f: &mut F) -> SymTree
    where
        F: FnMut(Ref) -> Ref,
    {
        match self {
            SymTree::Leaf(SymLeaf::Bool(b)) => SymTree::bool(f(*b)),
            SymTree::Leaf(SymLeaf::Int(vs)) => SymTree::ints(vs.iter().map(|v| f(*v)).collect()),
            SymTree::Node(l, r) => SymTree::pair(l.map_bdds(f), r.map_bdds(f)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::errors::CompileError;
    use robdd::Bdd;

    #[test]
    fn test_shapes() {
        let mut mgr = Bdd::new();
        let x = mgr.new_var();
        let y = mgr.new_var();
        let t = SymTree::pair(SymTree::bool(x), SymTree::ints(vec![y, !y]));

        assert_eq!(t.bdds(), vec![x, y, !y]);
        assert_eq!(t.fst().unwrap().as_bdd().unwrap(), x);
        assert!(matches!(
            t.as_bdd(),
            Err(CompileError::ShapeMismatch(_))
        ));
        assert!(matches!(
            SymTree::bool(x).fst(),
            Err(CompileError::ProjectionError(_))
        ));
    }

    #[test]
    fn test_zip_requires_same_shape() {
        let mut mgr = Bdd::new();
        let x = mgr.new_var();
        let a = SymTree::bool(x);
        let b = SymTree::pair(SymTree::bool(x), SymTree::bool(x));

        assert!(SymTree::zip_leaves(&a, &b).is_err());
        assert_eq!(SymTree::zip_leaves(&b, &b).unwrap().len(), 2);

        let negated = b.map_bdds(&mut |r| !r);
        assert_eq!(negated.fst().unwrap().as_bdd().unwrap(), !x);
    }
}
