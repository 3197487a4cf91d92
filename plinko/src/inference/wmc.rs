use crate::data::*;
use robdd::{Bdd, Ref};

/// Weighted model count: the sum over satisfying assignments of the
/// product of per-variable weights. Memoized post-order over the
/// diagram; a variable skipped on a path contributes `lo + hi`, which is
/// 1 for every weight this compiler installs, so no smoothing correction
/// is applied.
pub fn wmc(mgr: &Bdd, f: Ref, ws: &WeightMap) -> f64 {
    let mut memo: HashMap<Ref, f64> = HashMap::default();
    wmc_h(mgr, f, ws, &mut memo)
}

fn wmc_h(mgr: &Bdd, f: Ref, ws: &WeightMap, memo: &mut HashMap<Ref, f64>) -> f64 {
    if mgr.is_true(f) {
        return 1.0;
    }
    if mgr.is_false(f) {
        return 0.0;
    }
    if let Some(r) = memo.get(&f) {
        return *r;
    }
    let w = ws.get(mgr.variable(f));
    let lo = wmc_h(mgr, mgr.low_node(f), ws, memo);
    let hi = wmc_h(mgr, mgr.high_node(f), ws, memo);
    let r = w.lo * lo + w.hi * hi;
    memo.insert(f, r);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::WeightMap;
    use robdd::Bdd;

    #[test]
    fn test_wmc_single_variable() {
        let mut mgr = Bdd::new();
        let x = mgr.new_var();
        let mut ws = WeightMap::default();
        ws.insert(mgr.top_var(x), 0.3);

        assert_eq!(wmc(&mgr, x, &ws), 0.3);
        assert!((wmc(&mgr, !x, &ws) - 0.7).abs() < 1e-12);
        assert_eq!(wmc(&mgr, mgr.one, &ws), 1.0);
        assert_eq!(wmc(&mgr, mgr.zero, &ws), 0.0);
    }

    #[test]
    fn test_wmc_connectives() {
        let mut mgr = Bdd::new();
        let x = mgr.new_var();
        let y = mgr.new_var();
        let mut ws = WeightMap::default();
        ws.insert(mgr.top_var(x), 0.3);
        ws.insert(mgr.top_var(y), 0.4);

        let a = mgr.and(x, y);
        let o = mgr.or(x, y);
        assert!((wmc(&mgr, a, &ws) - 0.12).abs() < 1e-12);
        assert!((wmc(&mgr, o, &ws) - 0.58).abs() < 1e-12);

        let i = mgr.iff(x, y);
        assert!((wmc(&mgr, i, &ws) - (0.3 * 0.4 + 0.7 * 0.6)).abs() < 1e-12);
    }
}
