use crate::data::HashMap;
use robdd::Var;

/// Weights for one Boolean variable: `lo` counts assignments where it is
/// false, `hi` where it is true. Coin flips carry `(1 − θ, θ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weight {
    pub lo: f64,
    pub hi: f64,
}

impl Weight {
    pub fn new(lo: f64, hi: f64) -> Weight {
        Weight { lo, hi }
    }
    pub fn from_high(hi: f64) -> Weight {
        Weight { lo: 1.0 - hi, hi }
    }
    /// The weight of a variable that carries no probability mass of its
    /// own (argument and let placeholders).
    pub fn constant() -> Weight {
        Weight { lo: 1.0, hi: 1.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightMap {
    pub weights: HashMap<Var, Weight>,
}

impl WeightMap {
    pub fn insert(&mut self, v: Var, high: f64) {
        self.weights.insert(v, Weight::from_high(high));
    }
    pub fn insert_weight(&mut self, v: Var, w: Weight) {
        self.weights.insert(v, w);
    }
    pub fn get(&self, v: Var) -> Weight {
        self.weights.get(&v).copied().unwrap_or_else(Weight::constant)
    }
}

impl IntoIterator for WeightMap {
    type Item = (Var, Weight);
    type IntoIter = std::collections::hash_map::IntoIter<Var, Weight>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_defaults() {
        let mut ws = WeightMap::default();
        ws.insert(1, 0.25);
        // Refreshed call-site coins copy a full lo/hi pair, which need
        // not come from a single bias.
        ws.insert_weight(2, Weight::new(0.125, 0.875));

        assert_eq!(ws.get(1), Weight::new(0.75, 0.25));
        assert_eq!(ws.get(2), Weight::new(0.125, 0.875));
        // Weightless variables count as constants.
        assert_eq!(ws.get(99), Weight::constant());
    }
}
