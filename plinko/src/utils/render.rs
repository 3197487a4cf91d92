use itertools::Itertools;
use robdd::Ref;

/// One debug-line row of BDD handles, e.g. `[3, !7, 12]`.
pub fn render_refs(rs: &[Ref]) -> String {
    format!("[{}]", rs.iter().join(", "))
}
