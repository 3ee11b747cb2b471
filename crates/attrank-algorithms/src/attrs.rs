//! Attribute vector arithmetic
//!
//! An [`AttributeVector`] maps attribute names to values. Every attribute is
//! carried through a ranking run independently, so all arithmetic here is
//! key-wise. No operation mutates its inputs and none of them fail:
//!
//! - `sum`, `subtract` and `divide` work over the union of keys, reading a
//!   missing key as `0.0`.
//! - `multiply` works over the intersection of keys. A key missing on either
//!   side has a zero product, so it is simply absent from the result.
//! - The `*_ignore_zero` variants omit every key whose denominator is zero
//!   (or missing) instead of producing NaN or infinity.

use indexmap::IndexMap;

/// Named numeric attributes of a node, an edge, or a node's rank mass
pub type AttributeVector = IndexMap<String, f64>;

/// Node id -> per-attribute rank mass
pub type WeightMap = IndexMap<String, AttributeVector>;

fn union_with(a: &AttributeVector, b: &AttributeVector, op: impl Fn(f64, f64) -> f64) -> AttributeVector {
    let mut out = AttributeVector::with_capacity(a.len().max(b.len()));
    for (key, &lhs) in a {
        let rhs = b.get(key).copied().unwrap_or(0.0);
        out.insert(key.clone(), op(lhs, rhs));
    }
    for (key, &rhs) in b {
        if !a.contains_key(key) {
            out.insert(key.clone(), op(0.0, rhs));
        }
    }
    out
}

/// Key-wise `a + b`
pub fn sum(a: &AttributeVector, b: &AttributeVector) -> AttributeVector {
    union_with(a, b, |x, y| x + y)
}

/// Sum any number of vectors. An empty input sums to an empty vector.
pub fn sum_all<'a, I>(vectors: I) -> AttributeVector
where
    I: IntoIterator<Item = &'a AttributeVector>,
{
    let mut total = AttributeVector::new();
    for vector in vectors {
        accumulate(&mut total, vector);
    }
    total
}

/// In-place `acc += addend`, used by round-scoped accumulators.
pub fn accumulate(acc: &mut AttributeVector, addend: &AttributeVector) {
    for (key, &value) in addend {
        *acc.entry(key.clone()).or_insert(0.0) += value;
    }
}

/// Key-wise `a - b`
pub fn subtract(a: &AttributeVector, b: &AttributeVector) -> AttributeVector {
    union_with(a, b, |x, y| x - y)
}

/// Key-wise `a * b` over the keys both vectors define
pub fn multiply(a: &AttributeVector, b: &AttributeVector) -> AttributeVector {
    a.iter()
        .filter_map(|(key, &lhs)| b.get(key).map(|&rhs| (key.clone(), lhs * rhs)))
        .collect()
}

/// Key-wise `a / b`. A zero denominator yields an IEEE infinity or NaN;
/// use [`divide_ignore_zero`] when that must not happen.
pub fn divide(a: &AttributeVector, b: &AttributeVector) -> AttributeVector {
    union_with(a, b, |x, y| x / y)
}

/// Key-wise `a / b`, omitting keys whose denominator is zero or missing
pub fn divide_ignore_zero(a: &AttributeVector, b: &AttributeVector) -> AttributeVector {
    let mut out = AttributeVector::with_capacity(a.len());
    for (key, &lhs) in a {
        if let Some(&rhs) = b.get(key) {
            if rhs != 0.0 {
                out.insert(key.clone(), lhs / rhs);
            }
        }
    }
    for (key, &rhs) in b {
        if rhs != 0.0 && !a.contains_key(key) {
            out.insert(key.clone(), 0.0);
        }
    }
    out
}

/// `v[key] + scalar` for every key
pub fn add_scalar(v: &AttributeVector, scalar: f64) -> AttributeVector {
    map_values(v, |x| x + scalar)
}

/// `v[key] - scalar` for every key
pub fn subtract_scalar(v: &AttributeVector, scalar: f64) -> AttributeVector {
    map_values(v, |x| x - scalar)
}

/// `v[key] * scalar` for every key
pub fn multiply_scalar(v: &AttributeVector, scalar: f64) -> AttributeVector {
    map_values(v, |x| x * scalar)
}

/// `v[key] / scalar` for every key
pub fn divide_scalar(v: &AttributeVector, scalar: f64) -> AttributeVector {
    map_values(v, |x| x / scalar)
}

/// `scalar - v[key]` for every key
pub fn scalar_subtract(scalar: f64, v: &AttributeVector) -> AttributeVector {
    map_values(v, |x| scalar - x)
}

/// `scalar / v[key]` for every key, omitting zero entries
pub fn scalar_divide_ignore_zero(scalar: f64, v: &AttributeVector) -> AttributeVector {
    v.iter()
        .filter(|(_, x)| **x != 0.0)
        .map(|(key, &x)| (key.clone(), scalar / x))
        .collect()
}

/// Apply `f` to every value, keeping keys
pub fn map_values(v: &AttributeVector, f: impl Fn(f64) -> f64) -> AttributeVector {
    v.iter().map(|(key, &x)| (key.clone(), f(x))).collect()
}

/// Per-attribute total mass of a weight map
pub fn total_mass(weights: &WeightMap) -> AttributeVector {
    sum_all(weights.values())
}

/// Build a vector from `(name, value)` pairs
pub fn vector<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> AttributeVector {
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
