use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ranking function applied between a query and every stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Dot product of unit-normalized vectors. Higher is more similar.
    #[default]
    Cosine,
    /// Straight-line distance. Lower is more similar.
    Euclidean,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Cosine, Metric::Euclidean];

    pub fn higher_is_better(&self) -> bool {
        matches!(self, Metric::Cosine)
    }

    /// Turns a raw query into the form `score` expects. Cosine normalizes
    /// once up front so each row only pays for its own norm.
    pub fn prepare_query(&self, query: &[f32]) -> Vec<f32> {
        match self {
            Metric::Cosine => normalize(query),
            Metric::Euclidean => query.to_vec(),
        }
    }

    /// Scores one stored row against a query already passed through
    /// `prepare_query`. Both slices must have the same length.
    ///
    /// Sums run in f64 so tiny or huge components neither underflow to a
    /// zero norm nor overflow to infinity. A distance too large for f32
    /// saturates at `f32::MAX`.
    pub fn score(&self, prepared: &[f32], row: &[f32]) -> f32 {
        debug_assert_eq!(prepared.len(), row.len());
        match self {
            Metric::Cosine => {
                let norm = l2_norm(row);
                if norm == 0.0 {
                    return 0.0;
                }
                prepared
                    .iter()
                    .zip(row)
                    .fold(0.0_f64, |acc, (q, r)| acc + *q as f64 * (*r as f64 / norm))
                    as f32
            }
            Metric::Euclidean => prepared
                .iter()
                .zip(row)
                .fold(0.0_f64, |acc, (q, r)| {
                    let d = *r as f64 - *q as f64;
                    acc + d * d
                })
                .sqrt()
                .min(f32::MAX as f64) as f32,
        }
    }

    /// Orders two scores best-first. NaN sorts after every number so a
    /// poisoned row can never displace a real match.
    pub fn rank(&self, a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                if self.higher_is_better() {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    }
}

/// Euclidean length, accumulated in f64. Zero only for the zero vector.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .fold(0.0_f64, |acc, x| {
            let x = *x as f64;
            acc + x * x
        })
        .sqrt()
}

/// Unit-length copy of `v`. A zero vector stays the zero vector.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return vec![0.0; v.len()];
    }
    v.iter().map(|x| (*x as f64 / norm) as f32).collect()
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Cosine => write!(f, "cosine"),
            Metric::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            _ => Err(format!(
                "Unsupported mode: {s} (expected cosine or euclidean)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Cosine".parse::<Metric>().unwrap(), Metric::Cosine);
        assert_eq!("EUCLIDEAN".parse::<Metric>().unwrap(), Metric::Euclidean);
    }

    #[test]
    fn test_parse_rejects_unknown_and_names_it() {
        let err = "manhattan".parse::<Metric>().unwrap_err();
        assert!(err.contains("manhattan"));
    }

    #[test]
    fn test_display_round_trips() {
        for m in Metric::ALL {
            assert_eq!(m.to_string().parse::<Metric>().unwrap(), m);
        }
    }

    #[test]
    fn test_normalize_zero_vector_stays_zero() {
        assert_eq!(normalize(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize(&[3.0, 4.0]);
        assert!((l2_norm(&n) - 1.0).abs() < 1e-6);
        assert!((n[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_query_scores_zero() {
        let q = Metric::Cosine.prepare_query(&[0.0, 0.0]);
        let s = Metric::Cosine.score(&q, &[-1.0, -2.0]);
        assert_eq!(s, 0.0);
        assert!(s.is_sign_positive());
    }

    #[test]
    fn test_cosine_zero_row_scores_zero() {
        let q = Metric::Cosine.prepare_query(&[1.0, 2.0]);
        assert_eq!(Metric::Cosine.score(&q, &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite_is_negative() {
        let q = Metric::Cosine.prepare_query(&[1.0, 0.0]);
        let s = Metric::Cosine.score(&q, &[-5.0, 0.0]);
        assert!((s + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_extreme_magnitudes() {
        for scale in [1e-25_f32, 1e-40, 1e25, 3e38] {
            let n = normalize(&[scale, 0.0]);
            assert_eq!(n, vec![1.0, 0.0], "scale={scale}");
        }
    }

    #[test]
    fn test_cosine_large_row_keeps_direction() {
        let q = Metric::Cosine.prepare_query(&[1.0, 1.0]);
        let s = Metric::Cosine.score(&q, &[3e19, 3e19]);
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_saturates_instead_of_overflowing() {
        let q = Metric::Euclidean.prepare_query(&[-3e38]);
        let s = Metric::Euclidean.score(&q, &[3e38]);
        assert_eq!(s, f32::MAX);
    }

    #[test]
    fn test_euclidean_distance() {
        let q = Metric::Euclidean.prepare_query(&[0.0, 0.0]);
        assert!((Metric::Euclidean.score(&q, &[3.0, 4.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rank_direction() {
        assert_eq!(Metric::Cosine.rank(0.9, 0.1), Ordering::Less);
        assert_eq!(Metric::Euclidean.rank(0.9, 0.1), Ordering::Greater);
        assert_eq!(Metric::Cosine.rank(0.0, -0.0), Ordering::Equal);
    }

    #[test]
    fn test_rank_puts_nan_last() {
        for m in Metric::ALL {
            assert_eq!(m.rank(f32::NAN, 1.0), Ordering::Greater);
            assert_eq!(m.rank(1.0, f32::NAN), Ordering::Less);
        }
    }
}
