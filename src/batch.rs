//! Fitting many independent sample sets at once.
//!
//! Each sensor's data is fitted on its own, so sets can be processed concurrently. With the
//! `parallel` feature the work is spread over the rayon thread pool; without it the sets are
//! fitted in order on the calling thread. Results are always returned in input order.
use crate::{error::Result, value::Value};

/// A named set of `(x, y)` samples, typically one sensor's measurements.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampleSet<T = f64> {
    /// Name used to identify the set in reports
    pub name: String,

    /// Sample positions
    pub x: Vec<T>,

    /// Measured values
    pub y: Vec<T>,
}
impl<T: Value> SampleSet<T> {
    /// Creates a new sample set.
    pub fn new(name: impl Into<String>, x: Vec<T>, y: Vec<T>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Creates a sample set from `(x, y)` pairs.
    pub fn from_pairs(name: impl Into<String>, pairs: &[(T, T)]) -> Self {
        let (x, y) = pairs.iter().copied().unzip();
        Self::new(name, x, y)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the set holds no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Applies `fit` to every sample set, returning each set's name with its result.
///
/// One failing set does not stop the others.
///
/// # Example
/// ```
/// # use polyinterp::{batch::{fit_each, SampleSet}, fit_polynomial};
/// let sets = vec![
///     SampleSet::new("a", vec![0.0, 1.0], vec![1.0, 3.0]),
///     SampleSet::new("b", vec![2.0, 2.0], vec![1.0, 3.0]),
/// ];
/// let results = fit_each(&sets, |x, y| fit_polynomial(x, y));
/// assert!(results[0].1.is_ok());
/// assert!(results[1].1.is_err());
/// ```
pub fn fit_each<T, R, F>(sets: &[SampleSet<T>], fit: F) -> Vec<(String, Result<R>)>
where
    T: Value,
    R: Send,
    F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
{
    log::debug!("Fitting {} sample sets", sets.len());

    #[cfg(not(feature = "parallel"))]
    {
        return sets
            .iter()
            .map(|set| (set.name.clone(), fit(&set.x, &set.y)))
            .collect();
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        sets.par_iter()
            .map(|set| (set.name.clone(), fit(&set.x, &set.y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_close, error::Error, fit_chebyshev_direct, fit_chebyshev_resampled, fit_polynomial,
    };

    fn sets() -> Vec<SampleSet> {
        (0..16)
            .map(|i| {
                let offset = i as f64;
                SampleSet::from_pairs(
                    format!("sensor-{i}"),
                    &[(0.0, offset), (1.0, offset + 1.0), (2.0, offset + 4.0)],
                )
            })
            .collect()
    }

    #[test]
    fn test_order_preserved() {
        let sets = sets();
        let results = fit_each(&sets, |x, y| fit_polynomial(x, y));
        assert_eq!(results.len(), sets.len());
        for (i, (name, result)) in results.iter().enumerate() {
            assert_eq!(name, &format!("sensor-{i}"));
            let f = result.as_ref().unwrap();
            assert_close!(f.y(2.0).unwrap(), i as f64 + 4.0, tol = 1e-10);
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let mut sets = sets();
        sets[3].y.pop();
        sets[7].x = vec![1.0, 1.0, 1.0];

        let results = fit_each(&sets, |x, y| fit_chebyshev_direct(x, y, None));
        assert_eq!(
            results[3].1,
            Err(Error::ShapeMismatch { x: 3, y: 2 })
        );
        assert!(matches!(results[7].1, Err(Error::DegenerateDomain(_, _))));
        assert_eq!(results.iter().filter(|(_, r)| r.is_ok()).count(), 14);
    }

    #[test]
    fn test_any_fit() {
        let sets = sets();
        let results = fit_each(&sets, |x, y| fit_chebyshev_resampled(x, y, 5_usize));
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }

    #[test]
    fn test_sample_set() {
        let set = SampleSet::from_pairs("s", &[(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(set.x, vec![0.0, 2.0]);
        assert_eq!(set.y, vec![1.0, 3.0]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());

        let json = serde_json::to_string(&set).unwrap();
        let back: SampleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
