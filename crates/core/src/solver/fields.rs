//! Field data structures for the radial solver
//!
//! [`TemperatureField`] stores one temperature per radial shell, from the
//! domain centre (index 0) to the outer boundary (index `nr - 1`).
//! [`SpatialGrid`] holds the matching shell-centre radii.

use serde::Serialize;

/// Temperature per radial shell, fixed length for the whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemperatureField {
    /// Temperatures from centre (index 0) to outer boundary
    data: Vec<f64>,
}

impl TemperatureField {
    /// Create a field with every cell set to `value`
    #[must_use]
    pub fn with_value(len: usize, value: f64) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Create the starting field of a run: `init` everywhere, `boundary` in the last cell
    #[must_use]
    pub fn with_boundary(len: usize, init: f64, boundary: f64) -> Self {
        let mut field = Self::with_value(len, init);
        if let Some(last) = field.data.last_mut() {
            *last = boundary;
        }
        field
    }

    /// Wrap existing values
    #[must_use]
    pub fn from_values(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Number of radial cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get value at shell `k`
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of bounds
    #[must_use]
    pub fn get(&self, k: usize) -> f64 {
        assert!(k < self.data.len(), "Shell index out of bounds");
        self.data[k]
    }

    /// Set value at shell `k`
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of bounds
    pub fn set(&mut self, k: usize, value: f64) {
        assert!(k < self.data.len(), "Shell index out of bounds");
        self.data[k] = value;
    }

    /// Temperature at the domain centre
    #[must_use]
    pub fn center(&self) -> Option<f64> {
        self.data.first().copied()
    }

    /// Temperature at the outer boundary
    #[must_use]
    pub fn boundary(&self) -> Option<f64> {
        self.data.last().copied()
    }

    /// Arithmetic mean over all shells (unweighted by shell volume)
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Smallest temperature; NaN cells are skipped
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }

    /// Largest temperature; NaN cells are skipped
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Whether every cell holds a finite value
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

/// Shell-centre radii `r_k = k * delta_r - delta_r / 2`
///
/// `r_0` is negative and never enters the stencil; only interior radii are read.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    radii: Vec<f64>,
    delta_r: f64,
}

impl SpatialGrid {
    /// Build the radii for `nr` shells of width `delta_r`
    #[must_use]
    pub fn new(nr: usize, delta_r: f64) -> Self {
        let radii = (0..nr)
            .map(|k| k as f64 * delta_r - delta_r / 2.0)
            .collect();
        Self { radii, delta_r }
    }

    /// All radii
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.radii
    }

    /// Radius of shell `k`
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of bounds
    #[must_use]
    pub fn radius(&self, k: usize) -> f64 {
        self.radii[k]
    }

    /// Cell width
    #[must_use]
    pub fn delta_r(&self) -> f64 {
        self.delta_r
    }

    /// Number of shells
    #[must_use]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Whether the grid has no shells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_with_boundary() {
        let field = TemperatureField::with_boundary(5, 10.0, 100.0);
        assert_eq!(field.as_slice(), &[10.0, 10.0, 10.0, 10.0, 100.0]);
        assert_eq!(field.center(), Some(10.0));
        assert_eq!(field.boundary(), Some(100.0));
    }

    #[test]
    fn test_field_get_set() {
        let mut field = TemperatureField::with_value(4, 0.0);
        field.set(2, 42.5);
        assert_eq!(field.get(2), 42.5);
        assert_eq!(field.len(), 4);
    }

    #[test]
    #[should_panic(expected = "Shell index out of bounds")]
    fn test_field_bounds_check() {
        let field = TemperatureField::with_value(3, 0.0);
        let _ = field.get(3);
    }

    #[test]
    fn test_field_statistics_skip_nan() {
        let field = TemperatureField::from_values(vec![1.0, f64::NAN, 5.0, 3.0]);
        assert_eq!(field.min(), Some(1.0));
        assert_eq!(field.max(), Some(5.0));
        assert!(field.mean().is_some_and(f64::is_nan));
        assert!(!field.is_finite());
    }

    #[test]
    fn test_empty_field_statistics() {
        let field = TemperatureField::from_values(Vec::new());
        assert!(field.is_empty());
        assert_eq!(field.mean(), None);
        assert_eq!(field.max(), None);
        assert_eq!(field.center(), None);
    }

    #[test]
    fn test_grid_radii_are_shell_centres() {
        let grid = SpatialGrid::new(4, 0.5);
        assert_eq!(grid.as_slice(), &[-0.25, 0.25, 0.75, 1.25]);
        assert_eq!(grid.radius(1), 0.25);
        assert_eq!(grid.delta_r(), 0.5);
    }
}
