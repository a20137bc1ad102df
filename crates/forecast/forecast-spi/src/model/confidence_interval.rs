//! Confidence interval model

/// Confidence interval result
#[derive(Debug, Clone)]
pub struct ConfidenceInterval {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound of confidence interval
    pub lower: Vec<f64>,
    /// Upper bound of confidence interval
    pub upper: Vec<f64>,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// `lower <= forecast <= upper` at every step
    pub fn is_ordered(&self) -> bool {
        self.forecast
            .iter()
            .zip(&self.lower)
            .zip(&self.upper)
            .all(|((f, l), u)| l <= f && f <= u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval_creation() {
        let ci = ConfidenceInterval {
            forecast: vec![100.0, 110.0, 120.0],
            lower: vec![90.0, 100.0, 110.0],
            upper: vec![110.0, 120.0, 130.0],
            confidence_level: 0.95,
        };

        assert_eq!(ci.len(), 3);
        assert!(!ci.is_empty());
        assert_eq!(ci.confidence_level, 0.95);
        assert!(ci.is_ordered());
    }

    #[test]
    fn test_confidence_interval_empty_vectors() {
        let ci = ConfidenceInterval {
            forecast: vec![],
            lower: vec![],
            upper: vec![],
            confidence_level: 0.90,
        };

        assert!(ci.is_empty());
        assert!(ci.is_ordered());
    }

    #[test]
    fn test_confidence_interval_crossed_bounds() {
        let ci = ConfidenceInterval {
            forecast: vec![100.0, 110.0],
            lower: vec![90.0, 115.0],
            upper: vec![110.0, 120.0],
            confidence_level: 0.8,
        };

        assert!(!ci.is_ordered());
    }
}
