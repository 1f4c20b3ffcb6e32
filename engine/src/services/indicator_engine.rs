// Batch evaluation of indicator requests against a single price series.
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use shared::models::{IndicatorResult, IndicatorSpec, PriceBar};

use super::registry::IndicatorRegistry;
use crate::error::{EngineError, IndicatorError};
use crate::models::PriceSeries;

/// A requested indicator that produced no result.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFailure {
    pub identifier: String,
    pub error: IndicatorError,
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    pub results: Vec<IndicatorResult>,
    pub failures: Vec<IndicatorFailure>,
}

/// Evaluates batches of indicator requests.
///
/// The engine keeps nothing between calls apart from its registry. Each
/// request in a batch is resolved and computed on its own; a failing request
/// is dropped from the output (and logged) without affecting the others.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    registry: IndicatorRegistry,
}

impl IndicatorEngine {
    pub fn new(registry: IndicatorRegistry) -> Self {
        IndicatorEngine { registry }
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    /// Computes one request. `computed_at` is shared by every result of a batch.
    pub fn evaluate_one(
        &self,
        series: &PriceSeries,
        spec: &IndicatorSpec,
        computed_at: DateTime<Utc>,
    ) -> Result<IndicatorResult, IndicatorError> {
        let resolved = self.registry.resolve(spec)?;
        let output = resolved.calculator.compute(series)?;

        let mut metadata = resolved.calculator.parameters();
        metadata.extend(output.metadata);

        tracing::trace!(
            identifier = %resolved.identifier,
            calculator = %resolved.calculator.name(),
            value = output.primary,
            "Computed indicator"
        );

        Ok(IndicatorResult {
            indicator_type: resolved.indicator_type,
            primary_value: output.primary,
            metadata,
            computed_at,
        })
    }

    /// Evaluates every spec and reports both the results and the omitted requests.
    pub fn evaluate_report(&self, series: &PriceSeries, specs: &[IndicatorSpec]) -> EvaluationReport {
        let computed_at = Utc::now();
        let outcomes = specs
            .iter()
            .map(|spec| (spec, self.evaluate_one(series, spec, computed_at)))
            .collect();
        Self::aggregate(series, outcomes)
    }

    /// Same contract as `evaluate_report`, with the requests spread over the rayon pool.
    pub fn evaluate_report_parallel(&self, series: &PriceSeries, specs: &[IndicatorSpec]) -> EvaluationReport {
        let computed_at = Utc::now();
        let outcomes = specs
            .par_iter()
            .map(|spec| (spec, self.evaluate_one(series, spec, computed_at)))
            .collect();
        Self::aggregate(series, outcomes)
    }

    pub fn evaluate(&self, series: &PriceSeries, specs: &[IndicatorSpec]) -> Vec<IndicatorResult> {
        self.evaluate_report(series, specs).results
    }

    pub fn evaluate_parallel(&self, series: &PriceSeries, specs: &[IndicatorSpec]) -> Vec<IndicatorResult> {
        self.evaluate_report_parallel(series, specs).results
    }

    /// Builds the series from raw bars first. A malformed series fails the whole batch.
    pub fn evaluate_bars(&self, bars: Vec<PriceBar>, specs: &[IndicatorSpec]) -> Result<Vec<IndicatorResult>, EngineError> {
        let series = PriceSeries::new(bars)?;
        Ok(self.evaluate(&series, specs))
    }

    fn aggregate(
        series: &PriceSeries,
        outcomes: Vec<(&IndicatorSpec, Result<IndicatorResult, IndicatorError>)>,
    ) -> EvaluationReport {
        let mut report = EvaluationReport::default();
        for (spec, outcome) in outcomes {
            match outcome {
                Ok(result) => report.results.push(result),
                Err(error) => {
                    tracing::warn!(
                        identifier = %spec.identifier,
                        bars = series.len(),
                        error = %error,
                        "Indicator omitted from batch"
                    );
                    report.failures.push(IndicatorFailure {
                        identifier: spec.identifier.clone(),
                        error,
                    });
                }
            }
        }
        tracing::debug!(
            requested = report.results.len() + report.failures.len(),
            computed = report.results.len(),
            omitted = report.failures.len(),
            "Evaluated indicator batch"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{series_from_closes, series_from_hlc};
    use crate::indicators::IndicatorKind;
    use shared::models::IndicatorParams;

    fn specs(ids: &[&str]) -> Vec<IndicatorSpec> {
        ids.iter().map(|id| IndicatorSpec::new(*id)).collect()
    }

    fn find<'a>(results: &'a [IndicatorResult], indicator_type: &str) -> &'a IndicatorResult {
        results
            .iter()
            .find(|r| r.indicator_type == indicator_type)
            .unwrap_or_else(|| panic!("{} missing from {:?}", indicator_type, results))
    }

    #[test]
    fn test_insufficient_history_drops_only_that_indicator() {
        let closes: Vec<f64> = (1..=15).map(f64::from).collect();
        let series = series_from_closes(&closes);
        let engine = IndicatorEngine::default();

        let report = engine.evaluate_report(&series, &specs(&["sma_20", "rsi"]));
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].indicator_type, "RSI");
        assert_eq!(report.results[0].primary_value, 100.0);
        assert_eq!(
            report.failures,
            vec![IndicatorFailure {
                identifier: "sma_20".to_string(),
                error: IndicatorError::InsufficientData { required: 20, available: 15 },
            }]
        );
    }

    #[test]
    fn test_unknown_and_invalid_requests_are_isolated() {
        let series = series_from_closes(&[10.0; 30]);
        let engine = IndicatorEngine::default();
        let requests = vec![
            IndicatorSpec::new("vwap"),
            IndicatorSpec::new("sma_20").with_param("period", -1.0),
            IndicatorSpec::new("ema_12"),
        ];

        let report = engine.evaluate_report(&series, &requests);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].indicator_type, "EMA_12");
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0].error, IndicatorError::UnknownIndicator(_)));
        assert!(matches!(report.failures[1].error, IndicatorError::InvalidParameter { .. }));
    }

    #[test]
    fn test_metadata_carries_parameters_and_secondary_values() {
        let closes: Vec<f64> = (0..40).map(|i| 50.0 + f64::from(i % 7)).collect();
        let series = series_from_closes(&closes);
        let engine = IndicatorEngine::default();
        let results = engine.evaluate(&series, &specs(&["macd", "bollinger_bands", "sma_20"]));

        let macd = find(&results, "MACD");
        for key in ["fast", "slow", "signal", "macd_line", "signal_line", "histogram"] {
            assert!(macd.metadata.contains_key(key), "MACD metadata lacks {}", key);
        }
        let bands = find(&results, "BOLLINGER_BANDS");
        assert_eq!(bands.primary_value, bands.metadata["middle_band"]);
        assert_eq!(bands.metadata["std_dev"], 2.0);
        assert_eq!(find(&results, "SMA_20").metadata["period"], 20.0);
    }

    #[test]
    fn test_batch_shares_one_timestamp() {
        let series = series_from_closes(&[10.0; 30]);
        let results = IndicatorEngine::default().evaluate(&series, &specs(&["sma_20", "ema_12", "rsi"]));
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.computed_at == results[0].computed_at));
    }

    #[test]
    fn test_results_do_not_depend_on_request_order() {
        let bars: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| {
                let c = 100.0 + f64::from(i % 5) * 1.5;
                (c + 1.0, c - 1.0, c)
            })
            .collect();
        let series = series_from_hlc(&bars);
        let engine = IndicatorEngine::default();
        let forward = specs(&["sma_20", "stochastic", "williams_r", "atr"]);
        let backward: Vec<IndicatorSpec> = forward.iter().rev().cloned().collect();

        let a = engine.evaluate(&series, &forward);
        let b = engine.evaluate(&series, &backward);
        for result in &a {
            let other = find(&b, &result.indicator_type);
            assert_eq!(result.primary_value, other.primary_value);
            assert_eq!(result.metadata, other.metadata);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let closes: Vec<f64> = (0..60).map(|i| 20.0 + (f64::from(i) * 0.3).cos() * 2.0).collect();
        let series = series_from_closes(&closes);
        let engine = IndicatorEngine::default();
        let ids: Vec<&str> = engine.registry().identifiers();
        let requests = specs(&ids);

        let sequential = engine.evaluate(&series, &requests);
        let parallel = engine.evaluate_parallel(&series, &requests);
        assert_eq!(sequential.len(), parallel.len());
        for result in &sequential {
            let other = find(&parallel, &result.indicator_type);
            assert_eq!(result.primary_value, other.primary_value);
            assert_eq!(result.metadata, other.metadata);
        }
    }

    #[test]
    fn test_evaluate_bars_rejects_malformed_series() {
        let engine = IndicatorEngine::default();
        let err = engine.evaluate_bars(Vec::new(), &specs(&["rsi"])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeries(_)));
    }

    #[test]
    fn test_custom_registry_entries_are_evaluated() {
        let mut registry = IndicatorRegistry::default();
        registry
            .register("sma_5", IndicatorKind::Sma, &IndicatorParams::from([("period".to_string(), 5.0)]))
            .unwrap();
        let engine = IndicatorEngine::new(registry);
        let series = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let results = engine.evaluate(&series, &specs(&["sma_5"]));
        assert_eq!(results[0].indicator_type, "SMA_5");
        assert_eq!(results[0].primary_value, 4.0);
    }
}
