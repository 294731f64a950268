use crate::error::AnalyzerError;
use analytics::{AnalyticsEngine, PerformanceReport};
use configuration::AnalysisSettings;
use core_types::SalesLog;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod ranking;
pub mod session;

pub use ranking::{ProductRanking, ProductWinRate, rank_products};
pub use session::Session;

/// Everything one session produces: the headline metrics and the product ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub salesperson: String,
    pub report: PerformanceReport,
    pub ranking: ProductRanking,
}

/// The main analysis entry point.
pub struct Analyzer {
    config: AnalysisSettings,
    engine: AnalyticsEngine,
}

impl Analyzer {
    pub fn new(config: AnalysisSettings) -> Self {
        let engine = AnalyticsEngine::new(config.precision);
        Self { config, engine }
    }

    /// Computes the performance report and product ranking for a log.
    pub fn analyze(
        &self,
        log: &SalesLog,
    ) -> Result<(PerformanceReport, ProductRanking), AnalyzerError> {
        // 1. Metrics
        let report = self.engine.calculate(log)?;

        // 2. Rank
        let ranking = rank_products(
            log,
            self.config.top_products,
            self.config.precision.ranking_decimals,
        );

        Ok((report, ranking))
    }

    /// Runs the analysis on behalf of `session`.
    pub fn run(&self, session: &Session, log: &SalesLog) -> Result<SessionReport, AnalyzerError> {
        tracing::info!(
            salesperson = session.salesperson(),
            records = log.len(),
            "Analysing sales log"
        );

        let (report, ranking) = self.analyze(log)?;

        Ok(SessionReport {
            salesperson: session.salesperson().to_string(),
            report,
            ranking,
        })
    }
}
