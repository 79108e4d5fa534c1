use crate::{IntersectionMethod, survey::ProductBlock};
use anyhow::Context as _;
use psm_core::{models::MeterConfig, ports::Intersector};
use psm_meter::{Analysis, LinearCrossing, NearestSample, PriceSensitivityMeter};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{Level, event};

// As with the survey columns, the analyses come back in block order.
impl IntersectionMethod {
    pub async fn analyze(
        self,
        config: MeterConfig,
        blocks: Vec<ProductBlock>,
    ) -> anyhow::Result<Vec<(ProductBlock, Analysis)>> {
        match self {
            IntersectionMethod::Nearest => {
                analyze_blocks(PriceSensitivityMeter::new(config, NearestSample), blocks).await
            }
            IntersectionMethod::Linear => {
                analyze_blocks(PriceSensitivityMeter::new(config, LinearCrossing), blocks).await
            }
        }
    }
}

// Products are independent, so each is analysed on its own blocking task.
async fn analyze_blocks<I: Intersector + Send + Sync + 'static>(
    meter: PriceSensitivityMeter<I>,
    blocks: Vec<ProductBlock>,
) -> anyhow::Result<Vec<(ProductBlock, Analysis)>> {
    event!(
        Level::INFO,
        products = blocks.len(),
        intersector = meter.intersector().name(),
        pairing = ?meter.config().pairing,
        "analysing survey"
    );

    let meter = Arc::new(meter);
    let mut tasks = JoinSet::new();

    for (index, block) in blocks.into_iter().enumerate() {
        let meter = meter.clone();
        tasks.spawn_blocking(move || {
            let analysis = meter
                .analyze(&block.responses)
                .with_context(|| format!("failed to analyze {}", block.name));
            (index, block, analysis)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, block, analysis) = joined?;
        results.push((index, block, analysis?));
    }
    results.sort_by_key(|(index, _, _)| *index);

    Ok(results
        .into_iter()
        .map(|(_, block, analysis)| (block, analysis))
        .collect())
}
