use crate::{AppConfig, survey::ProductBlock};
use psm_core::models::{CurveSet, Pairing, PriceAxis, PricePoints};
use psm_meter::Analysis;
use schemars::JsonSchema;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};
use tracing::{Level, event};

/// The result of analysing every product of a survey
#[derive(Debug, Serialize, JsonSchema)]
pub struct Report {
    /// The effective configuration, after every layer and flag was applied
    pub config: AppConfig,
    /// One entry per product block, in column order
    pub products: Vec<ProductReport>,
}

/// The analysis of a single product block
#[derive(Debug, Serialize, JsonSchema)]
pub struct ProductReport {
    /// `Product <n>`, counting blocks from 1
    pub name: String,
    /// The survey's header for each question, too cheap through too expensive
    pub columns: [String; 4],
    /// The number of respondents
    pub respondents: usize,
    /// Respondents whose four answers were not in increasing price order
    pub inconsistent_respondents: usize,
    /// The pairing PMC and PME were read with
    pub pairing: Pairing,
    /// IPP, OPP, PMC, PME and the acceptable range
    pub points: PointsReport,
    /// The shared price axis, if curves were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<PriceAxis>,
    /// The four cumulative curves over `axis`, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curves: Option<CurveSet>,
}

/// The price points with the range they bound
#[derive(Debug, Serialize, JsonSchema)]
pub struct PointsReport {
    #[serde(flatten)]
    pub points: PricePoints,
    /// `(pmc, pme)`
    pub acceptable_range: (f64, f64),
}

impl ProductReport {
    pub fn new(block: ProductBlock, analysis: Analysis, include_curves: bool) -> Self {
        let ProductBlock { name, headers, .. } = block;
        let Analysis {
            respondents,
            inconsistent_respondents,
            pairing,
            axis,
            curves,
            points,
        } = analysis;

        let (axis, curves) = if include_curves {
            (Some(axis), Some(curves))
        } else {
            (None, None)
        };

        Self {
            name,
            columns: headers,
            respondents,
            inconsistent_respondents,
            pairing,
            points: PointsReport {
                acceptable_range: points.acceptable_range(),
                points,
            },
            axis,
            curves,
        }
    }
}

impl Report {
    /// Writes each product's report to `<dir>/<name>.json`, creating `dir` if needed
    pub fn write_products(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        for product in &self.products {
            let path = dir.join(format!("{}.json", product.name));
            let mut output = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut output, product)?;
            output.flush()?;
            event!(Level::DEBUG, path = %path.display(), "product report written");
        }
        Ok(())
    }
}
