//! Site-batched parallel evaluation.

use hazard_core::errors::{ErrorInfo, HazardError};
use hazard_core::{Imt, StdDev};
use hazard_geo::{Rupture, SiteCollection};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::gsim::Prediction;
use crate::maker::{ContextMaker, GsimOutput};

/// Predictions for every surviving site, concatenated across batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Ids of the sites the predictions refer to, in site order.
    pub sids: Vec<usize>,
    /// One entry per model and IMT, ordered as by [`ContextMaker::get_mean_std`].
    pub outputs: Vec<GsimOutput>,
}

fn pool_error(err: impl ToString) -> HazardError {
    HazardError::Config(ErrorInfo::new("thread-pool", err.to_string()))
}

fn evaluate_block(
    cmaker: &ContextMaker,
    sites: &SiteCollection,
    rupture: &Rupture,
    imts: &[Imt],
    stddev_types: &[StdDev],
) -> Result<Option<BatchOutput>, HazardError> {
    let contexts = match cmaker.make_filtered_contexts(sites, rupture) {
        Ok(contexts) => contexts,
        Err(HazardError::Filter(_)) => return Ok(None),
        Err(err) => return Err(err),
    };
    let outputs = cmaker.get_mean_std(
        &contexts.sites,
        &contexts.rupture,
        &contexts.distances,
        imts,
        stddev_types,
    )?;
    Ok(Some(BatchOutput {
        sids: contexts.sids,
        outputs,
    }))
}

fn empty_output(cmaker: &ContextMaker, imts: &[Imt], stddev_types: &[StdDev]) -> BatchOutput {
    let outputs = cmaker
        .gsims()
        .iter()
        .flat_map(|gsim| {
            imts.iter().map(move |imt| GsimOutput {
                gsim: gsim.name().to_string(),
                imt: *imt,
                prediction: Prediction {
                    mean: Vec::new(),
                    stddevs: vec![Vec::new(); stddev_types.len()],
                },
            })
        })
        .collect();
    BatchOutput {
        sids: Vec::new(),
        outputs,
    }
}

fn merge(blocks: Vec<BatchOutput>) -> Option<BatchOutput> {
    let mut blocks = blocks.into_iter();
    let mut merged = blocks.next()?;
    for block in blocks {
        merged.sids.extend(block.sids);
        for (into, from) in merged.outputs.iter_mut().zip(block.outputs) {
            into.prediction.mean.extend(from.prediction.mean);
            for (stddev, extra) in into.prediction.stddevs.iter_mut().zip(from.prediction.stddevs) {
                stddev.extend(extra);
            }
        }
    }
    Some(merged)
}

/// Evaluates every candidate model of `cmaker` over `sites`, splitting the
/// collection into blocks of `config.batch_size` sites that run on a pool of
/// `config.concurrency` threads.
///
/// Blocks with no site within the maximum distance are skipped; if every
/// block is skipped the rupture is reported as far away. An empty site
/// collection yields empty predictions.
pub fn compute_batched(
    cmaker: &ContextMaker,
    sites: &SiteCollection,
    rupture: &Rupture,
    imts: &[Imt],
    stddev_types: &[StdDev],
) -> Result<BatchOutput, HazardError> {
    if sites.is_empty() {
        return Ok(empty_output(cmaker, imts, stddev_types));
    }
    let config = cmaker.config();
    let blocks = sites.split(config.batch_size);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.concurrency)
        .build()
        .map_err(pool_error)?;
    tracing::debug!(
        trt = cmaker.trt(),
        blocks = blocks.len(),
        threads = config.concurrency,
        "evaluating site blocks"
    );

    let results: Result<Vec<_>, HazardError> = pool.install(|| {
        blocks
            .par_iter()
            .map(|block| evaluate_block(cmaker, block, rupture, imts, stddev_types))
            .collect()
    });
    let evaluated: Vec<BatchOutput> = results?.into_iter().flatten().collect();

    merge(evaluated).ok_or_else(|| {
        HazardError::Filter(
            ErrorInfo::new("far-away-rupture", "no site block is within range of the rupture")
                .with_context("trt", cmaker.trt())
                .with_context("sites", sites.len().to_string()),
        )
    })
}
