//! End-to-end quantification run driven by a [`QuantConfig`]

use crate::annotation::AnnotationHierarchy;
use crate::config::QuantConfig;
use crate::error::OntologyResult;
use crate::io;
use crate::report::Report;
use crate::slim::SlimMapper;
use tracing::info;

/// Load inputs, aggregate, optionally collapse onto the slim, and write the
/// report. Returns the report that was written.
pub fn run(config: &QuantConfig) -> OntologyResult<Report> {
    config.validate()?;

    let graph = io::load_graph(&config.graph)?;
    let observations = io::load_observations(&config.observations)?;

    let hierarchy = match (&config.samples, config.threads) {
        (Some(samples), 1) => {
            let mut hierarchy = AnnotationHierarchy::new(&graph).with_sample_count(samples.len());
            hierarchy.extend(&observations)?;
            hierarchy
        }
        (None, 1) => AnnotationHierarchy::build(&graph, &observations)?,
        (samples, threads) => {
            if let (Some(samples), Some(first)) = (samples, observations.first()) {
                first.validate(Some(samples.len()))?;
            }
            AnnotationHierarchy::build_concurrent(&graph, &observations, threads)?
        }
    };

    let mut report = Report::from_hierarchy(&hierarchy, config.samples.clone());

    if let Some(slim_path) = &config.slim {
        let slim = io::load_slim(slim_path)?;
        let mut mapper = SlimMapper::new(&graph, &slim);
        if let Some(depth) = config.max_slim_depth {
            mapper = mapper.with_max_depth(depth);
        }
        let mapping = hierarchy.slim_mapping(&mapper)?;
        let collapsed = hierarchy.collapse(&mapping);
        info!(slim_terms = collapsed.len(), "collapsed onto slim vocabulary");
        report = report.with_slim(&mapping, collapsed);
    }

    io::write_report(&config.output, &report)?;
    Ok(report)
}
