//! Reading loader output and writing reports

use crate::annotation::Observation;
use crate::error::OntologyResult;
use crate::graph::OntologyGraph;
use crate::report::Report;
use crate::slim::SlimIndex;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// A slim vocabulary file is either a bare id array or a slim ontology
#[derive(Deserialize)]
#[serde(untagged)]
enum SlimSource {
    Ids(SlimIndex),
    Graph(OntologyGraph),
}

/// Load an ontology graph document
pub fn load_graph(path: impl AsRef<Path>) -> OntologyResult<OntologyGraph> {
    let path = path.as_ref();
    let graph: OntologyGraph = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), terms = graph.len(), "loaded ontology");
    Ok(graph)
}

/// Load a slim vocabulary from an id array or a slim graph document
pub fn load_slim(path: impl AsRef<Path>) -> OntologyResult<SlimIndex> {
    let path = path.as_ref();
    let slim = match serde_json::from_reader(BufReader::new(File::open(path)?))? {
        SlimSource::Ids(slim) => slim,
        SlimSource::Graph(graph) => SlimIndex::from_graph(&graph),
    };
    info!(path = %path.display(), terms = slim.len(), "loaded slim vocabulary");
    Ok(slim)
}

/// Load peptide observations
pub fn load_observations(path: impl AsRef<Path>) -> OntologyResult<Vec<Observation>> {
    let path = path.as_ref();
    let observations: Vec<Observation> =
        serde_json::from_reader(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), observations = observations.len(), "loaded observations");
    Ok(observations)
}

/// Write a report as pretty-printed JSON, creating parent directories
pub fn write_report(path: impl AsRef<Path>, report: &Report) -> OntologyResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!(path = %path.display(), terms = report.terms.len(), "wrote report");
    Ok(())
}
