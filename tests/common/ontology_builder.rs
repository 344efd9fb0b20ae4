//! Ontology builders for integration tests

use ontoquant::{Namespace, Observation, OntologyGraph, SlimIndex, Term, TermId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn add(graph: &mut OntologyGraph, id: &str, name: &str, namespace: Namespace, parents: &[&str]) {
    graph.add_term(Term::new(id).with_name(name).with_namespace(namespace));
    for parent in parents {
        graph.add_is_a(id, *parent);
    }
}

/// A slice of the real GO: two namespaces, multiple inheritance in both
///
/// ```text
/// cellular_component (GO:0005575)
///   cellular anatomical entity (GO:0110165)
///     intracellular anatomical structure (GO:0005622)
///       cytoplasm (GO:0005737)
///         cytosol (GO:0005829)
///     organelle (GO:0043226)
///       intracellular organelle (GO:0043229)  [also is_a GO:0005622]
///         nucleus (GO:0005634)
///
/// molecular_function (GO:0003674)
///   catalytic activity (GO:0003824)
///     hydrolase activity (GO:0016787)
///       peptidase activity (GO:0008233)  [also is_a GO:0140096]
///   catalytic activity, acting on a protein (GO:0140096) [is_a GO:0003824]
/// ```
pub fn go_fixture() -> OntologyGraph {
    use Namespace::{CellularComponent as Cc, MolecularFunction as Mf};

    let mut graph = OntologyGraph::new();
    add(&mut graph, "GO:0005575", "cellular_component", Cc, &[]);
    add(&mut graph, "GO:0110165", "cellular anatomical entity", Cc, &["GO:0005575"]);
    add(&mut graph, "GO:0005622", "intracellular anatomical structure", Cc, &["GO:0110165"]);
    add(&mut graph, "GO:0005737", "cytoplasm", Cc, &["GO:0005622"]);
    add(&mut graph, "GO:0005829", "cytosol", Cc, &["GO:0005737"]);
    add(&mut graph, "GO:0043226", "organelle", Cc, &["GO:0110165"]);
    add(
        &mut graph,
        "GO:0043229",
        "intracellular organelle",
        Cc,
        &["GO:0043226", "GO:0005622"],
    );
    add(&mut graph, "GO:0005634", "nucleus", Cc, &["GO:0043229"]);

    add(&mut graph, "GO:0003674", "molecular_function", Mf, &[]);
    add(&mut graph, "GO:0003824", "catalytic activity", Mf, &["GO:0003674"]);
    add(
        &mut graph,
        "GO:0140096",
        "catalytic activity, acting on a protein",
        Mf,
        &["GO:0003824"],
    );
    add(&mut graph, "GO:0016787", "hydrolase activity", Mf, &["GO:0003824"]);
    add(
        &mut graph,
        "GO:0008233",
        "peptidase activity",
        Mf,
        &["GO:0016787", "GO:0140096"],
    );
    graph
}

/// A slim over [`go_fixture`]: both roots plus a few informative terms
pub fn go_slim() -> SlimIndex {
    ["GO:0005575", "GO:0005737", "GO:0005634", "GO:0003674", "GO:0003824"]
        .into_iter()
        .collect()
}

/// Shape of a generated DAG
#[derive(Debug, Clone)]
pub struct RandomDagConfig {
    pub terms: usize,
    /// Each non-root term gets between 1 and this many parents
    pub max_parents: usize,
    /// Terms with index below this are roots
    pub roots: usize,
    pub seed: u64,
}

impl Default for RandomDagConfig {
    fn default() -> Self {
        Self {
            terms: 200,
            max_parents: 3,
            roots: 3,
            seed: 42,
        }
    }
}

impl RandomDagConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

pub fn random_term(index: usize) -> TermId {
    TermId::new(format!("T:{:07}", index))
}

/// Build a random DAG where every edge points from a higher to a lower index
pub fn random_dag(config: &RandomDagConfig) -> OntologyGraph {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut graph = OntologyGraph::new();

    for i in 0..config.terms {
        graph.add_term(Term::new(random_term(i)));
        if i < config.roots.max(1) {
            continue;
        }
        let parents = rng.gen_range(1..=config.max_parents.max(1)).min(i);
        let mut candidates: Vec<usize> = (0..i).collect();
        candidates.shuffle(&mut rng);
        for &parent in candidates.iter().take(parents) {
            graph.add_is_a(random_term(i), random_term(parent));
        }
    }
    graph
}

/// Observations against a [`random_dag`]
///
/// Intensities are small whole numbers so sums are exact regardless of
/// addition order. About one in ten values is zero, so with few samples
/// some peptides are zero everywhere. A few observations reference terms the
/// graph does not know.
pub fn random_observations(
    config: &RandomDagConfig,
    count: usize,
    samples: usize,
) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));

    (0..count)
        .map(|_| {
            let term_count = rng.gen_range(1..=2);
            let terms: Vec<TermId> = (0..term_count)
                .map(|_| {
                    if rng.gen_ratio(1, 20) {
                        TermId::new(format!("X:{:07}", rng.gen_range(0..5)))
                    } else {
                        random_term(rng.gen_range(0..config.terms))
                    }
                })
                .collect();
            let intensity = (0..samples)
                .map(|_| {
                    if rng.gen_ratio(1, 10) {
                        0.0
                    } else {
                        rng.gen_range(1..1000) as f64
                    }
                })
                .collect();
            Observation::with_terms(terms, intensity)
        })
        .collect()
}
