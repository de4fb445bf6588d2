use anyhow::Context;
use graphrank::graph::{Label, PropertyValue};
use graphrank::{
    GeneratorConfiguration, GraphGenerator, GraphRankConfig, GraphStore, NeverTerminate,
    PageRankEngine, SharedGraph, TaskPool,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("GraphRank v{}", graphrank::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => GraphRankConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => GraphRankConfig::default(),
    };

    let graph = generate(&config)?;
    rank(&config, &graph)?;
    Ok(())
}

fn generate(config: &GraphRankConfig) -> anyhow::Result<SharedGraph> {
    println!("=== Generating small-world graph ===");
    println!(
        "N = {}, k = {}, beta = {}",
        config.generator.node_count, config.generator.mean_degree, config.generator.beta
    );

    let generator_config = GeneratorConfiguration::social_network(config.generator.clone())?;
    let mut store = GraphStore::new();
    let mut generator = GraphGenerator::new(&mut store);
    match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generator.generate_graph_with_rng(&generator_config, &mut rng)?
        }
        None => generator.generate_graph(&generator_config)?,
    };

    println!(
        "✓ Created {} Person nodes and {} FRIEND_OF relationships",
        store.node_count(),
        store.edge_count()
    );
    println!();
    Ok(SharedGraph::new(store))
}

fn rank(config: &GraphRankConfig, graph: &SharedGraph) -> anyhow::Result<()> {
    println!("=== PageRank ===");
    let pool = TaskPool::from_config(&config.pool)?;
    let mut engine = PageRankEngine::with_config(graph, &NeverTerminate, &pool, config.pagerank.clone());

    let started = Instant::now();
    let status = engine.compute(config.iterations, &config.relationship_type_refs())?;
    println!(
        "✓ {:?} on {} workers in {:?}",
        status,
        pool.workers(),
        started.elapsed()
    );

    let scores = engine.scores().context("engine finished without scores")?;
    let store = graph
        .read()
        .map_err(|_| anyhow::anyhow!("graph store lock poisoned"))?;

    println!();
    println!("Top 10 by rank:");
    for (position, (node_id, score)) in scores.top(10).into_iter().enumerate() {
        let name = store
            .get_node(graphrank::NodeId::new(node_id))
            .and_then(|node| node.get_property("name"))
            .and_then(PropertyValue::as_string)
            .unwrap_or("?");
        println!("  {:>2}. {:<20} {:.5}", position + 1, name, score);
    }

    let people = store.get_nodes_by_label(&Label::new("Person")).len();
    println!();
    println!("Total rank {:.3} over {} people", scores.total(), people);
    Ok(())
}
