use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskgraph_core::model::Iri;
use riskgraph_system::SystemModel;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const CORE: &str = "http://it-innovation.soton.ac.uk/ontologies/trustworthiness/core#";
const DOMAIN_GRAPH: &str = "<http://example.org/domain>";

const LEVELS: [(&str, i64); 5] = [
    ("VeryLow", 0),
    ("Low", 1),
    ("Medium", 2),
    ("High", 3),
    ("VeryHigh", 4),
];

fn generate_domain() -> String {
    let mut document = String::new();
    document.push_str(&format!(
        "{g} <{}> <http://www.w3.org/2002/07/owl#Ontology> {g} .\n",
        RDF_TYPE,
        g = DOMAIN_GRAPH
    ));
    document.push_str(&format!(
        "{g} <http://www.w3.org/2002/07/owl#versionInfo> \"bench\" {g} .\n",
        g = DOMAIN_GRAPH
    ));
    document.push_str(&format!(
        "<http://example.org/domain#Host> <{}> <http://www.w3.org/2002/07/owl#Class> {} .\n",
        RDF_TYPE, DOMAIN_GRAPH
    ));
    for (name, value) in LEVELS {
        let level = format!("<http://example.org/domain#Risk{}>", name);
        document.push_str(&format!("{} <{}> <{}RiskLevel> {} .\n", level, RDF_TYPE, CORE, DOMAIN_GRAPH));
        document.push_str(&format!("{} <{}> \"{}\" {} .\n", level, LABEL, name, DOMAIN_GRAPH));
        document.push_str(&format!(
            "{} <{}levelValue> \"{}\"^^<http://www.w3.org/2001/XMLSchema#integer> {} .\n",
            level, CORE, value, DOMAIN_GRAPH
        ));
    }
    document
}

/// Generate a system with one misbehaviour set per asset, split over the
/// asserted and inferred graphs
fn generate_system(count: usize) -> String {
    let asserted = "<http://example.org/system>";
    let inferred = "<http://example.org/system/inf>";
    let mut document = String::with_capacity(count * 600);
    document.push_str(&format!(
        "{g} <{}> <http://www.w3.org/2002/07/owl#Ontology> {g} .\n",
        RDF_TYPE,
        g = asserted
    ));
    document.push_str(&format!("{g} <{}domainVersion> \"bench\" {g} .\n", CORE, g = asserted));

    for i in 0..count {
        let asset = format!("<http://example.org/system#Asset{}>", i);
        let ms = format!("<http://example.org/system#MS-{}>", i);
        let (level, _) = LEVELS[i % LEVELS.len()];
        document.push_str(&format!("{} <{}> <http://example.org/domain#Host> {} .\n", asset, RDF_TYPE, asserted));
        document.push_str(&format!("{} <{}> \"Asset {}\" {} .\n", asset, LABEL, i, asserted));
        document.push_str(&format!("{} <{}> <{}MisbehaviourSet> {} .\n", ms, RDF_TYPE, CORE, inferred));
        document.push_str(&format!("{} <{}locatedAt> {} {} .\n", ms, CORE, asset, inferred));
        document.push_str(&format!(
            "{} <{}hasRisk> <http://example.org/domain#Risk{}> {} .\n",
            ms, CORE, level, inferred
        ));
    }
    document
}

fn load(count: usize) -> SystemModel {
    match SystemModel::from_nquads(&generate_system(count), &generate_domain()) {
        Ok(model) => model,
        Err(error) => panic!("benchmark model failed to load: {}", error),
    }
}

/// Benchmark kind dispatch, first lookup and cached
fn benchmark_get_entity(c: &mut Criterion) {
    let model = load(1000);
    let asset = Iri::new("http://example.org/system#Asset500");
    let ms = Iri::new("http://example.org/system#MS-500");

    c.bench_function("get_entity_asset", |b| {
        b.iter(|| black_box(model.get_entity(&asset).ok().map(|entity| entity.kind())));
    });

    c.bench_function("get_entity_misbehaviour_set", |b| {
        b.iter(|| black_box(model.get_entity(&ms).ok().map(|entity| entity.kind())));
    });
}

/// Benchmark risk aggregation over growing systems
fn benchmark_risk_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_vector");

    for size in [100, 1000].iter() {
        let model = load(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &model, |b, model| {
            b.iter(|| black_box(model.try_risk_vector().ok()));
        });
    }

    group.finish();
}

fn benchmark_filter_misbehaviour_sets(c: &mut Criterion) {
    let model = load(1000);
    c.bench_function("filter_misbehaviour_sets", |b| {
        b.iter(|| black_box(model.filter_misbehaviour_sets(3).map(|sets| sets.len()).ok()));
    });
}

criterion_group!(
    benches,
    benchmark_get_entity,
    benchmark_risk_vector,
    benchmark_filter_misbehaviour_sets
);
criterion_main!(benches);
