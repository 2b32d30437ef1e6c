use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskgraph_core::model::{Iri, Term};
use riskgraph_store::{Graph, RdfStore};

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// Generate an N-Quads document spread over an asserted and an inferred graph
fn generate_document(count: usize) -> String {
    let mut document = String::with_capacity(count * 200);

    for i in 0..count {
        let subject = format!("<http://example.org/system#Asset{}>", i);
        let graph = if i % 3 == 0 { "<http://example.org/system/inf>" } else { "<http://example.org/system>" };

        document.push_str(&format!(
            "{} <{}> <http://example.org/domain#Class{}> {} .\n",
            subject, RDF_TYPE, i % 100, graph
        ));
        document.push_str(&format!("{} <{}> \"Asset {}\" {} .\n", subject, LABEL, i, graph));

        // Add some cross-references
        if i > 0 {
            document.push_str(&format!(
                "{} <http://example.org/core#linksTo> <http://example.org/system#Asset{}> {} .\n",
                subject,
                i - 1,
                graph
            ));
        }
    }

    document
}

/// Benchmark N-Quads parsing into the store
fn benchmark_nquads_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("nquads_loading");

    for size in [100, 1000, 10000].iter() {
        let document = generate_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, document| {
            b.iter(|| black_box(RdfStore::from_nquads(document).ok()));
        });
    }

    group.finish();
}

/// Benchmark pattern queries against a loaded store
fn benchmark_pattern_queries(c: &mut Criterion) {
    let store = match RdfStore::from_nquads(&generate_document(10000)) {
        Ok(store) => store,
        Err(error) => panic!("benchmark document failed to parse: {}", error),
    };
    let rdf_type = Iri::new(RDF_TYPE);
    let label = Iri::new(LABEL);
    let class = Term::Iri(Iri::new("http://example.org/domain#Class7"));
    let subject = Iri::new("http://example.org/system#Asset4242");

    c.bench_function("subjects_by_type", |b| {
        b.iter(|| black_box(store.subjects(&rdf_type, &class)));
    });

    c.bench_function("value_by_subject", |b| {
        b.iter(|| black_box(store.value(&subject, &label)));
    });
}

criterion_group!(benches, benchmark_nquads_loading, benchmark_pattern_queries);
criterion_main!(benches);
