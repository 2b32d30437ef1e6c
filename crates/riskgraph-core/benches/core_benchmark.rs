use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use riskgraph_core::risk::RiskVector;
use riskgraph_core::text::{split_description, un_camel_case};

const LEVELS: [&str; 5] = ["Very Low", "Low", "Medium", "High", "Very High"];

/// Generate risk vectors with shifting counts
fn generate_vectors(count: usize) -> Vec<RiskVector> {
    (0..count)
        .filter_map(|i| {
            let counts = LEVELS
                .iter()
                .enumerate()
                .map(|(rank, level)| (*level, ((i * 31 + rank * 7) % 997) as u64));
            let ranks = LEVELS.iter().enumerate().map(|(rank, level)| (*level, rank as i64));
            RiskVector::new(counts, ranks).ok()
        })
        .collect()
}

/// Camel-case labels in the shapes seen in domain models
fn generate_labels(count: usize) -> Vec<String> {
    let stems = ["LossOfConfidentiality", "PINCodeAtHost", "IoTDeviceTW", "UserAuthNTrust", "BIOSatHost"];
    (0..count).map(|i| format!("{}{}", stems[i % stems.len()], i)).collect()
}

fn benchmark_un_camel_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("un_camel_case");

    for size in [100, 1000].iter() {
        let labels = generate_labels(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &labels, |b, labels| {
            b.iter(|| {
                for label in labels {
                    black_box(un_camel_case(label));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_split_description(c: &mut Criterion) {
    let comments: Vec<String> = (0..1000)
        .map(|i| format!(r#"Host "H:{}" is compromised via "Router:{}": an attacker gains access"#, i, i))
        .collect();

    c.bench_function("split_description", |b| {
        b.iter(|| {
            for comment in &comments {
                black_box(split_description(comment).long());
            }
        });
    });
}

fn benchmark_risk_vector_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_vector_comparison");

    for size in [10, 100].iter() {
        let vectors = generate_vectors(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &vectors, |b, vectors| {
            b.iter(|| {
                for left in vectors {
                    for right in vectors {
                        black_box(left.greater_than(right));
                        black_box(left.less_than(right));
                    }
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_un_camel_case,
    benchmark_split_description,
    benchmark_risk_vector_comparison
);
criterion_main!(benches);
