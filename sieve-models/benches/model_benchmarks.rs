use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use sieve_core::{FeatureMatrix, FeatureVector, Label, Prior};
use sieve_models::naive_bayes::NaiveBayes;
use std::hint::black_box;

/// Sparse 0/1 presence vectors; class `c` favours every `(c + 2)`-th feature.
fn make_bag_of_words(rows: usize, cols: usize, classes: usize) -> (FeatureMatrix, Vec<Label>) {
    let vectors: Vec<FeatureVector> = (0..rows)
        .map(|i| {
            let class = i % classes;
            FeatureVector::new(
                (0..cols)
                    .map(|j| {
                        let hit = j % (class + 2) == 0 || (i * 31 + j * 17) % 23 == 0;
                        if hit {
                            1.0
                        } else {
                            0.0
                        }
                    })
                    .collect(),
            )
        })
        .collect();
    let y = (0..rows).map(|i| i % classes).collect();
    (FeatureMatrix::new(&vectors).unwrap(), y)
}

fn bench_naive_bayes(c: &mut Criterion) {
    let (x, y) = make_bag_of_words(2_000, 500, 2);
    let prior = Prior::from_labels(&y);

    let mut group = c.benchmark_group("naive_bayes");
    group.bench_function("fit_2000x500", |b| {
        b.iter_batched(
            NaiveBayes::new,
            |mut model| {
                model
                    .fit(black_box(&x), black_box(&y), black_box(&prior))
                    .unwrap();
            },
            BatchSize::SmallInput,
        )
    });

    let mut fitted = NaiveBayes::new();
    fitted.fit(&x, &y, &prior).unwrap();
    let queries: Vec<FeatureVector> = x.rows().take(512).collect();

    group.bench_function("predict_batch_512x500", |b| {
        b.iter(|| {
            let preds = fitted.predict_batch(black_box(&queries)).unwrap();
            black_box(preds);
        })
    });

    group.bench_function("predict_matrix_2000x500", |b| {
        b.iter(|| {
            let preds = fitted.predict_matrix(black_box(&x)).unwrap();
            black_box(preds);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_naive_bayes);
criterion_main!(benches);
