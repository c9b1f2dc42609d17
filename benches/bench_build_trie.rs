use criterion::{Criterion, criterion_group, criterion_main};
use std::io::Cursor;
use typetutor::corpus::build_from_reader;

fn synthetic_corpus() -> String {
    let sentence = "The quick brown fox jumps over the lazy dog. \
                    Did the dog notice the fox? The fox ran away!";
    vec![sentence; 2_000].join("\n")
}

fn bench_build_trie(c: &mut Criterion) {
    let corpus = synthetic_corpus();

    c.bench_function("build_trie", |b| {
        b.iter(|| build_from_reader(Cursor::new(corpus.as_bytes())).expect("corpus is readable"))
    });

    let root = build_from_reader(Cursor::new(corpus.as_bytes())).expect("corpus is readable");
    c.bench_function("most_frequent_word", |b| b.iter(|| root.most_frequent_word()));
    c.bench_function("predict", |b| b.iter(|| root.predict("the", 10)));
}

criterion_group!(benches, bench_build_trie);
criterion_main!(benches);
