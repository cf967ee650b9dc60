use criterion::{criterion_group, criterion_main, Criterion};
use tfidf_core::{tfidf, WordIndexTree};

fn corpus_tree() -> WordIndexTree {
    let mut tree = WordIndexTree::new();
    for doc in 0..50 {
        let filename = format!("doc{doc:02}.txt");
        for i in 0..400u32 {
            tree.insert(&format!("w{}", (i * 7919 + doc) % 1500), &filename);
        }
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_20k_tokens", |b| b.iter(corpus_tree));
}

fn bench_query(c: &mut Criterion) {
    let tree = corpus_tree();
    let words = ["w1", "w42", "w777", "w1499", "absent"];
    c.bench_function("score_words_5", |b| b.iter(|| tfidf::score_words(&tree, &words, 50)));
}

criterion_group!(benches, bench_insert, bench_query);
criterion_main!(benches);
