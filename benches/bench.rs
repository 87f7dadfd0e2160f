//! Criterion benchmarks for clinorm.
//!
//! - Rule-chain annotation of pre-tokenized documents
//! - Tokenization plus annotation of raw text
//! - Spell correction against a dictionary
//! - Parallel annotation of document batches

use std::hint::black_box;
use std::sync::Arc;

use clinorm::analysis::config::NormalizationConfig;
use clinorm::analysis::lemmatizer::LexiconLemmatizer;
use clinorm::analysis::pipeline::AnnotationPipeline;
use clinorm::spelling::checker::SpellChecker;
use clinorm::spelling::corrector::DictionaryCorrector;
use clinorm::spelling::dictionary::SpellingDictionary;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

const VOCABULARY: &[&str] = &[
    "patient", "denies", "chest", "pain", "and/or", "shortness", "of", "breath", ".", "was",
    "vomiting", "bleeding", "fever", "he", "himself", "reports", "nausea", "the", "history",
    "hypertension", "diabetes", ",", "a", "54-year-old", "male", "admitted", "with", "cough",
    ":", "worsening", "headache", "nos",
];

/// Generate clinical-looking test documents.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 40 + (i % 60);
        let words: Vec<&str> = (0..doc_length)
            .map(|j| VOCABULARY[(i * 7 + j * 13) % VOCABULARY.len()])
            .collect();
        documents.push(words.join(" "));
    }
    documents
}

fn lemmatizer() -> LexiconLemmatizer {
    LexiconLemmatizer::new()
        .with_entry("denies", "deny", Some("VBZ"))
        .with_entry("reports", "report", Some("VBZ"))
        .with_entry("vomiting", "vomit", Some("VBG"))
        .with_entry("bleeding", "bleed", Some("VBG"))
        .with_entry("admitted", "admit", Some("VBN"))
        .with_entry("worsening", "worsen", Some("VBG"))
}

fn dictionary() -> SpellingDictionary {
    let mut dictionary = SpellingDictionary::from_words(VOCABULARY.iter().copied());
    for word in ["vomit", "bleed", "admit", "worsen", "report", "deny"] {
        dictionary.add_word(word, 5);
    }
    dictionary
}

fn pipeline(spelling: bool) -> AnnotationPipeline {
    let config = NormalizationConfig::clinical().unwrap();
    let mut builder = AnnotationPipeline::builder(Arc::new(config), Arc::new(lemmatizer()));
    if spelling {
        builder = builder.spell_checker(Arc::new(DictionaryCorrector::new(dictionary())));
    }
    builder.build()
}

/// Benchmark rule evaluation on pre-tokenized input.
fn bench_annotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotation");

    let pipeline = pipeline(false);
    let documents = generate_test_documents(100);
    let tokens: Vec<_> = documents
        .iter()
        .map(|d| pipeline.tokenize(d).unwrap())
        .collect();
    let token_count: usize = tokens.iter().map(Vec::len).sum();

    group.bench_function("annotate_single_token", |b| {
        b.iter(|| {
            let result = pipeline.annotate_token(black_box(&tokens[0][0]));
            black_box(result)
        })
    });

    group.throughput(Throughput::Elements(token_count as u64));
    group.bench_function("annotate_token_batch", |b| {
        b.iter(|| {
            for doc in &tokens {
                let result = pipeline.annotate_tokens(black_box(doc));
                let _ = black_box(result);
            }
        })
    });

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("annotate_text_batch", |b| {
        b.iter(|| {
            for text in &documents {
                let result = pipeline.annotate_text(black_box(text));
                let _ = black_box(result);
            }
        })
    });

    group.finish();
}

/// Benchmark spell correction.
fn bench_spell_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("spell_correction");
    group.sample_size(20); // Reduce sample size for faster execution

    let corrector = DictionaryCorrector::new(dictionary());
    let misspellings = vec!["vomitting", "bleedign", "hypertensoin", "diabetse", "headahce"];

    group.bench_function("fix_single_word", |b| {
        b.iter(|| {
            let result = corrector.fix(black_box("vomitting"));
            black_box(result)
        })
    });

    group.throughput(Throughput::Elements(misspellings.len() as u64));
    group.bench_function("fix_batch_words", |b| {
        b.iter(|| {
            for word in &misspellings {
                let result = corrector.fix(black_box(word));
                let _ = black_box(result);
            }
        })
    });

    let pipeline = pipeline(true);
    let text = "Patient was vomitting and bleedign with hypertensoin and diabetse.";
    group.bench_function("annotate_with_correction", |b| {
        b.iter(|| {
            let result = pipeline.annotate_text(black_box(text));
            black_box(result)
        })
    });

    group.finish();
}

/// Benchmark parallel annotation of independent documents.
fn bench_parallel_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_documents");

    let pipeline = pipeline(true);
    let documents = generate_test_documents(1000);

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("annotate_documents_sequential", |b| {
        b.iter(|| {
            for text in &documents {
                let _ = black_box(pipeline.annotate_text(text));
            }
        })
    });

    group.bench_function("annotate_documents_parallel", |b| {
        b.iter(|| black_box(pipeline.annotate_documents(black_box(&documents))))
    });

    group.finish();
}

criterion_group!(benches, bench_annotation, bench_parallel_documents);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_spell_correction);

criterion_main!(benches, slow_benches);
