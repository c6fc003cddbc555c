use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vinaya_align::{Aligner, LinkRewriter, SegmentPathStore, SuffixStemmer};
use std::path::Path;

const ROOT_LINE: &[&str] = &[
    "Yo", "pana", "bhikkhu", "bhikkhūnaṁ", "sikkhāsājīvasamāpanno", "sikkhaṁ", "apaccakkhāya",
    "dubbalyaṁ", "anāvikatvā", "methunaṁ", "dhammaṁ", "paṭiseveyya,", "antamaso",
    "tiracchānagatāyapi,", "pārājiko", "hoti", "asaṁvāso.",
];

const TERMS: &[&[&str]] = &[
    &["Yo", "panāti"],
    &["bhikkhu", "nāma"],
    &["Sikkhāsājīvasamāpannoti"],
    &["Methunadhammo", "nāma"],
    &["Pārājiko", "hotīti"],
];

// Every term matches on the first line; extra lines only add normalization work
fn synthetic_chapter(lines: usize) -> Vec<Vec<&'static str>> {
    (0..lines).map(|_| ROOT_LINE.to_vec()).collect()
}

fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment");
    let aligner = Aligner::builtin();
    let terms: Vec<Vec<&str>> = TERMS.iter().map(|t| t.to_vec()).collect();

    for lines in [1usize, 50, 500] {
        let root_text = synthetic_chapter(lines);
        group.throughput(Throughput::Elements((lines * ROOT_LINE.len()) as u64));
        group.bench_function(format!("align_{lines}_lines"), |b| {
            b.iter(|| {
                aligner.align(black_box(&terms), black_box(&root_text)).unwrap();
            })
        });
    }

    group.bench_function("normalize_root_500_lines", |b| {
        let root_text = synthetic_chapter(500);
        b.iter(|| {
            black_box(aligner.normalize_root_text(black_box(&root_text)));
        })
    });

    group.finish();
}

fn bench_stemming(c: &mut Criterion) {
    let stemmer = SuffixStemmer::shared();
    c.bench_function("stem_root_line", |b| {
        b.iter(|| {
            for word in ROOT_LINE {
                black_box(stemmer.stem(black_box(word)));
            }
        })
    });
}

fn bench_link_rewrite(c: &mut Criterion) {
    let mut store = SegmentPathStore::new();
    store
        .add("pli-tv-kd1:1.1", "pli-tv-kd1:6.20", "/vault/Khandhaka/Kd1.md")
        .unwrap();
    let rewriter = LinkRewriter::new(&store).unwrap();
    let note = "See [Kd 1.4.2](https://suttacentral.net/pli-tv-kd1/en/brahmali#4.2) and more text.\n"
        .repeat(200);

    let mut group = c.benchmark_group("links");
    group.throughput(Throughput::Bytes(note.len() as u64));
    group.bench_function("rewrite_note", |b| {
        b.iter(|| {
            black_box(rewriter.rewrite_text(black_box(&note), Path::new("/vault/Notes")));
        })
    });
    group.finish();
}

criterion_group!(benches, bench_alignment, bench_stemming, bench_link_rewrite);
criterion_main!(benches);
