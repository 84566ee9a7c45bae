use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ropey::Rope;
use text_extras::line_index::line_at;
use text_extras::outline::next_line_with_indent_at_most;
use text_extras::wrap_indent::paragraph_indents;
use text_extras::{
    CharRange, DelimiterTable, ExtrasCommand, ExtrasConfig, TextBuffer, TextExtras,
    find_matching_delimiter,
};

fn large_text(line_count: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut out = String::with_capacity(line_count * 64);
    out.push('{');
    out.push('\n');
    for i in 0..line_count {
        let depth = rng.gen_range(1..6);
        for _ in 0..depth {
            out.push_str("    ");
        }
        out.push_str(&format!(
            "call_{i:06}(alpha, [beta, gamma]); // text-extras benchmark line\n"
        ));
    }
    out.push('}');
    out
}

fn bench_indent_whole_document(c: &mut Criterion) {
    let text = large_text(20_000);
    let len = text.chars().count();
    c.bench_function("indent_right/20k_lines", |b| {
        b.iter_batched(
            || {
                TextExtras::new(
                    TextBuffer::new(&text).with_selection(vec![CharRange::new(0, len)]),
                    ExtrasConfig::default(),
                )
            },
            |mut extras| {
                black_box(extras.execute(ExtrasCommand::IndentRight));
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_outermost_brace_match(c: &mut Criterion) {
    let rope = Rope::from_str(&large_text(20_000));
    let table = DelimiterTable::default();
    c.bench_function("brace_match/outermost_20k_lines", |b| {
        b.iter(|| black_box(find_matching_delimiter(&rope, 0, &table)))
    });
}

fn bench_outline_scan(c: &mut Criterion) {
    let rope = Rope::from_str(&large_text(20_000));
    let config = ExtrasConfig::default();
    let first = line_at(&rope, 0);
    c.bench_function("outline_next/scan_to_end", |b| {
        b.iter(|| black_box(next_line_with_indent_at_most(&rope, &first, &config)))
    });
}

fn bench_full_wrap_reindent(c: &mut Criterion) {
    let rope = Rope::from_str(&large_text(20_000));
    let config = ExtrasConfig::default().with_indent_wrapped_lines(true);
    c.bench_function("wrap_indent/derive_20k_lines", |b| {
        b.iter(|| black_box(paragraph_indents(&rope, &config).len()))
    });
}

criterion_group!(
    benches,
    bench_indent_whole_document,
    bench_outermost_brace_match,
    bench_outline_scan,
    bench_full_wrap_reindent
);
criterion_main!(benches);
