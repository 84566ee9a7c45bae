//! Randomized command sequences.
//!
//! After every command the incrementally maintained wrapped-line indents must equal a full
//! re-derivation, and the selection must stay sorted, disjoint and inside the text.

use std::sync::Once;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use text_extras::wrap_indent::paragraph_indents;
use text_extras::{
    CharRange, ExtrasCommand, ExtrasConfig, LineEnding, ParagraphId, ParagraphIndent, TextBuffer,
    TextExtras, TextSurface,
};

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn random_document(rng: &mut StdRng, line_count: usize) -> String {
    let prefixes = ["", "  ", "    ", "\t", "\t  ", "  \t", "        "];
    let bodies = ["fn x() {", "}", "let a = [1, 2];", "", "call(b)", "你好", "// note"];
    let endings = ["\n", "\n", "\r\n", "\r"];

    let mut text = String::new();
    for i in 0..line_count {
        text.push_str(prefixes[rng.gen_range(0..prefixes.len())]);
        text.push_str(bodies[rng.gen_range(0..bodies.len())]);
        if i + 1 < line_count {
            text.push_str(endings[rng.gen_range(0..endings.len())]);
        }
    }
    text
}

fn random_selection(rng: &mut StdRng, len: usize) -> Vec<CharRange> {
    (0..rng.gen_range(1..4))
        .map(|_| {
            let start = rng.gen_range(0..=len);
            let length = if rng.gen_bool(0.5) {
                0
            } else {
                rng.gen_range(0..=(len - start).min(12))
            };
            CharRange::new(start, length)
        })
        .collect()
}

fn random_command(rng: &mut StdRng) -> ExtrasCommand {
    match rng.gen_range(0..10) {
        0 => ExtrasCommand::IndentRight,
        1 => ExtrasCommand::IndentLeft,
        2 => ExtrasCommand::InsertNewlineAndIndent {
            ending: LineEnding::Lf,
        },
        3 => ExtrasCommand::InsertLineEnding {
            ending: LineEnding::Crlf,
        },
        4 => ExtrasCommand::IndentFriendlyDeleteBackward,
        5 => ExtrasCommand::IndentFriendlyInsertTab,
        6 => ExtrasCommand::SelectToNextLineWithSameOrSmallerIndent,
        7 => ExtrasCommand::SelectPreviousLineWithSameOrSmallerIndent,
        8 => ExtrasCommand::StandardizeEndOfLine {
            ending: LineEnding::Lf,
        },
        _ => ExtrasCommand::ReindentWrappedLines,
    }
}

fn attached(buffer: &TextBuffer) -> Vec<(ParagraphId, ParagraphIndent)> {
    buffer.paragraph_indents().collect()
}

#[test]
fn test_random_commands_keep_derived_state_consistent() {
    setup_test_logging();
    let mut rng = StdRng::seed_from_u64(0x7e47_e472);
    let config = ExtrasConfig::new()
        .with_tab_width(4)
        .with_indent_wrapped_lines(true);

    for _ in 0..20 {
        let text = random_document(&mut rng, 12);
        let mut extras = TextExtras::new(TextBuffer::new(&text), config.clone());

        for _ in 0..40 {
            let len = extras.surface().text().len_chars();
            let selection = random_selection(&mut rng, len);
            extras.surface_mut().set_selected_ranges(selection);

            let groups_before = extras.surface().undo_group_count();
            let command = random_command(&mut rng);
            extras.execute(command);

            let buffer = extras.surface();
            assert!(buffer.undo_group_count() <= groups_before + 1);
            assert_eq!(
                attached(buffer),
                paragraph_indents(buffer.text(), &config),
                "after {command:?} on {:?}",
                buffer.contents()
            );

            let len = buffer.text().len_chars();
            let selections = buffer.selected_ranges();
            assert!(!selections.is_empty());
            for pair in selections.windows(2) {
                assert!(pair[0].end() <= pair[1].start());
            }
            assert!(selections.iter().all(|sel| sel.end() <= len));
        }
    }
}
