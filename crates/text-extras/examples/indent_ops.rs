//! Indentation and navigation example
//!
//! Drives a `TextBuffer` through `TextExtras` and prints the text after each command.
//! Each command is logged at debug level through the fmt subscriber.

use text_extras::{
    CharRange, ExtrasCommand, ExtrasConfig, LineEnding, ParagraphId, TextBuffer, TextExtras,
    TextSurface,
};

fn show(title: &str, extras: &TextExtras<TextBuffer>) {
    println!("{title}:");
    for line in extras.surface().contents().lines() {
        println!("  |{}", line.replace('\t', "→   "));
    }
    println!("  selection: {:?}\n", extras.surface().selected_ranges());
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let text = "fn main() {\nlet x = compute(1, [2, 3]);\nif x > 0 {\nprintln!(\"{x}\");\n}\n}";
    let config = ExtrasConfig::new().with_indent_wrapped_lines(true);
    let buffer = TextBuffer::new(text).with_selection(vec![CharRange::new(12, 57)]);
    let mut extras = TextExtras::new(buffer, config);
    show("Initial", &extras);

    // 1. Indent the body of `main` by one level, then the `if` body by one more.
    extras.execute(ExtrasCommand::IndentRight);
    show("Body indented", &extras);

    let inner = extras.surface().contents().find("println").unwrap_or(0);
    let inner = extras.surface().contents()[..inner].chars().count();
    extras.surface_mut().set_selected_ranges(vec![CharRange::caret(inner)]);
    extras.execute(ExtrasCommand::IndentRight);
    show("`if` body indented (two levels become a tab)", &extras);

    // 2. Break the line after `println!` and keep its indentation.
    let end_of_line = inner + "println!(\"{x}\");".chars().count();
    extras.surface_mut().set_selected_ranges(vec![CharRange::caret(end_of_line)]);
    extras.execute(ExtrasCommand::InsertNewlineAndIndent {
        ending: LineEnding::Lf,
    });
    show("Newline and indent", &extras);

    // 3. Backspace removes a whole indent level.
    extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward);
    show("Indent-friendly backspace", &extras);

    // 4. Walk the outline from the top.
    extras.surface_mut().set_selected_ranges(vec![CharRange::caret(12)]);
    extras.execute(ExtrasCommand::SelectNextLineWithSameOrSmallerIndent);
    show("Next line at the same or smaller indent", &extras);

    // 5. Double-click on the opening brace of `main`.
    extras.execute(ExtrasCommand::SelectToMatchingBrace {
        proposed: CharRange::new(10, 1),
    });
    show("Brace matching", &extras);

    // 6. Wrapped-line indentation for the `let` line in a 24-cell viewport.
    for (id, indent) in extras.surface().paragraph_indents().take(3) {
        println!("paragraph {}: {:?}", id.0, indent);
    }
    let fragments = extras.wrap_paragraph(ParagraphId(1), 24);
    println!("fragments of paragraph 1 at width 24: {fragments:?}");

    // 7. Convert everything to CRLF.
    extras.execute(ExtrasCommand::StandardizeEndOfLine {
        ending: LineEnding::Crlf,
    });
    println!(
        "standardized to CRLF: {:?}",
        LineEnding::detect(extras.surface().text())
    );
}
