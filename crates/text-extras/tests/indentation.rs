use pretty_assertions::assert_eq;
use proptest::prelude::*;
use text_extras::line_index::{leading_whitespace_width, line_at};
use text_extras::whitespace::{encode, leading_whitespace_prefix, width_of};
use text_extras::{
    CharRange, CommandResult, ExtrasCommand, ExtrasConfig, GotoTarget, LineEnding, TextBuffer,
    TextExtras, TextSurface,
};

fn executor(text: &str, selection: Vec<CharRange>) -> TextExtras<TextBuffer> {
    TextExtras::new(
        TextBuffer::new(text).with_selection(selection),
        ExtrasConfig::default(),
    )
}

#[test]
fn test_indent_and_outdent_selected_lines() {
    let text = "fn main() {\nlet x = 1;\n}";
    let mut extras = executor(text, vec![CharRange::new(0, 24)]);

    extras.execute(ExtrasCommand::IndentRight);
    assert_eq!(
        extras.surface().contents(),
        "    fn main() {\n    let x = 1;\n    }"
    );
    assert_eq!(
        extras.surface().selected_ranges(),
        vec![CharRange::new(0, 36)]
    );

    extras.execute(ExtrasCommand::IndentLeft);
    assert_eq!(extras.surface().contents(), text);
    assert_eq!(
        extras.surface().selected_ranges(),
        vec![CharRange::new(0, 24)]
    );
    assert_eq!(extras.surface().undo_group_count(), 2);
}

#[test]
fn test_two_indent_levels_become_a_tab() {
    let mut extras = executor("foo", vec![CharRange::caret(0)]);
    extras.execute(ExtrasCommand::IndentRight);
    assert_eq!(extras.surface().contents(), "    foo");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(4)]);

    extras.execute(ExtrasCommand::IndentRight);
    assert_eq!(extras.surface().contents(), "\tfoo");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(1)]);
}

#[test]
fn test_outdent_without_leading_whitespace_is_noop() {
    let mut extras = executor("abc\ndef", vec![CharRange::new(0, 7)]);
    assert_eq!(
        extras.execute(ExtrasCommand::IndentLeft),
        CommandResult::Unchanged
    );
    assert_eq!(extras.surface().contents(), "abc\ndef");
    assert_eq!(extras.surface().undo_group_count(), 0);
}

#[test]
fn test_newline_after_two_tabs_keeps_two_tabs() {
    let mut extras = executor("\t\tfoo", vec![CharRange::caret(5)]);
    extras.execute(ExtrasCommand::InsertNewlineAndIndent {
        ending: LineEnding::Lf,
    });

    let buffer = extras.surface();
    assert_eq!(buffer.contents(), "\t\tfoo\n\t\t");
    let new_line = line_at(buffer.text(), 6);
    assert_eq!(leading_whitespace_width(buffer.text(), &new_line, 8), 16);
    assert_eq!(buffer.selected_ranges(), vec![CharRange::caret(8)]);
}

#[test]
fn test_newline_variants_insert_their_terminator() {
    let mut extras = executor("    x", vec![CharRange::caret(5)]);
    extras.execute(ExtrasCommand::InsertNewlineAndIndent {
        ending: LineEnding::Crlf,
    });
    assert_eq!(extras.surface().contents(), "    x\r\n    ");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(11)]);

    extras.execute(ExtrasCommand::InsertNewlineAndIndent {
        ending: LineEnding::ParagraphSeparator,
    });
    assert_eq!(extras.surface().contents(), "    x\r\n    \u{2029}    ");
}

#[test]
fn test_delete_backward_removes_one_indent_level() {
    let mut extras = executor("     x", vec![CharRange::caret(5)]);
    extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward);
    assert_eq!(extras.surface().contents(), " x");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(1)]);

    let mut extras = executor("\t x", vec![CharRange::caret(2)]);
    extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward);
    assert_eq!(extras.surface().contents(), "     x");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(5)]);
}

#[test]
fn test_delete_backward_in_text_deletes_one_character() {
    let mut extras = executor("  ab", vec![CharRange::caret(4)]);
    extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward);
    assert_eq!(extras.surface().contents(), "  a");

    let mut extras = executor("x", vec![CharRange::caret(0)]);
    assert_eq!(
        extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward),
        CommandResult::Unchanged
    );
}

#[test]
fn test_insert_tab_advances_to_indent_stops() {
    let mut extras = executor("  x", vec![CharRange::caret(2)]);
    extras.execute(ExtrasCommand::IndentFriendlyInsertTab);
    assert_eq!(extras.surface().contents(), "    x");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(4)]);

    extras.execute(ExtrasCommand::IndentFriendlyInsertTab);
    assert_eq!(extras.surface().contents(), "\tx");
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(1)]);
}

#[test]
fn test_insert_tab_with_several_carets() {
    let mut extras = executor("  a\n  b", vec![CharRange::caret(2), CharRange::caret(6)]);
    assert_eq!(
        extras.execute(ExtrasCommand::IndentFriendlyInsertTab),
        CommandResult::Edited { edits: 2 }
    );
    assert_eq!(extras.surface().contents(), "    a\n    b");
    assert_eq!(
        extras.surface().selected_ranges(),
        vec![CharRange::caret(4), CharRange::caret(10)]
    );
    assert_eq!(extras.surface().undo_group_count(), 1);
}

#[test]
fn test_delete_backward_keeps_carets_with_nothing_to_delete() {
    let mut extras = executor("ab\ncd", vec![CharRange::caret(0), CharRange::caret(5)]);
    assert_eq!(
        extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward),
        CommandResult::Edited { edits: 1 }
    );
    assert_eq!(extras.surface().contents(), "ab\nc");
    assert_eq!(
        extras.surface().selected_ranges(),
        vec![CharRange::caret(0), CharRange::caret(4)]
    );
}

#[test]
fn test_delete_backward_before_tab_narrows_the_run() {
    let mut extras = executor("  \tx", vec![CharRange::caret(3)]);
    extras.execute(ExtrasCommand::IndentFriendlyDeleteBackward);

    let buffer = extras.surface();
    assert_eq!(buffer.contents(), "    x");
    let line = line_at(buffer.text(), 0);
    assert_eq!(leading_whitespace_width(buffer.text(), &line, 8), 4);
    assert_eq!(buffer.selected_ranges(), vec![CharRange::caret(4)]);
}

#[test]
fn test_huge_selection_is_clamped() {
    let mut extras = executor("abc", vec![CharRange::new(usize::MAX, 1)]);
    assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(3)]);
    extras.execute(ExtrasCommand::IndentRight);
    assert_eq!(extras.surface().contents(), "    abc");

    let proposed = CharRange::new(usize::MAX - 1, 5);
    assert_eq!(
        extras.selection_range_for_proposed_range(proposed),
        CharRange::caret(7)
    );
}

#[test]
fn test_every_command_on_empty_text() {
    let unchanged = [
        ExtrasCommand::IndentRight,
        ExtrasCommand::IndentLeft,
        ExtrasCommand::IndentFriendlyDeleteBackward,
        ExtrasCommand::ReindentWrappedLines,
        ExtrasCommand::SelectNextLineWithSameOrSmallerIndent,
        ExtrasCommand::SelectToNextLineWithSameOrSmallerIndent,
        ExtrasCommand::SelectPreviousLineWithSameOrSmallerIndent,
        ExtrasCommand::SelectToPreviousLineWithSameOrSmallerIndent,
        ExtrasCommand::SelectToMatchingBrace {
            proposed: CharRange::new(0, 1),
        },
        ExtrasCommand::Complete,
        ExtrasCommand::StandardizeEndOfLine {
            ending: LineEnding::Crlf,
        },
        ExtrasCommand::Goto {
            target: GotoTarget::Line(3),
        },
        ExtrasCommand::Goto {
            target: GotoTarget::Character(9),
        },
    ];
    let mut extras = executor("", vec![CharRange::caret(0)]);
    for command in unchanged {
        assert_eq!(
            extras.execute(command),
            CommandResult::Unchanged,
            "{command:?}"
        );
        assert_eq!(extras.surface().contents(), "");
        assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(0)]);
    }
    assert_eq!(extras.surface().undo_group_count(), 0);

    // Commands that type something still type it.
    let typed = [
        (
            ExtrasCommand::InsertNewlineAndIndent {
                ending: LineEnding::Lf,
            },
            "\n",
        ),
        (
            ExtrasCommand::InsertLineEnding {
                ending: LineEnding::Crlf,
            },
            "\r\n",
        ),
        (ExtrasCommand::IndentFriendlyInsertTab, "    "),
    ];
    for (command, expected) in typed {
        let mut extras = executor("", vec![CharRange::caret(0)]);
        assert_eq!(extras.execute(command), CommandResult::Edited { edits: 1 });
        assert_eq!(extras.surface().contents(), expected);
        assert_eq!(
            extras.surface().selected_ranges(),
            vec![CharRange::caret(expected.chars().count())]
        );
    }
}

proptest! {
    #[test]
    fn indent_right_then_left_restores_width(
        prefix in "[ \t]{0,12}",
        body in "[a-z]{0,6}",
        tab_width in 1usize..9,
        indent_width in 1usize..9,
    ) {
        let config = ExtrasConfig::new()
            .with_tab_width(tab_width)
            .with_indent_width(indent_width);
        let original_width = width_of(&prefix, tab_width);

        let buffer = TextBuffer::new(&format!("{prefix}{body}"));
        let mut extras = TextExtras::new(buffer, config);
        extras.execute(ExtrasCommand::IndentRight);
        extras.execute(ExtrasCommand::IndentLeft);

        let contents = extras.surface().contents();
        let whitespace = leading_whitespace_prefix(&contents);
        prop_assert_eq!(width_of(whitespace, tab_width), original_width);
        prop_assert_eq!(whitespace, encode(original_width, tab_width));
        prop_assert_eq!(&contents[whitespace.len()..], body.as_str());
    }
}
