use crate::format::{self, Theme};
use crate::lexer::{Line, Token, scan_line};
use crate::lines::{line_bounds, scan_lines, split_lines};
use crate::{Error, Span};

/// Notes in the shape the calculator is meant to read.
const BUDGET: &str = "\
budget: 2024
  rent: 950 * 12
  food:
    groceries = 320.5 * 12
    eating_out = 1.2e3

  misc: (15 + 4.75) / 2
";

const SAMPLES: &[&str] = &[
    "",
    "hello",
    "title:12",
    "note: (12.3+4.5)/6.7",
    "   leading and trailing   ",
    "a=b*c-d/e",
    "x_1 2e10 3.",
    "((()))",
];

/// Helper: scan a single line starting at offset 0.
fn scan(text: &str) -> Line {
    scan_line(text, 0).expect("lexer error")
}

fn render_mono(text: &str, tokens: &[Token]) -> String {
    let mut out = Vec::new();
    format::render_line(&mut out, text, tokens, 0, Theme::Mono).unwrap();
    String::from_utf8(out).unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn scan_empty_line() {
    assert_eq!(scan("").len(), 0);
}

#[test]
fn scan_hello() {
    assert_eq!(scan("hello"), vec![Token { start: 0, end: 4, value: None }]);
}

#[test]
fn scan_title_colon_number() {
    assert_eq!(
        scan("title:12"),
        vec![
            Token { start: 0, end: 4, value: None },
            Token { start: 5, end: 5, value: None },
            Token { start: 6, end: 7, value: Some(12.0) },
        ]
    );
}

#[test]
fn scan_note_expression() {
    let src = "note: (12.3+4.5)/6.7";
    let tokens = scan(src);
    let texts: Vec<&str> = tokens.iter().map(|t| t.text(src)).collect();
    assert_eq!(texts, vec!["note", ":", "(", "12.3", "+", "4.5", ")", "/", "6.7"]);
    let values: Vec<Option<f64>> = tokens.iter().map(|t| t.value).collect();
    assert_eq!(
        values,
        vec![None, None, None, Some(12.3), None, Some(4.5), None, None, Some(6.7)]
    );
}

#[test]
fn render_light_hello() {
    let src = "hello:123";
    let lines = scan_lines(src).unwrap();
    let mut out = Vec::new();
    format::print_lines(&mut out, src, &lines, false, Theme::Light).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\x1b[37mhello\x1b[0m\x1b[34m:\x1b[0m\x1b[32m123\x1b[0m\n"
    );
}

#[test]
fn print_numbered_lines() {
    let src = "word1\n\nword2";
    let lines = scan_lines(src).unwrap();
    let mut out = Vec::new();
    format::print_lines(&mut out, src, &lines, true, Theme::Mono).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1 word1\n2 \n3 word2\n");
}

#[test]
fn empty_buffer_versus_unterminated_line() {
    assert_eq!(scan_lines("").unwrap().len(), 0);
    assert_eq!(scan_lines("x").unwrap().len(), 1);
    assert_eq!(scan_lines(" ").unwrap().len(), 1);
}

// ── Properties ──────────────────────────────────────────────────

#[test]
fn tokens_are_ordered_and_well_formed() {
    for src in SAMPLES.iter().copied().chain(BUDGET.lines()) {
        let tokens = scan(src);
        for t in &tokens {
            assert!(t.start <= t.end, "{src:?}: {t:?}");
        }
        for pair in tokens.windows(2) {
            assert!(pair[0].end < pair[1].start, "{src:?}: {pair:?}");
        }
    }
}

#[test]
fn mono_rendering_is_identity() {
    for src in SAMPLES.iter().copied().chain(BUDGET.lines()) {
        assert_eq!(render_mono(src, &scan(src)), format!("{src}\n"));
    }
}

#[test]
fn tokens_and_gaps_rebuild_the_line() {
    for src in SAMPLES.iter().copied().chain(BUDGET.lines()) {
        let tokens = scan(src);
        let mut rebuilt = String::new();
        let mut pos = 0;
        for t in &tokens {
            rebuilt.push_str(&src[pos..t.start()]);
            rebuilt.push_str(t.text(src));
            pos = t.end() + 1;
        }
        rebuilt.push_str(&src[pos..]);
        assert_eq!(rebuilt, src);
    }
}

#[test]
fn gaps_are_whitespace_only() {
    let tokens = scan("  a  =  1 ");
    for pair in tokens.windows(2) {
        let gap = &"  a  =  1 "[pair[0].end() + 1..pair[1].start()];
        assert!(gap.bytes().all(|b| b == b' '));
    }
}

// ── Whole-buffer behaviour ──────────────────────────────────────

#[test]
fn line_starts_agree_with_token_offsets() {
    let lines = scan_lines(BUDGET).unwrap();
    let split: Vec<_> = split_lines(BUDGET).collect();
    assert_eq!(lines.len(), split.len());

    // Walk the buffer the way the renderer does.
    let mut start = 0;
    for (tokens, line) in lines.iter().zip(&split) {
        assert_eq!(start, line.start);
        let (end, next) = line_bounds(BUDGET, start);
        for t in tokens {
            assert!(t.start() >= start && t.end() < end);
        }
        start = next;
    }
    assert_eq!(start, BUDGET.len());
}

#[test]
fn budget_renders_back_verbatim() {
    let out = format::render_to_string(BUDGET, false, Theme::Mono).unwrap();
    assert_eq!(out, BUDGET);
}

#[test]
fn budget_with_gutter() {
    let out = format::render_to_string(BUDGET, true, Theme::Mono).unwrap();
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0], "1 budget: 2024");
    assert_eq!(rows[5], "6 ");
    assert_eq!(rows[6], "7   misc: (15 + 4.75) / 2");
}

#[test]
fn budget_numbers_are_decoded() {
    let lines = scan_lines(BUDGET).unwrap();
    let values: Vec<f64> = lines.iter().flatten().filter_map(|t| t.value).collect();
    assert_eq!(values, vec![2024.0, 950.0, 12.0, 320.5, 12.0, 1200.0, 15.0, 4.75, 2.0]);
}

#[test]
fn colored_rendering_strips_back_to_source() {
    for theme in Theme::ALL {
        let out = format::render_to_string(BUDGET, false, theme).unwrap();
        let p = theme.palette();
        let mut plain = out.clone();
        for code in [p.word, p.number, p.punctuator, p.reset] {
            if !code.is_empty() {
                plain = plain.replace(code, "");
            }
        }
        assert_eq!(plain, BUDGET, "theme {theme}");
    }
}

// ── Errors ──────────────────────────────────────────────────────

#[test]
fn error_in_later_line_aborts_scan() {
    let src = "a: 1\nb: 2\nc: 3 % 2\n";
    let err = scan_lines(src).unwrap_err();
    let offset = err.offset().unwrap();
    assert!(matches!(err, Error::UnexpectedCharacter { ch: '%', .. }));
    assert_eq!(Span::locate(src, offset), Span::new(3, 6));
}

#[test]
fn bad_number_is_distinct_from_bad_character() {
    let err = scan_lines("x: 4E").unwrap_err();
    assert!(matches!(err, Error::NumericParseFailure { offset: 3, .. }));
    assert!(err.is_lexical());
}

#[test]
fn tokens_past_offset_limit_overflow() {
    let mut src = " ".repeat(crate::lexer::MAX_OFFSET);
    src.push_str("\nok");
    assert!(matches!(scan_lines(&src), Err(Error::OffsetOverflow { .. })));

    // Whitespace alone never needs an offset.
    let blank = format!("{}\n", " ".repeat(crate::lexer::MAX_OFFSET + 10));
    assert_eq!(scan_lines(&blank).unwrap().len(), 1);
}
