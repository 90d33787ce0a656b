//! State machine tests for the SAMI cue parser

use super::*;
use pretty_assertions::assert_eq;

fn ms(value: u64) -> Duration {
    compose_duration(0, 0, 0, value)
}

fn cue(start: u64, end: u64, text: &str) -> CueEntry {
    CueEntry::new(ms(start), ms(end), text)
}

const DOCUMENT: &str = r#"
<SAMI>
<HEAD>
<STYLE TYPE="text/css">
<!--
P { margin-left: 8pt; }
.ENCC { Name: English; lang: en-US; }
-->
</STYLE>
</HEAD>
<BODY>
<SYNC Start=1000><P Class=ENCC>First line
<SYNC Start=2500><P Class=ENCC>&nbsp;
<SYNC Start=3000><P Class=ENCC><i>Second line</i>
<SYNC Start=4200><P Class=ENCC>&nbsp;
</BODY>
</SAMI>
"#;

#[test]
fn parse_empty_document() {
    assert!(parse_cues("").unwrap().is_empty());
    assert!(parse_cues("   \n\t").unwrap().is_empty());
}

#[test]
fn parse_single_cue() {
    let cues = parse_cues("<SYNC Start=1000><P Class=ENCC>Hello<SYNC Start=4000><P Class=ENCC>&nbsp;")
        .unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 4000, "Hello")]);
}

#[test]
fn end_tag_sync_is_not_a_boundary() {
    // A real end tag is ignored, so the cue never closes
    let cues = parse_cues("<SYNC Start=1000><P Class=ENCC>Hello</SYNC Start=4000><P Class=ENCC>&nbsp;")
        .unwrap();
    assert!(cues.is_empty());
}

#[test]
fn three_syncs_yield_two_cues() {
    let cues =
        parse_cues("<SYNC Start=1000><P>One<SYNC Start=2000><P>Two<SYNC Start=3000><P>Three")
            .unwrap();

    // The sync that closes a cue does not open the next one
    assert_eq!(
        cues.entries(),
        &[cue(1000, 2000, "One"), cue(0, 3000, "Two")]
    );
}

#[test]
fn inline_tags_are_re_emitted() {
    let cues =
        parse_cues("<SYNC Start=0><P Class=ENCC><i>Hi</i><SYNC Start=500><P Class=ENCC>&nbsp;")
            .unwrap();
    assert_eq!(cues.entries(), &[cue(0, 500, "<i>Hi</i>")]);

    let cues = parse_cues("<SYNC Start=0><B>Loud</B><SYNC Start=500>").unwrap();
    assert_eq!(cues.entries()[0].text, "<b>Loud</b>");
}

#[test]
fn other_tags_are_ignored() {
    let cues = parse_cues(
        "<SYNC Start=0><P Class=ENCC><font color=red>Hi</font><br/><u><SYNC Start=500>",
    )
    .unwrap();
    assert_eq!(cues.entries(), &[cue(0, 500, "Hi")]);
}

#[test]
fn comment_tokens_do_not_block_text() {
    let cues =
        parse_cues("<SYNC Start=1000><P Class=ENCC><!-- note -->Hello<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "Hello")]);
}

#[test]
fn commented_text_is_tested_without_comments() {
    // Decoded text that only holds a comment is blank
    let cues = parse_cues(
        "<SYNC Start=1000>&lt;!-- note --&gt;<P>Hello<SYNC Start=2000>",
    )
    .unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "Hello")]);

    // Surviving text keeps the comment in the captured form
    let cues = parse_cues("<SYNC Start=1000>&lt;!-- note --&gt; Hi<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "<!-- note --> Hi")]);
}

#[test]
fn whitespace_text_is_not_captured() {
    let cues = parse_cues("<SYNC Start=1000>\n   <P Class=ENCC>\n\t<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "")]);

    let cues = parse_cues("<SYNC Start=1000>\n  <P>\n  Hello<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries()[0].text, "\n  Hello");
}

#[test]
fn text_after_capture_is_ignored() {
    let cues = parse_cues("<SYNC Start=1000>A<P>B<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "A")]);
}

#[test]
fn nbsp_text_uses_raw_form() {
    let cues = parse_cues("<SYNC Start=1000>Tom&nbsp;&amp;&nbsp;Jerry<SYNC Start=2000>").unwrap();
    // SyncEnd flushes with the previous start as the end time
    assert_eq!(cues.entries(), &[cue(1000, 1000, "Tom&nbsp;&amp;&nbsp;Jerry")]);
}

#[test]
fn decoded_text_is_captured() {
    let cues = parse_cues("<SYNC Start=1000>Tom &amp; Jerry<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries()[0].text, "Tom & Jerry");
}

#[test]
fn accented_references_are_decoded() {
    let cues = parse_cues("<SYNC Start=1000><P Class=ENCC>Caf&eacute;<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "Caf\u{e9}")]);

    let cues = parse_cues("<SYNC Start=0>&hearts; you, na&iuml;ve &Uuml;ber<SYNC Start=10>").unwrap();
    assert_eq!(cues.entries()[0].text, "\u{2665} you, na\u{ef}ve \u{dc}ber");
}

#[test]
fn start_attribute_found_by_key() {
    let cues = parse_cues("<SYNC ID=first Start=1500>Hi<SYNC start='2500'>").unwrap();
    assert_eq!(cues.entries(), &[cue(1500, 2500, "Hi")]);
}

#[test]
fn sync_without_start_is_ignored() {
    let cues = parse_cues("<SYNC Start=1000>A<SYNC End=5>B<SYNC Start=2000>").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "A")]);
}

#[test]
fn unparsable_start_counts_as_zero() {
    let cues = parse_cues("<SYNC Start=soon>Hi<SYNC Start=1x>").unwrap();
    assert_eq!(cues.entries(), &[cue(0, 0, "Hi")]);
}

#[test]
fn full_document() {
    let cues = parse_cues(DOCUMENT).unwrap();

    assert_eq!(
        cues.entries(),
        &[
            cue(1000, 2500, "First line\n"),
            cue(0, 1000, "&nbsp;\n"),
            cue(3000, 4200, "<i>Second line</i>"),
        ]
    );
    let captions: Vec<_> = cues.captions().cloned().collect();
    assert_eq!(captions.len(), 2);
}

#[test]
fn token_stream_error_fails_whole_parse() {
    let source = "<SYNC Start=1000><P>Hello<SYNC Start=2000><P>this caption runs far past the limit";
    let result = SamiParser::with_config(source, &ParserConfig::with_max_token_len(20)).parse();

    match result {
        Err(ParseError::TokenStream { line, reason, .. }) => {
            assert_eq!(line, 1);
            assert!(reason.contains("20-byte limit"));
        }
        other => panic!("expected token stream error, got {other:?}"),
    }
}

#[test]
fn truncated_tag_is_end_of_input() {
    let cues = parse_cues("<SYNC Start=1000>Hi<SYNC Start=2000><SYNC Sta").unwrap();
    assert_eq!(cues.entries(), &[cue(1000, 2000, "Hi")]);
}

#[test]
fn states_accept_text() {
    assert!(ParserState::Init.accepts_text());
    assert!(ParserState::SyncStart.accepts_text());
    assert!(!ParserState::Text.accepts_text());
    assert!(!ParserState::SyncEnd.accepts_text());
    assert!(!ParserState::ForceQuit.accepts_text());
    assert_eq!(ParserState::default(), ParserState::Init);
    assert_eq!(ParserState::SyncEnd.to_string(), "sync-end");
}

#[test]
fn fresh_parser_starts_in_init() {
    let parser = SamiParser::new("<SYNC Start=0>");
    assert_eq!(parser.state(), ParserState::Init);
}

#[test]
fn strip_comments_removes_all_comments() {
    assert_eq!(strip_comments("a<!-- x -->b<!--y-->c"), "abc");
    assert_eq!(strip_comments("<?php?>tail"), "tail");
    assert!(matches!(strip_comments("plain"), Cow::Borrowed("plain")));
    assert!(matches!(strip_comments("1 < 2"), Cow::Borrowed(_)));
}
