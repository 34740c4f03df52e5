// Extra text placement tests: surrounding text becomes annotations, or is
// dropped with blank runs preserved, depending on configuration.

use tabstaff::models::{AnnotationAnchor, Configuration};
use tabstaff::parse::{parse_song, RawLine};

fn lines(input: &[&str]) -> Vec<RawLine> {
    input
        .iter()
        .enumerate()
        .map(|(i, text)| RawLine {
            index: i + 1,
            text: text.to_string(),
        })
        .collect()
}

fn keeping_config() -> Configuration {
    Configuration {
        has_extra: true,
        keep_extra: true,
        ..Configuration::default()
    }
}

#[test]
fn test_leading_and_trailing_lane_text_join_with_semicolons() {
    let input = lines(&[
        "intro G|1-| x",
        "D|--| y",
        "A|--|",
        "E|--| z",
    ]);
    let (song, _) = parse_song(&input, &keeping_config()).unwrap();
    let block = &song.blocks[0];

    let before = block.annotations_at(AnnotationAnchor::BeforeGroup);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].text, "intro");

    let after = block.annotations_at(AnnotationAnchor::AfterGroup);
    assert_eq!(after.len(), 1);
    assert_eq!(
        after[0].text, "x; y; z",
        "per-lane trailing text joins top to bottom"
    );
}

#[test]
fn test_whole_lines_before_and_after_a_block() {
    let input = lines(&[
        "Title line",
        "",
        "G|1-|",
        "D|--|",
        "A|--|",
        "E|--|",
        "",
        "The end",
    ]);
    let (song, _) = parse_song(&input, &keeping_config()).unwrap();
    let block = &song.blocks[0];

    let before = block.annotations_at(AnnotationAnchor::BeforeGroup);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].text, "Title line");

    let after = block.annotations_at(AnnotationAnchor::AfterGroup);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].text, "The end");

    assert_eq!(block.blank_rows_before, 0, "blank lines are dropped when extra text is kept");
    assert_eq!(block.blank_rows_after, 0);
}

#[test]
fn test_text_between_blocks_trails_the_first_block() {
    let input = lines(&[
        "G|1-|",
        "D|--|",
        "A|--|",
        "E|--|",
        "bridge goes here",
        "G|2-|",
        "D|--|",
        "A|--|",
        "E|--|",
    ]);
    let (song, _) = parse_song(&input, &keeping_config()).unwrap();
    assert_eq!(song.blocks.len(), 2);

    let after_first = song.blocks[0].annotations_at(AnnotationAnchor::AfterGroup);
    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first[0].text, "bridge goes here");
    assert!(song.blocks[1]
        .annotations_at(AnnotationAnchor::BeforeGroup)
        .is_empty());
}

#[test]
fn test_multiple_in_block_occurrences_merge_into_one_row() {
    let input = lines(&[
        "G|1-|",
        "  slide up",
        "D|--|",
        "   let ring",
        "A|--|",
        "E|--|",
    ]);
    let (song, _) = parse_song(&input, &keeping_config()).unwrap();
    let above = song.blocks[0].annotations_at(AnnotationAnchor::AboveGroup);
    assert_eq!(above.len(), 1);
    assert_eq!(
        above[0].text, "slide up let ring",
        "occurrences lie end to end separated by one space"
    );
}

#[test]
fn test_dropping_extra_preserves_blank_runs() {
    let config = Configuration {
        has_extra: true,
        keep_extra: false,
        ..Configuration::default()
    };
    let input = lines(&[
        "",
        "ignored words",
        "G|1-|",
        "D|--|",
        "A|--|",
        "E|--|",
        "",
        "",
    ]);
    let (song, _) = parse_song(&input, &config).unwrap();
    let block = &song.blocks[0];
    assert!(block.annotations.is_empty(), "extra text is discarded");
    assert_eq!(block.blank_rows_before, 1);
    assert_eq!(block.blank_rows_after, 2);
}
