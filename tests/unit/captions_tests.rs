/*!
 * Tests for tagging and vocabulary extraction
 */

use anyhow::Result;
use subalign::captions::{tag_entries, PartOfSpeech, RuleTagger, Tagger, Vocabulary};
use subalign::subtitle_processor::SubtitleCollection;

use crate::common;

/// Test that punctuation and symbols are told apart from words
#[test]
fn test_rule_tagger_withMixedText_shouldClassifyTokens() {
    let tokens = RuleTagger::new().tag("¡Cuesta 5 € , señor!");
    let tagged: Vec<(&str, PartOfSpeech)> = tokens.iter().map(|t| (t.surface.as_str(), t.pos)).collect();

    assert_eq!(
        tagged,
        vec![
            ("¡", PartOfSpeech::Punct),
            ("Cuesta", PartOfSpeech::X),
            ("5", PartOfSpeech::Num),
            ("€", PartOfSpeech::Sym),
            (",", PartOfSpeech::Punct),
            ("señor", PartOfSpeech::X),
            ("!", PartOfSpeech::Punct),
        ]
    );
}

/// Test that contractions stay a single token
#[test]
fn test_rule_tagger_withApostrophe_shouldKeepWordTogether() {
    let tokens = RuleTagger::new().tag("I don't know");
    let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
    assert_eq!(surfaces, vec!["I", "don't", "know"]);
}

/// Test tagging loaded entries keeps timing and order
#[test]
fn test_tag_entries_withLoadedSubtitles_shouldKeepTiming() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::SPANISH_SRT)?;
    let captions = tag_entries(&entries, &RuleTagger::new(), None);

    assert_eq!(captions.len(), 3);
    assert_eq!((captions[0].start_ms, captions[0].end_ms), (1_000, 3_000));
    assert_eq!(captions[1].payload.len(), 4);
    assert_eq!(captions[1].payload[1].surface, "Mi");
    Ok(())
}

/// Test that a caption without text tags to an empty payload
#[test]
fn test_tag_entries_withEmptyCaption_shouldHaveNoTokens() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string("1\n00:00:01,000 --> 00:00:02,000\n\n")?;
    let captions = tag_entries(&entries, &RuleTagger::new(), None);

    assert_eq!(captions.len(), 1);
    assert!(captions[0].payload.is_empty());
    Ok(())
}

/// Test that the vocabulary is lowercase, distinct and free of punctuation
#[test]
fn test_vocabulary_fromCaptions_shouldBeDistinctLowercaseWords() {
    let captions = vec![
        common::caption(0, 1_000, &["Casa", "casa"]),
        subalign::Caption::new(1_000, 2_000, vec![common::word("ROJA"), common::punct(".")]),
    ];
    let vocabulary = Vocabulary::from_captions(&captions);

    assert_eq!(vocabulary.len(), 2);
    assert!(vocabulary.contains("casa"));
    assert!(vocabulary.contains("roja"));
    assert!(!vocabulary.contains("."));
    assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["casa", "roja"]);
}
