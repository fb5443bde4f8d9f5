/*!
 * Tests for SRT loading and writing
 */

use anyhow::Result;
use subalign::errors::SubtitleError;
use subalign::subtitle_processor::{SubtitleCollection, SubtitleEntry};

use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() -> Result<()> {
    let ms = SubtitleEntry::parse_timestamp("01:23:45,678")?;
    assert_eq!(ms, 5_025_678);
    assert_eq!(SubtitleEntry::format_timestamp(ms), "01:23:45,678");

    // A dot separator is accepted too
    assert_eq!(SubtitleEntry::parse_timestamp("00:00:01.500")?, 1_500);
    Ok(())
}

/// Test rejection of out-of-range timestamp components
#[test]
fn test_timestamp_parsing_withInvalidComponents_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("00:61:00,000").is_err());
    assert!(SubtitleEntry::parse_timestamp("00:00:00").is_err());
    assert!(SubtitleEntry::parse_timestamp("aa:00:00,000").is_err());
}

/// Test subtitle entry display in SRT form
#[test]
fn test_subtitle_entry_display_shouldRenderSrtBlock() {
    let entry = SubtitleEntry::new(1, 1_000, 4_000, "Hola mundo".to_string());
    assert_eq!(entry.to_string(), "1\n00:00:01,000 --> 00:00:04,000\nHola mundo\n\n");
}

/// Test that inverted time ranges are rejected
#[test]
fn test_new_validated_withInvertedRange_shouldFail() {
    let result = SubtitleEntry::new_validated(3, 2_000, 1_000, "x".to_string());
    assert!(matches!(result, Err(SubtitleError::InvalidTimeRange { seq_num: 3, .. })));

    // Zero-length captions are allowed
    assert!(SubtitleEntry::new_validated(4, 1_000, 1_000, "x".to_string()).is_ok());
}

/// Test parsing of SRT content with multi-line captions
#[test]
fn test_parse_srt_string_withMultilineText_shouldJoinLines() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nPrimera línea\nSegunda línea\n\n2\n00:00:03,000 --> 00:00:04,000\nOtra\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "Primera línea\nSegunda línea");
    assert_eq!((entries[1].start_time_ms, entries[1].end_time_ms), (3_000, 4_000));
    Ok(())
}

/// Test that a UTF-8 byte order mark is ignored
#[test]
fn test_parse_srt_string_withBom_shouldParse() -> Result<()> {
    let content = "\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHola\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Hola");
    Ok(())
}

/// Test that captions without text are kept as empty captions
#[test]
fn test_parse_srt_string_withEmptyCaption_shouldKeepEntry() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nAdiós\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries.len(), 2);
    assert!(entries[0].text.is_empty());
    assert_eq!(entries[1].text, "Adiós");
    Ok(())
}

/// Test that out-of-order captions are sorted by start time and renumbered
#[test]
fn test_parse_srt_string_withUnorderedEntries_shouldSortAndRenumber() -> Result<()> {
    let content = "7\n00:00:05,000 --> 00:00:06,000\nTarde\n\n3\n00:00:01,000 --> 00:00:02,000\nTemprano\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries[0].text, "Temprano");
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[1].text, "Tarde");
    assert_eq!(entries[1].seq_num, 2);
    Ok(())
}

/// Test that content without any caption is an error
#[test]
fn test_parse_srt_string_withNoEntries_shouldFail() {
    let error = SubtitleCollection::parse_srt_string("just some text\n").unwrap_err();
    assert!(matches!(error.downcast_ref::<SubtitleError>(), Some(SubtitleError::NoEntries(_))));
}

/// Test loading a file and writing it back
#[test]
fn test_write_to_srt_afterLoad_shouldPreserveCaptions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "input.srt")?;

    let collection = SubtitleCollection::load(&input, "en")?;
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.language, "en");

    let output = temp_dir.path().join("nested/output.srt");
    collection.write_to_srt(&output)?;

    let reloaded = SubtitleCollection::load(&output, "en")?;
    assert_eq!(reloaded.entries, collection.entries);
    Ok(())
}

/// Test that a missing file reports its path
#[test]
fn test_load_withMissingFile_shouldFail() {
    let error = SubtitleCollection::load("/nonexistent/movie.srt", "es").unwrap_err();
    assert!(format!("{:#}", error).contains("movie.srt"));
}
