/*!
 * End-to-end alignment of two subtitle files through the controller
 */

use anyhow::Result;
use serde_json::Value;
use std::fs;

use subalign::app_controller::Controller;
use subalign::errors::ConfigurationError;
use subalign::translation::{PhraseCache, PhraseTables};

use crate::common::mock_providers::{MockErrorType, MockTranslator};
use crate::common::{self, AlignmentFixture};

fn spanish_translator() -> MockTranslator {
    MockTranslator::new()
        .with("es", "en", "es", "is")
        .with("en", "es", "is", "es")
}

fn dst_of(document: &Value, caption: usize, token: usize) -> Vec<String> {
    document["align"][caption]["tokens"][token]["dst"]
        .as_array()
        .map(|words| words.iter().filter_map(|w| w.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

/// Test the full pipeline from SRT files to the alignment document
#[tokio::test]
async fn test_align_files_withFixture_shouldWriteAlignmentDocument() -> Result<()> {
    common::init_logging();
    let fixture = AlignmentFixture::new()?;
    let controller = Controller::with_config(fixture.config.clone())?;
    let translator = spanish_translator();

    let outcome = controller
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &translator)
        .await?;

    // Seven distinct words on each side, one request each
    assert_eq!(translator.call_count(), 14);
    assert_eq!(outcome.stats.considered, 7);
    assert_eq!(outcome.stats.aligned, 6);
    assert_eq!(outcome.stats.without_candidates, 1);

    let document: Value = serde_json::from_str(&fs::read_to_string(&fixture.output_path)?)?;
    assert_eq!(document["src"].as_array().map(Vec::len), Some(3));
    assert_eq!(document["dst"].as_array().map(Vec::len), Some(3));
    assert_eq!(document["src"][0]["start"], 1_000);

    // La casa es roja .
    assert_eq!(dst_of(&document, 0, 0), vec!["The"]);
    assert_eq!(dst_of(&document, 0, 1), vec!["house"]);
    assert_eq!(dst_of(&document, 0, 2), vec!["is"]);
    assert_eq!(dst_of(&document, 0, 3), vec!["red"]);
    assert!(dst_of(&document, 0, 4).is_empty());

    // ¡ Mi perro !
    assert!(dst_of(&document, 1, 0).is_empty());
    assert_eq!(dst_of(&document, 1, 1), vec!["My"]);
    assert_eq!(dst_of(&document, 1, 2), vec!["dog"]);

    // Adiós . has no temporal counterpart
    assert!(dst_of(&document, 2, 0).is_empty());
    Ok(())
}

/// Test that three-letter codes resolve the two-letter resource files and requests
#[tokio::test]
async fn test_align_files_withThreeLetterCodes_shouldUseTwoLetterResources() -> Result<()> {
    common::init_logging();
    let mut fixture = AlignmentFixture::new()?;
    fixture.config.source_language = "spa".to_string();
    fixture.config.target_language = "eng".to_string();
    let controller = Controller::with_config(fixture.config.clone())?;
    let translator = spanish_translator();

    let outcome = controller
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &translator)
        .await?;

    assert_eq!(outcome.stats.aligned, 6);
    let document: Value = serde_json::from_str(&fs::read_to_string(&fixture.output_path)?)?;
    assert_eq!(dst_of(&document, 0, 1), vec!["house"]);
    // Only reachable through the ("es", "en") phrase table
    assert_eq!(dst_of(&document, 0, 2), vec!["is"]);
    Ok(())
}

/// Test that the phrase cache is written once and reused on the next run
#[tokio::test]
async fn test_align_files_withExistingCache_shouldNotTranslateAgain() -> Result<()> {
    common::init_logging();
    let fixture = AlignmentFixture::new()?;
    let controller = Controller::with_config(fixture.config.clone())?;

    let first = controller
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &spanish_translator())
        .await?;

    let cache = PhraseCache::for_output(&fixture.output_path);
    assert!(cache.exists());
    let tables = cache.load()?.expect("cache was written");
    assert_eq!(tables.source_to_target.get("es").map(String::as_str), Some("is"));

    // A later run needs no credential and makes no request
    let mut config = fixture.config.clone();
    config.set_api_key("");
    let second_translator = MockTranslator::new();
    let second = Controller::with_config(config)?
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &second_translator)
        .await?;

    assert_eq!(second_translator.call_count(), 0);
    assert_eq!(second.aligned, first.aligned);
    Ok(())
}

/// Test that a pre-seeded cache decides the lexical matches
#[tokio::test]
async fn test_align_files_withSeededCache_shouldUseCachedTables() -> Result<()> {
    let fixture = AlignmentFixture::new()?;
    let tables = PhraseTables {
        source_to_target: [("adiós".to_string(), "goodbye".to_string())].into_iter().collect(),
        target_to_source: Default::default(),
    };
    PhraseCache::for_output(&fixture.output_path).store(&tables)?;

    let translator = MockTranslator::new();
    let outcome = Controller::with_config(fixture.config.clone())?
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &translator)
        .await?;

    assert_eq!(translator.call_count(), 0);
    // "es" -> "is" is no longer known, and nothing else scores for it
    let es = &outcome.aligned[0].payload[2];
    assert_eq!(es.token.surface, "es");
    assert!(es.aligned.is_empty());
    Ok(())
}

/// Test that words the translator fails on are skipped, not fatal
#[tokio::test]
async fn test_align_files_withFailingWord_shouldSkipIt() -> Result<()> {
    let fixture = AlignmentFixture::new()?;
    let translator = spanish_translator().failing_on("perro", MockErrorType::Auth);

    let outcome = Controller::with_config(fixture.config.clone())?
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &translator)
        .await?;

    let tables = PhraseCache::for_output(&fixture.output_path).load()?.expect("cache was written");
    assert!(!tables.source_to_target.contains_key("perro"));
    assert_eq!(outcome.aligned[1].payload[2].aligned.len(), 1);
    Ok(())
}

/// Test that a missing credential is reported before any work when no cache exists
#[tokio::test]
async fn test_align_files_withoutCredential_shouldFailBeforeTranslating() -> Result<()> {
    let fixture = AlignmentFixture::new()?;
    let mut config = fixture.config.clone();
    config.set_api_key("  ");
    let translator = spanish_translator();

    let error = Controller::with_config(config)?
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &translator)
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::MissingCredential { .. })
    ));
    assert_eq!(translator.call_count(), 0);
    assert!(!fixture.output_path.exists());
    Ok(())
}

/// Test that missing word vectors are fatal
#[tokio::test]
async fn test_align_files_withMissingVectors_shouldFail() -> Result<()> {
    let fixture = AlignmentFixture::new()?;
    fs::remove_file(fixture.path("vectors/wiki.en.align.vec"))?;

    let error = Controller::with_config(fixture.config.clone())?
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &spanish_translator())
        .await
        .unwrap_err();

    match error.downcast_ref::<ConfigurationError>() {
        Some(ConfigurationError::MissingWordVectors { language, .. }) => assert_eq!(language, "en"),
        other => panic!("expected missing word vectors, got {:?}", other),
    }
    Ok(())
}

/// Test that a missing input file is reported
#[tokio::test]
async fn test_align_files_withMissingSource_shouldFail() -> Result<()> {
    let fixture = AlignmentFixture::new()?;
    let missing = fixture.path("missing.srt");

    let error = Controller::with_config(fixture.config.clone())?
        .align_files(&missing, &fixture.destination_path, &fixture.output_path, &spanish_translator())
        .await
        .unwrap_err();

    assert!(error.to_string().contains("does not exist"));
    Ok(())
}

/// Test that a wider tolerance admits the distant caption
#[tokio::test]
async fn test_align_files_withWideTolerance_shouldAlignDistantCaption() -> Result<()> {
    let fixture = AlignmentFixture::new()?;
    let mut config = fixture.config.clone();
    config.alignment.tolerance_ms = 10_000;

    let outcome = Controller::with_config(config)?
        .align_files(&fixture.source_path, &fixture.destination_path, &fixture.output_path, &spanish_translator())
        .await?;

    let adios = &outcome.aligned[2].payload[0];
    assert_eq!(adios.token.surface, "Adiós");
    assert_eq!(adios.aligned.iter().map(|t| t.surface.as_str()).collect::<Vec<_>>(), vec!["Goodbye"]);
    Ok(())
}

/// Test that an unreachable provider stops the run before any vocabulary sweep
#[tokio::test]
async fn test_run_align_withUnreachableProvider_shouldFailBeforeSweep() -> Result<()> {
    common::init_logging();
    let mut fixture = AlignmentFixture::new()?;
    for provider in fixture.config.translation.available_providers.iter_mut() {
        provider.endpoint = "http://127.0.0.1:9".to_string();
    }
    let controller = Controller::with_config(fixture.config.clone())?;

    let error = controller
        .run_align(&fixture.source_path, &fixture.destination_path, &fixture.output_path)
        .await
        .unwrap_err();

    assert!(format!("{:#}", error).contains("Failed to connect"));
    assert!(!PhraseCache::for_output(&fixture.output_path).exists());
    assert!(!fixture.output_path.exists());
    Ok(())
}
