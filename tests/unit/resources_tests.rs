/*!
 * Tests for dictionary and word-vector loading from disk
 */

use anyhow::Result;
use subalign::captions::Vocabulary;
use subalign::errors::ConfigurationError;
use subalign::resources::{DictionaryTranslator, WordVectorSource};

use crate::common;

/// Test that both word lists are merged into one lookup
#[test]
fn test_dictionary_load_withBothLists_shouldMergeDirections() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "es-en.txt", "casa house\ncasa home\n\nmalformed\n")?;
    common::create_test_file(temp_dir.path(), "en-es.txt", "Dog Perro\n")?;

    let dictionary = DictionaryTranslator::load(temp_dir.path(), "es", "en")?;

    assert!(dictionary.contains("casa", "house"));
    assert!(dictionary.contains("casa", "home"));
    assert!(dictionary.contains("perro", "dog"));
    assert!(!dictionary.contains("house", "casa"));
    assert_eq!(dictionary.len(), 2);
    Ok(())
}

/// Test that a regional code resolves to the base-language word lists
#[test]
fn test_dictionary_load_withRegionalCode_shouldUseBaseLanguage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "es-en.txt", "casa house\n")?;
    common::create_test_file(temp_dir.path(), "en-es.txt", "")?;

    let dictionary = DictionaryTranslator::load(temp_dir.path(), "es-MX", "en")?;
    assert!(dictionary.contains("casa", "house"));
    Ok(())
}

/// Test that a missing word list is a configuration error naming its direction
#[test]
fn test_dictionary_check_withMissingForwardList_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "en-es.txt", "dog perro\n")?;

    match DictionaryTranslator::check_resources(temp_dir.path(), "es", "en") {
        Err(ConfigurationError::MissingDictionary { source_language, target_language, .. }) => {
            assert_eq!(source_language, "es");
            assert_eq!(target_language, "en");
        }
        other => panic!("expected a missing dictionary, got {:?}", other),
    }
    Ok(())
}

/// Test that two empty word lists are rejected
#[test]
fn test_dictionary_load_withEmptyLists_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "es-en.txt", "\n")?;
    common::create_test_file(temp_dir.path(), "en-es.txt", "")?;

    let error = DictionaryTranslator::load(temp_dir.path(), "es", "en").unwrap_err();
    assert!(matches!(
        error.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::EmptyDictionary { .. })
    ));
    Ok(())
}

/// Test that only vocabulary words are loaded, unit-normalized
#[test]
fn test_word_vectors_load_shouldKeepVocabularyWordsNormalized() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(
        temp_dir.path(),
        "wiki.es.align.vec",
        "3 2\ncasa 3 4\nperro 1 0\nzero 0 0\n",
    )?;
    let vocabulary: Vocabulary = ["casa", "zero", "gato"].into_iter().collect();

    let embeddings = WordVectorSource::new(temp_dir.path()).load("es", &vocabulary)?;

    assert_eq!(embeddings.len(), 1);
    let casa = embeddings.get("casa").expect("casa has a vector");
    assert!((casa[0] - 0.6).abs() < 1e-6);
    assert!((casa[1] - 0.8).abs() < 1e-6);
    assert!(embeddings.get("perro").is_none());
    assert!(embeddings.get("zero").is_none());
    Ok(())
}

/// Test that a missing vector file names the language
#[test]
fn test_word_vectors_locate_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    match WordVectorSource::new(temp_dir.path()).locate("fr") {
        Err(ConfigurationError::MissingWordVectors { language, path }) => {
            assert_eq!(language, "fr");
            assert!(path.ends_with("wiki.fr.align.vec"));
        }
        other => panic!("expected missing word vectors, got {:?}", other),
    }
    Ok(())
}
