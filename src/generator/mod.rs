pub mod fragment;
pub mod go;
pub mod javascript;
pub mod python;
pub mod rust;
pub mod wrap;

use std::fmt;

use clap::ValueEnum;
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fragment::FragmentSpec;

pub const MIN_BLOCKS: usize = 1;
pub const MAX_BLOCKS: usize = 10;
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Every supported concept bucket must offer at least this many fragments.
pub const MIN_FRAGMENTS_PER_CONCEPT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    #[value(name = "javascript")]
    JavaScript,
    Go,
    Rust,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::JavaScript,
        Language::Go,
        Language::Rust,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Concept {
    Loops,
    Conditionals,
    Functions,
    Exceptions,
    Comprehensions,
    Classes,
    Oop,
    Typing,
    Decorators,
    Io,
    Regex,
    Async,
}

impl Concept {
    pub const ALL: [Concept; 12] = [
        Concept::Loops,
        Concept::Conditionals,
        Concept::Functions,
        Concept::Exceptions,
        Concept::Comprehensions,
        Concept::Classes,
        Concept::Oop,
        Concept::Typing,
        Concept::Decorators,
        Concept::Io,
        Concept::Regex,
        Concept::Async,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Concept::Loops => "loops",
            Concept::Conditionals => "conditionals",
            Concept::Functions => "functions",
            Concept::Exceptions => "exceptions",
            Concept::Comprehensions => "comprehensions",
            Concept::Classes => "classes",
            Concept::Oop => "oop",
            Concept::Typing => "typing",
            Concept::Decorators => "decorators",
            Concept::Io => "io",
            Concept::Regex => "regex",
            Concept::Async => "async",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Concept::Loops => "Loops",
            Concept::Conditionals => "Conditionals",
            Concept::Functions => "Functions",
            Concept::Exceptions => "Exceptions",
            Concept::Comprehensions => "Comprehensions",
            Concept::Classes => "Classes",
            Concept::Oop => "OOP & Inheritance",
            Concept::Typing => "Typing",
            Concept::Decorators => "Decorators",
            Concept::Io => "File I/O",
            Concept::Regex => "Regex",
            Concept::Async => "Async/await",
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnippetConfig {
    pub language: Language,
    pub concept: Concept,
    pub block_count: usize,
}

impl SnippetConfig {
    pub fn new(language: Language, concept: Concept, block_count: usize) -> Self {
        Self {
            language,
            concept,
            block_count,
        }
    }

    /// Copy with `block_count` clamped to the supported range.
    pub fn clamped(self) -> Self {
        Self {
            block_count: self.block_count.clamp(MIN_BLOCKS, MAX_BLOCKS),
            ..self
        }
    }
}

/// Registry lookup. Unsupported pairs resolve to an empty slice.
pub fn fragments(language: Language, concept: Concept) -> &'static [FragmentSpec] {
    match language {
        Language::Python => python::fragments(concept),
        Language::JavaScript => javascript::fragments(concept),
        Language::Go => go::fragments(concept),
        Language::Rust => rust::fragments(concept),
    }
}

pub fn supported_concepts(language: Language) -> Vec<Concept> {
    Concept::ALL
        .into_iter()
        .filter(|&c| !fragments(language, c).is_empty())
        .collect()
}

pub fn is_supported(language: Language, concept: Concept) -> bool {
    !fragments(language, concept).is_empty()
}

/// Draws `block_count` fragments with replacement and joins them with a blank line.
pub fn generate(config: &SnippetConfig, rng: &mut SmallRng) -> String {
    let specs = fragments(config.language, config.concept);
    if specs.is_empty() {
        log::warn!(
            "no fragments for {} / {}",
            config.language.key(),
            config.concept.key()
        );
        return String::new();
    }

    let blocks = config.block_count.max(MIN_BLOCKS);
    let rendered: Vec<String> = (0..blocks)
        .map(|_| {
            let spec = &specs[rng.gen_range(0..specs.len())];
            spec.render_with(rng)
        })
        .collect();
    rendered.join(BLOCK_SEPARATOR)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{language}/{concept} has {found} fragments, need at least {required}")]
    TooFewFragments {
        language: &'static str,
        concept: &'static str,
        found: usize,
        required: usize,
    },
    #[error("fragment {language}/{fragment} has an invalid parameter at slot {slot}")]
    InvalidParam {
        language: &'static str,
        fragment: &'static str,
        slot: usize,
    },
    #[error("{language} supports no concepts")]
    EmptyLanguage { language: &'static str },
}

/// Checks the registry preconditions the generator relies on.
pub fn validate_registry() -> Result<(), RegistryError> {
    for language in Language::ALL {
        let supported = supported_concepts(language);
        if supported.is_empty() {
            return Err(RegistryError::EmptyLanguage {
                language: language.key(),
            });
        }
        for concept in supported {
            let specs = fragments(language, concept);
            if specs.len() < MIN_FRAGMENTS_PER_CONCEPT {
                return Err(RegistryError::TooFewFragments {
                    language: language.key(),
                    concept: concept.key(),
                    found: specs.len(),
                    required: MIN_FRAGMENTS_PER_CONCEPT,
                });
            }
            for spec in specs {
                if let Some(slot) = spec.params.iter().position(|p| !p.is_valid()) {
                    return Err(RegistryError::InvalidParam {
                        language: language.key(),
                        fragment: spec.name,
                        slot,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use regex::Regex;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_registry_is_valid() {
        assert_eq!(validate_registry(), Ok(()));
    }

    #[test]
    fn test_python_supports_every_concept() {
        assert_eq!(supported_concepts(Language::Python), Concept::ALL.to_vec());
    }

    #[test]
    fn test_unsupported_pair_is_empty_and_not_listed() {
        assert!(fragments(Language::Go, Concept::Decorators).is_empty());
        assert!(!supported_concepts(Language::Go).contains(&Concept::Decorators));
        assert!(!is_supported(Language::Rust, Concept::Comprehensions));
        let config = SnippetConfig::new(Language::Go, Concept::Decorators, 3);
        assert_eq!(generate(&config, &mut rng(1)), "");
    }

    #[test]
    fn test_same_seed_same_snippet() {
        let config = SnippetConfig::new(Language::Python, Concept::Loops, 4);
        let a = generate(&config, &mut rng(42));
        let b = generate(&config, &mut rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_block_count_matches_separator_count() {
        // Comprehension fragments never contain blank lines themselves.
        let config = SnippetConfig::new(Language::Python, Concept::Comprehensions, 5);
        let text = generate(&config, &mut rng(3));
        assert_eq!(text.matches(BLOCK_SEPARATOR).count(), 4);
        assert!(!text.ends_with('\n'));
        assert!(!text.starts_with('\n'));
    }

    #[test]
    fn test_zero_blocks_still_produces_text() {
        let config = SnippetConfig::new(Language::Rust, Concept::Loops, 0);
        assert!(!generate(&config, &mut rng(9)).is_empty());
    }

    #[test]
    fn test_clamped_block_count() {
        let base = SnippetConfig::new(Language::Python, Concept::Loops, 0);
        assert_eq!(base.clamped().block_count, 1);
        let big = SnippetConfig::new(Language::Python, Concept::Loops, 50);
        assert_eq!(big.clamped().block_count, 10);
    }

    #[test]
    fn test_every_fragment_is_well_formed() {
        let indent_re = Regex::new(r"^(    )*\S").unwrap();
        let mut r = rng(1234);
        for language in Language::ALL {
            for concept in supported_concepts(language) {
                for spec in fragments(language, concept) {
                    for _ in 0..5 {
                        let text = spec.render_with(&mut r);
                        assert!(!text.is_empty(), "{} rendered empty", spec.name);
                        assert!(!text.contains('\r'), "{} has CR", spec.name);
                        assert!(!text.contains('\t'), "{} has a tab", spec.name);
                        for line in text.lines().filter(|l| !l.is_empty()) {
                            assert!(
                                indent_re.is_match(line),
                                "{}: bad indent in {line:?}",
                                spec.name
                            );
                            assert_eq!(line.trim_end(), line, "{}: trailing space", spec.name);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_concept_serde_keys() {
        let json = serde_json::to_string(&Concept::Oop).unwrap();
        assert_eq!(json, "\"oop\"");
        let lang: Language = serde_json::from_str("\"javascript\"").unwrap();
        assert_eq!(lang, Language::JavaScript);
        for concept in Concept::ALL {
            let json = serde_json::to_string(&concept).unwrap();
            assert_eq!(json, format!("\"{}\"", concept.key()));
        }
    }
}
