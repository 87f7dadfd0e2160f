//! Command implementations for the clinorm CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::analysis::config::NormalizationConfig;
use crate::analysis::lemmatizer::LexiconLemmatizer;
use crate::analysis::normalizer::candidate_rules;
use crate::analysis::pipeline::{AnnotationPipeline, CollaboratorErrorPolicy};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{ClinormError, Result};
use crate::spelling::corrector::DictionaryCorrector;
use crate::spelling::dictionary::SpellingDictionary;

/// Execute a CLI command.
pub fn execute_command(args: ClinormArgs) -> Result<()> {
    match &args.command {
        Command::Annotate(annotate_args) => annotate(annotate_args.clone(), &args),
        Command::CheckConfig(check_args) => check_config(check_args.clone(), &args),
    }
}

/// Annotate a text and print one result per token.
fn annotate(args: AnnotateArgs, cli_args: &ClinormArgs) -> Result<()> {
    let config = Arc::new(load_config(args.config.as_deref())?);

    let lemmatizer = match &args.lexicon {
        Some(path) => {
            let lemmatizer = LexiconLemmatizer::from_file(path)?;
            info!("Loaded {} lexicon entries from {}", lemmatizer.len(), path.display());
            lemmatizer
        }
        None => LexiconLemmatizer::new(),
    };
    let lemmatizer = Arc::new(lemmatizer);

    let policy = if args.strict {
        CollaboratorErrorPolicy::Propagate
    } else {
        CollaboratorErrorPolicy::SkipToken
    };
    let mut builder = AnnotationPipeline::builder(config, lemmatizer).error_policy(policy);
    if let Some(path) = &args.dictionary {
        let dictionary = SpellingDictionary::load_from_file(path)?;
        info!("Loaded {} dictionary words from {}", dictionary.word_count(), path.display());
        builder = builder.spell_checker(Arc::new(DictionaryCorrector::new(dictionary)));
    }
    let pipeline = builder.build();

    let text = read_text(&args)?;

    let start = Instant::now();
    let tokens = pipeline.tokenize(&text)?;
    let document = pipeline.annotate_tokens(&tokens)?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let kept = document.kept().count();
    let tokens: Vec<AnnotatedToken> = tokens
        .iter()
        .zip(document.iter())
        .filter(|(_, annotation)| !args.kept_only || !annotation.to_skip)
        .map(|(token, annotation)| AnnotatedToken::new(token, annotation))
        .collect();

    output_result(
        "Annotation complete",
        &AnnotationReport {
            tokens,
            kept,
            skipped: document.len() - kept,
            incidents: document.incidents().to_vec(),
            duration_ms,
        },
        cli_args,
    )
}

/// Validate a configuration and print the compiled rule order.
fn check_config(args: CheckConfigArgs, cli_args: &ClinormArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = AnnotationPipeline::builder(
        Arc::new(config),
        Arc::new(LexiconLemmatizer::new()),
    )
    .build();

    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => "clinical preset".to_string(),
    };
    let names = |names: Vec<&'static str>| -> Vec<String> {
        names.into_iter().map(String::from).collect()
    };

    output_result(
        "Configuration is valid",
        &ConfigReport {
            source,
            classification_rules: names(pipeline.classifier().rule_names()),
            normalization_rules: names(pipeline.normalizer().rule_names()),
            candidate_rules: names(candidate_rules().rule_names()),
            settings: pipeline.config().settings().clone(),
        },
        cli_args,
    )
}

/// Load settings from a JSON file, or fall back to the clinical preset.
fn load_config(path: Option<&Path>) -> Result<NormalizationConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            NormalizationConfig::from_json_file(path)
        }
        None => NormalizationConfig::clinical(),
    }
}

fn read_text(args: &AnnotateArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.input {
        return Ok(fs::read_to_string(path)?);
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Err(ClinormError::invalid_argument(
            "no text given; pass TEXT, --input or pipe to stdin",
        ));
    }
    Ok(text)
}
