//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::config::NormalizationSettings;
use crate::analysis::pipeline::TokenIncident;
use crate::analysis::token::{NormalizationSource, SkipReason, Token, TokenAnnotation};
use crate::cli::args::{ClinormArgs, OutputFormat};
use crate::error::Result;

/// One token with its annotation.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub position: usize,
    pub text: String,
    pub lemma: String,
    pub pos: Option<String>,
    pub is_punctuation: bool,
    pub to_skip: bool,
    pub normalized_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_by: Option<NormalizationSource>,
}

impl AnnotatedToken {
    pub fn new(token: &Token, annotation: &TokenAnnotation) -> Self {
        AnnotatedToken {
            position: annotation.position,
            text: token.text.clone(),
            lemma: token.lemma.clone(),
            pos: token.pos.clone(),
            is_punctuation: annotation.is_punctuation,
            to_skip: annotation.to_skip,
            normalized_form: annotation.normalized_form.clone(),
            skip_reason: annotation.skip_reason,
            normalized_by: annotation.normalized_by,
        }
    }
}

/// Result structure for the annotate command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotationReport {
    pub tokens: Vec<AnnotatedToken>,
    pub kept: usize,
    pub skipped: usize,
    pub incidents: Vec<TokenIncident>,
    pub duration_ms: u64,
}

/// Result structure for the check-config command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigReport {
    pub source: String,
    pub classification_rules: Vec<String>,
    pub normalization_rules: Vec<String>,
    pub candidate_rules: Vec<String>,
    pub settings: NormalizationSettings,
}

/// Results that know how to print themselves for humans.
pub trait HumanOutput {
    fn output_human(&self, args: &ClinormArgs);
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &ClinormArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.output_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

impl HumanOutput for AnnotationReport {
    fn output_human(&self, args: &ClinormArgs) {
        for token in &self.tokens {
            let decision = match (&token.normalized_form, token.skip_reason) {
                (Some(form), _) => {
                    let source = token.normalized_by.map(|s| s.as_str()).unwrap_or("-");
                    format!("{form} ({source})")
                }
                (None, Some(reason)) => format!("skip: {reason}"),
                (None, None) => "skip".to_string(),
            };
            println!("{:>4}  {:<20} {}", token.position, token.text, decision);
        }

        for incident in &self.incidents {
            println!("incident at token {}: {}", incident.position, incident.message);
        }

        if args.verbosity() > 0 {
            println!();
            println!(
                "{} tokens, {} kept, {} skipped ({} ms)",
                self.tokens.len(),
                self.kept,
                self.skipped,
                self.duration_ms
            );
        }
    }
}

impl HumanOutput for ConfigReport {
    fn output_human(&self, _args: &ClinormArgs) {
        println!("Configuration: {}", self.source);
        println!("  classification: {}", self.classification_rules.join(" > "));
        println!("  normalization:  {}", self.normalization_rules.join(" > "));
        println!("  candidates:     {}", self.candidate_rules.join(" > "));
        println!("  min_len_normalize: {}", self.settings.min_len_normalize);
        if self.settings.spell_check_enabled {
            println!(
                "  spell check: on (len >= {})",
                self.settings.spell_check_len_limit
            );
        } else {
            println!("  spell check: off");
        }

    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ClinormArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
