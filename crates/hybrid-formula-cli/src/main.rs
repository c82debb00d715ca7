//! Hybrid Formula CLI - convert between formula text and formula trees

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hybrid_formula::prelude::*;
use hybrid_formula::{tree_to_json_pretty, EqualitySpelling};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hybrid-formula")]
#[command(author, version, about = "Formula text and formula tree conversion tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse formula text and print the tree document
    Parse {
        /// Formula text, with or without a leading `=`
        formula: String,

        /// Extra reference names (repeatable)
        #[arg(short, long = "known")]
        known: Vec<String>,

        /// Indent the output document
        #[arg(short, long)]
        pretty: bool,

        /// Report parse errors instead of keeping the text as-is
        #[arg(long)]
        strict: bool,
    },

    /// Generate formula text from a tree document
    Generate {
        /// Tree document file (default: stdin)
        input: Option<PathBuf>,

        /// Write equality as `==`
        #[arg(long)]
        double_equals: bool,
    },

    /// Print a formula record with derived metadata
    Analyze {
        /// Tree document file (default: stdin)
        input: Option<PathBuf>,

        /// Analyze formula text instead of a tree document
        #[arg(short, long, conflicts_with = "input")]
        formula: Option<String>,

        /// Record name
        #[arg(short, long, default_value = "formula")]
        name: String,

        /// Record description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List known reference names
    #[command(alias = "refs")]
    References {
        /// Only names containing this text, ignoring case
        query: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            formula,
            known,
            pretty,
            strict,
        } => parse_formula(&formula, known, pretty, strict),
        Commands::Generate {
            input,
            double_equals,
        } => generate_formula(input.as_deref(), double_equals),
        Commands::Analyze {
            input,
            formula,
            name,
            description,
        } => analyze(input.as_deref(), formula.as_deref(), name, description),
        Commands::References { query } => list_references(query.as_deref().unwrap_or("")),
    }
}

fn parse_formula(formula: &str, known: Vec<String>, pretty: bool, strict: bool) -> Result<()> {
    let mut options = ParseOptions::default();
    options.known_references.extend(known);

    let tree = if strict {
        hybrid_formula::try_parse_with(formula, &options)
            .with_context(|| format!("Failed to parse '{formula}'"))?
    } else {
        parse_with(formula, &options)
    };

    let document = if pretty {
        tree_to_json_pretty(&tree)?
    } else {
        tree_to_json(&tree)?
    };
    println!("{document}");
    Ok(())
}

fn generate_formula(input: Option<&Path>, double_equals: bool) -> Result<()> {
    let tree = read_tree(input)?;
    let options = GenerateOptions {
        equality: if double_equals {
            EqualitySpelling::Double
        } else {
            EqualitySpelling::Single
        },
    };
    println!("{}", generate_with(&tree, &options));
    Ok(())
}

fn analyze(
    input: Option<&Path>,
    formula: Option<&str>,
    name: String,
    description: String,
) -> Result<()> {
    let record = match formula {
        Some(text) => {
            FormulaRecord::from_formula(name, description, text, &ParseOptions::default())?
        }
        None => FormulaRecord::from_tree(name, description, read_tree(input)?)?,
    };
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn list_references(query: &str) -> Result<()> {
    let registry = ReferenceRegistry::with_defaults();
    let names = registry.suggest(query);
    if names.is_empty() {
        bail!("No reference names match '{query}'");
    }

    for name in names {
        println!("{}\t{:?}", name, registry.classify(name));
    }
    Ok(())
}

/// Read a tree document from a file, or stdin when no path is given
fn read_tree(input: Option<&Path>) -> Result<FormulaNode> {
    let (json, source) = match input {
        Some(path) => (
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            (buf, "stdin".to_string())
        }
    };

    tree_from_json(&json).with_context(|| format!("Invalid tree document in {source}"))
}
