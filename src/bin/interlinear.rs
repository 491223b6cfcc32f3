//! Interlinear CLI
//!
//! Command-line lookups against a resource directory or URL.
//!
//! Usage:
//!   cargo run --features cli --bin interlinear -- verse jo 3 16
//!   cargo run --features cli --bin interlinear -- chapter gn 1
//!   cargo run --features cli --bin interlinear -- define H0430 --translate
//!   cargo run --features cli --bin interlinear -- books
//!
//! Configuration comes from `INTERLINEAR_CONFIG` (YAML) with
//! `INTERLINEAR_BASE_URL` / `INTERLINEAR_TRANSLATION_URL` overrides.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use interlinear::parser::strip_markup;
use interlinear::{BookAbbreviationMapper, Definition, InterlinearConfig, InterlinearService};

#[derive(Parser, Debug)]
#[command(name = "interlinear")]
#[command(about = "Strong's-tagged verse lookup with lexicon resolution")]
struct Args {
    /// Resource base (directory, file:// or http(s) URL); overrides config
    #[arg(long, env = "INTERLINEAR_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one verse word by word with definitions
    Verse {
        book: String,
        chapter: u32,
        verse: u32,
    },
    /// List every tagged verse of a chapter
    Chapter { book: String, chapter: u32 },
    /// Resolve a single identifier
    Define {
        id: String,
        /// Translate fields still in the source language
        #[arg(long)]
        translate: bool,
    },
    /// List the book code table
    Books,
    /// Preload dictionaries and print cache statistics
    Stats,
}

/// Explain why a book has no tagged text. Returns false for mapped books.
fn report_unmapped(book: &str) -> bool {
    if BookAbbreviationMapper::to_tagged_code(book).is_some() {
        return false;
    }
    if BookAbbreviationMapper::is_reading_only(book) {
        println!("{} {}", book.yellow(), "is not in the tagged corpus".yellow());
    } else {
        let known: Vec<_> = BookAbbreviationMapper::reading_codes().collect();
        println!("{} {}", "Unknown book code".red(), book);
        println!("  {} {}", "known:".dimmed(), known.join(" "));
    }
    true
}

fn print_definition(id: &str, def: &Definition) {
    println!(
        "  {} {} ({}) [{}]",
        id.cyan().bold(),
        def.display_word().bold(),
        def.transliteration,
        def.part_of_speech.dimmed()
    );
    if !def.definition.is_empty() {
        println!("      {}", def.display_definition());
    }
    if !def.usage.is_empty() {
        println!("      {} {}", "usage:".dimmed(), def.display_usage());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = InterlinearConfig::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config.resources.base_url = base_url;
    }
    let service =
        InterlinearService::from_config(&config).context("Failed to build interlinear service")?;

    match args.command {
        Command::Verse {
            book,
            chapter,
            verse,
        } => {
            if report_unmapped(&book) {
                return Ok(());
            }
            let Some(result) = service.interlinear_verse(&book, chapter, verse).await else {
                println!("{}", "Interlinear not available for this verse".yellow());
                return Ok(());
            };
            println!(
                "{} {}:{} ({:?})  {}",
                result.tagged_code.green().bold(),
                chapter,
                verse,
                result.testament,
                strip_markup(&result.text)
            );
            for token in &result.tokens {
                let text = if token.italic {
                    token.text.italic().to_string()
                } else {
                    token.text.clone()
                };
                if !token.has_identifiers() {
                    println!("{text}");
                    continue;
                }
                println!("{} {}", text, token.strongs.join(" ").dimmed());
                for id in &token.strongs {
                    if let Some(def) = result.definitions.get(id) {
                        print_definition(id, def);
                    }
                }
            }
        }
        Command::Chapter { book, chapter } => {
            if report_unmapped(&book) {
                return Ok(());
            }
            let verses = service.get_chapter_with_tags(&book, chapter).await;
            if verses.is_empty() {
                println!("{}", "Interlinear not available for this chapter".yellow());
                let chapters = service.get_chapter_numbers(&book).await;
                if !chapters.is_empty() {
                    let listed: Vec<_> = chapters.iter().map(u32::to_string).collect();
                    println!("  {} {}", "chapters:".dimmed(), listed.join(" "));
                }
            }
            for (number, text) in verses {
                println!("{} {}", number.to_string().green(), strip_markup(&text));
            }
        }
        Command::Define { id, translate } => match service.get_definition(&id).await {
            Some(def) => {
                let def = if translate {
                    service.translate_definition(&def).await
                } else {
                    def
                };
                print_definition(&id, &def);
                println!("  {} {:?}", "origin:".dimmed(), def.origin);
            }
            None => println!("{} {}", "No entry for".yellow(), id),
        },
        Command::Books => {
            for mapping in BookAbbreviationMapper::mappings() {
                println!(
                    "{:<6} {:<8} {:?}",
                    mapping.reading.cyan(),
                    mapping.tagged,
                    mapping.testament
                );
            }
        }
        Command::Stats => {
            let report = service.preload().await;
            let stats = service.stats();
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
