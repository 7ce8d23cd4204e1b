// Colored terminal output for analyses and posting decisions.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;

use crate::analysis::ContentAnalysis;
use crate::pipeline::PostDecision;

/// Display a content analysis: verdict, per-category scores, feedback.
pub fn display_analysis(analysis: &ContentAnalysis, suggestions: &[String]) {
    println!("\n{}", "=== Content Analysis ===".bold());

    let verdict_str = if analysis.verdict.is_problematic {
        "problematic".red().bold()
    } else {
        "safe".green()
    };
    println!("  Verdict: {verdict_str}");
    println!("  Score: {}", colorize_score(analysis.verdict.score));
    println!(
        "  Can post: {}",
        if analysis.can_post {
            "yes".green()
        } else {
            "no".red()
        }
    );

    if !analysis.verdict.categories.is_empty() {
        println!("\n  {:<18} {:>6}  {:>9}", "Category".dimmed(), "Score".dimmed(), "Threshold".dimmed());
        for category in &analysis.verdict.categories {
            let marker = if category.exceeded {
                "!".red().bold().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "{} {:<18} {:>6.2}  {:>9.2}",
                marker, category.name, category.score, category.threshold
            );
        }
    }

    println!("\n  {}", analysis.feedback);

    if analysis.verdict.is_problematic {
        println!();
        for line in suggestions {
            println!("  {}", line.dimmed());
        }
    }
    println!();
}

/// Display the outcome of a check-and-post run.
pub fn display_decision(decision: &PostDecision) {
    println!("\n{}", "=== Post Result ===".bold());

    if decision.posted {
        println!("  {} Posted", "✓".green().bold());
        if let Some(id) = &decision.tweet_id {
            println!("  Tweet id: {id}");
        }
    } else {
        println!("  {} Not posted", "✗".red().bold());
    }

    if decision.problematic {
        println!("  {}", "Content was flagged as problematic".yellow());
    }

    if let Some(error) = &decision.error {
        println!("  Error: {}", error.red());
    }

    println!("\n  {}", decision.feedback.replace('\n', "\n  "));
    println!();
}

/// Colorize an aggregate score by severity.
fn colorize_score(score: f64) -> colored::ColoredString {
    let formatted = format!("{score:.2}");
    if score >= 0.8 {
        formatted.red().bold()
    } else if score >= 0.5 {
        formatted.yellow()
    } else {
        formatted.green()
    }
}
