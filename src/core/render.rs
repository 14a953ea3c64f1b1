//! Console formatting. Every function returns the text to print so the
//! session loop decides where it goes.

use crate::core::{Advice, Catalog, Package, Recommendation};
use std::fmt::Write;

const WIDE_RULE: usize = 70;
const RULE: usize = 60;
const NARROW_RULE: usize = 40;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn thin_rule(width: usize) -> String {
    "-".repeat(width)
}

pub fn banner() -> String {
    format!("AI CUSTOMER PACKAGE ADVISOR\n{}\n", rule(50))
}

pub fn welcome(catalog: &Catalog) -> String {
    format!(
        "{}\n\nWelcome! I'll help you find the right package for your needs.\n",
        catalog.summary_line()
    )
}

pub fn prompt_line() -> &'static str {
    "\nDescribe your business needs or enter a command: "
}

pub fn packages(packages: &[Package]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nAVAILABLE PACKAGES");
    let _ = writeln!(out, "{}", rule(WIDE_RULE));

    for (i, package) in packages.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {} - {}", i + 1, package.name, package.price);
        let _ = writeln!(out, "   Type: {}", package.r#type);

        let pages = package.page_features();
        if !pages.is_empty() {
            let _ = writeln!(out, "   Pages: {}", pages.join(", "));
        }

        let _ = writeln!(out, "   Key Features: {}", package.features.join(", "));
        let _ = writeln!(
            out,
            "   Support: {}",
            package.support.as_deref().unwrap_or("N/A")
        );
        let _ = writeln!(
            out,
            "   Updates: {}",
            package.updates.as_deref().unwrap_or("N/A")
        );
        if let Some(note) = package.note.as_deref().filter(|n| !n.is_empty()) {
            let _ = writeln!(out, "   Note: {}", note);
        }
        let _ = writeln!(out, "{}", thin_rule(WIDE_RULE));
    }

    out
}

pub fn summary(packages: &[Package]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nPACKAGE SUMMARY");
    let _ = writeln!(out, "{}", rule(50));
    for package in packages {
        let _ = writeln!(out, "• {}: {}", package.name, package.price);
    }
    let _ = writeln!(out, "{}", rule(50));
    out
}

/// `None` when there is nothing to show.
pub fn other_services(catalog: &Catalog) -> Option<String> {
    if catalog.other_services.is_empty() {
        return None;
    }

    let mut out = String::new();
    let _ = writeln!(out, "\nOTHER SERVICES");
    let _ = writeln!(out, "{}", rule(RULE));
    for service in &catalog.other_services {
        let _ = writeln!(out, "\n• {}", service.service);
        let _ = writeln!(out, "  Description: {}", service.description);
        let _ = writeln!(out, "  Features: {}", service.features.join(", "));
        if let Some(notes) = service.notes.as_deref().filter(|n| !n.is_empty()) {
            let _ = writeln!(out, "  Notes: {}", notes);
        }
        let _ = writeln!(out, "{}", thin_rule(RULE));
    }
    Some(out)
}

/// `None` when there is nothing to show.
pub fn unavailable_services(catalog: &Catalog) -> Option<String> {
    if catalog.unavailable_services.is_empty() {
        return None;
    }

    let mut out = String::new();
    let _ = writeln!(out, "\nSERVICES NOT AVAILABLE");
    let _ = writeln!(out, "{}", rule(RULE));
    for service in &catalog.unavailable_services {
        let _ = writeln!(out, "\n• {}", service.service);
        let _ = writeln!(out, "  Reason: {}", service.description);
        let _ = writeln!(out, "{}", thin_rule(RULE));
    }
    Some(out)
}

pub fn help() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nAVAILABLE COMMANDS:");
    let _ = writeln!(out, "{}", rule(NARROW_RULE));
    let _ = writeln!(out, "• 'packages'    - Show all package details");
    let _ = writeln!(out, "• 'summary'     - Show package summary");
    let _ = writeln!(out, "• 'services'    - Show other services");
    let _ = writeln!(out, "• 'unavailable' - Show unavailable services");
    let _ = writeln!(out, "• 'help'        - Show this help message");
    let _ = writeln!(out, "• 'exit'        - Exit the program");
    let _ = writeln!(out, "{}", rule(NARROW_RULE));
    let _ = writeln!(out, "Or describe your business needs for a recommendation!");
    out
}

pub fn farewell() -> &'static str {
    "\nThank you for using our service! Goodbye!\n"
}

pub fn interrupted() -> &'static str {
    "\n\nSession interrupted. Goodbye!\n"
}

pub fn recommendation(rec: &Recommendation<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nAnalyzing your request: '{}'", rec.query.raw);

    if rec.matches.is_empty() {
        let _ = writeln!(out, "\nNo packages matched your keywords.");
    } else {
        let _ = writeln!(out, "\nPackages matching your needs:");
        for m in &rec.matches {
            let _ = writeln!(out, "\n• {} ({})", m.package.name, m.package.price);
            if !m.matched_features.is_empty() {
                let _ = writeln!(out, "  Matching features: {}", m.matched_features.join(", "));
            }
        }
    }

    match &rec.advice {
        Advice::Answer(text) => {
            let _ = writeln!(out, "\nAI RECOMMENDATION:");
            let _ = writeln!(out, "{}", thin_rule(NARROW_RULE));
            let _ = writeln!(out, "{}", text);
            let _ = writeln!(out, "{}", thin_rule(NARROW_RULE));
        }
        Advice::Disabled => {}
        Advice::PromptUnavailable { .. } => {
            let _ = writeln!(
                out,
                "\nAutomated advice is degraded right now (advisor prompt unavailable). \
                 Showing keyword matches only."
            );
        }
        Advice::ModelUnavailable { .. } => {
            let _ = writeln!(
                out,
                "\nThe advisor is temporarily unavailable. Please try again shortly \
                 or contact support directly."
            );
        }
    }

    out
}

pub fn turn_failure(message: &str) -> String {
    format!(
        "\nAn error occurred: {}\nPlease try again or contact support.\n",
        message
    )
}
