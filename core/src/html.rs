//! Server-side HTML for the dashboard page.
//!
//! The page is a single GET form; every dropdown resubmits it on change,
//! so each interaction is one request rendered from scratch.

use crate::{
    render::{RenderModel, TableModel},
    scenario::{CustomReform, ScenarioKey},
    selection::{Selection, SelectorCatalogue, SelectorOption, CUSTOM_SELECTOR},
};
use std::fmt::Write as _;

pub const PAGE_TITLE: &str = "Child Tax Credit Reform Dashboard";

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 960px; margin: 2em auto; color: #414141; }
h1 { text-align: center; }
label { display: block; margin-top: 0.8em; font-weight: bold; }
select { width: 100%; padding: 0.3em; }
table { width: 100%; border-collapse: collapse; margin-top: 1.5em; }
th { background: #008CCC; color: white; height: 30px; }
td { background: #F9F9F9; height: 30px; text-align: center; border-bottom: 1px solid white; }
td:first-child { text-align: left; }
.footnote { font-size: 12px; color: gray; }
.warning { margin-top: 1.5em; }";

/// Render the full page for `selection` and its render `model`.
///
/// The dropdowns are marked from the parsed selection, never from the raw
/// query, so the page always shows what the table was computed for.
pub fn render_page(selection: &Selection, catalogue: &SelectorCatalogue, model: &RenderModel) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{PAGE_TITLE}</title>");
    let _ = writeln!(page, "<style>\n{STYLE}\n</style>\n</head>\n<body>");
    let _ = writeln!(page, "<h1>{PAGE_TITLE}</h1>");

    page.push_str("<form method=\"get\" action=\"/\">\n");
    push_select(&mut page, "baseline", "Select Baseline Policy:", &catalogue.baseline, selection.baseline.selector());
    match selection.reform {
        ScenarioKey::Named { policy } => {
            push_select(&mut page, "reform", "Select Reform Policy:", &catalogue.reform, policy.selector());
        }
        ScenarioKey::Custom { reform } => {
            push_select(&mut page, "reform", "Select Reform Policy:", &catalogue.reform, CUSTOM_SELECTOR);
            push_custom_selects(&mut page, catalogue, &reform);
        }
    }
    push_select(&mut page, "view", "Select View:", &catalogue.view, selection.view.selector());
    page.push_str("<noscript><button type=\"submit\">Update</button></noscript>\n</form>\n");

    match model {
        RenderModel::Table(table) => push_table(&mut page, table),
        RenderModel::Warning { message } => {
            let _ = writeln!(page, "<p class=\"warning\">{}</p>", escape(message));
        }
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn push_custom_selects(page: &mut String, catalogue: &SelectorCatalogue, reform: &CustomReform) {
    push_select(page, "refund", "Refundability:", &catalogue.refund, reform.refundability.code());
    push_select(page, "ctc_c", "Maximum Credit:", &catalogue.ctc_c, &reform.max_credit.to_string());
    push_select(
        page,
        "ctc_u6",
        "Bonus for Children Under 6:",
        &catalogue.ctc_u6,
        &reform.under6_bonus.to_string(),
    );
    push_select(page, "ps", "Phaseout Start:", &catalogue.ps, reform.phaseout_start.code());
}

fn push_select(page: &mut String, name: &str, label: &str, options: &[SelectorOption], chosen: &str) {
    let _ = writeln!(page, "<label for=\"{name}\">{}</label>", escape(label));
    let _ = writeln!(
        page,
        "<select id=\"{name}\" name=\"{name}\" onchange=\"this.form.submit()\">"
    );
    for option in options {
        let mark = if option.value == chosen { " selected" } else { "" };
        let _ = writeln!(
            page,
            "<option value=\"{}\"{mark}>{}</option>",
            escape(&option.value),
            escape(&option.label)
        );
    }
    page.push_str("</select>\n");
}

fn push_table(page: &mut String, table: &TableModel) {
    page.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        let _ = write!(page, "<th>{}</th>", escape(header));
    }
    page.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        let _ = writeln!(
            page,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.label),
            escape(&row.baseline),
            escape(&row.reform),
            escape(&row.difference)
        );
    }
    page.push_str("</tbody>\n</table>\n");
    if let Some(note) = &table.footnote {
        let _ = writeln!(page, "<p class=\"footnote\">{}</p>", escape(note));
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
