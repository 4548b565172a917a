use buzz_core::{Article, ViewSummary};
use serde::Serialize;

const HEADERS: [&str; 8] = ["ID", "TITLE", "AUTHOR", "CATEGORY", "STATUS", "VIEWS", "FLAGS", "CREATED"];
const MAX_CELL: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct ArticleView<'a> {
    summary: &'a ViewSummary,
    articles: &'a [&'a Article],
}

#[derive(Serialize)]
struct FacetView<'a> {
    categories: &'a [String],
    authors: &'a [String],
}

pub fn render_articles(
    articles: &[&Article],
    summary: &ViewSummary,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ArticleView { summary, articles })?),
        OutputFormat::Table => {
            let mut out = summary_line(summary);
            out.push('\n');
            if articles.is_empty() {
                out.push_str("No articles match the current filters.");
            } else {
                let rows: Vec<Vec<String>> = articles.iter().map(|a| article_row(a)).collect();
                out.push_str(&render_table(&HEADERS, &rows));
            }
            Ok(out)
        }
    }
}

pub fn render_facets(
    categories: &[String],
    authors: &[String],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&FacetView { categories, authors })?),
        OutputFormat::Table => Ok(format!(
            "Categories: {}\nAuthors:    {}",
            categories.join(", "),
            authors.join(", ")
        )),
    }
}

fn summary_line(summary: &ViewSummary) -> String {
    let statuses = summary
        .by_status
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect::<Vec<_>>()
        .join(", ");
    if statuses.is_empty() {
        format!("Showing {} of {} articles", summary.visible, summary.total)
    } else {
        format!(
            "Showing {} of {} articles ({})",
            summary.visible, summary.total, statuses
        )
    }
}

fn article_row(article: &Article) -> Vec<String> {
    let mut flags = Vec::new();
    if article.is_ai {
        flags.push("AI");
    }
    if article.has_video {
        flags.push("video");
    }
    if article.is_high_traffic() {
        flags.push("hot");
    }
    vec![
        article.id.clone(),
        article.title.clone(),
        article.author.clone().unwrap_or_else(|| "-".to_string()),
        article.category.clone().unwrap_or_else(|| "-".to_string()),
        article
            .status
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string()),
        article.views.to_string(),
        flags.join(","),
        article
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Left-aligned columns separated by two spaces, numbers right-aligned.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell, MAX_CELL)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                if !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit()) {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = format_row(headers.to_vec());
    let divider = "-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2);

    let mut lines = vec![header_line, divider];
    for row in &rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
