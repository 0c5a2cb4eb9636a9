use std::fmt::Write;

use anyhow::Result;
use kbseek_core::render::count_label;
use kbseek_core::tree::TreeItem;
use kbseek_core::{DropdownView, Locator, NavTree, PageRecord, SearchEntry, SearchIndex};
use serde::Serialize;

use super::OutputFormat;

/// Ranked results of one query.
#[derive(Debug)]
pub(crate) struct SearchReport {
	pub(crate) query: String,
	pub(crate) index: SearchIndex,
	/// Positions in `index`, best first.
	pub(crate) results: Vec<usize>,
}

impl SearchReport {
	fn entries(&self) -> impl Iterator<Item = &SearchEntry> {
		self.results
			.iter()
			.filter_map(|&position| self.index.get(position))
	}
}

#[derive(Serialize)]
struct JsonReport<'a> {
	query: &'a str,
	count: usize,
	results: Vec<&'a SearchEntry>,
}

/// Render `report` in the requested format.
pub(crate) fn format_search(report: &SearchReport, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(format_search_plain(report)),
		OutputFormat::Json => {
			let results: Vec<&SearchEntry> = report.entries().collect();
			let payload = JsonReport {
				query: &report.query,
				count: results.len(),
				results,
			};
			Ok(serde_json::to_string_pretty(&payload)?)
		}
		OutputFormat::Html => {
			Ok(DropdownView::build(&report.index, &report.query, &report.results, None).to_html())
		}
	}
}

fn format_search_plain(report: &SearchReport) -> String {
	if report.results.is_empty() {
		return format!("No results found for \"{}\"\n", report.query);
	}
	let mut out = String::new();
	let _ = writeln!(out, "{}", count_label(report.results.len()));
	for entry in report.entries() {
		let kind = entry.kind();
		let target = match entry.locator() {
			Locator::Page { url } => url.clone(),
			Locator::Node { node, .. } => format!("#{}", node.0),
		};
		let _ = writeln!(
			out,
			"{} {:<8} {}  [{}]  {}",
			kind.icon(),
			kind.label(),
			entry.title(),
			entry.category(),
			target
		);
	}
	out
}

/// Print the results of a query.
pub(crate) fn print_search(report: &SearchReport, format: OutputFormat) -> Result<()> {
	print!("{}", format_search(report, format)?);
	Ok(())
}

/// Indented outline of the tree; collapsed folders hide their children.
pub(crate) fn format_tree(tree: &NavTree) -> String {
	let mut out = String::new();
	for row in tree.visible("") {
		let indent = "  ".repeat(row.depth);
		let _ = match row.item {
			TreeItem::Folder(folder) => {
				let mark = if folder.expanded { '▾' } else { '▸' };
				writeln!(out, "{indent}{mark} {}", folder.label)
			}
			TreeItem::Link(link) => {
				let mark = if link.active { '*' } else { ' ' };
				writeln!(out, "{indent}{mark} {}  {}", link.link.label, link.link.url())
			}
		};
	}
	out
}

pub(crate) fn print_tree(tree: &NavTree) {
	print!("{}", format_tree(tree));
}

/// One line per post: date, title, tags.
pub(crate) fn format_posts(posts: &[&PageRecord]) -> String {
	let mut out = String::new();
	for post in posts {
		let date = post.date.as_deref().map_or("", |date| date.get(..10).unwrap_or(date));
		let _ = write!(out, "{date:<10}  {}", post.title);
		if !post.tags.is_empty() {
			let _ = write!(out, "  [{}]", post.tags.join(", "));
		}
		out.push('\n');
	}
	out
}

pub(crate) fn print_posts(posts: &[&PageRecord]) {
	print!("{}", format_posts(posts));
}

#[cfg(test)]
mod tests {
	use kbseek_core::{IndexBuilder, IndexOptions, NavLink, SearchOptions};
	use serde_json::Value;

	use super::*;

	fn report(query: &str) -> SearchReport {
		let index = IndexBuilder::new(IndexOptions::default())
			.navigation(&[
				NavLink::load("Firewalls", "/experience/knowledge/network-security/firewalls/"),
				NavLink::load("Ports", "/experience/knowledge/network-security/ports/"),
			])
			.build();
		let results = kbseek_core::search::search(&index, query, &SearchOptions::default());
		SearchReport {
			query: query.to_string(),
			index,
			results,
		}
	}

	#[test]
	fn plain_output_lists_rows_with_targets() {
		let text = format_search(&report("fire"), OutputFormat::Plain).unwrap();
		assert!(text.starts_with("1 result\n"));
		assert!(text.contains("Firewalls"));
		assert!(text.contains("/experience/knowledge/network-security/firewalls/"));
	}

	#[test]
	fn plain_output_reports_no_results() {
		let text = format_search(&report("zzz"), OutputFormat::Plain).unwrap();
		assert_eq!(text, "No results found for \"zzz\"\n");
	}

	#[test]
	fn json_output_serializes_entries() {
		let json = format_search(&report("ports"), OutputFormat::Json).unwrap();
		let value: Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["query"], "ports");
		assert_eq!(value["count"], 1);
		assert!(value["results"][0].to_string().contains("Ports"));
	}

	#[test]
	fn html_output_matches_dropdown_markup() {
		let html = format_search(&report("fire"), OutputFormat::Html).unwrap();
		assert!(html.contains("<mark>Fire</mark>walls"));
	}

	#[test]
	fn posts_show_date_and_tags() {
		let post = PageRecord {
			title: "Hello".into(),
			date: Some("2024-03-01T10:00:00Z".into()),
			tags: vec!["ctf".into(), "web".into()],
			..PageRecord::default()
		};
		assert_eq!(format_posts(&[&post]), "2024-03-01  Hello  [ctf, web]\n");
	}
}
