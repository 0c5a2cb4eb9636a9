use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	println!("  Site root: {}", config.site.root.display());
	println!("  Manifest: {}", config.site.manifest_path().display());
	println!("  Content: {}", config.site.content_path().display());
	match config.site.navigation_path() {
		Some(path) => println!("  Navigation: {}", path.display()),
		None => println!("  Navigation: (derived from the manifest)"),
	}
	println!("  Site title: {}", config.site_title);
	println!("  Knowledge prefix: {}", config.knowledge_prefix);
	println!("  Search preset: {}", config.preset.name());
	println!("  Max results: {}", config.search.search.max_results);
	println!("  Min query length: {}", config.search.search.min_query_chars);
	println!("  Debounce: {} ms", config.search.debounce.as_millis());
	println!("  Highlight: {} ms", config.search.highlight.as_millis());
	println!(
		"  Auto-select single result: {}",
		bool_to_word(config.search.auto_select_single)
	);
	println!(
		"  UI theme: {}",
		config.theme.as_deref().unwrap_or("(use the library default)")
	);
	println!("  Start page: {}", config.start_page);
	if !config.initial_query.is_empty() {
		println!("  Initial query: {}", config.initial_query);
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	#[test]
	fn bool_to_word_matches_expectations() {
		assert_eq!(super::bool_to_word(true), "yes");
		assert_eq!(super::bool_to_word(false), "no");
	}
}
