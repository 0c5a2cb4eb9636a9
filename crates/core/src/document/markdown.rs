use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::{BlockKind, PageContent};

/// Parse a markdown page (optionally preceded by `---` or `+++` front
/// matter) into a [`PageContent`].
///
/// The page title comes from the front matter `title` when present and from
/// the first level-one heading otherwise.
#[must_use]
pub fn parse_markdown(path: impl Into<String>, source: &str) -> PageContent {
	let (front_title, body) = split_front_matter(source);
	let mut page = PageContent::new(path);

	let mut options = Options::empty();
	options.insert(Options::ENABLE_TABLES);
	options.insert(Options::ENABLE_STRIKETHROUGH);

	let mut current: Option<(BlockKind, String)> = None;
	for event in Parser::new_ext(body, options) {
		match event {
			Event::Start(Tag::Heading { level, .. }) => {
				let kind = BlockKind::Heading {
					level: heading_level(level),
				};
				open_block(&mut page, &mut current, kind);
			}
			Event::Start(Tag::Paragraph) => {
				// A loose list item carries its text in paragraphs.
				if matches!(&current, Some((BlockKind::ListItem, text)) if text.trim().is_empty()) {
					current = None;
				}
				open_block(&mut page, &mut current, BlockKind::Paragraph);
			}
			Event::Start(Tag::Item) => open_block(&mut page, &mut current, BlockKind::ListItem),
			Event::Start(Tag::CodeBlock(_)) => open_block(&mut page, &mut current, BlockKind::Code),
			Event::Start(Tag::TableHead | Tag::TableRow) => {
				open_block(&mut page, &mut current, BlockKind::TableRow);
			}
			Event::Start(Tag::TableCell) => {
				if let Some((_, buffer)) = current.as_mut()
					&& !buffer.is_empty()
				{
					buffer.push_str(" | ");
				}
			}
			Event::End(
				TagEnd::Heading(_)
				| TagEnd::Paragraph
				| TagEnd::Item
				| TagEnd::CodeBlock
				| TagEnd::TableHead
				| TagEnd::TableRow,
			) => close_block(&mut page, &mut current),
			Event::Text(text) | Event::Code(text) => {
				if let Some((_, buffer)) = current.as_mut() {
					buffer.push_str(&text);
				}
			}
			Event::SoftBreak | Event::HardBreak => {
				if let Some((_, buffer)) = current.as_mut() {
					buffer.push(' ');
				}
			}
			_ => {}
		}
	}

	page.title = front_title.or_else(|| page.first_h1().map(str::to_string));
	page
}

/// Start a block, flushing any text collected so far (the label of a list
/// item that holds a nested list, for instance).
fn open_block(page: &mut PageContent, current: &mut Option<(BlockKind, String)>, kind: BlockKind) {
	close_block(page, current);
	*current = Some((kind, String::new()));
}

fn close_block(page: &mut PageContent, current: &mut Option<(BlockKind, String)>) {
	let Some((kind, text)) = current.take() else {
		return;
	};
	let text = match kind {
		BlockKind::Code => text.trim_end().trim_start_matches('\n'),
		_ => text.trim(),
	};
	if !text.is_empty() {
		page.push(kind, text.to_string());
	}
}

fn heading_level(level: HeadingLevel) -> u8 {
	match level {
		HeadingLevel::H1 => 1,
		HeadingLevel::H2 => 2,
		HeadingLevel::H3 => 3,
		HeadingLevel::H4 => 4,
		HeadingLevel::H5 => 5,
		HeadingLevel::H6 => 6,
	}
}

/// Split off Hugo-style front matter, returning its `title` and the body.
fn split_front_matter(source: &str) -> (Option<String>, &str) {
	let trimmed = source.trim_start_matches('\u{feff}');
	for fence in ["---", "+++"] {
		let Some(rest) = trimmed.strip_prefix(fence) else {
			continue;
		};
		let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
			continue;
		};
		let closing = format!("\n{fence}");
		let Some(end) = rest.find(&closing) else {
			continue;
		};
		let header = &rest[..end];
		let body = rest[end + closing.len()..].trim_start_matches(['\r', '\n']);
		return (front_matter_title(header), body);
	}
	(None, trimmed)
}

fn front_matter_title(header: &str) -> Option<String> {
	header.lines().find_map(|line| {
		let line = line.trim();
		let value = line
			.strip_prefix("title:")
			.or_else(|| line.strip_prefix("title ="))
			.or_else(|| line.strip_prefix("title="))?;
		let value = value.trim().trim_matches(['"', '\'']).trim();
		(!value.is_empty()).then(|| value.to_string())
	})
}
