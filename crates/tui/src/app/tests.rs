use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use kbseek_core::{
	FetchedPage, LoadError, ManifestError, NavStructure, SearchConfig, StructureNode, TreeItem,
	TreeState, parse_markdown,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::{App, Focus};
use crate::host::{BrowseOptions, SiteSource};

const FUNDAMENTALS: &str = "/experience/knowledge/network-security/fundamentals/";
const PORTS: &str = "/experience/knowledge/network-security/ports/";

const MANIFEST: &str = r#"[
	{"permalink": "/experience/knowledge/network-security/fundamentals/", "title": "Fundamentals",
	 "section": "experience", "type": "knowledge"},
	{"permalink": "/experience/knowledge/network-security/ports/", "title": "Common Ports",
	 "section": "experience", "type": "knowledge"},
	{"permalink": "/posts/hello/", "title": "Hello", "section": "posts", "type": "posts"}
]"#;

struct FakeSite {
	manifest: Option<&'static str>,
	pages: HashMap<&'static str, &'static str>,
}

impl FakeSite {
	fn new() -> Self {
		let mut pages = HashMap::new();
		pages.insert(
			FUNDAMENTALS,
			"# Network Security Fundamentals\n\nFirewalls filter packets between trusted and untrusted networks every day.\n",
		);
		pages.insert(PORTS, "# Common Ports\n\nPort 443 carries HTTPS traffic for nearly every public website.\n");
		Self {
			manifest: Some(MANIFEST),
			pages,
		}
	}
}

impl SiteSource for FakeSite {
	fn manifest(&self) -> Result<Vec<u8>, ManifestError> {
		self.manifest
			.map(|text| text.as_bytes().to_vec())
			.ok_or_else(|| ManifestError::Unavailable {
				reason: "offline".into(),
			})
	}

	fn page(&self, url: &str) -> Result<FetchedPage, LoadError> {
		self.pages
			.get(url)
			.map(|source| FetchedPage::Article(parse_markdown(url, source)))
			.ok_or_else(|| LoadError::NotFound { url: url.into() })
	}
}

fn options() -> BrowseOptions {
	BrowseOptions {
		search: SearchConfig {
			debounce: Duration::ZERO,
			..SearchConfig::default()
		},
		start_page: FUNDAMENTALS.to_string(),
		..BrowseOptions::default()
	}
}

fn started(site: FakeSite, options: BrowseOptions) -> App<'static> {
	let mut app = App::new(Arc::new(site), options).unwrap();
	app.start();
	app.settle_loads();
	app
}

fn key(code: KeyCode) -> KeyEvent {
	KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App<'_>, text: &str) {
	for ch in text.chars() {
		app.handle_key(key(KeyCode::Char(ch)), Instant::now());
	}
}

fn draw(app: &mut App<'_>) -> String {
	let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
	terminal.draw(|frame| app.draw(frame)).unwrap();
	terminal
		.backend()
		.buffer()
		.content()
		.iter()
		.map(|cell| cell.symbol())
		.collect()
}

#[test]
fn startup_loads_tree_and_article() {
	let mut app = started(FakeSite::new(), options());

	assert_eq!(
		app.document_title(),
		Some("Network Security Fundamentals - EM cybertrack")
	);
	let tree = app.tree.tree().expect("tree ready");
	let labels: Vec<&str> = tree.visible("").iter().map(|row| row.item.label()).collect();
	assert_eq!(labels, ["Network Security", "Fundamentals", "Common Ports"]);

	let screen = draw(&mut app);
	assert!(screen.contains("Firewalls filter packets"));
	assert!(screen.contains("Common Ports"));
}

#[test]
fn manifest_failure_keeps_placeholder() {
	let site = FakeSite {
		manifest: None,
		..FakeSite::new()
	};
	let mut app = started(site, options());

	assert_eq!(app.tree, TreeState::Unavailable);
	let screen = draw(&mut app);
	assert!(screen.contains("Loading navigation..."));
	assert!(screen.contains("Firewalls filter packets"));
}

#[test]
fn typing_shows_results_and_enter_jumps_to_block() {
	let mut app = started(FakeSite::new(), options());

	type_text(&mut app, "firewall");
	assert!(app.controller.is_visible());
	let screen = draw(&mut app);
	assert!(screen.contains("1 result"));
	assert!(screen.contains("Use ↑↓ to navigate"));

	app.handle_key(key(KeyCode::Down), Instant::now());
	app.handle_key(key(KeyCode::Enter), Instant::now());

	assert!(!app.controller.is_visible());
	assert!(app.search_input.text().is_empty());
	assert!(app.article.pending_scroll.is_some());
	assert_eq!(app.article.highlighted.len(), 1);
	assert_eq!(app.focus, Focus::Article);
}

#[test]
fn highlight_expires_on_tick() {
	let mut app = started(FakeSite::new(), options());
	type_text(&mut app, "firewall");
	app.handle_key(key(KeyCode::Down), Instant::now());
	app.handle_key(key(KeyCode::Enter), Instant::now());
	assert_eq!(app.article.highlighted.len(), 1);

	app.tick(Instant::now() + Duration::from_secs(3));
	assert!(app.article.highlighted.is_empty());
}

#[test]
fn clicking_a_page_result_swaps_the_article() {
	let mut app = started(FakeSite::new(), options());
	type_text(&mut app, "common");
	draw(&mut app);
	let rows = app.hit.dropdown_rows.expect("dropdown rows drawn");

	app.handle_mouse(
		MouseEvent {
			kind: MouseEventKind::Down(MouseButton::Left),
			column: rows.x + 2,
			row: rows.y,
			modifiers: KeyModifiers::NONE,
		},
		Instant::now(),
	);
	assert!(app.content.is_loading());
	app.settle_loads();

	assert_eq!(app.document_title(), Some("Common Ports - EM cybertrack"));
	assert!(draw(&mut app).contains("Port 443 carries HTTPS"));
}

#[test]
fn escape_hides_dropdown_and_leaves_search() {
	let mut app = started(FakeSite::new(), options());
	type_text(&mut app, "ports");
	assert!(app.controller.is_visible());

	app.handle_key(key(KeyCode::Esc), Instant::now());
	assert!(!app.controller.is_visible());
	assert_eq!(app.focus, Focus::Article);
	assert!(!app.should_quit);
}

#[test]
fn outside_click_hides_dropdown() {
	let mut app = started(FakeSite::new(), options());
	type_text(&mut app, "ports");
	draw(&mut app);

	app.handle_mouse(
		MouseEvent {
			kind: MouseEventKind::Down(MouseButton::Left),
			column: 90,
			row: 22,
			modifiers: KeyModifiers::NONE,
		},
		Instant::now(),
	);
	assert!(!app.controller.is_visible());
}

#[test]
fn input_filters_sidebar_labels() {
	let mut app = started(FakeSite::new(), options());
	type_text(&mut app, "po");

	let tree = app.tree.tree().expect("tree ready");
	let labels: Vec<&str> = tree
		.visible(app.sidebar_filter())
		.iter()
		.map(|row| row.item.label())
		.collect();
	assert!(labels.is_empty(), "folder label hides its subtree: {labels:?}");

	let mut app = started(FakeSite::new(), options());
	type_text(&mut app, "net");
	let tree = app.tree.tree().expect("tree ready");
	let labels: Vec<&str> = tree
		.visible(app.sidebar_filter())
		.iter()
		.map(|row| row.item.label())
		.collect();
	assert_eq!(labels, ["Network Security"]);
}

#[test]
fn declared_structure_drives_sidebar() {
	let mut children = NavStructure::new();
	children.insert(
		"Ports".into(),
		StructureNode::Page {
			url: PORTS.into(),
		},
	);
	let mut structure = NavStructure::new();
	structure.insert("Reference".into(), StructureNode::Folder { children });
	let options = BrowseOptions {
		navigation: Some(structure),
		..options()
	};
	let mut app = started(FakeSite::new(), options);

	let tree = app.tree.tree().expect("tree ready");
	assert!(matches!(&tree.items()[0], TreeItem::Folder(folder) if folder.label == "Reference"));

	// Open the folder from the keyboard and follow the link.
	app.set_focus(Focus::Sidebar);
	app.handle_key(key(KeyCode::Down), Instant::now());
	app.handle_key(key(KeyCode::Enter), Instant::now());
	app.handle_key(key(KeyCode::Down), Instant::now());
	app.handle_key(key(KeyCode::Enter), Instant::now());
	app.settle_loads();

	assert_eq!(app.document_title(), Some("Common Ports - EM cybertrack"));
}

#[test]
fn ctrl_c_quits_from_any_pane() {
	let mut app = started(FakeSite::new(), options());
	app.handle_key(
		KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
		Instant::now(),
	);
	assert!(app.should_quit);
}
