use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use super::types::{Theme, ThemeRegistration};

/// Theme documents compiled into the binary, in display order.
pub(super) const BUILTIN_DOCUMENTS: &[(&str, &str)] = &[
	("slate.toml", include_str!("themes/slate.toml")),
	("paper.toml", include_str!("themes/paper.toml")),
];

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	pub(super) default_theme: Theme,
}

#[derive(Debug, Deserialize)]
struct ThemeDocument {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	styles: ThemeStyles,
}

#[derive(Debug, Deserialize)]
struct ThemeStyles {
	header: StyleSpec,
	row_highlight: StyleSpec,
	prompt: StyleSpec,
	empty: StyleSpec,
	highlight: StyleSpec,
	active: StyleSpec,
	heading: StyleSpec,
	flash: StyleSpec,
}

impl ThemeStyles {
	fn into_theme(self, context: &str) -> Result<Theme> {
		let style = |spec: &StyleSpec, field: &str| spec.to_style(&format!("{context}.{field}"));
		Ok(Theme {
			header: style(&self.header, "header")?,
			row_highlight: style(&self.row_highlight, "row_highlight")?,
			prompt: style(&self.prompt, "prompt")?,
			empty: style(&self.empty, "empty")?,
			highlight: style(&self.highlight, "highlight")?,
			active: style(&self.active, "active")?,
			heading: style(&self.heading, "heading")?,
			flash: style(&self.flash, "flash")?,
		})
	}
}

#[derive(Debug, Default, Deserialize)]
struct StyleSpec {
	#[serde(default)]
	fg: Option<String>,
	#[serde(default)]
	bg: Option<String>,
	#[serde(default)]
	modifiers: Vec<String>,
}

impl StyleSpec {
	fn to_style(&self, context: &str) -> Result<Style> {
		let mut style = Style::new();
		if let Some(fg) = &self.fg {
			style = style.fg(parse_color(fg).with_context(|| format!("{context}: bad fg `{fg}`"))?);
		}
		if let Some(bg) = &self.bg {
			style = style.bg(parse_color(bg).with_context(|| format!("{context}: bad bg `{bg}`"))?);
		}
		for name in &self.modifiers {
			let modifier =
				parse_modifier(name).with_context(|| format!("{context}: bad modifier `{name}`"))?;
			style = style.add_modifier(modifier);
		}
		Ok(style)
	}
}

pub(super) fn load_builtin_themes(documents: &[(&str, &str)]) -> Result<BuiltinThemes> {
	let mut registrations = Vec::with_capacity(documents.len());
	let mut default_theme: Option<(Theme, String)> = None;

	for (file, contents) in documents {
		let document: ThemeDocument =
			toml::from_str(contents).with_context(|| format!("failed to parse theme {file}"))?;
		let theme = document.styles.into_theme(file)?;

		if document.default {
			if let Some((_, existing)) = &default_theme {
				bail!(
					"multiple built-in themes are marked as default (`{existing}` and `{}`)",
					document.name
				);
			}
			default_theme = Some((theme, document.name.clone()));
		}

		let registration = document
			.aliases
			.into_iter()
			.map(|alias| alias.trim().to_string())
			.filter(|alias| !alias.is_empty())
			.fold(ThemeRegistration::new(document.name, theme), ThemeRegistration::alias);
		registrations.push(registration);
	}

	let Some(default_theme) = default_theme
		.map(|(theme, _)| theme)
		.or_else(|| registrations.first().map(|registration| registration.theme))
	else {
		bail!("no built-in theme definitions were found");
	};

	Ok(BuiltinThemes {
		registrations,
		default_theme,
	})
}

fn parse_color(input: &str) -> Result<Color> {
	let value = input.trim();
	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex(hex);
	}
	if let Some(index) = value.strip_prefix("ansi(").and_then(|s| s.strip_suffix(')')) {
		let index: u8 = index
			.trim()
			.parse()
			.with_context(|| format!("invalid ANSI colour index `{index}`"))?;
		return Ok(Color::Indexed(index));
	}
	Ok(match normalise_key(value).as_ref() {
		"reset" | "default" => Color::Reset,
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"gray" | "grey" => Color::Gray,
		"dark_gray" | "dark_grey" => Color::DarkGray,
		"white" => Color::White,
		other => bail!("unknown colour `{other}`"),
	})
}

fn parse_hex(hex: &str) -> Result<Color> {
	let digits = match hex.len() {
		3 => Cow::Owned(hex.chars().flat_map(|ch| [ch, ch]).collect::<String>()),
		6 => Cow::Borrowed(hex),
		_ => bail!("hex colours must be 3 or 6 characters long"),
	};
	let channel = |range: std::ops::Range<usize>| {
		digits
			.get(range)
			.and_then(|pair| u8::from_str_radix(pair, 16).ok())
			.with_context(|| format!("invalid hex colour `#{hex}`"))
	};
	Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_modifier(input: &str) -> Result<Modifier> {
	Ok(match normalise_key(input).as_ref() {
		"bold" => Modifier::BOLD,
		"dim" => Modifier::DIM,
		"italic" => Modifier::ITALIC,
		"underline" | "underlined" => Modifier::UNDERLINED,
		"reversed" | "reverse" => Modifier::REVERSED,
		other => bail!("unknown modifier `{other}`"),
	})
}

fn normalise_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_documents_load() {
		let builtins = load_builtin_themes(BUILTIN_DOCUMENTS).unwrap();
		assert_eq!(builtins.registrations.len(), 2);
		assert_eq!(builtins.registrations[0].name, "slate");
		assert!(builtins.registrations[1].answers_to("LIGHT"));
	}

	#[test]
	fn colours_parse() {
		assert_eq!(parse_color("#fff").unwrap(), Color::Rgb(255, 255, 255));
		assert_eq!(parse_color("ansi(254)").unwrap(), Color::Indexed(254));
		assert_eq!(parse_color("Dark-Gray").unwrap(), Color::DarkGray);
		assert!(parse_color("#12345").is_err());
		assert!(parse_color("octarine").is_err());
	}

	#[test]
	fn two_defaults_are_rejected() {
		let doc = r#"
			name = "x"
			default = true
			[styles]
			header = {}
			row_highlight = {}
			prompt = {}
			empty = {}
			highlight = {}
			active = {}
			heading = {}
			flash = {}
		"#;
		assert!(load_builtin_themes(&[("a.toml", doc), ("b.toml", doc)]).is_err());
	}
}
