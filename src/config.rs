//! Application defaults and page-level configuration.

use log::Level;

use crate::components::force_graph::GraphSettings;

/// Graph document fetched once at startup.
pub const DEFAULT_DATA_URL: &str =
	"https://raw.githubusercontent.com/eledah/elasticity-sim/main/data/graph-data-json.json";

/// Fill of nodes marked `isStatic`.
pub const STATIC_NODE_COLOR: &str = "#ff00de";
/// Fill of free nodes.
pub const MOVING_NODE_COLOR: &str = "#00ffff";

/// Circle radius.
pub const NODE_RADIUS: f64 = 5.0;
/// Node label size in px.
pub const NAME_FONT_SIZE: f64 = 12.0;
/// Edge weight label size in px.
pub const WEIGHT_FONT_SIZE: f64 = 10.0;

/// Energy target held while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Tunable values restored by the reset button.
pub const DEFAULT_SETTINGS: GraphSettings = GraphSettings {
	center_force: 0.1,
	repel_force: 300.0,
	link_force: 1.0,
	link_distance: 100.0,
};

/// Settings resolved from the page URL.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Document loaded at startup.
	pub data_url: String,
	/// Maximum console log level.
	pub log_level: Level,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.to_string(),
			log_level: Level::Debug,
		}
	}
}

impl AppConfig {
	/// Build from `key=value` pairs; `data` overrides the startup URL and `log` the
	/// console level. Unknown keys and unparsable levels are ignored.
	pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut config = Self::default();
		for (key, value) in pairs {
			let value = value.as_ref().trim();
			match key.as_ref() {
				"data" if !value.is_empty() => config.data_url = value.to_string(),
				"log" => match value.parse::<Level>() {
					Ok(level) => config.log_level = level,
					Err(_) => log::warn!("ignoring unknown log level {value:?}"),
				},
				_ => {}
			}
		}
		config
	}

	/// Read the query string of the current page.
	pub fn from_location() -> Self {
		let search = web_sys::window()
			.and_then(|w| w.location().search().ok())
			.unwrap_or_default();
		let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
			return Self::default();
		};
		let pairs = ["data", "log"]
			.into_iter()
			.filter_map(|key| params.get(key).map(|value| (key, value)));
		Self::from_query_pairs(pairs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_query_keeps_defaults() {
		let config = AppConfig::from_query_pairs(Vec::<(&str, &str)>::new());
		assert_eq!(config, AppConfig::default());
		assert_eq!(config.data_url, DEFAULT_DATA_URL);
	}

	#[test]
	fn query_overrides_url_and_level() {
		let config =
			AppConfig::from_query_pairs([("data", "/local.json"), ("log", "warn"), ("x", "1")]);
		assert_eq!(config.data_url, "/local.json");
		assert_eq!(config.log_level, Level::Warn);
	}

	#[test]
	fn blank_url_and_bad_level_are_ignored() {
		let config = AppConfig::from_query_pairs([("data", "  "), ("log", "loud")]);
		assert_eq!(config, AppConfig::default());
	}
}
