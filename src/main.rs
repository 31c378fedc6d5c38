use elasticity_sim::{App, AppConfig, init_logging};
use leptos::prelude::*;

fn main() {
	let config = AppConfig::from_location();
	init_logging(config.log_level);
	mount_to_body(move || view! { <App config=config /> })
}
