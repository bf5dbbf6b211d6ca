use dioxus::prelude::*;

use store::AdminConfig;
use ui::AdminProvider;
use views::{AdminShell, Permissions, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AdminShell)]
        #[route("/")]
        Users {},
        #[route("/permissions")]
        Permissions {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Configuration baked in at build time.
const ADMIN_TOML: &str = include_str!("../admin.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn load_config() -> AdminConfig {
    match AdminConfig::from_toml(ADMIN_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid {}, using defaults: {e}", AdminConfig::filename());
            AdminConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AdminProvider {
            config,
            Router::<Route> {}
        }
    }
}
