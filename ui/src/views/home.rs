use dioxus::prelude::*;

use crate::core::platform::Platform;

#[component]
pub fn Home() -> Element {
    // Subscribe to the global language code so copy refreshes on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_current = lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(crate::i18n::current_language);

    tracing::trace!(lang = %lang_current, platform = Platform::current().label(), "home render");

    rsx! {
        section { class: "page page-home",
            h1 { {crate::t!("home-title")} }
            p { {crate::t!("home-tagline-short")} }
            p { {crate::t!("home-intro-1")} }

            ul { class: "page-home__features",
                li { {crate::t!("home-feature-compare")} }
                li { {crate::t!("home-feature-predict")} }
                li { {crate::t!("home-feature-export")} }
            }
            p { class: "page-home__cta",
                {crate::t!("home-cta")}
            }
        }
    }
}
