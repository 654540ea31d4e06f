/// Markup shared by the views
use maud::{html, Markup};

use super::ViewContext;
use crate::formatting::status_translation_key;
use crate::models::Fixture;

const LOADER_PATH: &str = "M21 12a9 9 0 1 1-6.219-8.56";

pub fn loading(ctx: &ViewContext<'_>) -> Markup {
    html! {
        div.loading-block aria-label=(ctx.t("loading")) {
            svg.loader xmlns="http://www.w3.org/2000/svg" width="24" height="24"
                viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"
                stroke-linecap="round" stroke-linejoin="round" {
                path d=(LOADER_PATH) {}
            }
        }
    }
}

pub fn empty_result(message: &str) -> Markup {
    html! { p.empty-result { (message) } }
}

pub fn error(message: &str) -> Markup {
    html! { p.error { (message) } }
}

/// Logo image, rendered only when logos are enabled and a URL is known
pub fn logo(ctx: &ViewContext<'_>, class: &str, url: Option<&str>, alt: &str) -> Markup {
    match url.filter(|u| !u.is_empty()) {
        Some(url) if ctx.options.show_logos => html! {
            img class=(class) src=(url) alt=(alt) loading="lazy";
        },
        _ => html! {},
    }
}

/// `{logo_base_url}/{kind}/{id}.png`
pub fn media_url(ctx: &ViewContext<'_>, kind: &str, id: &str) -> String {
    format!(
        "{}/{}/{}.png",
        ctx.options.logo_base_url.trim_end_matches('/'),
        kind,
        id
    )
}

/// Localized status of a fixture, its long status when the code is unknown
pub fn status_label(ctx: &ViewContext<'_>, game: &Fixture) -> String {
    let short = game.status_short();
    match status_translation_key(short) {
        Some(key) => ctx.t(key),
        None => game
            .status()
            .and_then(|s| s.long.clone())
            .unwrap_or_else(|| short.to_string()),
    }
}

/// Tab buttons; `tabs` pairs an id with its translation key
pub fn tab_bar(ctx: &ViewContext<'_>, tabs: &[(&str, &str)], active: Option<&str>) -> Markup {
    html! {
        div.tabs role="tablist" {
            @for (id, key) in tabs {
                button.tab.active[active == Some(*id)] type="button" role="tab" data-tab=(id) {
                    (ctx.t(key))
                }
            }
        }
    }
}

/// First of `preferred` and `available`, in that order, that is available
pub fn initial_tab(available: &[&'static str], preferred: Option<&str>) -> Option<&'static str> {
    preferred
        .and_then(|p| available.iter().find(|tab| **tab == p).copied())
        .or_else(|| available.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::types::Sport;
    use crate::views::testing::Harness;

    #[test]
    fn test_loading_block_has_spinner() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let html = loading(&h.ctx()).into_string();
        assert!(html.contains("loading-block"));
        assert!(html.contains(LOADER_PATH));
    }

    #[test]
    fn test_logo_hidden_unless_enabled() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        assert_eq!(logo(&h.ctx(), "x", Some("a.png"), "A").into_string(), "");

        let h = Harness::new(Sport::Football, MockClient::new(), &[("show-logos", "true")]);
        assert!(logo(&h.ctx(), "x", Some("a.png"), "A")
            .into_string()
            .contains("src=\"a.png\""));
        assert_eq!(logo(&h.ctx(), "x", None, "A").into_string(), "");
    }

    #[test]
    fn test_media_url() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[("logo-url", "https://cdn.test/")]);
        assert_eq!(media_url(&h.ctx(), "teams", "33"), "https://cdn.test/teams/33.png");
    }

    #[test]
    fn test_initial_tab() {
        assert_eq!(initial_tab(&["stats", "squad"], None), Some("stats"));
        assert_eq!(initial_tab(&["stats", "squad"], Some("squad")), Some("squad"));
        assert_eq!(initial_tab(&["stats"], Some("squad")), Some("stats"));
        assert_eq!(initial_tab(&[], Some("squad")), None);
    }
}
