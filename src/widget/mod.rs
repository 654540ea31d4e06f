/// Widget lifecycle
///
/// A `Widget` is connected once from its own attributes and the host's shared
/// configuration. Connecting runs the init sequence in order: normalize, validate,
/// write back, translations, date state, dispatch and mount, favorites. After that the
/// widget reacts to attribute changes and user interactions, queueing events for the
/// host to drain.
pub mod dispatch;
pub mod normalize;
pub mod state;
pub mod validate;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use maud::{html, Markup};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::attributes::{attribute_name, keys, AttributeSet};
use crate::data_provider::{DataAccess, SportsDataProvider, VisibilityFlag};
use crate::events::WidgetEvent;
use crate::i18n::{language_from_url, load_custom_language, Translator};
use crate::types::{Sport, WidgetType, WIDGET_TAG};
use crate::views::{mount, FavoriteStar, Interaction, View, ViewContext};

use self::dispatch::dispatch;
use self::normalize::{normalize, SharedConfig, WidgetOptions};
use self::state::{DateState, Effect, RefreshRequest};
use self::validate::{report_warnings, validate, ConfigWarning};

/// Resolved configuration of a connected widget
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub sport: Sport,
    pub widget_type: WidgetType,
    pub options: WidgetOptions,
}

/// What the widget currently shows
pub enum Content {
    /// Inline error; nothing is mounted
    Error(String),
    View(Box<dyn View>),
}

/// Record of what happened to a widget, for hosts and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub warnings: Vec<ConfigWarning>,
    /// Refreshes delivered to the mounted view, in order
    pub refreshes: Vec<RefreshRequest>,
}

pub struct Widget {
    attributes: AttributeSet,
    config: WidgetConfig,
    data: DataAccess,
    translator: Translator,
    dates: DateState,
    content: Content,
    favorite: Option<FavoriteStar>,
    events: Vec<WidgetEvent>,
    diagnostics: Diagnostics,
    refresh_paused: bool,
}

impl Widget {
    pub async fn connect(
        local: AttributeSet,
        shared: Option<&SharedConfig>,
        provider: Arc<dyn SportsDataProvider>,
        visibility: VisibilityFlag,
    ) -> Self {
        Self::connect_at(local, shared, provider, visibility, Utc::now()).await
    }

    /// Connect with an explicit clock, for deterministic dates
    pub async fn connect_at(
        local: AttributeSet,
        shared: Option<&SharedConfig>,
        provider: Arc<dyn SportsDataProvider>,
        visibility: VisibilityFlag,
        now: DateTime<Utc>,
    ) -> Self {
        let normalized = normalize(shared, &local);
        let validated = validate(&normalized.sport, &normalized.widget_type);
        report_warnings(&validated.warnings, normalized.options.show_error);

        let mut attributes = normalized.write_back();
        attributes.set(keys::SPORT, validated.sport.as_str());
        attributes.set(keys::TYPE, validated.widget_type.as_str());

        let config = WidgetConfig {
            sport: validated.sport,
            widget_type: validated.widget_type,
            options: normalized.options,
        };
        info!(
            "WIDGET: Connecting {} widget for {}",
            config.widget_type, config.sport
        );
        debug!(
            "WIDGET: Styles: games style {}, theme {:?}",
            config.options.games_style, config.options.theme
        );

        let mut data = DataAccess::new(
            provider,
            config.options.api_base_url(config.sport),
            config.sport,
            visibility,
        );

        let mut translator = Translator::new(&config.options.language, config.sport);
        if let Some(table) = normalized.custom_translations {
            translator.set_custom(table);
        }
        if let Some(url) = &config.options.custom_language_url {
            match load_custom_language(&data, url).await {
                Ok(table) => {
                    translator.set_custom(table);
                    translator.set_language(&language_from_url(url));
                }
                Err(e) => {
                    error!("I18N: {:#}", e);
                    translator.set_custom(Value::Object(Default::default()));
                }
            }
        }

        let dates = DateState::initialize(
            config.options.date.as_deref(),
            config.options.time_zone,
            now,
        );

        let content = match dispatch(&config, &dates) {
            Ok(spec) => {
                debug!("DISPATCH: {:?}", spec);
                let mut view = mount(&spec, &config.options);
                let ctx = ViewContext {
                    data: &data,
                    i18n: &translator,
                    options: &config.options,
                    dates: &dates,
                    sport: config.sport,
                };
                view.load(&ctx).await;
                Content::View(view)
            }
            Err(e) => {
                error!("DISPATCH: {}", e);
                Content::Error(e.to_string())
            }
        };

        let favorite = config.options.flags.favorite.then(FavoriteStar::new);
        data.mark_initialized();

        Self {
            attributes,
            config,
            data,
            translator,
            dates,
            content,
            favorite,
            events: Vec::new(),
            diagnostics: Diagnostics {
                warnings: validated.warnings,
                refreshes: Vec::new(),
            },
            refresh_paused: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The widget's own attributes, including written-back values
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn dates(&self) -> &DateState {
        &self.dates
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Tag of the mounted view, `None` when an inline error is shown
    pub fn mounted_view_tag(&self) -> Option<&'static str> {
        match &self.content {
            Content::View(view) => Some(view.tag()),
            Content::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.content {
            Content::Error(message) => Some(message),
            Content::View(_) => None,
        }
    }

    pub fn favorite(&self) -> Option<&FavoriteStar> {
        self.favorite.as_ref()
    }

    pub fn is_refresh_paused(&self) -> bool {
        self.refresh_paused
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }

    fn parts(&mut self) -> (ViewContext<'_>, &mut Content) {
        (
            ViewContext {
                data: &self.data,
                i18n: &self.translator,
                options: &self.config.options,
                dates: &self.dates,
                sport: self.config.sport,
            },
            &mut self.content,
        )
    }

    async fn apply(&mut self, effect: Effect) {
        let Effect::Refresh(request) = effect else {
            return;
        };
        let (ctx, content) = self.parts();
        let Content::View(view) = content else {
            return;
        };
        if !view.is_refreshable() {
            return;
        }
        view.refresh(&ctx, request).await;
        self.diagnostics.refreshes.push(request);
    }

    pub async fn set_current_date(&mut self, date: &str) {
        let effect = self.dates.set_current_date(date);
        self.apply(effect).await;
    }

    pub async fn set_current_year(&mut self, year: &str) {
        let effect = self.dates.set_current_year(year);
        self.apply(effect).await;
    }

    /// Host-side attribute change
    ///
    /// `date` and `year` go through the reactive state. `sport` and `type` are stored
    /// but do not re-dispatch.
    pub async fn set_attribute(&mut self, name: &str, value: &str) {
        let name = attribute_name(name);
        self.attributes.set(&name, value);
        match name.as_str() {
            keys::DATE => self.set_current_date(value).await,
            keys::YEAR => self.set_current_year(value).await,
            keys::THEME => self.config.options.theme = Some(value.to_string()),
            keys::SPORT | keys::TYPE => {
                debug!("WIDGET: {} changed to {:?}; not re-dispatching", name, value)
            }
            _ => {}
        }
    }

    async fn navigate(&mut self, effect: Effect) {
        if effect != Effect::None {
            self.events.push(WidgetEvent::DateChanged {
                date: self.dates.current_date().to_string(),
            });
        }
        self.apply(effect).await;
    }

    pub async fn interact(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::PreviousDay => {
                let effect = self.dates.shift_date(-1);
                self.navigate(effect).await;
            }
            Interaction::NextDay => {
                let effect = self.dates.shift_date(1);
                self.navigate(effect).await;
            }
            Interaction::Today => {
                let effect = self.dates.go_to_today();
                self.navigate(effect).await;
            }
            Interaction::SetDate(date) => {
                let effect = self.dates.set_current_date(&date);
                self.navigate(effect).await;
            }
            Interaction::ToggleFavorite => {
                if let Some(star) = self.favorite.as_mut() {
                    let event = star.toggle();
                    self.events.push(event);
                }
            }
            other => {
                let (ctx, content) = self.parts();
                if let Content::View(view) = content {
                    let events = view.interact(&ctx, other).await;
                    self.events.extend(events);
                }
            }
        }
    }

    /// Periodic refetch of the mounted view; does nothing once disconnected
    pub async fn refresh(&mut self, force: bool) {
        if self.refresh_paused {
            debug!("WIDGET: Refresh paused");
            return;
        }
        self.apply(Effect::Refresh(RefreshRequest {
            force,
            date_changed: false,
        }))
        .await;
    }

    pub fn disconnect(&mut self) {
        info!("WIDGET: Disconnected, pausing refresh");
        self.refresh_paused = true;
    }

    fn render_content(&self) -> Markup {
        let ctx = ViewContext {
            data: &self.data,
            i18n: &self.translator,
            options: &self.config.options,
            dates: &self.dates,
            sport: self.config.sport,
        };
        html! {
            @match &self.content {
                Content::Error(message) => { div.error { (message) } }
                Content::View(view) => {
                    div.widget-container.active { (view.render(&ctx)) }
                }
            }
            @if let Some(star) = &self.favorite {
                (star.render(&ctx))
            }
        }
    }

    /// The widget element with its attributes and current content
    pub fn render_html(&self) -> String {
        let inner = self.render_content();
        format!(
            "<{tag}{attrs}>{inner}</{tag}>",
            tag = WIDGET_TAG,
            attrs = self.attributes.to_data_attributes(),
            inner = inner.into_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::endpoints::Endpoint;
    use chrono::TimeZone;
    use serde_json::json;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeSet {
        AttributeSet::from_pairs(pairs.iter().copied())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    async fn connect(
        mock: &Arc<MockClient>,
        shared: Option<&SharedConfig>,
        pairs: &[(&str, &str)],
    ) -> Widget {
        Widget::connect_at(
            attrs(pairs),
            shared,
            mock.clone(),
            VisibilityFlag::default(),
            now(),
        )
        .await
    }

    #[tokio::test]
    async fn test_invalid_sport_falls_back_to_football() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "cricket"), ("timezone", "UTC")]).await;

        assert_eq!(widget.config().sport, Sport::Football);
        assert_eq!(widget.config().widget_type, WidgetType::Games);
        assert_eq!(widget.diagnostics().warnings.len(), 2);
        assert_eq!(widget.attributes().get("sport"), Some("football"));
        assert_eq!(widget.attributes().get("type"), Some("games"));
        assert_eq!(widget.mounted_view_tag(), Some("games-list"));
    }

    #[tokio::test]
    async fn test_invalid_type_uses_sport_default() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "f1"), ("type", "chart")]).await;
        assert_eq!(widget.config().widget_type, WidgetType::Races);

        let widget = connect(&mock, None, &[("sport", "mma")]).await;
        assert_eq!(widget.config().widget_type, WidgetType::Fights);
    }

    #[tokio::test]
    async fn test_refresh_attribute_coercion() {
        let mock = Arc::new(MockClient::new());
        for (raw, expected) in [("", 0), ("0", 0), ("-5", 0), ("true", 15), ("10", 15), ("20", 20)] {
            let widget = connect(&mock, None, &[("sport", "football"), ("refresh", raw)]).await;
            assert_eq!(widget.config().options.refresh_seconds, expected, "{raw:?}");
        }
    }

    #[tokio::test]
    async fn test_same_date_does_not_refresh() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "football"), ("timezone", "UTC")]).await;
        assert_eq!(mock.request_count(Endpoint::Fixtures), 1);

        widget.set_current_date("2025-03-15").await;

        assert!(widget.diagnostics().refreshes.is_empty());
        assert_eq!(mock.request_count(Endpoint::Fixtures), 1);
    }

    #[tokio::test]
    async fn test_new_date_refreshes_once_without_force() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "football"), ("timezone", "UTC")]).await;

        widget.set_attribute("data-date", "2025-03-16").await;

        assert_eq!(
            widget.diagnostics().refreshes,
            vec![RefreshRequest {
                force: false,
                date_changed: true
            }]
        );
        let requests = mock.requests_to(Endpoint::Fixtures);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].query.get("date"), Some("2025-03-16"));
        assert_eq!(widget.mounted_view_tag(), Some("games-list"));
    }

    #[tokio::test]
    async fn test_standings_without_league_shows_inline_error() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "football"), ("type", "standings")]).await;

        assert_eq!(widget.mounted_view_tag(), None);
        assert_eq!(
            widget.error_message(),
            Some("League parameter is required for standings widget.")
        );
        assert!(mock.requests().is_empty());
        assert!(widget
            .render_html()
            .contains("<div class=\"error\">League parameter is required for standings widget.</div>"));
    }

    #[tokio::test]
    async fn test_standings_with_league_mounts_one_view() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(
            &mock,
            None,
            &[("sport", "football"), ("type", "standings"), ("league", "39"), ("season", "2024")],
        )
        .await;

        assert_eq!(widget.mounted_view_tag(), Some("standing-component"));
        let requests = mock.requests_to(Endpoint::Standings);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query.get("league"), Some("39"));
        assert_eq!(requests[0].query.get("season"), Some("2024"));
        assert_eq!(widget.render_html().matches("widget-container active").count(), 1);
    }

    #[tokio::test]
    async fn test_driver_preconditions() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "football"), ("type", "driver"), ("driver-id", "1")]).await;
        assert_eq!(widget.error_message(), Some("Driver widget is only available for F1."));

        let widget = connect(&mock, None, &[("sport", "f1"), ("type", "driver"), ("driver-id", "")]).await;
        assert_eq!(
            widget.error_message(),
            Some("Driver ID parameter is required for driver widget.")
        );
    }

    #[tokio::test]
    async fn test_local_attribute_overrides_shared() {
        let mock = Arc::new(MockClient::new());
        let shared = SharedConfig::new(attrs(&[("sport", "hockey"), ("lang", "pt")]));
        let widget = connect(&mock, Some(&shared), &[("sport", "football"), ("type", "leagues")]).await;

        assert_eq!(widget.config().sport, Sport::Football);
        assert_eq!(widget.translator().language(), "pt");
        assert_eq!(
            mock.requests_to(Endpoint::Leagues)[0].base_url,
            "https://api.anymal.xyz/"
        );
    }

    #[tokio::test]
    async fn test_team_widget_requests_team_33() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "football"), ("type", "team"), ("team-id", "33")]).await;

        assert_eq!(widget.mounted_view_tag(), Some("team-detail"));
        let teams = mock.requests_to(Endpoint::Teams);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].query.get("id"), Some("33"));
    }

    #[tokio::test]
    async fn test_missing_team_makes_no_further_requests() {
        let mock = Arc::new(MockClient::new().with_empty(Endpoint::Teams));
        let widget = connect(
            &mock,
            None,
            &[
                ("sport", "football"),
                ("type", "team"),
                ("team-id", "33"),
                ("team-statistics", "true"),
                ("team-squad", "true"),
            ],
        )
        .await;

        assert!(widget.render_html().contains("Team not found"));
        assert_eq!(mock.requests().len(), 1);
        assert_eq!(mock.request_count(Endpoint::TeamStatistics), 0);
        assert_eq!(mock.request_count(Endpoint::Squads), 0);
    }

    #[tokio::test]
    async fn test_favorite_star_loaded_even_after_precondition_failure() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(
            &mock,
            None,
            &[("sport", "football"), ("type", "team"), ("favorite", "true")],
        )
        .await;

        assert!(widget.error_message().is_some());
        assert!(widget.render_html().contains("favorite-star"));

        widget.interact(Interaction::ToggleFavorite).await;
        assert_eq!(
            widget.take_events(),
            vec![WidgetEvent::FavoriteToggled { favorite: true }]
        );
        assert!(widget.take_events().is_empty());
    }

    #[tokio::test]
    async fn test_date_navigation_emits_date_changed() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "football"), ("timezone", "UTC")]).await;

        widget.interact(Interaction::NextDay).await;
        widget.interact(Interaction::Today).await;
        widget.interact(Interaction::Today).await;

        let events = widget.take_events();
        assert_eq!(
            events,
            vec![
                WidgetEvent::DateChanged {
                    date: "2025-03-16".to_string()
                },
                WidgetEvent::DateChanged {
                    date: "2025-03-15".to_string()
                },
            ]
        );
        assert_eq!(widget.diagnostics().refreshes.len(), 2);
    }

    #[tokio::test]
    async fn test_year_attribute_updates_state() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "mma"), ("year", "2020"), ("timezone", "UTC")]).await;

        assert_eq!(widget.dates().current_year(), "2025");
        widget.set_attribute("year", "2024").await;
        assert_eq!(widget.dates().current_year(), "2024");
        assert_eq!(widget.attributes().get("year"), Some("2024"));
    }

    #[tokio::test]
    async fn test_year_change_requests_new_season() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "mma"), ("type", "fights"), ("timezone", "UTC")]).await;

        widget.set_current_year("2024").await;

        assert_eq!(widget.diagnostics().refreshes.len(), 1);
        let seasons: Vec<_> = mock
            .requests_to(Endpoint::Fixtures)
            .iter()
            .map(|r| r.query.get("season").map(str::to_string))
            .collect();
        assert_eq!(seasons, vec![Some("2025".to_string()), Some("2024".to_string())]);
    }

    #[tokio::test]
    async fn test_explicit_season_ignores_year_changes() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "f1"), ("type", "races"), ("season", "2023")]).await;

        widget.set_current_year("2020").await;

        let requests = mock.requests_to(Endpoint::Fixtures);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].query.get("season"), Some("2023"));
    }

    #[tokio::test]
    async fn test_cleared_date_attribute_requests_today() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(
            &mock,
            None,
            &[("sport", "football"), ("date", "2025-03-10"), ("timezone", "UTC")],
        )
        .await;

        widget.set_attribute("date", "").await;

        assert_eq!(widget.dates().current_date(), "2025-03-15");
        let requests = mock.requests_to(Endpoint::Fixtures);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].query.get("date"), Some("2025-03-15"));
    }

    #[tokio::test]
    async fn test_type_change_does_not_redispatch() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "football")]).await;

        widget.set_attribute("type", "standings").await;

        assert_eq!(widget.attributes().get("type"), Some("standings"));
        assert_eq!(widget.mounted_view_tag(), Some("games-list"));
        assert_eq!(mock.request_count(Endpoint::Standings), 0);
    }

    #[tokio::test]
    async fn test_custom_language_file() {
        let url = "https://cdn.test/i18n/translations_fr.json";
        let mock = Arc::new(MockClient::new().with_translation(url, json!({"today": "Aujourd'hui"})));
        let widget = connect(&mock, None, &[("sport", "football"), ("custom-lang", url)]).await;

        assert_eq!(widget.translator().language(), "fr");
        assert_eq!(widget.translator().translate("today"), "Aujourd'hui");
    }

    #[tokio::test]
    async fn test_custom_language_failure_leaves_empty_table() {
        let mock = Arc::new(MockClient::new());
        let shared = SharedConfig::default().with_custom_translations(json!({"today": "Heute"}));
        let widget = connect(
            &mock,
            Some(&shared),
            &[("sport", "football"), ("lang", "pt"), ("custom-lang", "https://cdn.test/missing.json")],
        )
        .await;

        assert_eq!(widget.translator().language(), "pt");
        assert_eq!(widget.translator().custom(), &json!({}));
        assert_eq!(widget.mounted_view_tag(), Some("games-list"));
    }

    #[tokio::test]
    async fn test_shared_custom_translations_seed_translator() {
        let mock = Arc::new(MockClient::new());
        let shared = SharedConfig::default().with_custom_translations(json!({"today": "Heute"}));
        let widget = connect(&mock, Some(&shared), &[("sport", "football")]).await;
        assert_eq!(widget.translator().translate("today"), "Heute");
    }

    #[tokio::test]
    async fn test_disconnect_pauses_refresh() {
        let mock = Arc::new(MockClient::new());
        let mut widget = connect(&mock, None, &[("sport", "football")]).await;

        widget.refresh(false).await;
        assert_eq!(mock.request_count(Endpoint::Fixtures), 2);

        widget.disconnect();
        widget.refresh(true).await;
        assert!(widget.is_refresh_paused());
        assert_eq!(mock.request_count(Endpoint::Fixtures), 2);
    }

    #[tokio::test]
    async fn test_hidden_document_skips_refresh_requests() {
        let mock = Arc::new(MockClient::new());
        let visibility = VisibilityFlag::new(true);
        let mut widget = Widget::connect_at(
            attrs(&[("sport", "football")]),
            None,
            mock.clone(),
            visibility.clone(),
            now(),
        )
        .await;

        visibility.set_visible(false);
        widget.refresh(false).await;
        assert_eq!(mock.request_count(Endpoint::Fixtures), 1);
    }

    #[tokio::test]
    async fn test_render_html_carries_attributes() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "hockey"), ("type", "player"), ("player-id", "7")]).await;

        let html = widget.render_html();
        assert!(html.starts_with("<sports-widget"));
        assert!(html.contains("data-sport=\"hockey\""));
        assert!(html.contains("data-player-id=\"7\""));
        assert!(html.contains("Player ID: 7"));
        assert!(html.ends_with("</sports-widget>"));
    }

    #[tokio::test]
    async fn test_fighter_placeholder_mounts_without_requests() {
        let mock = Arc::new(MockClient::new());
        let widget = connect(&mock, None, &[("sport", "mma"), ("type", "fighter")]).await;
        assert_eq!(widget.mounted_view_tag(), Some("fighter-detail"));
        assert!(mock.requests().is_empty());
    }
}
