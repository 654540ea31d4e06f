/// Player and driver identity cards, and the fighter placeholder
use async_trait::async_trait;
use maud::{html, Markup};
use tracing::debug;

use super::{View, ViewContext};

fn identity_card(ctx: &ViewContext<'_>, class: &str, title_key: &str, id: &str) -> Markup {
    let title = ctx.t(title_key);
    html! {
        div class=(class) {
            h3.detail-title { (title) }
            p.detail-id { (title) " ID: " (id) }
        }
    }
}

pub struct PlayerDetailView {
    player_id: String,
}

impl PlayerDetailView {
    pub fn new(player_id: String) -> Self {
        Self { player_id }
    }
}

#[async_trait]
impl View for PlayerDetailView {
    fn tag(&self) -> &'static str {
        "player-detail"
    }

    async fn load(&mut self, _ctx: &ViewContext<'_>) {
        debug!("VIEW: player-detail {}", self.player_id);
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        identity_card(ctx, "player-detail", "player", &self.player_id)
    }
}

pub struct DriverDetailView {
    driver_id: String,
}

impl DriverDetailView {
    pub fn new(driver_id: String) -> Self {
        Self { driver_id }
    }
}

#[async_trait]
impl View for DriverDetailView {
    fn tag(&self) -> &'static str {
        "driver-detail"
    }

    async fn load(&mut self, _ctx: &ViewContext<'_>) {
        debug!("VIEW: driver-detail {}", self.driver_id);
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        identity_card(ctx, "driver-detail", "driver", &self.driver_id)
    }
}

/// Empty container mounted for the fighter widget; it fetches nothing
pub struct FighterPlaceholder;

#[async_trait]
impl View for FighterPlaceholder {
    fn tag(&self) -> &'static str {
        "fighter-detail"
    }

    async fn load(&mut self, ctx: &ViewContext<'_>) {
        debug!(
            "VIEW: Fighter widget is a placeholder (fighter id {:?})",
            ctx.options.fighter_id
        );
    }

    fn render(&self, _ctx: &ViewContext<'_>) -> Markup {
        html! { div.widget-container {} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_client::MockClient;
    use crate::types::Sport;
    use crate::views::testing::Harness;

    #[tokio::test]
    async fn test_player_card() {
        let h = Harness::new(Sport::Football, MockClient::new(), &[]);
        let mut view = PlayerDetailView::new("276".to_string());
        view.load(&h.ctx()).await;

        let html = view.render(&h.ctx()).into_string();
        assert!(html.contains("Player ID: 276"));
        assert!(h.mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_driver_card_is_localized() {
        let h = Harness::new(Sport::F1, MockClient::new(), &[("lang", "pt")]);
        let view = DriverDetailView::new("25".to_string());
        let html = view.render(&h.ctx()).into_string();
        assert!(html.contains("driver-detail"));
        assert!(html.contains(" ID: 25"));
    }

    #[tokio::test]
    async fn test_fighter_placeholder_fetches_nothing() {
        let h = Harness::new(Sport::Mma, MockClient::new(), &[("fighter-id", "9")]);
        let mut view = FighterPlaceholder;
        view.load(&h.ctx()).await;

        assert!(h.mock.requests().is_empty());
        assert_eq!(
            view.render(&h.ctx()).into_string(),
            "<div class=\"widget-container\"></div>"
        );
    }
}
