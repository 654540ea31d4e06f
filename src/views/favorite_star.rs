use maud::{html, Markup};

use super::ViewContext;
use crate::events::WidgetEvent;

/// Favorite toggle rendered after the main view when `favorite` is enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteStar {
    active: bool,
}

impl FavoriteStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) -> WidgetEvent {
        self.active = !self.active;
        WidgetEvent::FavoriteToggled {
            favorite: self.active,
        }
    }

    pub fn render(&self, ctx: &ViewContext<'_>) -> Markup {
        html! {
            button.favorite-star.active[self.active] type="button"
                aria-label=(ctx.t("toggle_favorite")) {
                @if self.active { "★" } @else { "☆" }
            }
        }
    }
}
