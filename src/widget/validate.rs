use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{Sport, WidgetType};

/// Recoverable configuration problems; the widget substitutes a default and carries on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("Please specify a sport")]
    InvalidSport { given: String },

    #[error("Please specify a valid widget type")]
    InvalidWidgetType { given: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub sport: Sport,
    pub widget_type: WidgetType,
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve sport and widget type, substituting defaults for unsupported values
///
/// An unsupported sport becomes football. An unsupported widget type becomes the
/// sport's default (`races` for f1, `fights` for mma, `games` otherwise).
pub fn validate(sport: &str, widget_type: &str) -> Validated {
    let mut warnings = Vec::new();

    let sport = match sport.parse::<Sport>() {
        Ok(sport) => sport,
        Err(_) => {
            warnings.push(ConfigWarning::InvalidSport {
                given: sport.to_string(),
            });
            Sport::Football
        }
    };

    let widget_type = match widget_type.parse::<WidgetType>() {
        Ok(widget_type) => widget_type,
        Err(_) => {
            warnings.push(ConfigWarning::InvalidWidgetType {
                given: widget_type.to_string(),
            });
            sport.default_widget_type()
        }
    };

    Validated {
        sport,
        widget_type,
        warnings,
    }
}

/// Log validation warnings; loudly only when errors are shown
pub fn report_warnings(warnings: &[ConfigWarning], show_error: bool) {
    for warning in warnings {
        if show_error {
            warn!("CONFIG: {} ({:?})", warning, warning);
        } else {
            debug!("CONFIG: {} ({:?})", warning, warning);
        }
    }
}
