use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::widget::Widget;

/// Periodically refresh a widget until a shutdown signal arrives
///
/// `on_render` runs after every refresh, typically to print the widget or drain its
/// events. On shutdown the widget is disconnected and handed back.
pub async fn refresh_loop<F>(
    mut widget: Widget,
    interval: Duration,
    mut shutdown_rx: mpsc::Receiver<()>,
    mut on_render: F,
) -> Widget
where
    F: FnMut(&mut Widget) + Send,
{
    if interval.is_zero() {
        warn!("BACKGROUND: Refresh disabled, not starting loop");
        widget.disconnect();
        return widget;
    }

    info!("BACKGROUND: Refreshing every {:?}", interval);
    let mut interval_timer = tokio::time::interval(interval);
    interval_timer.tick().await; // First tick completes immediately

    loop {
        tokio::select! {
            _ = interval_timer.tick() => {
                debug!("BACKGROUND: Tick");
                widget.refresh(false).await;
                on_render(&mut widget);
            }
            _ = shutdown_rx.recv() => {
                info!("BACKGROUND: Shutdown requested");
                break;
            }
        }
    }

    widget.disconnect();
    widget
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeSet;
    use crate::data_provider::VisibilityFlag;
    use crate::dev::mock_client::MockClient;
    use crate::endpoints::Endpoint;
    use std::sync::Arc;

    async fn games_widget(mock: &Arc<MockClient>) -> Widget {
        Widget::connect(
            AttributeSet::from_pairs([("sport", "football"), ("refresh", "15")]),
            None,
            mock.clone(),
            VisibilityFlag::default(),
        )
        .await
    }

    #[tokio::test]
    async fn test_zero_interval_returns_immediately() {
        let mock = Arc::new(MockClient::new());
        let widget = games_widget(&mock).await;
        let (_tx, rx) = mpsc::channel(1);

        let widget = refresh_loop(widget, Duration::ZERO, rx, |_| {}).await;

        assert!(widget.is_refresh_paused());
        assert_eq!(mock.request_count(Endpoint::Fixtures), 1);
    }

    #[tokio::test]
    async fn test_loop_refreshes_until_shutdown() {
        let mock = Arc::new(MockClient::new());
        let widget = games_widget(&mock).await;
        let (tx, rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            let mut renders = 0;
            let widget = refresh_loop(widget, Duration::from_millis(10), rx, |_| renders += 1).await;
            (widget, renders)
        });
        tokio::time::sleep(Duration::from_millis(55)).await;
        tx.send(()).await.unwrap();
        let (widget, renders) = handle.await.unwrap();

        assert!(renders >= 1);
        assert!(widget.is_refresh_paused());
        assert_eq!(mock.request_count(Endpoint::Fixtures), 1 + renders);
    }
}
