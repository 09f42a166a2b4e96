use std::rc::Rc;

use gloo_net::http::Request;
use shared::agenda::{sample_events, AgendaWindow};
use shared::api::{calendar_view_url, error_from_response, CalendarViewResponse, PREFER_UTC};
use shared::error::GraphResult;
use shared::models::Event;
use shared::{GraphError, Provider};

/// Stop following `@odata.nextLink` after this many pages.
const MAX_PAGES: usize = 10;

pub struct GraphService;

impl GraphService {
    /// Events in `window` for the given provider.
    ///
    /// Mock providers get canned events. A rejected token signs the provider
    /// out so the UI falls back to the sign-in control.
    pub async fn load_agenda(
        provider: Option<Rc<dyn Provider>>,
        window: AgendaWindow,
    ) -> GraphResult<Vec<Event>> {
        let provider = provider.ok_or(GraphError::NotSignedIn)?;
        if provider.is_mock() {
            return Ok(sample_events(&window));
        }

        let token = provider.access_token().ok_or(GraphError::NotSignedIn)?;
        let result = Self::calendar_view(&token, &window).await;

        if matches!(result, Err(GraphError::Unauthorized)) {
            tracing::warn!(provider = provider.name(), "Graph rejected the access token, signing out");
            provider.logout();
        }

        result
    }

    pub async fn calendar_view(token: &str, window: &AgendaWindow) -> GraphResult<Vec<Event>> {
        let mut events = Vec::new();
        let mut next = Some(calendar_view_url(window));
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == MAX_PAGES {
                tracing::warn!("Calendar view truncated after {} pages", MAX_PAGES);
                break;
            }
            pages += 1;

            let page = Self::get_page(token, &url).await?;
            events.extend(page.value);
            next = page.next_link;
        }

        tracing::debug!(events = events.len(), pages, "calendar view loaded");
        Ok(events)
    }

    async fn get_page(token: &str, url: &str) -> GraphResult<CalendarViewResponse> {
        let response = Request::get(url)
            .header("Authorization", &format!("Bearer {}", token))
            .header("Prefer", PREFER_UTC)
            .send()
            .await
            .map_err(|e| GraphError::Network(format!("{:?}", e)))?;

        let status = response.status();
        let ok = response.ok();
        let body = response
            .text()
            .await
            .map_err(|e| GraphError::Network(format!("{:?}", e)))?;

        if !ok {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| GraphError::Parse(e.to_string()))
    }
}
