use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, Utc};
use shared::agenda::{group_by_day, AgendaDay, AgendaWindow};
use yew::prelude::*;

use crate::components::event_item::EventItem;
use crate::hooks::use_providers;
use crate::services::graph::GraphService;

#[derive(Properties, PartialEq)]
pub struct AgendaProps {
    #[prop_or(shared::config::DEFAULT_AGENDA_DAYS)]
    pub days: u32,
}

/// Events of the signed-in user for the next `days` days.
#[function_component(Agenda)]
pub fn agenda(props: &AgendaProps) -> Html {
    let context = use_providers();
    let agenda_days = use_state(Vec::<AgendaDay>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let agenda_days = agenda_days.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with(props.days, move |days| {
            let window = AgendaWindow::starting_today(Utc::now(), *Local::now().offset(), *days);
            let provider = context.and_then(|context| context.providers.global_provider());

            let cancelled = Rc::new(Cell::new(false));

            loading.set(true);
            {
                let cancelled = cancelled.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = GraphService::load_agenda(provider, window).await;
                    if cancelled.get() {
                        tracing::debug!("Discarding agenda for a superseded window");
                        return;
                    }

                    match result {
                        Ok(events) => {
                            agenda_days.set(group_by_day(events, window.offset));
                            error.set(None);
                        }
                        Err(e) => {
                            tracing::error!("Failed to load agenda: {}", e);
                            error.set(Some(e.to_string()));
                        }
                    }
                    loading.set(false);
                });
            }

            move || cancelled.set(true)
        });
    }

    if *loading {
        return html! {
            <div class="agenda">
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            </div>
        };
    }

    if let Some(err) = &*error {
        return html! {
            <div class="agenda">
                <p class="error">{ err }</p>
            </div>
        };
    }

    if agenda_days.is_empty() {
        return html! {
            <div class="agenda">
                <div class="empty-state">
                    <h2>{ "Nothing scheduled" }</h2>
                    <p>{ format!("No events in the next {} days.", props.days) }</p>
                </div>
            </div>
        };
    }

    html! {
        <div class="agenda">
            { for agenda_days.iter().map(|day| html! {
                <section class="agenda-day" key={day.date.to_string()}>
                    <h3 class="agenda-day-header">{ day.heading() }</h3>
                    { for day.entries.iter().map(|entry| html! {
                        <EventItem key={entry.event.id.clone()} entry={entry.clone()} />
                    })}
                </section>
            })}
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::context::ProvidersContext;
    use shared::mock::MockProvider;
    use shared::{AuthConfig, Providers};
    use std::time::Duration;
    use wasm_bindgen_test::*;
    use yew::platform::time::sleep;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Properties, PartialEq)]
    struct HostProps {
        context: ProvidersContext,
        days: u32,
    }

    #[function_component(Host)]
    fn host(props: &HostProps) -> Html {
        html! {
            <ContextProvider<ProvidersContext> context={props.context.clone()}>
                <Agenda days={props.days} />
            </ContextProvider<ProvidersContext>>
        }
    }

    #[wasm_bindgen_test]
    async fn test_changed_window_replaces_pending_load() {
        let providers = Rc::new(Providers::new());
        providers.set_global_provider(Some(Rc::new(MockProvider::signed_in())));
        let context = ProvidersContext::new(providers, AuthConfig::default());

        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        let mut handle = yew::Renderer::<Host>::with_root_and_props(
            root.clone(),
            HostProps {
                context: context.clone(),
                days: 1,
            },
        )
        .render();
        handle.update(HostProps { context, days: 2 });
        sleep(Duration::ZERO).await;
        sleep(Duration::ZERO).await;

        let headings = root.inner_html().matches("agenda-day-header").count();
        assert_eq!(headings, 2);

        handle.destroy();
    }
}
