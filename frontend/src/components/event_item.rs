use shared::agenda::AgendaEntry;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EventItemProps {
    pub entry: AgendaEntry,
}

#[function_component(EventItem)]
pub fn event_item(props: &EventItemProps) -> Html {
    let entry = &props.entry;
    let event = &entry.event;
    let show_as = event.show_as.map(|show_as| show_as.as_str()).unwrap_or("busy");

    html! {
        <div class={classes!("event-item", format!("event-{}", show_as))}>
            <div class="event-time">{ entry.time_label() }</div>
            <div class="event-content">
                if let Some(link) = &event.web_link {
                    <a class="event-title" href={link.clone()} target="_blank" rel="noopener">
                        { event.title() }
                    </a>
                } else {
                    <div class="event-title">{ event.title() }</div>
                }
                if let Some(location) = event.location_name() {
                    <div class="event-location">{ location }</div>
                }
                if let Some(organizer) = event.organizer_name() {
                    <div class="event-organizer">{ organizer }</div>
                }
            </div>
        </div>
    }
}
