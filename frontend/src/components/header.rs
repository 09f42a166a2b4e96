use yew::prelude::*;

use crate::components::login::Login;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{ "Graph Agenda" }</h1>
                <nav>
                    <Login />
                </nav>
            </div>
        </header>
    }
}
