//! Hooks exposing provider state to components.

use shared::bridge::{provider_state, watch_provider_state};
use shared::{is_signed_in, ProviderState, SignInStateBridge};
use yew::prelude::*;

use crate::context::ProvidersContext;

#[hook]
pub fn use_providers() -> Option<ProvidersContext> {
    use_context::<ProvidersContext>()
}

/// Whether the global provider is signed in.
///
/// The first render already reflects the provider's state; afterwards the
/// component re-renders whenever the flag changes. Without a provider
/// context the flag stays `false`.
#[hook]
pub fn use_is_signed_in() -> bool {
    let context = use_providers();

    let signed_in = {
        let context = context.clone();
        use_state_eq(move || {
            context.map_or(false, |context| {
                is_signed_in(context.providers.global_provider().as_deref())
            })
        })
    };

    {
        let signed_in = signed_in.clone();
        use_effect_with(context, move |context| {
            let bridge = context.as_ref().map(|context| {
                SignInStateBridge::activate(&context.providers, move |value| signed_in.set(value))
            });

            move || {
                if let Some(bridge) = bridge {
                    bridge.deactivate();
                }
            }
        });
    }

    *signed_in
}

/// Lifecycle state of the global provider, `None` when there is none.
#[hook]
pub fn use_provider_state() -> Option<ProviderState> {
    let context = use_providers();

    let state = {
        let context = context.clone();
        use_state_eq(move || {
            context.and_then(|context| provider_state(context.providers.global_provider().as_deref()))
        })
    };

    {
        let state = state.clone();
        use_effect_with(context, move |context| {
            let subscription = context.as_ref().map(|context| {
                watch_provider_state(&context.providers, move |value| state.set(value))
            });

            move || drop(subscription)
        });
    }

    *state
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use shared::mock::MockProvider;
    use shared::{AuthConfig, Provider, Providers};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use wasm_bindgen_test::*;
    use yew::platform::time::sleep;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Clone, Default)]
    struct Renders(Rc<RefCell<Vec<bool>>>);

    impl PartialEq for Renders {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    #[derive(Properties, PartialEq)]
    struct RecorderProps {
        renders: Renders,
    }

    #[function_component(SignedInRecorder)]
    fn signed_in_recorder(props: &RecorderProps) -> Html {
        let signed_in = use_is_signed_in();
        props.renders.0.borrow_mut().push(signed_in);
        html! {}
    }

    #[derive(Properties, PartialEq)]
    struct HostProps {
        context: ProvidersContext,
        renders: Renders,
    }

    #[function_component(Host)]
    fn host(props: &HostProps) -> Html {
        html! {
            <ContextProvider<ProvidersContext> context={props.context.clone()}>
                <SignedInRecorder renders={props.renders.clone()} />
            </ContextProvider<ProvidersContext>>
        }
    }

    fn mount(providers: &Rc<Providers>, renders: &Renders) -> yew::AppHandle<Host> {
        let root = gloo::utils::document().create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();
        let props = HostProps {
            context: ProvidersContext::new(providers.clone(), AuthConfig::default()),
            renders: renders.clone(),
        };
        yew::Renderer::<Host>::with_root_and_props(root, props).render()
    }

    #[wasm_bindgen_test]
    async fn test_first_render_reflects_signed_in_provider() {
        let providers = Rc::new(Providers::new());
        let mock = Rc::new(MockProvider::signed_in());
        providers.set_global_provider(Some(mock.clone()));
        let renders = Renders::default();

        let handle = mount(&providers, &renders);
        sleep(Duration::ZERO).await;

        assert_eq!(*renders.0.borrow(), vec![true]);
        assert_eq!(providers.listener_count(), 1);

        mock.logout();
        sleep(Duration::ZERO).await;
        assert_eq!(renders.0.borrow().last(), Some(&false));

        handle.destroy();
        sleep(Duration::ZERO).await;
        assert_eq!(providers.listener_count(), 0);
    }

    #[wasm_bindgen_test]
    async fn test_unmount_stops_updates() {
        let providers = Rc::new(Providers::new());
        let mock = Rc::new(MockProvider::new());
        providers.set_global_provider(Some(mock.clone()));
        let renders = Renders::default();

        let handle = mount(&providers, &renders);
        sleep(Duration::ZERO).await;
        assert_eq!(*renders.0.borrow(), vec![false]);

        handle.destroy();
        sleep(Duration::ZERO).await;
        mock.login();
        sleep(Duration::ZERO).await;

        assert_eq!(*renders.0.borrow(), vec![false]);
        assert_eq!(providers.listener_count(), 0);
    }
}
