use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::motion::reveal_style;

const VISIBLE_THRESHOLD: f64 = 0.1;

/// Observer that fires once, then disconnects. Dropping it disconnects too.
struct FirstVisibility {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl FirstVisibility {
    fn watch(element: &Element, on_visible: impl Fn() + 'static) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let visible = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());
                if visible {
                    observer.disconnect();
                    on_visible();
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBLE_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        observer.observe(element);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for FirstVisibility {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// True once `node` has scrolled into the viewport; stays true afterwards.
/// Without observer support the element counts as visible straight away.
#[hook]
pub fn use_revealed(node: NodeRef) -> bool {
    let revealed = use_state_eq(|| false);

    {
        let revealed = revealed.clone();
        use_effect_with(node, move |node| {
            let watch = node.cast::<Element>().and_then(|element| {
                let revealed = revealed.clone();
                FirstVisibility::watch(&element, move || revealed.set(true))
            });
            if watch.is_none() {
                revealed.set(true);
            }
            move || drop(watch)
        });
    }

    *revealed
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub delay: f64,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Fades and lifts its children in the first time they become visible.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let revealed = use_revealed(node.clone());

    html! {
        <div
            ref={node}
            class={classes!("reveal", props.class.clone())}
            style={reveal_style(revealed, props.delay)}
        >
            { props.children.clone() }
        </div>
    }
}
