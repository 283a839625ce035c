use yew::prelude::*;

use crate::section::{Navigation, Section};

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub brand: AttrValue,
    pub sections: Vec<Section>,
    pub navigation: Navigation,
    pub on_navigate: Callback<Section>,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let entries = props.sections.iter().map(|&section| {
        let onclick = props.on_navigate.reform(move |_: MouseEvent| section);
        let is_active = props.navigation.is_active(section);

        html! {
            <button
                key={section.id()}
                type="button"
                class={classes!("nav-link", is_active.then_some("is-active"))}
                aria-current={is_active.then_some("true")}
                {onclick}
            >
                {section.label()}
            </button>
        }
    });

    html! {
        <nav class="site-nav">
            <div class="nav-inner">
                <div class="nav-brand gradient-text">{props.brand.clone()}</div>
                <div class="nav-links">
                    { for entries }
                </div>
            </div>
        </nav>
    }
}
