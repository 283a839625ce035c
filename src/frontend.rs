mod background;
mod hero;
mod nav;
mod reveal;
mod sections;

use gloo::events::EventListener;
use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::content::{Profile, PROFILE};
use crate::icon::Icon;
use crate::parallax::hero_translation;
use crate::section::{Navigation, Section};

use background::SceneBackground;
use hero::HeroSection;
use nav::NavBar;
use sections::{AboutSection, ContactSection, ExperienceSection, ProjectsSection, SkillsSection};

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn current_scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Smooth-scrolls the region with `id` into view. A missing region is skipped.
fn scroll_to_region(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        log::debug!("no region with id `{id}`, scroll skipped");
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[derive(Properties, PartialEq)]
pub(crate) struct IconSvgProps {
    pub icon: Icon,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(IconSvg)]
pub(crate) fn icon_svg(props: &IconSvgProps) -> Html {
    html! {
        <svg
            class={classes!("icon", props.class.clone())}
            viewBox={Icon::VIEW_BOX}
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            { for props.icon.paths().iter().map(|d| html! { <path d={*d} /> }) }
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct PageViewProps {
    profile: Profile,
    navigation: Navigation,
    hero_shift: f64,
    on_navigate: Callback<Section>,
    background: Html,
}

/// Stateless layout: background layer, nav bar and every present section.
#[function_component(PageView)]
fn page_view(props: &PageViewProps) -> Html {
    let profile = props.profile;
    let on_navigate = &props.on_navigate;

    html! {
        <div class="page">
            { props.background.clone() }

            <NavBar
                brand={profile.brand}
                sections={profile.sections()}
                navigation={props.navigation}
                on_navigate={on_navigate.clone()}
            />

            <main class="page-content">
                <HeroSection
                    hero={profile.hero}
                    shift={props.hero_shift}
                    next={profile.next_section(Section::Home)}
                    on_navigate={on_navigate.clone()}
                />
                if let Some(about) = profile.about {
                    <AboutSection {about} />
                }
                <SkillsSection skills={profile.skills} />
                <ProjectsSection projects={profile.projects} />
                if let Some(entries) = profile.experience {
                    <ExperienceSection {entries} />
                }
                <ContactSection contact={profile.contact} name={profile.hero.name} />
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    profile: Profile,
}

#[function_component(Page)]
fn page(props: &PageProps) -> Html {
    let navigation = use_state(Navigation::default);
    let hero_shift = use_state_eq(|| hero_translation(current_scroll_y()));

    {
        let hero_shift = hero_shift.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "scroll", move |_| {
                    hero_shift.set(hero_translation(current_scroll_y()));
                })
            });
            move || drop(listener)
        });
    }

    let on_navigate = {
        let navigation = navigation.clone();
        Callback::from(move |section: Section| {
            let mut next = *navigation;
            let region = next.navigate(section);
            scroll_to_region(region);
            navigation.set(next);
        })
    };

    html! {
        <PageView
            profile={props.profile}
            navigation={*navigation}
            hero_shift={*hero_shift}
            {on_navigate}
            background={html! { <SceneBackground /> }}
        />
    }
}

#[function_component(App)]
fn app() -> Html {
    html! { <Page profile={PROFILE} /> }
}

#[cfg(target_arch = "wasm32")]
pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}

#[cfg(test)]
mod tests {
    use super::background::scene_layer;
    use super::*;

    async fn render_page(navigation: Navigation, scene_failed: bool) -> String {
        yew::ServerRenderer::<PageView>::with_props(move || PageViewProps {
            profile: PROFILE,
            navigation,
            hero_shift: 0.0,
            on_navigate: Callback::noop(),
            background: scene_layer(scene_failed, NodeRef::default()),
        })
        .hydratable(false)
        .render()
        .await
    }

    #[tokio::test]
    async fn failed_scene_leaves_nav_and_sections_in_place() {
        let html = render_page(Navigation::default(), true).await;

        assert!(!html.contains("scene-canvas"));
        assert!(html.contains("site-nav"));
        for section in PROFILE.sections() {
            assert!(html.contains(&format!("id=\"{}\"", section.id())), "{section:?}");
        }
    }

    #[tokio::test]
    async fn running_scene_sits_behind_the_page() {
        let html = render_page(Navigation::default(), false).await;

        let canvas = html.find("scene-canvas").expect("canvas rendered");
        let nav = html.find("site-nav").expect("nav rendered");
        assert!(canvas < nav);
    }

    #[tokio::test]
    async fn contact_navigation_highlights_only_contact() {
        let mut navigation = Navigation::default();
        navigation.navigate(Section::Contact);
        let html = render_page(navigation, true).await;

        assert_eq!(html.matches("is-active").count(), 1);
        assert_eq!(html.matches("aria-current=\"true\"").count(), 1);
        let start = html.find("is-active").expect("highlighted entry");
        let end = start + html[start..].find("</button>").expect("entry closes");
        assert!(html[start..end].contains("Contact"));
    }

    #[tokio::test]
    async fn nav_lists_present_sections_in_order() {
        let html = render_page(Navigation::default(), true).await;

        let positions: Vec<usize> = PROFILE
            .sections()
            .iter()
            .map(|section| {
                html.find(&format!(">{}</button>", section.label()))
                    .expect("nav entry rendered")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(html.contains("is-active"));
    }
}
