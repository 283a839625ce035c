use yew::prelude::*;

use super::IconSvg;
use crate::content::Hero;
use crate::icon::Icon;
use crate::motion::{entrance_style, HERO_HEADING, HERO_PANEL, HERO_SUMMARY, HERO_TAGLINE};
use crate::parallax::translate_style;
use crate::section::Section;

#[derive(Properties, PartialEq)]
pub struct HeroSectionProps {
    pub hero: Hero,
    /// Parallax translation in pixels, owned by the page.
    pub shift: f64,
    #[prop_or_default]
    pub next: Option<Section>,
    pub on_navigate: Callback<Section>,
}

#[function_component(HeroSection)]
pub fn hero_section(props: &HeroSectionProps) -> Html {
    let hero = props.hero;
    let on_contact = props.on_navigate.reform(|_: MouseEvent| Section::Contact);

    html! {
        <section id={Section::Home.id()} class="section hero">
            <div class="hero-parallax" style={translate_style(props.shift)}>
                <div class="hero-panel glass entrance-rise" style={entrance_style(HERO_PANEL)}>
                    <h1 class="hero-name gradient-text entrance-grow" style={entrance_style(HERO_HEADING)}>
                        {hero.name}
                    </h1>
                    <p class="hero-tagline entrance-fade" style={entrance_style(HERO_TAGLINE)}>
                        {hero.tagline}
                    </p>
                    <p class="hero-summary entrance-fade" style={entrance_style(HERO_SUMMARY)}>
                        {hero.summary}
                    </p>
                    <div class="hero-actions entrance-fade" style={entrance_style(HERO_SUMMARY)}>
                        <a class="button button-primary" href={hero.resume_href} download="">
                            <IconSvg icon={Icon::Download} />
                            {"Download Resume"}
                        </a>
                        <button type="button" class="button button-ghost" onclick={on_contact}>
                            <IconSvg icon={Icon::Mail} />
                            {"Get in touch"}
                        </button>
                    </div>
                </div>
            </div>
            if let Some(next) = props.next {
                <button
                    type="button"
                    class="scroll-cue"
                    aria-label={format!("Scroll to {}", next.label())}
                    onclick={props.on_navigate.reform(move |_: MouseEvent| next)}
                >
                    <IconSvg icon={Icon::ChevronDown} />
                </button>
            }
        </section>
    }
}
