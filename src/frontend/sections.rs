use yew::prelude::*;

use super::reveal::{use_revealed, Reveal};
use super::IconSvg;
use crate::content::{About, Contact, ExperienceEntry, LinkTarget, Project, Skill};
use crate::icon::Icon;
use crate::motion::{bar_style, reveal_style, stagger_delay};
use crate::section::Section;

#[derive(Properties, PartialEq)]
struct SectionHeadingProps {
    title: AttrValue,
}

#[function_component(SectionHeading)]
fn section_heading(props: &SectionHeadingProps) -> Html {
    html! {
        <Reveal>
            <h2 class="section-title gradient-text">{props.title.clone()}</h2>
        </Reveal>
    }
}

fn tag_list(tags: &[&'static str]) -> Html {
    html! {
        <ul class="tag-list">
            { for tags.iter().map(|tag| html! { <li key={*tag} class="tag">{*tag}</li> }) }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct AboutSectionProps {
    pub about: About,
}

#[function_component(AboutSection)]
pub fn about_section(props: &AboutSectionProps) -> Html {
    let about = props.about;

    html! {
        <section id={Section::About.id()} class="section">
            <div class="section-inner">
                <SectionHeading title="About Me" />
                <div class="about-grid">
                    <Reveal class="glass about-bio">
                        { for about.paragraphs.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                    </Reveal>
                    <div class="highlight-grid">
                        { for about.highlights.iter().enumerate().map(|(index, highlight)| html! {
                            <Reveal key={highlight.label} class="glass highlight-card hover-lift" delay={stagger_delay(index)}>
                                <IconSvg icon={highlight.icon} class="highlight-icon" />
                                <div>
                                    <p class="highlight-label">{highlight.label}</p>
                                    <p class="highlight-value">{highlight.value}</p>
                                </div>
                            </Reveal>
                        }) }
                    </div>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct SkillCardProps {
    pub skill: Skill,
    pub index: usize,
}

#[function_component(SkillCard)]
pub fn skill_card(props: &SkillCardProps) -> Html {
    let skill = props.skill;
    let node = use_node_ref();
    let revealed = use_revealed(node.clone());
    let delay = stagger_delay(props.index);

    html! {
        <div
            ref={node}
            class="reveal glass skill-card hover-grow"
            style={reveal_style(revealed, delay)}
        >
            <div class="skill-badge" style={format!("background-color: {};", skill.color)}>
                {skill.initial().to_string()}
            </div>
            <h3 class="skill-name">{skill.name}</h3>
            <div
                class="skill-track"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow={skill.level.to_string()}
                aria-label={skill.name}
            >
                <div class="skill-fill" style={bar_style(skill.fill_fraction(), skill.color, revealed, delay)}></div>
            </div>
            <p class="skill-level">{format!("{}%", skill.level)}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SkillsSectionProps {
    pub skills: &'static [Skill],
}

#[function_component(SkillsSection)]
pub fn skills_section(props: &SkillsSectionProps) -> Html {
    html! {
        <section id={Section::Skills.id()} class="section">
            <div class="section-inner">
                <SectionHeading title="Technical Skills" />
                <div class="card-grid card-grid-4">
                    { for props.skills.iter().enumerate().map(|(index, skill)| html! {
                        <SkillCard key={skill.name} skill={*skill} {index} />
                    }) }
                </div>
            </div>
        </section>
    }
}

fn project_link(label: &'static str, icon: Icon, target: LinkTarget) -> Html {
    let external = target.is_external();

    html! {
        <a
            class="project-link"
            href={target.href()}
            target={external.then_some("_blank")}
            rel={external.then_some("noopener noreferrer")}
        >
            <IconSvg {icon} />
            {label}
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectCardProps {
    pub project: Project,
    pub index: usize,
}

#[function_component(ProjectCard)]
pub fn project_card(props: &ProjectCardProps) -> Html {
    let project = props.project;

    html! {
        <Reveal class="glass project-card hover-lift" delay={stagger_delay(props.index)}>
            <div class="project-icon" style={project.accent_style()}>
                <IconSvg icon={project.icon} />
            </div>
            <h3 class="project-title">{project.title}</h3>
            <p class="project-description">{project.description}</p>
            { tag_list(project.tech) }
            <div class="project-links">
                { project_link("Code", Icon::Github, project.repository) }
                { project_link("Live Demo", Icon::ExternalLink, project.demo) }
            </div>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectsSectionProps {
    pub projects: &'static [Project],
}

#[function_component(ProjectsSection)]
pub fn projects_section(props: &ProjectsSectionProps) -> Html {
    html! {
        <section id={Section::Projects.id()} class="section">
            <div class="section-inner">
                <SectionHeading title="Featured Projects" />
                <div class="card-grid card-grid-2">
                    { for props.projects.iter().enumerate().map(|(index, project)| html! {
                        <ProjectCard key={project.title} project={*project} {index} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExperienceSectionProps {
    pub entries: &'static [ExperienceEntry],
}

#[function_component(ExperienceSection)]
pub fn experience_section(props: &ExperienceSectionProps) -> Html {
    html! {
        <section id={Section::Experience.id()} class="section">
            <div class="section-inner">
                <SectionHeading title="Experience" />
                <ol class="timeline">
                    { for props.entries.iter().enumerate().map(|(index, entry)| html! {
                        <li key={entry.role} class="timeline-item">
                            <span class="timeline-marker"><IconSvg icon={entry.icon} /></span>
                            <Reveal class="glass timeline-card hover-slide" delay={stagger_delay(index)}>
                                <div class="timeline-header">
                                    <h3 class="timeline-role">{entry.role}</h3>
                                    <span class="timeline-period">
                                        <IconSvg icon={Icon::Calendar} />
                                        {entry.period}
                                    </span>
                                </div>
                                <p class="timeline-organization">{entry.organization}</p>
                                <p class="timeline-description">{entry.description}</p>
                                { tag_list(entry.tags) }
                            </Reveal>
                        </li>
                    }) }
                </ol>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub contact: Contact,
    pub name: AttrValue,
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let contact = props.contact;

    html! {
        <section id={Section::Contact.id()} class="section contact">
            <div class="section-inner">
                <SectionHeading title="Get In Touch" />
                <Reveal class="glass contact-panel">
                    <p class="contact-intro">{contact.intro}</p>
                    <a class="button button-primary" href={contact.mailto()}>
                        <IconSvg icon={Icon::Mail} />
                        {contact.email}
                    </a>
                    <div class="contact-links">
                        { for contact.links.iter().map(|link| html! {
                            <a
                                key={link.label}
                                class="contact-link hover-grow"
                                href={link.href}
                                target="_blank"
                                rel="noopener noreferrer"
                                aria-label={link.label}
                            >
                                <IconSvg icon={link.icon} />
                            </a>
                        }) }
                    </div>
                </Reveal>
                <footer class="site-footer">{format!("© {}", props.name)}</footer>
            </div>
        </section>
    }
}
