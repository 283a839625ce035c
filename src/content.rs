use crate::icon::Icon;
use crate::section::Section;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
    pub color: &'static str,
}

impl Skill {
    pub const fn new(name: &'static str, level: u8, color: &'static str) -> Self {
        assert!(level <= 100, "skill level is a percentage");
        Self { name, level, color }
    }

    /// Share of the proficiency bar that is filled once shown.
    pub fn fill_fraction(&self) -> f64 {
        f64::from(self.level) / 100.0
    }

    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Link that may not be published yet; placeholders render as `#`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    Url(&'static str),
    Placeholder,
}

impl LinkTarget {
    pub fn href(self) -> &'static str {
        match self {
            Self::Url(url) => url,
            Self::Placeholder => "#",
        }
    }

    pub fn is_external(self) -> bool {
        matches!(self, Self::Url(url) if url.starts_with("http"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub gradient: (&'static str, &'static str),
    pub repository: LinkTarget,
    pub demo: LinkTarget,
    pub icon: Icon,
}

impl Project {
    pub fn accent_style(&self) -> String {
        let (from, to) = self.gradient;
        format!("background-image: linear-gradient(135deg, {from}, {to});")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub role: &'static str,
    pub organization: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub icon: Icon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub icon: Icon,
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct About {
    pub paragraphs: &'static [&'static str],
    pub highlights: &'static [Highlight],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hero {
    pub name: &'static str,
    pub tagline: &'static str,
    pub summary: &'static str,
    pub resume_href: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: Icon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub intro: &'static str,
    pub email: &'static str,
    pub links: &'static [ContactLink],
}

impl Contact {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// Everything the page renders. About and Experience are optional so a
/// shorter profile drops those regions and their nav entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    pub brand: &'static str,
    pub hero: Hero,
    pub about: Option<About>,
    pub skills: &'static [Skill],
    pub projects: &'static [Project],
    pub experience: Option<&'static [ExperienceEntry]>,
    pub contact: Contact,
}

impl Profile {
    pub fn sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| match section {
                Section::About => self.about.is_some(),
                Section::Experience => self.experience.is_some(),
                _ => true,
            })
            .collect()
    }

    /// Section following `section` among those present, if any.
    pub fn next_section(&self, section: Section) -> Option<Section> {
        let sections = self.sections();
        let position = sections.iter().position(|s| *s == section)?;
        sections.get(position + 1).copied()
    }
}

const SKILLS: &[Skill] = &[
    Skill::new("Java", 90, "#f89820"),
    Skill::new("Python", 70, "#3776ab"),
    Skill::new("SQL", 80, "#00618a"),
    Skill::new("JavaScript", 60, "#f7df1e"),
    Skill::new("React.js", 60, "#61dafb"),
    Skill::new("Machine Learning", 75, "#ff6b6b"),
    Skill::new("Data Science", 80, "#00d4aa"),
];

const PROJECTS: &[Project] = &[
    Project {
        title: "Water Quality Analysis & Prediction",
        description: "A data science project to analyze and predict water quality using Python and Kaggle datasets.",
        tech: &["Python", "Kaggle", "Data Science"],
        gradient: ("#3b82f6", "#0891b2"),
        repository: LinkTarget::Placeholder,
        demo: LinkTarget::Placeholder,
        icon: Icon::Brain,
    },
    Project {
        title: "Wellness Buddy App",
        description: "A full-stack wellness platform helping users track their habits, health, and goals with an interactive dashboard.",
        tech: &["React.js", "JavaScript", "Python", "SQL"],
        gradient: ("#22c55e", "#059669"),
        repository: LinkTarget::Placeholder,
        demo: LinkTarget::Url("https://frontend-vd6p.vercel.app/"),
        icon: Icon::Code,
    },
];

const EXPERIENCE: &[ExperienceEntry] = &[
    ExperienceEntry {
        role: "Data Science Projects",
        organization: "Independent",
        period: "2024 - Present",
        description: "Building end-to-end analysis and prediction pipelines on public datasets, from cleaning and feature work to model evaluation.",
        tags: &["Python", "Machine Learning", "Data Science"],
        icon: Icon::Cpu,
    },
    ExperienceEntry {
        role: "Full-Stack Developer",
        organization: "Wellness Buddy (team project)",
        period: "2024",
        description: "Designed the habit tracking dashboard and the SQL-backed API behind it.",
        tags: &["React.js", "JavaScript", "SQL"],
        icon: Icon::Briefcase,
    },
    ExperienceEntry {
        role: "B.Tech, Computer Science (Data Science)",
        organization: "Undergraduate program",
        period: "2022 - 2026",
        description: "Coursework in machine learning, databases, and computer vision.",
        tags: &["Java", "Python", "SQL"],
        icon: Icon::GraduationCap,
    },
];

const ABOUT: About = About {
    paragraphs: &[
        "I'm a computer science student specialising in data science, drawn to problems where models meet messy real-world data.",
        "Most of my time goes into machine learning and computer vision experiments, and into turning them into small products people can actually use.",
    ],
    highlights: &[
        Highlight {
            icon: Icon::GraduationCap,
            label: "Education",
            value: "B.Tech CSE - Data Science",
        },
        Highlight {
            icon: Icon::Brain,
            label: "Focus",
            value: "AI/ML & Computer Vision",
        },
        Highlight {
            icon: Icon::MapPin,
            label: "Location",
            value: "India",
        },
        Highlight {
            icon: Icon::Award,
            label: "Projects",
            value: "Data science & full-stack",
        },
    ],
};

const CONTACT: Contact = Contact {
    intro: "Open to internships, collaborations, and interesting data problems. Say hello.",
    email: "hello@example.com",
    links: &[
        ContactLink {
            label: "GitHub",
            href: "https://github.com/",
            icon: Icon::Github,
        },
        ContactLink {
            label: "LinkedIn",
            href: "https://www.linkedin.com/",
            icon: Icon::Linkedin,
        },
    ],
};

pub const PROFILE: Profile = Profile {
    brand: "Portfolio",
    hero: Hero {
        name: "Sai Siddhartha Bobbili",
        tagline: "B.Tech Student | CSE-DATA SCIENCE",
        summary: "Passionate about AI/ML, Computer Vision, and creating innovative solutions that bridge technology and real-world problems.",
        resume_href: "/resume.pdf",
    },
    about: Some(ABOUT),
    skills: SKILLS,
    projects: PROJECTS,
    experience: Some(EXPERIENCE),
    contact: CONTACT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_has_every_section() {
        assert_eq!(PROFILE.sections(), Section::ALL.to_vec());
    }

    #[test]
    fn optional_sections_drop_out_of_navigation() {
        let compact = Profile {
            about: None,
            experience: None,
            ..PROFILE
        };

        assert_eq!(
            compact.sections(),
            vec![Section::Home, Section::Skills, Section::Projects, Section::Contact]
        );
        assert_eq!(compact.next_section(Section::Home), Some(Section::Skills));
        assert_eq!(compact.next_section(Section::Contact), None);
        assert_eq!(compact.next_section(Section::About), None);
    }

    #[test]
    fn python_fills_seventy_percent() {
        let python = PROFILE
            .skills
            .iter()
            .find(|skill| skill.name == "Python")
            .expect("python is listed");

        assert_eq!(python.level, 70);
        assert!((python.fill_fraction() - 0.70).abs() < 1e-12);
        assert_eq!(
            crate::motion::bar_style(python.fill_fraction(), python.color, true, 0.0),
            format!("width: 70%; background-color: {}; transition-delay: 0.00s;", python.color)
        );
    }

    #[test]
    fn skill_levels_are_percentages() {
        assert!(PROFILE.skills.iter().all(|skill| skill.level <= 100));
        assert_eq!(Skill::new("Edge", 0, "#000").fill_fraction(), 0.0);
        assert_eq!(Skill::new("Edge", 100, "#000").fill_fraction(), 1.0);
    }

    #[test]
    fn skills_keep_authored_order() {
        let names: Vec<&str> = PROFILE.skills.iter().map(|skill| skill.name).collect();
        assert_eq!(
            names,
            [
                "Java",
                "Python",
                "SQL",
                "JavaScript",
                "React.js",
                "Machine Learning",
                "Data Science"
            ]
        );
    }

    #[test]
    fn placeholder_links_render_as_hash() {
        assert_eq!(LinkTarget::Placeholder.href(), "#");
        assert!(!LinkTarget::Placeholder.is_external());

        let demo = PROFILE.projects[1].demo;
        assert_eq!(demo.href(), "https://frontend-vd6p.vercel.app/");
        assert!(demo.is_external());
    }

    #[test]
    fn contact_builds_mailto() {
        assert_eq!(PROFILE.contact.mailto(), "mailto:hello@example.com");
    }

    #[test]
    fn initial_badge_uses_first_letter() {
        assert_eq!(SKILLS[4].initial(), 'R');
        assert_eq!(Skill::new("", 10, "#fff").initial(), '?');
    }
}
