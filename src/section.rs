/// A named, scrollable region of the page. The set is fixed and ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Home,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Experience,
        Self::Contact,
    ];

    /// Element id of the region, also used as the nav entry key.
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Navigation state owned by the page: which entry is highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    active: Section,
}

impl Navigation {
    pub fn is_active(self, section: Section) -> bool {
        self.active == section
    }

    /// Activates `target` and returns the region id the viewport should scroll to.
    pub fn navigate(&mut self, target: Section) -> &'static str {
        self.active = target;
        target.id()
    }
}
