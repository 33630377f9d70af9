//! Page switching.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Projects,
    Testimonials,
    Inquiries,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Projects => "Projects",
            Page::Testimonials => "Testimonials",
            Page::Inquiries => "Inquiries",
        }
    }

    pub fn all() -> &'static [Page] {
        &[Page::Projects, Page::Testimonials, Page::Inquiries]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Page> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> Page {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Page {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}
