//! Sections of the landing page.

use std::fmt;
use std::str::FromStr;

/// A landing page section that the header links scroll to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// The hero section.
    Home,
    /// Feature overview.
    Services,
    /// About the company.
    About,
    /// Contact form.
    Contact,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Services,
        Section::About,
        Section::Contact,
    ];

    /// The element id of the section.
    #[inline]
    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Services => "services",
            Section::About => "about",
            Section::Contact => "contact",
        }
    }
}

impl fmt::Display for Section {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

/// Returned when parsing an id that names no section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSection(String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no section with id {:?}", self.0)
    }
}

impl std::error::Error for UnknownSection {}
