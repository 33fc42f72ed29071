//! Company catalog for the investment store.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u64,
}

pub const COMPANIES: &[Company] = &[
    Company {
        id: "pixel_power",
        name: "Pixel Power Inc.",
        description: "Invest in the future of pixelated energy solutions.",
        cost: 50,
    },
    Company {
        id: "code_crafters",
        name: "Code Crafters Guild",
        description: "Artisans of high-quality digital experiences.",
        cost: 75,
    },
    Company {
        id: "pomo_pro",
        name: "PomoPro Gadgets",
        description: "The leading manufacturer of productivity hardware.",
        cost: 100,
    },
];

pub fn company(id: &str) -> Option<&'static Company> {
    COMPANIES.iter().find(|c| c.id == id)
}
