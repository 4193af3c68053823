/// A named color palette for the card.
///
/// Shades follow the Tailwind scale the themes are named after: a light
/// background wash, a slightly deeper backdrop for the avatar disc, and a
/// dark ink for the author line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub background: &'static str,
    pub backdrop: &'static str,
    pub ink: &'static str,
}

#[rustfmt::skip]
pub const PALETTES: &[Palette] = &[
    Palette { name: "slate",   background: "#e2e8f0", backdrop: "#cbd5e1", ink: "#475569" },
    Palette { name: "gray",    background: "#e5e7eb", backdrop: "#d1d5db", ink: "#4b5563" },
    Palette { name: "zinc",    background: "#e4e4e7", backdrop: "#d4d4d8", ink: "#52525b" },
    Palette { name: "neutral", background: "#e5e5e5", backdrop: "#d4d4d4", ink: "#525252" },
    Palette { name: "stone",   background: "#e7e5e4", backdrop: "#d6d3d1", ink: "#57534e" },
    Palette { name: "red",     background: "#fecaca", backdrop: "#fca5a5", ink: "#dc2626" },
    Palette { name: "orange",  background: "#fed7aa", backdrop: "#fdba74", ink: "#ea580c" },
    Palette { name: "amber",   background: "#fde68a", backdrop: "#fcd34d", ink: "#d97706" },
    Palette { name: "yellow",  background: "#fef08a", backdrop: "#fde047", ink: "#ca8a04" },
    Palette { name: "lime",    background: "#d9f99d", backdrop: "#bef264", ink: "#65a30d" },
    Palette { name: "green",   background: "#bbf7d0", backdrop: "#86efac", ink: "#16a34a" },
    Palette { name: "emerald", background: "#a7f3d0", backdrop: "#6ee7b7", ink: "#059669" },
    Palette { name: "teal",    background: "#99f6e4", backdrop: "#5eead4", ink: "#0d9488" },
    Palette { name: "cyan",    background: "#a5f3fc", backdrop: "#67e8f9", ink: "#0891b2" },
    Palette { name: "sky",     background: "#bae6fd", backdrop: "#7dd3fc", ink: "#0284c7" },
    Palette { name: "blue",    background: "#bfdbfe", backdrop: "#93c5fd", ink: "#2563eb" },
    Palette { name: "indigo",  background: "#c7d2fe", backdrop: "#a5b4fc", ink: "#4f46e5" },
    Palette { name: "violet",  background: "#ddd6fe", backdrop: "#c4b5fd", ink: "#7c3aed" },
    Palette { name: "purple",  background: "#e9d5ff", backdrop: "#d8b4fe", ink: "#9333ea" },
    Palette { name: "fuchsia", background: "#f5d0fe", backdrop: "#f0abfc", ink: "#c026d3" },
    Palette { name: "pink",    background: "#fbcfe8", backdrop: "#f9a8d4", ink: "#db2777" },
    Palette { name: "rose",    background: "#fecdd3", backdrop: "#fda4af", ink: "#e11d48" },
];

/// Find a palette by theme name. Unknown themes return `None`, which renders
/// the card with no wash, no backdrop disc, and default ink.
pub fn lookup(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|palette| palette.name.eq_ignore_ascii_case(name))
}
