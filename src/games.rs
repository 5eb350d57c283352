// src/games.rs
//
// The fixed game table. Order is part of the contract: archive rows are
// matched by substring, and the first entry whose name occurs in the cell wins.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameDef {
    /// Display name; also the key in the output document.
    pub name: &'static str,
    /// Live endpoint code (`{code}Result`).
    pub code: &'static str,
    /// Fewer numbers than this and an archive row is not a draw.
    pub min_numbers: usize,
}

/// Precedence order for substring matching. Pick-style games (leading zeros
/// are legitimate draws) need at least three digits.
pub const GAMES: &[GameDef] = &[
    GameDef { name: "大樂透", code: "Lotto649", min_numbers: 2 },
    GameDef { name: "威力彩", code: "SuperLotto638", min_numbers: 2 },
    GameDef { name: "今彩539", code: "DailyCash", min_numbers: 2 },
    GameDef { name: "雙贏彩", code: "Lotto1224", min_numbers: 2 },
    GameDef { name: "3星彩", code: "3D", min_numbers: 3 },
    GameDef { name: "4星彩", code: "4D", min_numbers: 3 },
];

/// First game (table order) whose display name is contained in `cell`.
pub fn match_game(cell: &str) -> Option<&'static GameDef> {
    GAMES.iter().find(|g| cell.contains(g.name))
}

pub fn by_name(name: &str) -> Option<&'static GameDef> {
    GAMES.iter().find(|g| g.name == name)
}
