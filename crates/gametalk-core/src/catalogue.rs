//! Default category catalogue
//!
//! Seeded into an empty store exactly once. Ids are fixed so that seeding
//! with replace-on-conflict can never duplicate a row.

use crate::model::Category;

/// (name, description, icon)
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 10] = [
    (
        "Acción y Aventura",
        "Discute juegos de acción, aventura y mundo abierto",
        "🎮",
    ),
    ("RPG", "Juegos de rol, RPGs japoneses y occidentales", "⚔️"),
    ("Shooters", "FPS, TPS y juegos de disparos competitivos", "🔫"),
    ("Estrategia", "RTS, TBS, 4X y juegos de estrategia", "🧠"),
    ("MOBA", "League of Legends, Dota 2 y otros MOBAs", "🏆"),
    ("Battle Royale", "Fortnite, PUBG, Apex Legends y más", "🎯"),
    ("Deportes", "FIFA, NBA, simuladores deportivos", "⚽"),
    ("Indie", "Juegos independientes y experimentales", "🎨"),
    ("Retro Gaming", "Juegos clásicos y nostalgia gamer", "👾"),
    ("E-Sports", "Competencias, torneos y gaming profesional", "🏅"),
];

/// The catalogue as rows, ids 1 through 10 in catalogue order
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .zip(1..)
        .map(|((name, description, icon), id)| Category::new(id, *name, *description, *icon))
        .collect()
}
