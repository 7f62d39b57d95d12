//! Display strings, looked up by language code.

use shared::domain::Region;

pub struct Labels {
    pub title: &'static str,
    pub loading: &'static str,
    pub question: &'static str,
    pub silhouette: &'static str,
    pub region: &'static str,
    pub region_name: fn(Region) -> &'static str,
    pub type_label: &'static str,
    pub height_label: &'static str,
    pub weight_label: &'static str,
    pub hint_playing: &'static str,
    pub hint_revealed: &'static str,
    pub total: &'static str,
    pub correct: &'static str,
    pub streak: &'static str,
    pub best_streak: &'static str,
    pub correct_title: &'static str,
    pub wrong_title: &'static str,
    pub correct_message: &'static str,
    pub wrong_message_prefix: &'static str,
    pub wrong_message_suffix: &'static str,
    pub new_round: &'static str,
    pub controls: &'static str,
    pub error_prefix: &'static str,
    pub retry: &'static str,
    pub unreachable: &'static str,
    pub exhausted: &'static str,
}

pub const EN: Labels = Labels {
    title: "Who's that Pokémon?",
    loading: "Loading a new challenger...",
    question: "Who's that Pokémon?",
    silhouette: "[ silhouette hidden ]",
    region: "Gen",
    region_name: Region::label,
    type_label: "Type",
    height_label: "Height",
    weight_label: "Weight",
    hint_playing: "Type /hint to reveal extra details without showing the name.",
    hint_revealed: "Every detail is unlocked.",
    total: "Rounds",
    correct: "Correct",
    streak: "Streak",
    best_streak: "Best streak",
    correct_title: "Correct!",
    wrong_title: "Incorrect!",
    correct_message: "You caught the answer and boosted your streak.",
    wrong_message_prefix: "It was ",
    wrong_message_suffix: ". Keep trying!",
    new_round: "Press Enter for a new round.",
    controls: "Type a guess, /hint, /giveup, /stats or /quit.",
    error_prefix: "Error",
    retry: "Press Enter to try again.",
    unreachable: "The catalog is unreachable; check your network and retry.",
    exhausted: "The catalog kept returning empty slots; retry for another draw.",
};

pub const ES: Labels = Labels {
    title: "¿Quién es ese Pokémon?",
    loading: "Cargando un nuevo rival...",
    question: "¿Quién es ese Pokémon?",
    silhouette: "[ silueta oculta ]",
    region: "Gen",
    region_name: spanish_region_name,
    type_label: "Tipo",
    height_label: "Altura",
    weight_label: "Peso",
    hint_playing: "Escribe /hint para revelar detalles sin mostrar el nombre.",
    hint_revealed: "Desbloqueaste todos los detalles.",
    total: "Intentos",
    correct: "Aciertos",
    streak: "Racha",
    best_streak: "Mejor racha",
    correct_title: "¡Correcto!",
    wrong_title: "¡Incorrecto!",
    correct_message: "Has atrapado la respuesta y subes tu racha.",
    wrong_message_prefix: "Era ",
    wrong_message_suffix: ". ¡No te rindas!",
    new_round: "Pulsa Enter para una nueva ronda.",
    controls: "Escribe un nombre, /hint, /giveup, /stats o /quit.",
    error_prefix: "Error",
    retry: "Pulsa Enter para reintentar.",
    unreachable: "No se puede contactar el catálogo; revisa la red y reintenta.",
    exhausted: "El catálogo devolvió huecos vacíos; reintenta para otro sorteo.",
};

fn spanish_region_name(region: Region) -> &'static str {
    match region {
        Region::Unova => "Teselia",
        other => other.label(),
    }
}

/// Unknown codes fall back to English.
pub fn for_language(code: &str) -> &'static Labels {
    match code.trim().to_ascii_lowercase().as_str() {
        "es" | "es-es" | "es-mx" => &ES,
        _ => &EN,
    }
}
