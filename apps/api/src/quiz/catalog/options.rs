// Answer scales shared by the closed-form pools.

use crate::quiz::QuizOption;

fn scale(labels: [&str; 5]) -> Vec<QuizOption> {
    labels
        .iter()
        .zip(0u8..)
        .map(|(label, value)| QuizOption {
            label: label.to_string(),
            value,
        })
        .collect()
}

pub fn frequency() -> Vec<QuizOption> {
    scale([
        "Nunca",
        "Raramente",
        "Às vezes",
        "Frequentemente",
        "Quase sempre",
    ])
}

pub fn certainty() -> Vec<QuizOption> {
    scale([
        "Nunca",
        "Raramente",
        "Em alguns casos",
        "Na maioria",
        "Quase sempre",
    ])
}

pub fn time_to_calm() -> Vec<QuizOption> {
    scale([
        "Até 5 min",
        "5–15 min",
        "15–30 min",
        "30–60 min",
        "Mais de 60 min",
    ])
}

pub fn agreement() -> Vec<QuizOption> {
    scale([
        "Discordo totalmente",
        "Discordo",
        "Neutro",
        "Concordo",
        "Concordo totalmente",
    ])
}
