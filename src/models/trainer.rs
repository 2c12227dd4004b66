use serde::{Serialize, Deserialize};

pub type TrainerId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    pub bio: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Свободные слоты. Забронированный слот удаляется из списка навсегда.
    #[serde(default)]
    pub slots: Vec<String>,
}

impl Trainer {
    fn seed(id: TrainerId, name: &str, bio: &str, achievements: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            bio: bio.to_string(),
            achievements: achievements.iter().map(|a| a.to_string()).collect(),
            slots: default_slots(),
        }
    }
}

/// Часовые слоты с 08:00 до 20:00 включительно.
pub fn default_slots() -> Vec<String> {
    (8..=20).map(|hour| format!("{:02}:00", hour)).collect()
}

/// Каталог тренеров по умолчанию: используется при первом запуске и при пустом каталоге в файле.
pub fn default_trainers() -> Vec<Trainer> {
    vec![
        Trainer::seed(
            1,
            "Айдос Нуртаев",
            "Силовой тренинг, функциональная подготовка.",
            &["МС по пауэрлифтингу", "Победитель Almaty Open 2022"],
        ),
        Trainer::seed(
            2,
            "Алия Жаксылыкова",
            "Фитнес для женщин, послеродовое восстановление.",
            &["Сертифицированный персональный тренер NASM"],
        ),
        Trainer::seed(
            3,
            "Расул Абдрахман",
            "Бокс, ОФП, выносливость.",
            &["Чемпион РК среди юниоров по боксу"],
        ),
        Trainer::seed(
            4,
            "Динара Есмухан",
            "Йога, гибкость, дыхательные практики.",
            &["RYT-500 Yoga Alliance"],
        ),
        Trainer::seed(
            5,
            "Мади Бекен",
            "Кроссфит, снижение веса.",
            &["Сертифицированный тренер CrossFit L1"],
        ),
    ]
}
