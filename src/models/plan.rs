/// Абонементы из прайса. Оплата симулируется: выбор любого плана выдаёт право на запись.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Gold,
    Silver,
    Bronze,
    Student,
}

impl Plan {
    pub const ALL: [Plan; 4] = [Plan::Gold, Plan::Silver, Plan::Bronze, Plan::Student];

    pub fn code(&self) -> &'static str {
        match self {
            Plan::Gold => "gold",
            Plan::Silver => "silver",
            Plan::Bronze => "bronze",
            Plan::Student => "student",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.code() == code)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Plan::Gold => "Gold",
            Plan::Silver => "Silver",
            Plan::Bronze => "Bronze",
            Plan::Student => "Студенческий",
        }
    }

    /// Цена в тенге за месяц.
    pub fn monthly_price(&self) -> u32 {
        match self {
            Plan::Gold => 25_000,
            Plan::Silver => 18_000,
            Plan::Bronze => 12_000,
            Plan::Student => 9_000,
        }
    }
}

/// 25000 -> "25 000"
pub fn format_tenge(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
