use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MedicationType {
    #[default]
    Tablet,
    Capsule,
    Syrup,
    Drops,
    Spray,
    Injection,
    Inhaler,
    Cream,
}

impl MedicationType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MedicationType::Tablet => "tablet",
            MedicationType::Capsule => "capsule",
            MedicationType::Syrup => "syrup",
            MedicationType::Drops => "drops",
            MedicationType::Spray => "spray",
            MedicationType::Injection => "injection",
            MedicationType::Inhaler => "inhaler",
            MedicationType::Cream => "cream",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "tablet" => Some(MedicationType::Tablet),
            "capsule" => Some(MedicationType::Capsule),
            "syrup" => Some(MedicationType::Syrup),
            "drops" => Some(MedicationType::Drops),
            "spray" => Some(MedicationType::Spray),
            "injection" => Some(MedicationType::Injection),
            "inhaler" => Some(MedicationType::Inhaler),
            "cream" => Some(MedicationType::Cream),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        MedicationType::from_db_str(&code.trim().to_lowercase())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MedicationType::Tablet => "Tablet",
            MedicationType::Capsule => "Capsule",
            MedicationType::Syrup => "Syrup",
            MedicationType::Drops => "Drops",
            MedicationType::Spray => "Spray",
            MedicationType::Injection => "Injection",
            MedicationType::Inhaler => "Inhaler",
            MedicationType::Cream => "Cream",
        }
    }

    /// Unit word for `count` doses of this type ("2 tablets", "1 puff").
    pub fn unit(&self, count: i32) -> &'static str {
        let one = count == 1;
        match self {
            MedicationType::Tablet => if one { "tablet" } else { "tablets" },
            MedicationType::Capsule => if one { "capsule" } else { "capsules" },
            MedicationType::Syrup => "ml",
            MedicationType::Drops => if one { "drop" } else { "drops" },
            MedicationType::Spray | MedicationType::Inhaler => if one { "puff" } else { "puffs" },
            MedicationType::Injection => if one { "injection" } else { "injections" },
            MedicationType::Cream => if one { "application" } else { "applications" },
        }
    }
}
