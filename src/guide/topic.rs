use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Aspect of the city the description should focus on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    #[default]
    #[serde(rename = "Cultura Local")]
    CulturaLocal,
    #[serde(rename = "Melhores Meses")]
    MelhoresMeses,
    #[serde(rename = "Gasto Médio Diário")]
    GastoMedioDiario,
    #[serde(rename = "Gastronomia")]
    Gastronomia,
}

impl Topic {
    /// Every topic, in the order the form lists them.
    pub const ALL: [Topic; 4] = [
        Topic::CulturaLocal,
        Topic::MelhoresMeses,
        Topic::GastoMedioDiario,
        Topic::Gastronomia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Topic::CulturaLocal => "Cultura Local",
            Topic::MelhoresMeses => "Melhores Meses",
            Topic::GastoMedioDiario => "Gasto Médio Diário",
            Topic::Gastronomia => "Gastronomia",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic: {0}")]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.label() == s.trim())
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}
