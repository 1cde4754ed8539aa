use std::fmt;

/// Averages at or above this are a strength
pub const STRONG_THRESHOLD: f64 = 4.2;
/// Averages at or above this (and below strong) are room for improvement
pub const MEDIUM_THRESHOLD: f64 = 2.8;

/// Qualitative bucket for an average rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Weak,
    Medium,
    Strong,
}

impl Level {
    /// Stable lowercase name, used in TSV output and styling
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Weak => "weak",
            Level::Medium => "medium",
            Level::Strong => "strong",
        }
    }

    /// Short Spanish label for display
    pub fn label(&self) -> &'static str {
        match self {
            Level::Weak => "Crítica",
            Level::Medium => "Mejorable",
            Level::Strong => "Fortaleza",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an average. Lower bounds are inclusive.
///
/// An average of 0 (nothing answered) lands in `Weak`; callers filter
/// unanswered categories out before classifying.
pub fn classify(average: f64) -> Level {
    if average >= STRONG_THRESHOLD {
        Level::Strong
    } else if average >= MEDIUM_THRESHOLD {
        Level::Medium
    } else {
        Level::Weak
    }
}

/// Recommendation shown next to a category result
pub fn advise(level: Level) -> &'static str {
    match level {
        Level::Strong => "Fortaleza actual. Mantén y documenta lo que funciona.",
        Level::Medium => "Zona de mejora. Pequeños ajustes aquí pueden tener gran impacto.",
        Level::Weak => "Área crítica. Requiere foco y decisiones estratégicas pronto.",
    }
}

/// Narrative for the overall diagnostic, banded with the same thresholds
pub fn overall_message(level: Level) -> &'static str {
    match level {
        Level::Strong => {
            "Tu negocio muestra una base sólida. Estás en fase de optimización y crecimiento."
        }
        Level::Medium => {
            "Tu negocio tiene elementos funcionando, pero hay áreas que requieren claridad y enfoque."
        }
        Level::Weak => {
            "Tu negocio está en fase frágil. Prioriza las áreas con puntuación más baja para estabilizar."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(4.2), Level::Strong);
        assert_eq!(classify(4.199999), Level::Medium);
        assert_eq!(classify(2.8), Level::Medium);
        assert_eq!(classify(2.799999), Level::Weak);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(5.0), Level::Strong);
        assert_eq!(classify(1.0), Level::Weak);
        assert_eq!(classify(0.0), Level::Weak);
    }

    #[test]
    fn test_advise_per_level() {
        assert!(advise(Level::Strong).starts_with("Fortaleza actual"));
        assert!(advise(Level::Medium).starts_with("Zona de mejora"));
        assert!(advise(Level::Weak).starts_with("Área crítica"));
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::Weak.to_string(), "weak");
        assert_eq!(Level::Medium.as_str(), "medium");
        assert_eq!(Level::Strong.as_str(), "strong");
    }
}
