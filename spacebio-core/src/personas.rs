//! Persona registry: display names, descriptions and sample queries.

use crate::types::Persona;

/// Static description of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaProfile {
    pub id: Persona,
    pub name: &'static str,
    pub description: &'static str,
    pub sample_queries: [&'static str; 4],
}

impl PersonaProfile {
    /// Text before the first comma of the description, for compact headers.
    pub fn short_description(&self) -> &'static str {
        self.description
            .split(',')
            .next()
            .unwrap_or(self.description)
            .trim()
    }
}

const SCIENTIST: PersonaProfile = PersonaProfile {
    id: Persona::Scientist,
    name: "Scientist",
    description: "Deep research, methodology validation, finding contradictions",
    sample_queries: [
        "What are the molecular mechanisms of muscle atrophy in microgravity?",
        "How does space radiation affect DNA repair mechanisms?",
        "Which organisms show significant adaptations to microgravity?",
        "What are the effects of cosmic radiation on plant growth?",
    ],
};

const INVESTOR: PersonaProfile = PersonaProfile {
    id: Persona::Investor,
    name: "Investment Manager",
    description: "Identify commercial opportunities, assess technology readiness, spot trends",
    sample_queries: [
        "What are emerging commercial opportunities in space biology?",
        "Which research areas have shown growth in recent years?",
        "What technologies have terrestrial applications?",
        "What are the investment opportunities in space agriculture?",
    ],
};

const ARCHITECT: PersonaProfile = PersonaProfile {
    id: Persona::Architect,
    name: "Mission Architect",
    description: "Plan missions, assess risks, identify technical constraints",
    sample_queries: [
        "What are critical biological constraints for long-duration missions?",
        "Which countermeasures are most effective against space health issues?",
        "What life support requirements emerge from plant research?",
        "What are the radiation exposure limits for Mars missions?",
    ],
};

/// Look up the profile of a persona.
pub fn profile(persona: Persona) -> &'static PersonaProfile {
    match persona {
        Persona::Scientist => &SCIENTIST,
        Persona::Investor => &INVESTOR,
        Persona::Architect => &ARCHITECT,
    }
}

/// All profiles in landing-page order.
pub fn all_profiles() -> [&'static PersonaProfile; 3] {
    Persona::all().map(profile)
}
