//! Static crisis resources and grounding techniques.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroundingTechnique {
    pub title: &'static str,
    pub description: &'static str,
}

pub fn crisis_resources() -> &'static [CrisisResource] {
    &[
        CrisisResource {
            name: "National Suicide Prevention Lifeline",
            contact: "988",
            description: "24/7 crisis support for people in suicidal crisis or emotional distress",
        },
        CrisisResource {
            name: "Crisis Text Line",
            contact: "Text HOME to 741741",
            description: "Free, 24/7 crisis support via text message",
        },
        CrisisResource {
            name: "SAMHSA National Helpline",
            contact: "1-800-662-4357",
            description: "Treatment referral and information service for mental health and substance abuse",
        },
        CrisisResource {
            name: "National Domestic Violence Hotline",
            contact: "1-800-799-7233",
            description: "Support for domestic violence survivors",
        },
    ]
}

pub fn grounding_techniques() -> &'static [GroundingTechnique] {
    &[
        GroundingTechnique {
            title: "5-4-3-2-1 Technique",
            description: "Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, 1 you taste",
        },
        GroundingTechnique {
            title: "Box Breathing",
            description: "Breathe in for 4, hold for 4, out for 4, hold for 4. Repeat.",
        },
        GroundingTechnique {
            title: "Cold Water",
            description: "Splash cold water on your face or hold ice cubes",
        },
        GroundingTechnique {
            title: "Reach Out",
            description: "Reach out to a trusted friend, family member, or counselor",
        },
    ]
}
