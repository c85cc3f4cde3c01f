//! Demo fixture shown to first-time users

use resolver_domain::{Authority, Observations, SelfId, SelfModel};

/// User name set by the demo
pub const DEMO_USER: &str = "Demo User";

/// Notes seeded by the demo
pub const DEMO_NOTES: &str = "I see you're modeling Work Me and Parent Me. There seems to be \
some tension around time allocation. How does Work Me feel about Parent Me's need for presence?";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The two seeded selves, ids 1 and 2
///
/// Trusted data: it does not go through the gatekeeper.
pub fn demo_selves() -> Vec<SelfModel> {
    vec![
        SelfModel {
            id: SelfId::from_value(1),
            name: "Work Me".to_string(),
            observations: Observations {
                known: strings(&[
                    "I need to deliver on deadlines",
                    "I'm good at technical problem-solving",
                ]),
                knowable_1: strings(&["My team respects my input", "I could get promoted"]),
                knowable_2: strings(&["I might burn out", "Work-life balance is achievable"]),
            },
            authority: Authority::external("My Manager".to_string()),
        },
        SelfModel {
            id: SelfId::from_value(2),
            name: "Parent Me".to_string(),
            observations: Observations {
                known: strings(&["Kids need consistent attention", "I want to be present"]),
                knowable_1: strings(&["I'm a good dad", "Quality time matters most"]),
                knowable_2: strings(&["I sometimes feel guilty", "My kids will understand"]),
            },
            authority: Authority::self_directed(),
        },
    ]
}
