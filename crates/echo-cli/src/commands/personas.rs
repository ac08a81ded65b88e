use anyhow::Result;
use echo_application::AppContext;
use echo_core::persona::{AccessTier, Trait, band_label};

pub async fn run(context: &AppContext) -> Result<()> {
    let pro = context.trial().can_access_pro().await;

    for profile in context.catalog().iter() {
        let tier = match profile.tier {
            AccessTier::Free => "free",
            AccessTier::Premium if pro => "pro (unlocked)",
            AccessTier::Premium => "pro",
        };
        println!("{:<8} {} [{}]", profile.id, profile.name, tier);
        println!("         {}", profile.description);
        let traits: Vec<String> = Trait::ALL
            .iter()
            .map(|t| {
                let value = profile.traits.get(*t);
                format!("{} {} ({})", t.display_name(), value, band_label(*t, value))
            })
            .collect();
        println!("         {}", traits.join(", "));
        println!();
    }
    Ok(())
}
