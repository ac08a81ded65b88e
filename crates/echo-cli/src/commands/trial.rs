use anyhow::Result;
use echo_application::AppContext;
use echo_core::entitlement::{EntitlementState, TrialStatus};

pub async fn start(context: &AppContext) -> Result<()> {
    let before = context.trial().status().await;
    let status = context
        .trial()
        .start_trial()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    if before.has_used_trial {
        println!("The free trial has already been used on this device.");
    }
    print_status(&status);
    Ok(())
}

pub async fn status(context: &AppContext) -> Result<()> {
    print_status(&context.trial().status().await);
    Ok(())
}

fn print_status(status: &TrialStatus) {
    match status.state {
        EntitlementState::NoTrialUsed => println!("Pro: not started (30-day free trial available)"),
        EntitlementState::TrialActive => println!(
            "Pro trial: active, {} day(s) remaining",
            status.days_remaining
        ),
        EntitlementState::TrialExpired => println!("Pro trial: expired"),
    }
}
