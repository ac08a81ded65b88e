use anyhow::Result;
use echo_application::AppContext;
use echo_core::mood::MoodSubmission;

pub async fn record(context: &AppContext, submission: MoodSubmission) -> Result<()> {
    let entry = context
        .wellness()
        .submit_mood(submission)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!(
        "Recorded mood {} (energy {}, anxiety {}, sleep {})",
        entry.mood, entry.energy, entry.anxiety, entry.sleep
    );
    if !entry.tags.is_empty() {
        println!("Tags: {}", entry.tags.join(", "));
    }
    Ok(())
}

pub async fn history(context: &AppContext, limit: usize) -> Result<()> {
    let entries = context.wellness().recent_entries(limit).await;
    if entries.is_empty() {
        println!("No check-ins yet.");
        return Ok(());
    }
    for entry in entries {
        let note = if entry.note.is_empty() {
            String::new()
        } else {
            format!(" - {}", entry.note)
        };
        println!(
            "{}  mood {}  energy {}  anxiety {}  sleep {}{}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.mood,
            entry.energy,
            entry.anxiety,
            entry.sleep,
            note
        );
    }
    Ok(())
}
