use anyhow::Result;
use echo_application::AppContext;
use echo_core::wellness::TimeWindow;

pub async fn run(context: &AppContext, window: TimeWindow, json: bool) -> Result<()> {
    let insights = context.wellness().insights(window).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("Insights for the last {} days", window.days());
    match &insights.mood_label {
        Some(label) => println!(
            "Average mood: {:.1} ({}), trend {:?}",
            insights.average_mood, label, insights.trend_direction
        ),
        None => println!("Average mood: no check-ins in this window"),
    }
    println!(
        "Check-ins: {}  Streak: {} day(s)  Conversations: {}  Insights: {}",
        insights.mood_entry_count,
        insights.check_in_streak,
        insights.conversation_count,
        insights.total_insights
    );

    println!();
    for achievement in &insights.achievements {
        let mark = if achievement.completed { "x" } else { " " };
        println!(
            "[{}] {} {}/{} ({:.0}%)",
            mark,
            achievement.title,
            achievement.progress,
            achievement.target,
            achievement.display_fraction * 100.0
        );
    }

    if !insights.recommendations.is_empty() {
        println!();
        for recommendation in &insights.recommendations {
            println!("* {}: {}", recommendation.title, recommendation.body);
        }
    }
    Ok(())
}
