use anyhow::Result;
use echo_core::breathing::BreathingTimer;
use std::time::Duration;

pub async fn run(cycles: u32, fast: bool) -> Result<()> {
    let mut timer = BreathingTimer::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last_phase = timer.phase();
    println!("{}", last_phase.cue());

    while timer.cycles_completed() < cycles {
        if !fast {
            ticker.tick().await;
        }
        let Some(phase) = timer.tick() else {
            break;
        };
        if phase != last_phase {
            println!("{}", phase.cue());
            last_phase = phase;
        }
    }

    timer.stop();
    println!(
        "Well done. {} cycle(s) in {} seconds.",
        timer.cycles_completed(),
        timer.elapsed()
    );
    Ok(())
}
