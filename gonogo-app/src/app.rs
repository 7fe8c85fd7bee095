use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use gonogo_core::StimulusKind;
use gonogo_session::{SessionConfig, SessionStateMachine, SummaryStats, export, summarize};
use gonogo_timing::MonotonicTimer;
use rand::rngs::ThreadRng;

/// Terminal presentation layer. Owns the session for its lifetime and is
/// the only caller of the state machine, so the trial loop below is what
/// keeps `record_response` structurally valid.
pub struct App {
    session: SessionStateMachine<MonotonicTimer, ThreadRng>,
}

impl App {
    pub fn new() -> Self {
        let config = SessionConfig::default();
        let session = SessionStateMachine::new(config, MonotonicTimer::new(), rand::rng());
        Self { session }
    }

    pub fn run(mut self) -> Result<()> {
        println!("=== GO/NO-GO TASK ===");
        println!("Press g + Enter as fast as you can when you see GO.");
        println!("When you see NO-GO, do nothing and press Enter to continue.\n");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        while !self.session.is_done() {
            let Some(stimulus) = self.session.next_stimulus() else {
                break;
            };
            let (current, total) = self.session.progress();
            println!("Trial {current} / {total}");
            println!("{}", stimulus_banner(stimulus));
            print!("> ");
            io::stdout().flush()?;

            let responded = match lines.next() {
                Some(line) => is_go_press(&line?),
                // stdin closed: advance the remaining trials without responses
                None => false,
            };
            self.session.record_response(responded)?;
            println!();
        }

        let threshold = self.session.config().commission_alert_threshold;
        let stats = summarize(self.session.records(), threshold);
        self.print_summary(&stats);

        print!("\nSave raw data to {}? [y/N] ", export::EXPORT_FILE_NAME);
        io::stdout().flush()?;
        if let Some(line) = lines.next() {
            if line?.trim().eq_ignore_ascii_case("y") {
                let json = export::to_json(self.session.records())?;
                fs::write(export::EXPORT_FILE_NAME, json)?;
                println!("Raw data written to {}", export::EXPORT_FILE_NAME);
            }
        }

        Ok(())
    }

    fn print_summary(&self, stats: &SummaryStats) {
        let config = self.session.config();
        println!("=== TEST COMPLETE ===\n");
        println!("Performance summary");
        println!("  Total trials:          {}", config.total_trials);
        println!(
            "  Correct responses:     {} / {}",
            stats.total_correct, config.total_trials
        );
        println!("  Correct GO:            {}", stats.correct_go);
        println!("  Correct NO-GO:         {}", stats.correct_nogo);
        println!("  Commission errors:     {}", stats.commission_errors);
        println!("  Omission errors:       {}", stats.omission_errors);
        println!(
            "  Average reaction time: {:.2} ms",
            stats.avg_reaction_time_ms
        );
        println!(
            "  Commission error rate: {:.1}%",
            stats.commission_rate * 100.0
        );

        if stats.alert {
            println!(
                "\nWarning: commission error rate is above {:.0}%. This can be a sign of",
                config.commission_alert_threshold * 100.0
            );
            println!("impulse-control difficulty; consider a professional evaluation.");
        } else {
            println!("\nCommission error rate is within the typical range.");
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// A bare "g" (any case) counts as a GO press; anything else, including an
/// empty line, advances without a response.
fn is_go_press(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("g")
}

fn stimulus_banner(stimulus: StimulusKind) -> String {
    format!("    >>> {} <<<", stimulus.label())
}
